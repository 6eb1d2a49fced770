//! Facilities that occupy rooms: pharmacies, clinics and warehouses.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{ClinicId, PharmacyId, RoomId, WarehouseId};
use crate::occupancy::{OccupantKind, RoomClaim};
use crate::record::{Record, require_text};

fn claim(kind: OccupantKind, occupant_id: uuid::Uuid, room_id: Option<RoomId>) -> Option<RoomClaim> {
    room_id.map(|room_id| RoomClaim {
        room_id,
        kind,
        occupant_id,
    })
}

/// A pharmacy, optionally located in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: PharmacyId,
    pub name: String,
    pub room_id: Option<RoomId>,
}

impl Pharmacy {
    #[must_use]
    pub fn new(name: impl Into<String>, room_id: Option<RoomId>) -> Self {
        Self {
            id: PharmacyId::new(),
            name: name.into(),
            room_id,
        }
    }
}

impl Record for Pharmacy {
    type Id = PharmacyId;
    const NAME: &'static str = "Pharmacy";
    const OCCUPANT_KIND: Option<OccupantKind> = Some(OccupantKind::Pharmacy);

    fn id(&self) -> PharmacyId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }

    fn room_claim(&self) -> Option<RoomClaim> {
        claim(OccupantKind::Pharmacy, self.id.as_uuid(), self.room_id)
    }
}

/// A clinic (outpatient unit), optionally located in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub specialty: Option<String>,
    pub room_id: Option<RoomId>,
}

impl Clinic {
    #[must_use]
    pub fn new(name: impl Into<String>, room_id: Option<RoomId>) -> Self {
        Self {
            id: ClinicId::new(),
            name: name.into(),
            specialty: None,
            room_id,
        }
    }
}

impl Record for Clinic {
    type Id = ClinicId;
    const NAME: &'static str = "Clinic";
    const OCCUPANT_KIND: Option<OccupantKind> = Some(OccupantKind::Clinic);

    fn id(&self) -> ClinicId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }

    fn room_claim(&self) -> Option<RoomClaim> {
        claim(OccupantKind::Clinic, self.id.as_uuid(), self.room_id)
    }
}

/// A storage warehouse, optionally located in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub room_id: Option<RoomId>,
}

impl Warehouse {
    #[must_use]
    pub fn new(name: impl Into<String>, room_id: Option<RoomId>) -> Self {
        Self {
            id: WarehouseId::new(),
            name: name.into(),
            room_id,
        }
    }
}

impl Record for Warehouse {
    type Id = WarehouseId;
    const NAME: &'static str = "Warehouse";
    const OCCUPANT_KIND: Option<OccupantKind> = Some(OccupantKind::Warehouse);

    fn id(&self) -> WarehouseId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }

    fn room_claim(&self) -> Option<RoomClaim> {
        claim(OccupantKind::Warehouse, self.id.as_uuid(), self.room_id)
    }
}
