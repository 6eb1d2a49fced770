//! Rooms and room types.
//!
//! A room does not know who occupies it; occupancy lives on the occupant
//! side (see [`crate::occupancy`]).

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{FloorId, RoomId, RoomTypeId};
use crate::record::{Record, require_text};

/// A category of room (operating theatre, ward, storage, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: RoomTypeId,
    pub name: String,
}

impl RoomType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoomTypeId::new(),
            name: name.into(),
        }
    }
}

impl Record for RoomType {
    type Id = RoomTypeId;
    const NAME: &'static str = "RoomType";

    fn id(&self) -> RoomTypeId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }
}

/// A room located on a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub floor_id: FloorId,
    pub room_type_id: RoomTypeId,
}

impl Room {
    #[must_use]
    pub fn new(name: impl Into<String>, floor_id: FloorId, room_type_id: RoomTypeId) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            floor_id,
            room_type_id,
        }
    }
}

impl Record for Room {
    type Id = RoomId;
    const NAME: &'static str = "Room";

    fn id(&self) -> RoomId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }
}
