//! Buildings and their floors.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{BuildingId, FloorId};
use crate::record::{Record, require_text};

/// A hospital building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: Option<String>,
}

impl Building {
    /// Create a builder for constructing a [`Building`].
    #[must_use]
    pub fn builder() -> BuildingBuilder {
        BuildingBuilder::default()
    }
}

impl Record for Building {
    type Id = BuildingId;
    const NAME: &'static str = "Building";

    fn id(&self) -> BuildingId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }
}

/// Step-by-step builder for [`Building`].
#[derive(Debug, Default)]
pub struct BuildingBuilder {
    id: Option<BuildingId>,
    name: Option<String>,
    address: Option<String>,
}

impl BuildingBuilder {
    #[must_use]
    pub fn id(mut self, id: BuildingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Consume the builder, validate, and return a [`Building`].
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Building, HospitalError> {
        let building = Building {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            address: self.address,
        };
        building.validate()?;
        Ok(building)
    }
}

/// A floor of a [`Building`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub building_id: BuildingId,
    /// Level number; negative for basements.
    pub number: i64,
    pub name: String,
}

impl Floor {
    #[must_use]
    pub fn new(building_id: BuildingId, number: i64, name: impl Into<String>) -> Self {
        Self {
            id: FloorId::new(),
            building_id,
            number,
            name: name.into(),
        }
    }
}

impl Record for Floor {
    type Id = FloorId;
    const NAME: &'static str = "Floor";

    fn id(&self) -> FloorId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        Ok(())
    }
}
