//! Which pharmacy, clinic or warehouse holds a room.
//!
//! A room is claimed by storing its id on the occupant. At most one occupant,
//! of any kind, may claim a given room.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::RoomId;

/// The kinds of record that can occupy a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantKind {
    Pharmacy,
    Clinic,
    Warehouse,
}

impl OccupantKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pharmacy => "pharmacy",
            Self::Clinic => "clinic",
            Self::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for OccupantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown occupant kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown occupant kind {0:?}")]
pub struct UnknownOccupantKind(pub String);

impl FromStr for OccupantKind {
    type Err = UnknownOccupantKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pharmacy" => Ok(Self::Pharmacy),
            "clinic" => Ok(Self::Clinic),
            "warehouse" => Ok(Self::Warehouse),
            other => Err(UnknownOccupantKind(other.to_string())),
        }
    }
}

/// A room held by an occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomClaim {
    pub room_id: RoomId,
    pub kind: OccupantKind,
    pub occupant_id: uuid::Uuid,
}

impl RoomClaim {
    /// Whether this claim and `other` belong to the same occupant.
    #[must_use]
    pub fn same_occupant(&self, other: &Self) -> bool {
        self.kind == other.kind && self.occupant_id == other.occupant_id
    }
}
