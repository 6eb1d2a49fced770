//! The [`Record`] trait shared by every persisted domain type.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HospitalError, ValidationError};
use crate::occupancy::{OccupantKind, RoomClaim};

/// A domain type stored in its own table and addressed by a typed id.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Typed identifier of the record.
    type Id: Copy
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + FromStr<Err = uuid::Error>
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Human-readable entity name used in error messages (e.g. `"Room"`).
    const NAME: &'static str;

    /// Set for record types that can hold a room.
    const OCCUPANT_KIND: Option<OccupantKind> = None;

    fn id(&self) -> Self::Id;

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] when an invariant fails.
    fn validate(&self) -> Result<(), HospitalError> {
        Ok(())
    }

    /// The room this record currently claims, if any.
    fn room_claim(&self) -> Option<RoomClaim> {
        None
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

pub(crate) fn check_email(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(email) if !email.contains('@') => Err(ValidationError::InvalidEmail(field)),
        _ => Ok(()),
    }
}
