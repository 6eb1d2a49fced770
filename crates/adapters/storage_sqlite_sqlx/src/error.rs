//! Storage-specific error type wrapping sqlx errors, and the mapping of
//! constraint violations onto domain errors.

use hospital_domain::error::{ConflictError, HospitalError, NotFoundError, ValidationError};
use hospital_domain::occupancy::RoomClaim;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to (de)serialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for HospitalError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Constraint that made a statement fail, if any.
enum Violation {
    Unique,
    ForeignKey,
    Other,
}

fn violation(err: &sqlx::Error) -> Violation {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => Violation::Unique,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Violation::ForeignKey,
        _ => Violation::Other,
    }
}

/// Map a failed insert or update of `entity`.
///
/// Unique violations become [`ConflictError::Duplicate`], foreign-key
/// violations [`ValidationError::UnknownReference`].
pub(crate) fn write_error(err: sqlx::Error, entity: &'static str) -> HospitalError {
    match violation(&err) {
        Violation::Unique => ConflictError::Duplicate { entity }.into(),
        Violation::ForeignKey => ValidationError::UnknownReference { entity }.into(),
        Violation::Other => StorageError::from(err).into(),
    }
}

/// Map a failed delete of `entity`: a foreign-key violation means another
/// row still points at it.
pub(crate) fn delete_error(err: sqlx::Error, entity: &'static str) -> HospitalError {
    match violation(&err) {
        Violation::ForeignKey => ConflictError::StillReferenced { entity }.into(),
        _ => StorageError::from(err).into(),
    }
}

/// Map a failed room-claim insert: a unique violation means the room is
/// held by someone else, a foreign-key violation that the room is gone.
pub(crate) fn claim_error(err: sqlx::Error, claim: &RoomClaim) -> HospitalError {
    match violation(&err) {
        Violation::Unique => ConflictError::RoomOccupied {
            room_id: claim.room_id,
        }
        .into(),
        Violation::ForeignKey => NotFoundError {
            entity: "Room",
            id: claim.room_id.to_string(),
        }
        .into(),
        Violation::Other => StorageError::from(err).into(),
    }
}
