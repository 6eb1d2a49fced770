//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HospitalError`] via `#[from]`.

use crate::id::RoomId;

/// Top-level error returned by every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    #[error("authentication error")]
    Auth(#[from] AuthError),

    /// Opaque failure from a storage adapter.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),

    /// Failure in a non-storage adapter (password hashing, token signing).
    #[error("internal error")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

/// A record failed its domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} is not a valid e-mail address")]
    InvalidEmail(&'static str),

    #[error("end of the period must be after its start")]
    InvalidPeriod,

    #[error("password must contain at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("invalid permission {0:?}")]
    InvalidPermission(String),

    #[error("invalid identifier {0:?}")]
    InvalidId(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("{entity} references a record that does not exist")]
    UnknownReference { entity: &'static str },
}

/// A looked-up record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A write would break a uniqueness or referential rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("room {room_id} is already occupied")]
    RoomOccupied { room_id: RoomId },

    #[error("{entity} already exists")]
    Duplicate { entity: &'static str },

    #[error("{entity} is still referenced by other records")]
    StillReferenced { entity: &'static str },
}

/// Token issuance and permission checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("permission {permission:?} required")]
    Forbidden { permission: String },
}
