//! Back-office users and the claims carried by their access tokens.

use serde::{Deserialize, Serialize};

use crate::error::{HospitalError, ValidationError};
use crate::id::UserId;
use crate::permission;
use crate::record::{Record, require_text};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A user allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-formatted password hash; never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub permissions: Vec<String>,
}

impl User {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            permissions,
        }
    }

    /// Whether the user holds a permission covering `required`.
    #[must_use]
    pub fn can(&self, required: &str) -> bool {
        permission::any_grants(&self.permissions, required)
    }
}

impl Record for User {
    type Id = UserId;
    const NAME: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("username", &self.username)?;
        validate_permissions(&self.permissions)?;
        Ok(())
    }
}

/// Check a plaintext password before hashing it.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordTooShort`] below [`MIN_PASSWORD_LEN`].
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Check every permission of a set.
///
/// # Errors
///
/// Returns the first [`ValidationError::InvalidPermission`] found.
pub fn validate_permissions(permissions: &[String]) -> Result<(), ValidationError> {
    permissions.iter().try_for_each(|p| permission::validate(p))
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id.
    pub sub: UserId,
    pub username: String,
    pub permissions: Vec<String>,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl AccessClaims {
    #[must_use]
    pub fn can(&self, required: &str) -> bool {
        permission::any_grants(&self.permissions, required)
    }
}
