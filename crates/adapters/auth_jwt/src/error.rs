//! Credential-specific errors.

use hospital_domain::error::HospitalError;

/// Failures from the hashing and signing libraries.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Hashing failed or a stored hash could not be parsed.
    #[error("password hash error")]
    PasswordHash(#[from] argon2::password_hash::Error),

    /// A token could not be signed.
    #[error("token signing error")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl From<CredentialError> for HospitalError {
    fn from(err: CredentialError) -> Self {
        Self::Internal(Box::new(err))
    }
}
