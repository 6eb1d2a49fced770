//! Credential ports — password hashing and access-token encoding.
//!
//! Both are CPU-bound, so the methods are synchronous.

use hospital_domain::error::HospitalError;
use hospital_domain::user::AccessClaims;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Internal`] if hashing fails.
    fn hash(&self, password: &str) -> Result<String, HospitalError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Internal`] if `hash` cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HospitalError>;
}

/// Signs and checks bearer tokens.
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` into a token.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Internal`] if signing fails.
    fn encode(&self, claims: &AccessClaims) -> Result<String, HospitalError>;

    /// Verify signature and expiry, then return the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`](hospital_domain::error::AuthError::InvalidToken)
    /// for tampered, malformed or expired tokens.
    fn decode(&self, token: &str) -> Result<AccessClaims, HospitalError>;
}
