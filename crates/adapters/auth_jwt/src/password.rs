//! Argon2id implementation of [`PasswordHasher`].

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use hospital_app::ports::PasswordHasher;
use hospital_domain::error::HospitalError;

use crate::error::CredentialError;

/// Argon2id with default parameters and a random salt per password.
/// Hashes are stored in PHC string format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HospitalError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(CredentialError::from)?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HospitalError> {
        let parsed = PasswordHash::new(hash).map_err(CredentialError::from)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
