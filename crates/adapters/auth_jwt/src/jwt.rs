//! HS256 JSON Web Token implementation of [`TokenCodec`].

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use hospital_app::ports::TokenCodec;
use hospital_domain::error::{AuthError, HospitalError};
use hospital_domain::user::AccessClaims;

use crate::error::CredentialError;

/// Signs and verifies tokens with a shared secret.
///
/// Expiry is checked on decode with the library's default leeway of 60
/// seconds.
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec").finish_non_exhaustive()
    }
}

impl TokenCodec for JwtCodec {
    fn encode(&self, claims: &AccessClaims) -> Result<String, HospitalError> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(CredentialError::from)?;
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<AccessClaims, HospitalError> {
        decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected access token");
                AuthError::InvalidToken.into()
            })
    }
}
