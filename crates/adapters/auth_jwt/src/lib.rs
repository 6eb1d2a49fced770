//! # hospital-adapter-auth-jwt
//!
//! Credential adapter.
//!
//! ## Responsibilities
//! - Hash and verify passwords with Argon2id ([`Argon2Hasher`])
//! - Sign and verify HS256 access tokens ([`JwtCodec`])
//!
//! ## Dependency rule
//! Depends on `hospital-app` (for the `PasswordHasher` and `TokenCodec` ports)
//! and `hospital-domain`. Nothing depends on this adapter except the binary.

mod error;
mod jwt;
mod password;

pub use error::CredentialError;
pub use jwt::JwtCodec;
pub use password::Argon2Hasher;
