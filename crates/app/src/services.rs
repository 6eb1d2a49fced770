//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod auth_service;
pub mod record_service;
pub mod room_allocator;

use hospital_domain::error::{HospitalError, NotFoundError};
use hospital_domain::record::Record;

use crate::ports::Repository;

/// Fail with [`HospitalError::NotFound`] unless a `P` with `id` exists.
///
/// # Errors
///
/// Returns [`HospitalError::NotFound`] naming `P`, or a storage error.
pub async fn ensure_exists<P, S>(store: &S, id: P::Id) -> Result<(), HospitalError>
where
    P: Record,
    S: Repository<P> + Sync,
{
    match store.get_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(NotFoundError {
            entity: P::NAME,
            id: id.to_string(),
        }
        .into()),
    }
}
