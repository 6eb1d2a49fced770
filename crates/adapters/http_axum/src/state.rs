//! Shared application state for axum handlers.

use std::sync::Arc;

use hospital_app::lifecycle::Lifecycle;
use hospital_app::ports::{HospitalStore, PasswordHasher, Repository, TokenCodec};
use hospital_app::services::auth_service::AuthService;
use hospital_app::services::record_service::RecordService;
use hospital_app::services::room_allocator::RoomAllocator;

/// Application state shared across all axum handlers.
///
/// Generic over the store, password hasher and token codec to avoid dynamic
/// dispatch. `Clone` is implemented manually so that only the store handle
/// and the `Arc` are cloned.
pub struct AppState<S, H, C> {
    /// Storage backend for every record.
    pub store: S,
    /// Registration, login and permission checks.
    pub auth: Arc<AuthService<S, H, C>>,
}

impl<S: Clone, H, C> Clone for AppState<S, H, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<S, H, C> AppState<S, H, C>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    /// Create a new application state; the auth service shares `store`.
    pub fn new(store: S, auth: AuthService<S, H, C>) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }

    /// CRUD service for records of type `T`.
    pub fn records<T>(&self) -> RecordService<T, S>
    where
        T: Lifecycle<S>,
        S: Repository<T>,
    {
        RecordService::new(self.store.clone())
    }

    /// Room availability checks.
    pub fn allocator(&self) -> RoomAllocator<S> {
        RoomAllocator::new(self.store.clone())
    }
}
