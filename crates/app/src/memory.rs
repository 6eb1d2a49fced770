//! In-memory store used by the service tests.
//!
//! Mirrors the guarantees of the real storage adapter that the services rely
//! on: room claims are exclusive and updates or deletes of missing records
//! fail.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use hospital_domain::building::{Building, Floor};
use hospital_domain::error::{ConflictError, HospitalError, NotFoundError};
use hospital_domain::id::RoomId;
use hospital_domain::occupancy::RoomClaim;
use hospital_domain::record::Record;
use hospital_domain::user::User;

use crate::ports::{ChildRepository, OccupancyRepository, Repository, UserRepository};

#[derive(Default)]
struct Inner {
    tables: HashMap<TypeId, Box<dyn Any + Send>>,
    claims: HashMap<RoomId, RoomClaim>,
}

impl Inner {
    fn table<T: Record>(&mut self) -> &mut HashMap<T::Id, T> {
        self.tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(HashMap::<T::Id, T>::new()))
            .downcast_mut()
            .expect("table registered under its own type id")
    }

    fn claim(&mut self, claim: Option<RoomClaim>) -> Result<(), HospitalError> {
        let Some(claim) = claim else {
            return Ok(());
        };
        if let Some(held) = self.claims.get(&claim.room_id) {
            if !held.same_occupant(&claim) {
                return Err(ConflictError::RoomOccupied {
                    room_id: claim.room_id,
                }
                .into());
            }
        }
        self.claims.insert(claim.room_id, claim);
        Ok(())
    }

    fn release(&mut self, claim: Option<RoomClaim>) {
        if let Some(claim) = claim {
            self.claims.remove(&claim.room_id);
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

fn not_found<T: Record>(id: T::Id) -> HospitalError {
    NotFoundError {
        entity: T::NAME,
        id: id.to_string(),
    }
    .into()
}

impl<T: Record> Repository<T> for MemoryStore {
    fn create(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result = if inner.table::<T>().contains_key(&record.id()) {
            Err(ConflictError::Duplicate { entity: T::NAME }.into())
        } else {
            inner.claim(record.room_claim()).map(|()| {
                inner.table::<T>().insert(record.id(), record.clone());
                record
            })
        };
        async move { result }
    }

    fn get_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result = inner.table::<T>().get(&id).cloned();
        async move { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result: Vec<T> = inner.table::<T>().values().cloned().collect();
        async move { Ok(result) }
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result = match inner.table::<T>().get(&record.id()).cloned() {
            None => Err(not_found::<T>(record.id())),
            Some(previous) => {
                inner.release(previous.room_claim());
                match inner.claim(record.room_claim()) {
                    Ok(()) => {
                        inner.table::<T>().insert(record.id(), record.clone());
                        Ok(record)
                    }
                    Err(err) => {
                        // put the previous claim back
                        let _ = inner.claim(previous.room_claim());
                        Err(err)
                    }
                }
            }
        };
        async move { result }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result = match inner.table::<T>().remove(&id) {
            Some(previous) => {
                inner.release(previous.room_claim());
                Ok(())
            }
            None => Err(not_found::<T>(id)),
        };
        async move { result }
    }
}

impl OccupancyRepository for MemoryStore {
    fn find_claim(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomClaim>, HospitalError>> + Send {
        let inner = self.inner.lock().unwrap();
        let result = inner.claims.get(&room_id).copied();
        async move { Ok(result) }
    }
}

impl ChildRepository<Floor, Building> for MemoryStore {
    fn find_by_parent(
        &self,
        parent_id: <Building as Record>::Id,
    ) -> impl Future<Output = Result<Vec<Floor>, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result: Vec<Floor> = inner
            .table::<Floor>()
            .values()
            .filter(|floor| floor.building_id == parent_id)
            .cloned()
            .collect();
        async move { Ok(result) }
    }
}

impl UserRepository for MemoryStore {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, HospitalError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result = inner
            .table::<User>()
            .values()
            .find(|user| user.username == username)
            .cloned();
        async move { Ok(result) }
    }
}
