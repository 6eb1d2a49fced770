//! Storage ports — repository traits for persistence.

use std::future::Future;

use hospital_domain::building::{Building, Floor};
use hospital_domain::error::HospitalError;
use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
use hospital_domain::id::RoomId;
use hospital_domain::medicine::{Medicine, Supplier};
use hospital_domain::occupancy::RoomClaim;
use hospital_domain::patient::Patient;
use hospital_domain::prescription::Prescription;
use hospital_domain::record::Record;
use hospital_domain::reservation::Reservation;
use hospital_domain::room::{Room, RoomType};
use hospital_domain::staff::{Doctor, Staff};
use hospital_domain::user::User;

/// Repository for persisting and querying records of type `T`.
///
/// Implementations must persist a record's [`RoomClaim`] atomically with the
/// record itself, and reject a claim on a room already held by another
/// occupant with [`ConflictError::RoomOccupied`](hospital_domain::error::ConflictError::RoomOccupied).
pub trait Repository<T: Record> {
    /// Insert a new record.
    fn create(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send;

    /// Get all records.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send;

    /// Replace an existing record.
    ///
    /// Fails with [`HospitalError::NotFound`] when no record has the same id.
    fn update(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send;

    /// Delete a record, releasing any room it claims.
    ///
    /// Fails with [`HospitalError::NotFound`] when no record has this id.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send;
}

impl<T: Record, R: Repository<T> + Sync> Repository<T> for &R {
    fn create(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        (**self).create(record)
    }

    fn get_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send {
        (**self).get_all()
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        (**self).update(record)
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send {
        (**self).delete(id)
    }
}

/// Records of type `T` that reference a parent record of type `P`.
pub trait ChildRepository<T: Record, P: Record> {
    /// All `T` whose parent is `parent_id`.
    fn find_by_parent(
        &self,
        parent_id: P::Id,
    ) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send;
}

/// Read access to room claims, across every occupant kind.
pub trait OccupancyRepository {
    /// The claim currently held on `room_id`, if any.
    fn find_claim(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomClaim>, HospitalError>> + Send;
}

impl<O: OccupancyRepository + Sync> OccupancyRepository for &O {
    fn find_claim(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomClaim>, HospitalError>> + Send {
        (**self).find_claim(room_id)
    }
}

/// User storage with username lookup.
///
/// `create` must reject a duplicate username with
/// [`ConflictError::Duplicate`](hospital_domain::error::ConflictError::Duplicate).
pub trait UserRepository: Repository<User> {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, HospitalError>> + Send;
}

/// Everything the HTTP adapter needs from a single storage backend.
pub trait HospitalStore:
    Repository<Building>
    + Repository<Floor>
    + Repository<RoomType>
    + Repository<Room>
    + Repository<Staff>
    + Repository<Doctor>
    + Repository<Patient>
    + Repository<Pharmacy>
    + Repository<Clinic>
    + Repository<Warehouse>
    + Repository<Supplier>
    + Repository<Medicine>
    + Repository<Reservation>
    + Repository<Prescription>
    + ChildRepository<Floor, Building>
    + ChildRepository<Room, Floor>
    + ChildRepository<Medicine, Supplier>
    + ChildRepository<Medicine, Pharmacy>
    + ChildRepository<Reservation, Patient>
    + ChildRepository<Reservation, Doctor>
    + ChildRepository<Prescription, Patient>
    + ChildRepository<Prescription, Doctor>
    + OccupancyRepository
    + UserRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<S> HospitalStore for S where
    S: Repository<Building>
        + Repository<Floor>
        + Repository<RoomType>
        + Repository<Room>
        + Repository<Staff>
        + Repository<Doctor>
        + Repository<Patient>
        + Repository<Pharmacy>
        + Repository<Clinic>
        + Repository<Warehouse>
        + Repository<Supplier>
        + Repository<Medicine>
        + Repository<Reservation>
        + Repository<Prescription>
        + ChildRepository<Floor, Building>
        + ChildRepository<Room, Floor>
        + ChildRepository<Medicine, Supplier>
        + ChildRepository<Medicine, Pharmacy>
        + ChildRepository<Reservation, Patient>
        + ChildRepository<Reservation, Doctor>
        + ChildRepository<Prescription, Patient>
        + ChildRepository<Prescription, Doctor>
        + OccupancyRepository
        + UserRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
