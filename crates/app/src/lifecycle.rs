//! Per-record rules that need the store: referenced records must exist,
//! occupants may only claim free rooms, occupied rooms cannot be removed.
//!
//! Pure field validation lives on [`Record::validate`]; this module only
//! covers what cannot be decided from the record alone.

use std::future::Future;

use hospital_domain::building::{Building, Floor};
use hospital_domain::error::{ConflictError, HospitalError};
use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
use hospital_domain::medicine::{Medicine, Supplier};
use hospital_domain::patient::Patient;
use hospital_domain::prescription::Prescription;
use hospital_domain::record::Record;
use hospital_domain::reservation::Reservation;
use hospital_domain::room::{Room, RoomType};
use hospital_domain::staff::{Doctor, Staff};

use crate::ports::{OccupancyRepository, Repository};
use crate::services::ensure_exists;
use crate::services::room_allocator::RoomAllocator;

/// Store-dependent checks run by the record service around writes.
pub trait Lifecycle<S: Sync>: Record {
    /// Called before create and update, after [`Record::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] naming a missing referenced
    /// record, or a conflict.
    fn check_references(&self, _store: &S) -> impl Future<Output = Result<(), HospitalError>> + Send {
        async { Ok(()) }
    }

    /// Called before delete, once the record is known to exist.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the record cannot be removed.
    fn check_removal(
        _id: Self::Id,
        _store: &S,
    ) -> impl Future<Output = Result<(), HospitalError>> + Send {
        async { Ok(()) }
    }
}

impl<S: Sync> Lifecycle<S> for Building {}
impl<S: Sync> Lifecycle<S> for RoomType {}
impl<S: Sync> Lifecycle<S> for Staff {}
impl<S: Sync> Lifecycle<S> for Patient {}
impl<S: Sync> Lifecycle<S> for Supplier {}

impl<S: Repository<Building> + Sync> Lifecycle<S> for Floor {
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        ensure_exists::<Building, _>(store, self.building_id).await
    }
}

impl<S> Lifecycle<S> for Room
where
    S: Repository<Floor> + Repository<RoomType> + OccupancyRepository + Sync,
{
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        ensure_exists::<Floor, _>(store, self.floor_id).await?;
        ensure_exists::<RoomType, _>(store, self.room_type_id).await
    }

    async fn check_removal(id: Self::Id, store: &S) -> Result<(), HospitalError> {
        if RoomAllocator::new(store).is_available(id).await? {
            Ok(())
        } else {
            Err(ConflictError::RoomOccupied { room_id: id }.into())
        }
    }
}

impl<S> Lifecycle<S> for Doctor
where
    S: Repository<Staff> + Repository<Clinic> + Sync,
{
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        ensure_exists::<Staff, _>(store, self.staff_id).await?;
        if let Some(clinic_id) = self.clinic_id {
            ensure_exists::<Clinic, _>(store, clinic_id).await?;
        }
        Ok(())
    }
}

impl<S> Lifecycle<S> for Medicine
where
    S: Repository<Supplier> + Repository<Pharmacy> + Sync,
{
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        if let Some(supplier_id) = self.supplier_id {
            ensure_exists::<Supplier, _>(store, supplier_id).await?;
        }
        if let Some(pharmacy_id) = self.pharmacy_id {
            ensure_exists::<Pharmacy, _>(store, pharmacy_id).await?;
        }
        Ok(())
    }
}

impl<S> Lifecycle<S> for Reservation
where
    S: Repository<Patient> + Repository<Doctor> + Repository<Room> + Sync,
{
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        ensure_exists::<Patient, _>(store, self.patient_id).await?;
        ensure_exists::<Doctor, _>(store, self.doctor_id).await?;
        if let Some(room_id) = self.room_id {
            ensure_exists::<Room, _>(store, room_id).await?;
        }
        Ok(())
    }
}

impl<S> Lifecycle<S> for Prescription
where
    S: Repository<Patient> + Repository<Doctor> + Repository<Medicine> + Sync,
{
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        ensure_exists::<Patient, _>(store, self.patient_id).await?;
        ensure_exists::<Doctor, _>(store, self.doctor_id).await?;
        ensure_exists::<Medicine, _>(store, self.medicine_id).await
    }
}

async fn check_claim<T, S>(record: &T, store: &S) -> Result<(), HospitalError>
where
    T: Record,
    S: OccupancyRepository + Repository<Room> + Sync,
{
    match record.room_claim() {
        Some(claim) => RoomAllocator::new(store).ensure_claimable(&claim).await,
        None => Ok(()),
    }
}

impl<S: OccupancyRepository + Repository<Room> + Sync> Lifecycle<S> for Pharmacy {
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        check_claim(self, store).await
    }
}

impl<S: OccupancyRepository + Repository<Room> + Sync> Lifecycle<S> for Clinic {
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        check_claim(self, store).await
    }
}

impl<S: OccupancyRepository + Repository<Room> + Sync> Lifecycle<S> for Warehouse {
    async fn check_references(&self, store: &S) -> Result<(), HospitalError> {
        check_claim(self, store).await
    }
}
