//! Record service — CRUD use-cases shared by every hospital record type.

use std::marker::PhantomData;

use hospital_domain::error::{HospitalError, NotFoundError};
use hospital_domain::record::Record;

use crate::lifecycle::Lifecycle;
use crate::ports::{ChildRepository, Repository};
use crate::services::ensure_exists;

/// Application service for CRUD operations on records of type `T`.
pub struct RecordService<T, S> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<T, S> RecordService<T, S>
where
    T: Lifecycle<S>,
    S: Repository<T> + Sync,
{
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Create a new record after validating it and its references.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] if invariants fail,
    /// [`HospitalError::NotFound`] if a referenced record is missing,
    /// [`HospitalError::Conflict`] if a claimed room is held by another
    /// occupant, or a storage error propagated from the repository.
    #[tracing::instrument(skip_all, fields(entity = T::NAME, id = %record.id()))]
    pub async fn create(&self, record: T) -> Result<T, HospitalError> {
        record.validate()?;
        record.check_references(&self.store).await?;
        let created = self.store.create(record).await?;
        tracing::debug!("record created");
        Ok(created)
    }

    /// Look up a record by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: T::Id) -> Result<T, HospitalError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: T::NAME,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all records.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<T>, HospitalError> {
        self.store.get_all().await
    }

    /// Replace an existing record.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create), plus [`HospitalError::NotFound`]
    /// when the record does not exist.
    #[tracing::instrument(skip_all, fields(entity = T::NAME, id = %record.id()))]
    pub async fn update(&self, record: T) -> Result<T, HospitalError> {
        record.validate()?;
        self.get(record.id()).await?;
        record.check_references(&self.store).await?;
        self.store.update(record).await
    }

    /// Delete a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when no record with `id` exists,
    /// [`HospitalError::Conflict`] when the record may not be removed, or a
    /// storage error.
    #[tracing::instrument(skip(self), fields(entity = T::NAME))]
    pub async fn delete(&self, id: T::Id) -> Result<(), HospitalError> {
        self.get(id).await?;
        T::check_removal(id, &self.store).await?;
        self.store.delete(id).await
    }

    /// Records whose parent of type `P` is `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when the parent does not exist, or
    /// a storage error.
    pub async fn list_by_parent<P>(&self, parent_id: P::Id) -> Result<Vec<T>, HospitalError>
    where
        P: Record,
        S: Repository<P> + ChildRepository<T, P>,
    {
        ensure_exists::<P, _>(&self.store, parent_id).await?;
        ChildRepository::<T, P>::find_by_parent(&self.store, parent_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use hospital_domain::building::{Building, Floor};
    use hospital_domain::error::{ConflictError, ValidationError};
    use hospital_domain::facility::{Clinic, Pharmacy};
    use hospital_domain::id::{BuildingId, FloorId, RoomId, RoomTypeId};
    use hospital_domain::room::{Room, RoomType};

    fn buildings(store: &MemoryStore) -> RecordService<Building, MemoryStore> {
        RecordService::new(store.clone())
    }

    fn main_building() -> Building {
        Building::builder().name("Main").build().unwrap()
    }

    async fn seeded_room(store: &MemoryStore) -> RoomId {
        let building = main_building();
        let floor = Floor::new(building.id, 0, "Ground");
        let room_type = RoomType::new("Office");
        let room = Room::new("R1", floor.id, room_type.id);
        let room_id = room.id;
        store.create(building).await.unwrap();
        store.create(floor).await.unwrap();
        store.create(room_type).await.unwrap();
        store.create(room).await.unwrap();
        room_id
    }

    #[tokio::test]
    async fn should_create_and_get_record() {
        let store = MemoryStore::default();
        let service = buildings(&store);
        let created = service.create(main_building()).await.unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_reject_invalid_record_on_create() {
        let store = MemoryStore::default();
        let service = buildings(&store);
        let mut building = main_building();
        building.name = "  ".to_string();

        let result = service.create(building).await;
        assert!(matches!(
            result,
            Err(HospitalError::Validation(ValidationError::EmptyField("name")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_record_missing() {
        let store = MemoryStore::default();
        let result = buildings(&store).get(BuildingId::new()).await;
        assert!(matches!(result, Err(HospitalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_records() {
        let store = MemoryStore::default();
        let service = buildings(&store);
        service.create(main_building()).await.unwrap();
        service
            .create(Building::builder().name("Annex").build().unwrap())
            .await
            .unwrap();

        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_update_existing_record() {
        let store = MemoryStore::default();
        let service = buildings(&store);
        let mut building = service.create(main_building()).await.unwrap();
        building.address = Some("1 Hospital Road".to_string());

        let updated = service.update(building).await.unwrap();
        assert_eq!(updated.address.as_deref(), Some("1 Hospital Road"));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_record() {
        let store = MemoryStore::default();
        let result = buildings(&store).update(main_building()).await;
        assert!(matches!(result, Err(HospitalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_record() {
        let store = MemoryStore::default();
        let service = buildings(&store);
        let building = service.create(main_building()).await.unwrap();

        service.delete(building.id).await.unwrap();
        assert!(service.get(building.id).await.is_err());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_record() {
        let store = MemoryStore::default();
        let result = buildings(&store).delete(BuildingId::new()).await;
        assert!(matches!(result, Err(HospitalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_floor_of_unknown_building() {
        let store = MemoryStore::default();
        let floors = RecordService::<Floor, _>::new(store.clone());
        let result = floors.create(Floor::new(BuildingId::new(), 1, "First")).await;
        assert!(matches!(
            result,
            Err(HospitalError::NotFound(NotFoundError { entity: "Building", .. }))
        ));
    }

    #[tokio::test]
    async fn should_list_floors_of_building() {
        let store = MemoryStore::default();
        let building = buildings(&store).create(main_building()).await.unwrap();
        let floors = RecordService::<Floor, _>::new(store.clone());
        floors
            .create(Floor::new(building.id, 0, "Ground"))
            .await
            .unwrap();
        floors
            .create(Floor::new(building.id, 1, "First"))
            .await
            .unwrap();

        let listed = floors.list_by_parent::<Building>(building.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|floor| floor.building_id == building.id));
    }

    #[tokio::test]
    async fn should_return_not_found_when_listing_children_of_missing_parent() {
        let store = MemoryStore::default();
        let floors = RecordService::<Floor, _>::new(store);
        let result = floors.list_by_parent::<Building>(BuildingId::new()).await;
        assert!(matches!(result, Err(HospitalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_refuse_second_occupant_then_accept_after_release() {
        let store = MemoryStore::default();
        let room_id = seeded_room(&store).await;
        let pharmacies = RecordService::<Pharmacy, _>::new(store.clone());
        let clinics = RecordService::<Clinic, _>::new(store.clone());

        let pharmacy = pharmacies
            .create(Pharmacy::new("Central", Some(room_id)))
            .await
            .unwrap();
        let refused = clinics.create(Clinic::new("Cardio", Some(room_id))).await;
        assert!(matches!(
            refused,
            Err(HospitalError::Conflict(ConflictError::RoomOccupied { .. }))
        ));

        pharmacies.delete(pharmacy.id).await.unwrap();
        assert!(clinics.create(Clinic::new("Cardio", Some(room_id))).await.is_ok());
    }

    #[tokio::test]
    async fn should_release_old_room_when_occupant_moves() {
        let store = MemoryStore::default();
        let first_room = seeded_room(&store).await;
        let second_room = seeded_room(&store).await;
        let pharmacies = RecordService::<Pharmacy, _>::new(store.clone());

        let mut pharmacy = pharmacies
            .create(Pharmacy::new("Central", Some(first_room)))
            .await
            .unwrap();
        pharmacy.room_id = Some(second_room);
        pharmacies.update(pharmacy).await.unwrap();

        let clinics = RecordService::<Clinic, _>::new(store.clone());
        assert!(clinics.create(Clinic::new("Cardio", Some(first_room))).await.is_ok());
    }

    #[tokio::test]
    async fn should_keep_own_room_on_update() {
        let store = MemoryStore::default();
        let room_id = seeded_room(&store).await;
        let pharmacies = RecordService::<Pharmacy, _>::new(store.clone());

        let mut pharmacy = pharmacies
            .create(Pharmacy::new("Central", Some(room_id)))
            .await
            .unwrap();
        pharmacy.name = "Central Pharmacy".to_string();
        assert!(pharmacies.update(pharmacy).await.is_ok());
    }

    #[tokio::test]
    async fn should_refuse_deleting_occupied_room() {
        let store = MemoryStore::default();
        let room_id = seeded_room(&store).await;
        RecordService::<Clinic, _>::new(store.clone())
            .create(Clinic::new("Cardio", Some(room_id)))
            .await
            .unwrap();

        let rooms = RecordService::<Room, _>::new(store.clone());
        let result = rooms.delete(room_id).await;
        assert!(matches!(
            result,
            Err(HospitalError::Conflict(ConflictError::RoomOccupied { .. }))
        ));
        assert!(rooms.get(room_id).await.is_ok());
    }

    #[tokio::test]
    async fn should_reject_room_with_unknown_type() {
        let store = MemoryStore::default();
        let building = main_building();
        let floor = Floor::new(building.id, 0, "Ground");
        let floor_id: FloorId = floor.id;
        store.create(building).await.unwrap();
        store.create(floor).await.unwrap();

        let rooms = RecordService::<Room, _>::new(store);
        let result = rooms.create(Room::new("R9", floor_id, RoomTypeId::new())).await;
        assert!(matches!(
            result,
            Err(HospitalError::NotFound(NotFoundError { entity: "RoomType", .. }))
        ));
    }
}
