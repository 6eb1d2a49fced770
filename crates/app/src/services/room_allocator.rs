//! Room allocator — decides whether a room can be claimed by an occupant.

use hospital_domain::error::{ConflictError, HospitalError};
use hospital_domain::id::RoomId;
use hospital_domain::occupancy::RoomClaim;
use hospital_domain::room::Room;

use crate::ports::{OccupancyRepository, Repository};
use crate::services::ensure_exists;

/// Occupancy state of an existing room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub room_id: RoomId,
    pub available: bool,
    pub occupant: Option<RoomClaim>,
}

/// Stateless predicate over the current room claims.
pub struct RoomAllocator<S> {
    store: S,
}

impl<S: OccupancyRepository> RoomAllocator<S> {
    /// Create a new allocator reading claims from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether no pharmacy, clinic or warehouse currently holds `room_id`.
    ///
    /// Does not check that the room exists: an unknown room is reported as
    /// available.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn is_available(&self, room_id: RoomId) -> Result<bool, HospitalError> {
        Ok(self.store.find_claim(room_id).await?.is_none())
    }

    /// The occupant currently holding `room_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn occupant(&self, room_id: RoomId) -> Result<Option<RoomClaim>, HospitalError> {
        self.store.find_claim(room_id).await
    }
}

impl<S: OccupancyRepository + Repository<Room> + Sync> RoomAllocator<S> {
    /// Check that `claim` may be stored: the room exists and is free, or is
    /// already held by the same occupant.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when the room does not exist,
    /// [`ConflictError::RoomOccupied`] when another occupant holds it, or a
    /// storage error.
    #[tracing::instrument(skip(self), fields(room_id = %claim.room_id, kind = %claim.kind))]
    pub async fn ensure_claimable(&self, claim: &RoomClaim) -> Result<(), HospitalError> {
        ensure_exists::<Room, _>(&self.store, claim.room_id).await?;
        match self.store.find_claim(claim.room_id).await? {
            Some(held) if !held.same_occupant(claim) => {
                tracing::debug!(holder = %held.kind, "room already claimed");
                Err(ConflictError::RoomOccupied {
                    room_id: claim.room_id,
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    /// Availability of an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when the room does not exist, or a
    /// storage error.
    pub async fn availability(&self, room_id: RoomId) -> Result<Availability, HospitalError> {
        ensure_exists::<Room, _>(&self.store, room_id).await?;
        let occupant = self.store.find_claim(room_id).await?;
        Ok(Availability {
            room_id,
            available: occupant.is_none(),
            occupant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
    use hospital_domain::id::{FloorId, RoomTypeId};
    use hospital_domain::occupancy::OccupantKind;
    use hospital_domain::record::Record;

    async fn store_with_room() -> (MemoryStore, RoomId) {
        let store = MemoryStore::default();
        let room = Room::new("R1", FloorId::new(), RoomTypeId::new());
        let room_id = room.id;
        store.create(room).await.unwrap();
        (store, room_id)
    }

    #[tokio::test]
    async fn should_report_free_room_as_available() {
        let (store, room_id) = store_with_room().await;
        let allocator = RoomAllocator::new(&store);
        assert!(allocator.is_available(room_id).await.unwrap());
    }

    #[tokio::test]
    async fn should_report_unknown_room_as_available() {
        let store = MemoryStore::default();
        let allocator = RoomAllocator::new(&store);
        assert!(allocator.is_available(RoomId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn should_report_room_unavailable_whatever_the_occupant_kind() {
        let (store, pharmacy_room) = store_with_room().await;
        store
            .create(Pharmacy::new("P", Some(pharmacy_room)))
            .await
            .unwrap();

        let clinic_room = Room::new("R2", FloorId::new(), RoomTypeId::new());
        let clinic_room_id = clinic_room.id;
        store.create(clinic_room).await.unwrap();
        store
            .create(Clinic::new("C", Some(clinic_room_id)))
            .await
            .unwrap();

        let warehouse_room = Room::new("R3", FloorId::new(), RoomTypeId::new());
        let warehouse_room_id = warehouse_room.id;
        store.create(warehouse_room).await.unwrap();
        store
            .create(Warehouse::new("W", Some(warehouse_room_id)))
            .await
            .unwrap();

        let allocator = RoomAllocator::new(&store);
        for room_id in [pharmacy_room, clinic_room_id, warehouse_room_id] {
            assert!(!allocator.is_available(room_id).await.unwrap());
        }
    }

    #[tokio::test]
    async fn should_return_same_answer_on_repeated_checks() {
        let (store, room_id) = store_with_room().await;
        let allocator = RoomAllocator::new(&store);
        let first = allocator.is_available(room_id).await.unwrap();
        let second = allocator.is_available(room_id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_report_occupant_of_claimed_room() {
        let (store, room_id) = store_with_room().await;
        let warehouse = Warehouse::new("Linen", Some(room_id));
        let warehouse_id = warehouse.id;
        store.create(warehouse).await.unwrap();

        let allocator = RoomAllocator::new(&store);
        let availability = allocator.availability(room_id).await.unwrap();
        assert!(!availability.available);
        let occupant = availability.occupant.unwrap();
        assert_eq!(occupant.kind, OccupantKind::Warehouse);
        assert_eq!(occupant.occupant_id, warehouse_id.as_uuid());
    }

    #[tokio::test]
    async fn should_refuse_claim_on_missing_room() {
        let store = MemoryStore::default();
        let allocator = RoomAllocator::new(&store);
        let claim = Pharmacy::new("P", Some(RoomId::new())).room_claim().unwrap();

        let result = allocator.ensure_claimable(&claim).await;
        assert!(matches!(result, Err(HospitalError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_refuse_claim_held_by_another_occupant() {
        let (store, room_id) = store_with_room().await;
        store
            .create(Pharmacy::new("P", Some(room_id)))
            .await
            .unwrap();

        let allocator = RoomAllocator::new(&store);
        let claim = Clinic::new("C", Some(room_id)).room_claim().unwrap();
        let result = allocator.ensure_claimable(&claim).await;
        assert!(matches!(
            result,
            Err(HospitalError::Conflict(ConflictError::RoomOccupied { .. }))
        ));
    }

    #[tokio::test]
    async fn should_accept_claim_already_held_by_same_occupant() {
        let (store, room_id) = store_with_room().await;
        let pharmacy = Pharmacy::new("P", Some(room_id));
        store.create(pharmacy.clone()).await.unwrap();

        let allocator = RoomAllocator::new(&store);
        let claim = pharmacy.room_claim().unwrap();
        assert!(allocator.ensure_claimable(&claim).await.is_ok());
    }
}
