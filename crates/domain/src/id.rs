//! Typed identifier newtypes backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Building`](crate::building::Building).
    BuildingId
);

define_id!(
    /// Unique identifier for a [`Floor`](crate::building::Floor).
    FloorId
);

define_id!(
    /// Unique identifier for a [`RoomType`](crate::room::RoomType).
    RoomTypeId
);

define_id!(
    /// Unique identifier for a [`Room`](crate::room::Room).
    RoomId
);

define_id!(
    /// Unique identifier for a [`Staff`](crate::staff::Staff).
    StaffId
);

define_id!(
    /// Unique identifier for a [`Doctor`](crate::staff::Doctor).
    DoctorId
);

define_id!(
    /// Unique identifier for a [`Patient`](crate::patient::Patient).
    PatientId
);

define_id!(
    /// Unique identifier for a [`Pharmacy`](crate::facility::Pharmacy).
    PharmacyId
);

define_id!(
    /// Unique identifier for a [`Clinic`](crate::facility::Clinic).
    ClinicId
);

define_id!(
    /// Unique identifier for a [`Warehouse`](crate::facility::Warehouse).
    WarehouseId
);

define_id!(
    /// Unique identifier for a [`Supplier`](crate::medicine::Supplier).
    SupplierId
);

define_id!(
    /// Unique identifier for a [`Medicine`](crate::medicine::Medicine).
    MedicineId
);

define_id!(
    /// Unique identifier for a [`Reservation`](crate::reservation::Reservation).
    ReservationId
);

define_id!(
    /// Unique identifier for a [`Prescription`](crate::prescription::Prescription).
    PrescriptionId
);

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);
