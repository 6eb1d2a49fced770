//! Request bodies and route paths for every record exposed over HTTP.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use hospital_domain::building::{Building, Floor};
use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
use hospital_domain::id::{
    BuildingId, ClinicId, DoctorId, FloorId, MedicineId, PatientId, PharmacyId, RoomId,
    RoomTypeId, StaffId, SupplierId,
};
use hospital_domain::medicine::{Medicine, Supplier};
use hospital_domain::patient::Patient;
use hospital_domain::prescription::Prescription;
use hospital_domain::record::Record;
use hospital_domain::reservation::Reservation;
use hospital_domain::room::{Room, RoomType};
use hospital_domain::staff::{Doctor, Staff};
use hospital_domain::time::{self, Date, Timestamp};

/// A record exposed under `/api/<PATH>`.
pub trait Resource: Record + Serialize {
    /// Route segment, also the resource part of permission names.
    const PATH: &'static str;

    /// JSON body accepted on create and update.
    type Payload: DeserializeOwned + Send + 'static;

    /// Build the record stored under `id` from a request body. Validation
    /// happens in the record service.
    fn from_payload(id: Self::Id, payload: Self::Payload) -> Self;
}

#[derive(Debug, Deserialize)]
pub struct BuildingPayload {
    pub name: String,
    pub address: Option<String>,
}

impl Resource for Building {
    const PATH: &'static str = "buildings";
    type Payload = BuildingPayload;

    fn from_payload(id: BuildingId, payload: BuildingPayload) -> Self {
        Self {
            id,
            name: payload.name,
            address: payload.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FloorPayload {
    pub building_id: BuildingId,
    pub number: i64,
    pub name: String,
}

impl Resource for Floor {
    const PATH: &'static str = "floors";
    type Payload = FloorPayload;

    fn from_payload(id: FloorId, payload: FloorPayload) -> Self {
        Self {
            id,
            building_id: payload.building_id,
            number: payload.number,
            name: payload.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomTypePayload {
    pub name: String,
}

impl Resource for RoomType {
    const PATH: &'static str = "room-types";
    type Payload = RoomTypePayload;

    fn from_payload(id: RoomTypeId, payload: RoomTypePayload) -> Self {
        Self {
            id,
            name: payload.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomPayload {
    pub name: String,
    pub floor_id: FloorId,
    pub room_type_id: RoomTypeId,
}

impl Resource for Room {
    const PATH: &'static str = "rooms";
    type Payload = RoomPayload;

    fn from_payload(id: RoomId, payload: RoomPayload) -> Self {
        Self {
            id,
            name: payload.name,
            floor_id: payload.floor_id,
            room_type_id: payload.room_type_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StaffPayload {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hired_on: Option<Date>,
}

impl Resource for Staff {
    const PATH: &'static str = "staff";
    type Payload = StaffPayload;

    fn from_payload(id: StaffId, payload: StaffPayload) -> Self {
        Self {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            position: payload.position,
            phone: payload.phone,
            email: payload.email,
            hired_on: payload.hired_on,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DoctorPayload {
    pub staff_id: StaffId,
    pub specialty: String,
    pub clinic_id: Option<ClinicId>,
}

impl Resource for Doctor {
    const PATH: &'static str = "doctors";
    type Payload = DoctorPayload;

    fn from_payload(id: DoctorId, payload: DoctorPayload) -> Self {
        Self {
            id,
            staff_id: payload.staff_id,
            specialty: payload.specialty,
            clinic_id: payload.clinic_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PatientPayload {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<Date>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Resource for Patient {
    const PATH: &'static str = "patients";
    type Payload = PatientPayload;

    fn from_payload(id: PatientId, payload: PatientPayload) -> Self {
        Self {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            birth_date: payload.birth_date,
            phone: payload.phone,
            address: payload.address,
        }
    }
}

/// Body shared by pharmacies and warehouses.
#[derive(Debug, Deserialize)]
pub struct OccupantPayload {
    pub name: String,
    pub room_id: Option<RoomId>,
}

impl Resource for Pharmacy {
    const PATH: &'static str = "pharmacies";
    type Payload = OccupantPayload;

    fn from_payload(id: PharmacyId, payload: OccupantPayload) -> Self {
        Self {
            id,
            name: payload.name,
            room_id: payload.room_id,
        }
    }
}

impl Resource for Warehouse {
    const PATH: &'static str = "warehouses";
    type Payload = OccupantPayload;

    fn from_payload(id: hospital_domain::id::WarehouseId, payload: OccupantPayload) -> Self {
        Self {
            id,
            name: payload.name,
            room_id: payload.room_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClinicPayload {
    pub name: String,
    pub specialty: Option<String>,
    pub room_id: Option<RoomId>,
}

impl Resource for Clinic {
    const PATH: &'static str = "clinics";
    type Payload = ClinicPayload;

    fn from_payload(id: ClinicId, payload: ClinicPayload) -> Self {
        Self {
            id,
            name: payload.name,
            specialty: payload.specialty,
            room_id: payload.room_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Resource for Supplier {
    const PATH: &'static str = "suppliers";
    type Payload = SupplierPayload;

    fn from_payload(id: SupplierId, payload: SupplierPayload) -> Self {
        Self {
            id,
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MedicinePayload {
    pub name: String,
    pub description: Option<String>,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub stock: i64,
    pub supplier_id: Option<SupplierId>,
    pub pharmacy_id: Option<PharmacyId>,
}

impl Resource for Medicine {
    const PATH: &'static str = "medicines";
    type Payload = MedicinePayload;

    fn from_payload(id: MedicineId, payload: MedicinePayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            unit_price_cents: payload.unit_price_cents,
            stock: payload.stock,
            supplier_id: payload.supplier_id,
            pharmacy_id: payload.pharmacy_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReservationPayload {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub room_id: Option<RoomId>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub notes: Option<String>,
}

impl Resource for Reservation {
    const PATH: &'static str = "reservations";
    type Payload = ReservationPayload;

    fn from_payload(id: hospital_domain::id::ReservationId, payload: ReservationPayload) -> Self {
        Self {
            id,
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            room_id: payload.room_id,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrescriptionPayload {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub medicine_id: MedicineId,
    pub dosage: String,
    /// Defaults to the time of the request.
    pub issued_at: Option<Timestamp>,
}

impl Resource for Prescription {
    const PATH: &'static str = "prescriptions";
    type Payload = PrescriptionPayload;

    fn from_payload(id: hospital_domain::id::PrescriptionId, payload: PrescriptionPayload) -> Self {
        Self {
            id,
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            medicine_id: payload.medicine_id,
            dosage: payload.dosage,
            issued_at: payload.issued_at.unwrap_or_else(time::now),
        }
    }
}
