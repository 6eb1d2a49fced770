//! Column mappings for every stored record.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use hospital_domain::building::{Building, Floor};
use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
use hospital_domain::medicine::{Medicine, Supplier};
use hospital_domain::patient::Patient;
use hospital_domain::prescription::Prescription;
use hospital_domain::reservation::Reservation;
use hospital_domain::room::{Room, RoomType};
use hospital_domain::staff::{Doctor, Staff};
use hospital_domain::user::User;

use crate::error::StorageError;
use crate::table::{
    ChildOf, SqliteQuery, Table, get_id, get_optional_date, get_optional_id, get_timestamp,
    optional_id,
};

impl Table for Building {
    const TABLE: &'static str = "buildings";
    const COLUMNS: &'static [&'static str] = &["name", "address"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query.bind(self.name.clone()).bind(self.address.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
        })
    }
}

impl Table for Floor {
    const TABLE: &'static str = "floors";
    const COLUMNS: &'static [&'static str] = &["building_id", "number", "name"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.building_id.to_string())
            .bind(self.number)
            .bind(self.name.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            building_id: get_id(row, "building_id")?,
            number: row.try_get("number")?,
            name: row.try_get("name")?,
        })
    }
}

impl ChildOf<Building> for Floor {
    const PARENT_COLUMN: &'static str = "building_id";
}

impl Table for RoomType {
    const TABLE: &'static str = "room_types";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query.bind(self.name.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
        })
    }
}

impl Table for Room {
    const TABLE: &'static str = "rooms";
    const COLUMNS: &'static [&'static str] = &["name", "floor_id", "room_type_id"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.floor_id.to_string())
            .bind(self.room_type_id.to_string()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            floor_id: get_id(row, "floor_id")?,
            room_type_id: get_id(row, "room_type_id")?,
        })
    }
}

impl ChildOf<Floor> for Room {
    const PARENT_COLUMN: &'static str = "floor_id";
}

impl Table for Pharmacy {
    const TABLE: &'static str = "pharmacies";
    const COLUMNS: &'static [&'static str] = &["name", "room_id"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(optional_id(self.room_id)))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            room_id: get_optional_id(row, "room_id")?,
        })
    }
}

impl Table for Clinic {
    const TABLE: &'static str = "clinics";
    const COLUMNS: &'static [&'static str] = &["name", "specialty", "room_id"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.specialty.clone())
            .bind(optional_id(self.room_id)))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            specialty: row.try_get("specialty")?,
            room_id: get_optional_id(row, "room_id")?,
        })
    }
}

impl Table for Warehouse {
    const TABLE: &'static str = "warehouses";
    const COLUMNS: &'static [&'static str] = &["name", "room_id"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(optional_id(self.room_id)))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            room_id: get_optional_id(row, "room_id")?,
        })
    }
}

impl Table for Staff {
    const TABLE: &'static str = "staff";
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "position",
        "phone",
        "email",
        "hired_on",
    ];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.first_name.clone())
            .bind(self.last_name.clone())
            .bind(self.position.clone())
            .bind(self.phone.clone())
            .bind(self.email.clone())
            .bind(self.hired_on.map(|date| date.to_string())))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            position: row.try_get("position")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            hired_on: get_optional_date(row, "hired_on")?,
        })
    }
}

impl Table for Doctor {
    const TABLE: &'static str = "doctors";
    const COLUMNS: &'static [&'static str] = &["staff_id", "specialty", "clinic_id"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.staff_id.to_string())
            .bind(self.specialty.clone())
            .bind(optional_id(self.clinic_id)))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            staff_id: get_id(row, "staff_id")?,
            specialty: row.try_get("specialty")?,
            clinic_id: get_optional_id(row, "clinic_id")?,
        })
    }
}

impl Table for Patient {
    const TABLE: &'static str = "patients";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "birth_date", "phone", "address"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.first_name.clone())
            .bind(self.last_name.clone())
            .bind(self.birth_date.map(|date| date.to_string()))
            .bind(self.phone.clone())
            .bind(self.address.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            birth_date: get_optional_date(row, "birth_date")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
        })
    }
}

impl Table for Supplier {
    const TABLE: &'static str = "suppliers";
    const COLUMNS: &'static [&'static str] = &["name", "phone", "email"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.phone.clone())
            .bind(self.email.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
        })
    }
}

impl Table for Medicine {
    const TABLE: &'static str = "medicines";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "unit_price_cents",
        "stock",
        "supplier_id",
        "pharmacy_id",
    ];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.unit_price_cents)
            .bind(self.stock)
            .bind(optional_id(self.supplier_id))
            .bind(optional_id(self.pharmacy_id)))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            unit_price_cents: row.try_get("unit_price_cents")?,
            stock: row.try_get("stock")?,
            supplier_id: get_optional_id(row, "supplier_id")?,
            pharmacy_id: get_optional_id(row, "pharmacy_id")?,
        })
    }
}

impl ChildOf<Supplier> for Medicine {
    const PARENT_COLUMN: &'static str = "supplier_id";
}

impl ChildOf<Pharmacy> for Medicine {
    const PARENT_COLUMN: &'static str = "pharmacy_id";
}

impl Table for Reservation {
    const TABLE: &'static str = "reservations";
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "doctor_id",
        "room_id",
        "starts_at",
        "ends_at",
        "notes",
    ];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.patient_id.to_string())
            .bind(self.doctor_id.to_string())
            .bind(optional_id(self.room_id))
            .bind(self.starts_at.to_rfc3339())
            .bind(self.ends_at.to_rfc3339())
            .bind(self.notes.clone()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            patient_id: get_id(row, "patient_id")?,
            doctor_id: get_id(row, "doctor_id")?,
            room_id: get_optional_id(row, "room_id")?,
            starts_at: get_timestamp(row, "starts_at")?,
            ends_at: get_timestamp(row, "ends_at")?,
            notes: row.try_get("notes")?,
        })
    }
}

impl ChildOf<Patient> for Reservation {
    const PARENT_COLUMN: &'static str = "patient_id";
}

impl ChildOf<Doctor> for Reservation {
    const PARENT_COLUMN: &'static str = "doctor_id";
}

impl Table for Prescription {
    const TABLE: &'static str = "prescriptions";
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "doctor_id",
        "medicine_id",
        "dosage",
        "issued_at",
    ];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        Ok(query
            .bind(self.patient_id.to_string())
            .bind(self.doctor_id.to_string())
            .bind(self.medicine_id.to_string())
            .bind(self.dosage.clone())
            .bind(self.issued_at.to_rfc3339()))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: get_id(row, "id")?,
            patient_id: get_id(row, "patient_id")?,
            doctor_id: get_id(row, "doctor_id")?,
            medicine_id: get_id(row, "medicine_id")?,
            dosage: row.try_get("dosage")?,
            issued_at: get_timestamp(row, "issued_at")?,
        })
    }
}

impl ChildOf<Patient> for Prescription {
    const PARENT_COLUMN: &'static str = "patient_id";
}

impl ChildOf<Doctor> for Prescription {
    const PARENT_COLUMN: &'static str = "doctor_id";
}

impl Table for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["username", "password_hash", "permissions"];

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError> {
        let permissions = serde_json::to_string(&self.permissions)?;
        Ok(query
            .bind(self.username.clone())
            .bind(self.password_hash.clone())
            .bind(permissions))
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let permissions: String = row.try_get("permissions")?;
        let permissions = serde_json::from_str(&permissions)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Self {
            id: get_id(row, "id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            permissions,
        })
    }
}
