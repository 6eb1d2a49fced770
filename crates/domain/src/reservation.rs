//! Reservations: a patient booked with a doctor for a period.

use serde::{Deserialize, Serialize};

use crate::error::{HospitalError, ValidationError};
use crate::id::{DoctorId, PatientId, ReservationId, RoomId};
use crate::record::Record;
use crate::time::Timestamp;

/// An appointment between a patient and a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub room_id: Option<RoomId>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub notes: Option<String>,
}

impl Reservation {
    #[must_use]
    pub fn new(
        patient_id: PatientId,
        doctor_id: DoctorId,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Self {
        Self {
            id: ReservationId::new(),
            patient_id,
            doctor_id,
            room_id: None,
            starts_at,
            ends_at,
            notes: None,
        }
    }
}

impl Record for Reservation {
    type Id = ReservationId;
    const NAME: &'static str = "Reservation";

    fn id(&self) -> ReservationId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        if self.ends_at <= self.starts_at {
            return Err(ValidationError::InvalidPeriod.into());
        }
        Ok(())
    }
}
