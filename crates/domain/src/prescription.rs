//! Prescriptions: a medicine prescribed by a doctor to a patient.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{DoctorId, MedicineId, PatientId, PrescriptionId};
use crate::record::{Record, require_text};
use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub medicine_id: MedicineId,
    /// Free-form dosage instructions (e.g. `"1 tablet twice a day"`).
    pub dosage: String,
    pub issued_at: Timestamp,
}

impl Record for Prescription {
    type Id = PrescriptionId;
    const NAME: &'static str = "Prescription";

    fn id(&self) -> PrescriptionId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("dosage", &self.dosage)?;
        Ok(())
    }
}
