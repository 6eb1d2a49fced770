//! Patients.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::PatientId;
use crate::record::{Record, require_text};
use crate::time::Date;

/// A patient registered with the hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<Date>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Patient {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: PatientId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            phone: None,
            address: None,
        }
    }
}

impl Record for Patient {
    type Id = PatientId;
    const NAME: &'static str = "Patient";

    fn id(&self) -> PatientId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        Ok(())
    }
}
