//! Hospital staff and doctors.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{ClinicId, DoctorId, StaffId};
use crate::record::{Record, check_email, require_text};
use crate::time::Date;

/// A member of staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hired_on: Option<Date>,
}

impl Staff {
    /// Create a builder for constructing a [`Staff`] member.
    #[must_use]
    pub fn builder() -> StaffBuilder {
        StaffBuilder::default()
    }
}

impl Record for Staff {
    type Id = StaffId;
    const NAME: &'static str = "Staff";

    fn id(&self) -> StaffId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("position", &self.position)?;
        check_email("email", self.email.as_deref())?;
        Ok(())
    }
}

/// Step-by-step builder for [`Staff`].
#[derive(Debug, Default)]
pub struct StaffBuilder {
    id: Option<StaffId>,
    first_name: Option<String>,
    last_name: Option<String>,
    position: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    hired_on: Option<Date>,
}

impl StaffBuilder {
    #[must_use]
    pub fn id(mut self, id: StaffId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn position(mut self, value: impl Into<String>) -> Self {
        self.position = Some(value.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    #[must_use]
    pub fn hired_on(mut self, value: Date) -> Self {
        self.hired_on = Some(value);
        self
    }

    /// Consume the builder, validate, and return a [`Staff`] member.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] if a name or the position is
    /// missing, or the e-mail address is malformed.
    pub fn build(self) -> Result<Staff, HospitalError> {
        let staff = Staff {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            phone: self.phone,
            email: self.email,
            hired_on: self.hired_on,
        };
        staff.validate()?;
        Ok(staff)
    }
}

/// A doctor; every doctor is also a [`Staff`] member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub staff_id: StaffId,
    pub specialty: String,
    pub clinic_id: Option<ClinicId>,
}

impl Doctor {
    #[must_use]
    pub fn new(staff_id: StaffId, specialty: impl Into<String>) -> Self {
        Self {
            id: DoctorId::new(),
            staff_id,
            specialty: specialty.into(),
            clinic_id: None,
        }
    }
}

impl Record for Doctor {
    type Id = DoctorId;
    const NAME: &'static str = "Doctor";

    fn id(&self) -> DoctorId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("specialty", &self.specialty)?;
        Ok(())
    }
}
