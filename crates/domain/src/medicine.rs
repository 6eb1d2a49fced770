//! Suppliers and the medicines they deliver.

use serde::{Deserialize, Serialize};

use crate::error::HospitalError;
use crate::id::{MedicineId, PharmacyId, SupplierId};
use crate::record::{Record, check_email, require_non_negative, require_text};

/// A medicine supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Supplier {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SupplierId::new(),
            name: name.into(),
            phone: None,
            email: None,
        }
    }
}

impl Record for Supplier {
    type Id = SupplierId;
    const NAME: &'static str = "Supplier";

    fn id(&self) -> SupplierId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        check_email("email", self.email.as_deref())?;
        Ok(())
    }
}

/// A medicine, optionally delivered by a supplier and stocked by a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub description: Option<String>,
    /// Price of one unit, in cents.
    pub unit_price_cents: i64,
    pub stock: i64,
    pub supplier_id: Option<SupplierId>,
    pub pharmacy_id: Option<PharmacyId>,
}

impl Medicine {
    #[must_use]
    pub fn new(name: impl Into<String>, unit_price_cents: i64) -> Self {
        Self {
            id: MedicineId::new(),
            name: name.into(),
            description: None,
            unit_price_cents,
            stock: 0,
            supplier_id: None,
            pharmacy_id: None,
        }
    }
}

impl Record for Medicine {
    type Id = MedicineId;
    const NAME: &'static str = "Medicine";

    fn id(&self) -> MedicineId {
        self.id
    }

    fn validate(&self) -> Result<(), HospitalError> {
        require_text("name", &self.name)?;
        require_non_negative("unit_price_cents", self.unit_price_cents)?;
        require_non_negative("stock", self.stock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn should_accept_free_medicine() {
        assert!(Medicine::new("Saline", 0).validate().is_ok());
    }

    #[test]
    fn should_reject_negative_price() {
        let result = Medicine::new("Aspirin", -5).validate();
        assert!(matches!(
            result,
            Err(HospitalError::Validation(ValidationError::Negative(
                "unit_price_cents"
            )))
        ));
    }

    #[test]
    fn should_reject_negative_stock() {
        let mut medicine = Medicine::new("Aspirin", 120);
        medicine.stock = -1;
        assert!(medicine.validate().is_err());
    }

    #[test]
    fn should_validate_supplier_email() {
        let mut supplier = Supplier::new("Acme Pharma");
        supplier.email = Some("orders".to_string());
        assert!(supplier.validate().is_err());
    }
}
