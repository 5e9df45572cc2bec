//! Patient entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    OwnedByTenant, OwnerId, PatientId, Timestamp, ValidationError,
};

/// A patient of the clinic. Unique per owner by normalized tax id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub owner_id: OwnerId,
    pub name: String,

    /// National tax id, normalized to exactly 11 digits.
    pub tax_id: String,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Patient {
    /// Create a new patient after validating name and tax id.
    pub fn new(
        owner_id: OwnerId,
        name: String,
        tax_id: &str,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let tax_id = normalize_tax_id(tax_id)?;
        Ok(Self {
            id: PatientId::new(),
            owner_id,
            name,
            tax_id,
            phone: None,
            email: None,
            birth_date: None,
            address: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update mutable fields. Tax id changes re-run normalization.
    pub fn update(
        &mut self,
        name: String,
        tax_id: &str,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
        self.tax_id = normalize_tax_id(tax_id)?;
        self.updated_at = now;
        Ok(())
    }
}

impl OwnedByTenant for Patient {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

fn validate_name(name: String) -> Result<String, ValidationError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(name)
}

/// Strip formatting characters and require exactly 11 digits.
///
/// Accepts "529.982.247-25" and "52998224725" alike; stores only digits so
/// the per-owner uniqueness constraint sees one canonical form.
pub fn normalize_tax_id(raw: &str) -> Result<String, ValidationError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return Err(ValidationError::invalid_format(
            "tax_id",
            format!("expected 11 digits, got {}", digits.len()),
        ));
    }
    Ok(digits)
}
