//! Dentist entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DentistId, OwnedByTenant, OwnerId, Percentage, Timestamp, ValidationError,
};

/// Default commission rate applied when none is given at creation.
pub const DEFAULT_COMMISSION: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// A dentist working at the clinic. Unique per owner by license code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dentist {
    pub id: DentistId,
    pub owner_id: OwnerId,
    pub name: String,

    /// Professional license code, uppercased ("CRO-SP-12345").
    pub license_code: String,

    /// Share of each appointment's final price paid to the dentist.
    pub commission_rate: Percentage,

    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dentist {
    pub fn new(
        owner_id: OwnerId,
        name: String,
        license_code: &str,
        commission_rate: Option<Percentage>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: DentistId::new(),
            owner_id,
            name,
            license_code: normalize_license_code(license_code)?,
            commission_rate: commission_rate
                .unwrap_or_else(|| Percentage::clamped(DEFAULT_COMMISSION)),
            specialty: None,
            phone: None,
            email: None,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update(
        &mut self,
        name: String,
        license_code: &str,
        commission_rate: Percentage,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        self.license_code = normalize_license_code(license_code)?;
        self.commission_rate = commission_rate;
        self.updated_at = now;
        Ok(())
    }

    pub fn deactivate(&mut self, now: Timestamp) {
        self.active = false;
        self.updated_at = now;
    }
}

impl OwnedByTenant for Dentist {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Trim, uppercase, and require at least 4 characters.
fn normalize_license_code(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_uppercase();
    if code.len() < 4 {
        return Err(ValidationError::invalid_format(
            "license_code",
            "must be at least 4 characters",
        ));
    }
    Ok(code)
}
