//! Procedure catalog entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Money, OwnedByTenant, OwnerId, ProcedureId, Timestamp, ValidationError,
};

/// A billable procedure in the clinic's catalog ("Cleaning", "Root canal").
///
/// The base price is the default raw price for appointments using this
/// procedure; individual appointments may override it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: ProcedureId,
    pub owner_id: OwnerId,
    pub name: String,
    pub base_price: Money,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Procedure {
    pub fn new(
        owner_id: OwnerId,
        name: String,
        base_price: Money,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: ProcedureId::new(),
            owner_id,
            name,
            base_price,
            description: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update(
        &mut self,
        name: String,
        base_price: Money,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        self.name = name;
        self.base_price = base_price;
        self.updated_at = now;
        Ok(())
    }
}

impl OwnedByTenant for Procedure {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}
