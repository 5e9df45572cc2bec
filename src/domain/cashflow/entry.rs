//! Ledger entry entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AppointmentId, EntryId, Money, OwnedByTenant, OwnerId, Timestamp, ValidationError,
};

/// Where an income entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeOrigin {
    /// Entered by hand in the ledger.
    Manual,

    /// Derived automatically when an appointment was marked paid.
    Appointment,
}

impl IncomeOrigin {
    /// Stable string code used in the database.
    pub fn code(&self) -> &'static str {
        match self {
            IncomeOrigin::Manual => "manual",
            IncomeOrigin::Appointment => "appointment",
        }
    }
}

/// Expense classification for the category breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Supplies,
    Rent,
    Salaries,
    Equipment,
    Utilities,
    Other,
}

impl ExpenseCategory {
    pub fn code(&self) -> &'static str {
        match self {
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Salaries => "salaries",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supplies" => Ok(ExpenseCategory::Supplies),
            "rent" => Ok(ExpenseCategory::Rent),
            "salaries" => Ok(ExpenseCategory::Salaries),
            "equipment" => Ok(ExpenseCategory::Equipment),
            "utilities" => Ok(ExpenseCategory::Utilities),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown expense category '{other}'"),
            )),
        }
    }
}

/// An income ledger entry.
///
/// At most one entry per appointment exists (enforced by a partial unique
/// index on `appointment_id`), which is what makes marking an appointment
/// paid idempotent at the ledger level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub description: String,
    pub amount: Money,
    pub date: chrono::NaiveDate,
    pub paid: bool,
    pub origin: IncomeOrigin,

    /// Set exactly when `origin == Appointment`.
    pub appointment_id: Option<AppointmentId>,

    pub created_at: Timestamp,
}

impl Income {
    /// Create a manual income entry.
    pub fn manual(
        owner_id: OwnerId,
        description: String,
        amount: Money,
        date: chrono::NaiveDate,
        paid: bool,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(Self {
            id: EntryId::new(),
            owner_id,
            description,
            amount,
            date,
            paid,
            origin: IncomeOrigin::Manual,
            appointment_id: None,
            created_at: now,
        })
    }

    /// Create the derived entry for a paid appointment.
    pub fn from_appointment(
        owner_id: OwnerId,
        appointment_id: AppointmentId,
        description: String,
        amount: Money,
        date: chrono::NaiveDate,
        now: Timestamp,
    ) -> Self {
        Self {
            id: EntryId::new(),
            owner_id,
            description,
            amount,
            date,
            paid: true,
            origin: IncomeOrigin::Appointment,
            appointment_id: Some(appointment_id),
            created_at: now,
        }
    }
}

impl OwnedByTenant for Income {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// An expense ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub description: String,
    pub amount: Money,
    pub date: chrono::NaiveDate,
    pub paid: bool,
    pub category: ExpenseCategory,
    pub created_at: Timestamp,
}

impl Expense {
    pub fn new(
        owner_id: OwnerId,
        description: String,
        amount: Money,
        date: chrono::NaiveDate,
        paid: bool,
        category: ExpenseCategory,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(Self {
            id: EntryId::new(),
            owner_id,
            description,
            amount,
            date,
            paid,
            category,
            created_at: now,
        })
    }
}

impl OwnedByTenant for Expense {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}
