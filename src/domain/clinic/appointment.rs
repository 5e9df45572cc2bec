//! Appointment aggregate.
//!
//! The appointment carries both scheduling data and derived financials. The
//! derived fields (`final_price`, `commission_amount`) are never written
//! directly: every create/update path goes through
//! [`recompute_financials`](Appointment::recompute_financials).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AppointmentId, DentistId, Money, OwnedByTenant, OwnerId, PatientId, Percentage, ProcedureId,
    Timestamp,
};

use super::financials::compute_financials;

/// A scheduled (or completed) visit, priced at write time.
///
/// # Invariants
///
/// - `final_price` and `commission_amount` always reflect the current
///   `raw_price`, `discount_pct`, and dentist commission
/// - `completed` and `paid` are one-way flags
/// - `version` increments on every persisted update (optimistic concurrency)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub owner_id: OwnerId,
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: Timestamp,
    pub completed: bool,
    pub paid: bool,

    /// Price before discount. Zero means "use the procedure's base price",
    /// resolved at recompute time.
    pub raw_price: Money,

    pub discount_pct: Percentage,
    pub final_price: Money,
    pub commission_amount: Money,
    pub notes: Option<String>,

    /// Optimistic concurrency token, bumped by the repository on update.
    pub version: i32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Create a new appointment. Financials start at zero; callers must run
    /// [`recompute_financials`](Self::recompute_financials) before persisting.
    pub fn new(
        owner_id: OwnerId,
        patient_id: PatientId,
        dentist_id: Option<DentistId>,
        procedure_id: ProcedureId,
        scheduled_at: Timestamp,
        raw_price: Money,
        discount_pct: Percentage,
        now: Timestamp,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            owner_id,
            patient_id,
            dentist_id,
            procedure_id,
            scheduled_at,
            completed: false,
            paid: false,
            raw_price,
            discount_pct,
            final_price: Money::ZERO,
            commission_amount: Money::ZERO,
            notes: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute derived financials from the current inputs.
    ///
    /// When `raw_price` is zero it is first filled in from the procedure's
    /// base price, so appointments created without an explicit price pick up
    /// the catalog default. `dentist_commission` must be `Some` exactly when
    /// a dentist is assigned.
    ///
    /// Idempotent: re-running with the same inputs leaves every field
    /// unchanged.
    pub fn recompute_financials(
        &mut self,
        procedure_base_price: Money,
        dentist_commission: Option<Percentage>,
    ) {
        if self.raw_price.is_zero() {
            self.raw_price = procedure_base_price;
        }
        let f = compute_financials(self.raw_price, self.discount_pct, dentist_commission);
        self.final_price = f.final_price;
        self.commission_amount = f.commission_amount;
    }

    /// Move the appointment to a new time. No financial recompute.
    pub fn reschedule(&mut self, new_time: Timestamp, now: Timestamp) {
        self.scheduled_at = new_time;
        self.updated_at = now;
    }

    /// One-way completed flag. Returns whether the flag flipped.
    pub fn complete(&mut self, now: Timestamp) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.updated_at = now;
        true
    }

    /// One-way paid flag. Returns whether the flag flipped, so callers create
    /// the derived ledger entry at most once.
    pub fn mark_paid(&mut self, now: Timestamp) -> bool {
        if self.paid {
            return false;
        }
        self.paid = true;
        self.updated_at = now;
        true
    }
}

impl OwnedByTenant for Appointment {
    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}
