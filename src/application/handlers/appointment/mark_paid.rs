//! MarkAppointmentPaidHandler - flips the paid flag and books the income.
//!
//! The derived ledger entry is what makes the appointment show up in cash
//! flow. Exactly one entry per appointment: the paid flag guards the happy
//! path and the ledger's unique back-reference guards races.

use std::sync::Arc;

use crate::domain::cashflow::Income;
use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, OwnedByTenant, OwnerId, Timestamp,
};
use crate::ports::{AppointmentRepository, LedgerRepository, PatientRepository};

#[derive(Debug, Clone)]
pub struct MarkAppointmentPaidCommand {
    pub owner_id: OwnerId,
    pub appointment_id: AppointmentId,
}

pub struct MarkAppointmentPaidHandler {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl MarkAppointmentPaidHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        ledger: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self {
            appointments,
            patients,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        cmd: MarkAppointmentPaidCommand,
    ) -> Result<Appointment, DomainError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.owner_id, &cmd.appointment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        appointment.check_ownership(&cmd.owner_id)?;

        let now = Timestamp::now();
        if !appointment.mark_paid(now) {
            // Already paid: no-op success, ledger untouched.
            return Ok(appointment);
        }

        self.appointments.update_versioned(&appointment).await?;
        appointment.version += 1;

        if self
            .ledger
            .find_income_by_appointment(&cmd.owner_id, &appointment.id)
            .await?
            .is_none()
        {
            let income = Income::from_appointment(
                cmd.owner_id,
                appointment.id,
                self.income_description(&appointment).await,
                appointment.final_price,
                now.as_datetime().date_naive(),
                now,
            );
            match self.ledger.create_income(&income).await {
                Ok(()) => {}
                // A concurrent payment already booked the entry; the unique
                // back-reference did its job.
                Err(e) if e.code == ErrorCode::Conflict => {
                    tracing::debug!(
                        appointment_id = %appointment.id,
                        "derived income already booked, skipping"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            appointment_id = %appointment.id,
            amount = %appointment.final_price,
            "appointment paid, income booked"
        );
        Ok(appointment)
    }

    async fn income_description(&self, appointment: &Appointment) -> String {
        match self
            .patients
            .find_by_id(&appointment.owner_id, &appointment.patient_id)
            .await
        {
            Ok(Some(patient)) => format!("Appointment - {}", patient.name),
            _ => "Appointment".to_string(),
        }
    }
}
