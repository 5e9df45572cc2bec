//! DeleteAppointmentHandler - hard delete, cascading to the derived income.

use std::sync::Arc;

use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, OwnedByTenant, OwnerId,
};
use crate::ports::AppointmentRepository;

#[derive(Debug, Clone)]
pub struct DeleteAppointmentCommand {
    pub owner_id: OwnerId,
    pub appointment_id: AppointmentId,
}

pub struct DeleteAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl DeleteAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// Deletes the appointment and, in the same transaction inside the
    /// repository, any income entry it generated. Ledger history for a
    /// deleted appointment would point at nothing, so it goes too.
    pub async fn handle(&self, cmd: DeleteAppointmentCommand) -> Result<(), DomainError> {
        let appointment = self
            .appointments
            .find_by_id(&cmd.owner_id, &cmd.appointment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        appointment.check_ownership(&cmd.owner_id)?;

        self.appointments
            .delete(&cmd.owner_id, &cmd.appointment_id)
            .await?;

        tracing::info!(
            appointment_id = %cmd.appointment_id,
            owner_id = %cmd.owner_id,
            "appointment deleted"
        );
        Ok(())
    }
}
