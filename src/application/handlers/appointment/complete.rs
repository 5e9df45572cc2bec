//! CompleteAppointmentHandler - marks the visit as done.

use std::sync::Arc;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, OwnedByTenant, OwnerId, Timestamp,
};
use crate::ports::AppointmentRepository;

#[derive(Debug, Clone)]
pub struct CompleteAppointmentCommand {
    pub owner_id: OwnerId,
    pub appointment_id: AppointmentId,
}

pub struct CompleteAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl CompleteAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// Idempotent: completing an already-completed appointment succeeds
    /// without another write.
    pub async fn handle(
        &self,
        cmd: CompleteAppointmentCommand,
    ) -> Result<Appointment, DomainError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.owner_id, &cmd.appointment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        appointment.check_ownership(&cmd.owner_id)?;

        if appointment.complete(Timestamp::now()) {
            self.appointments.update_versioned(&appointment).await?;
            appointment.version += 1;
        }
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::appointment::test_support::InMemoryAppointments;
    use crate::domain::foundation::{Money, PatientId, Percentage, ProcedureId};

    fn scheduled(owner: OwnerId) -> Appointment {
        Appointment::new(
            owner,
            PatientId::new(),
            None,
            ProcedureId::new(),
            Timestamp::now(),
            Money::try_new("100.00".parse().unwrap()).unwrap(),
            Percentage::ZERO,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn complete_sets_flag_once() {
        let owner = OwnerId::new();
        let appointment = scheduled(owner);
        let appointments = Arc::new(InMemoryAppointments::with(appointment.clone()));
        let handler = CompleteAppointmentHandler::new(appointments.clone());

        let cmd = CompleteAppointmentCommand {
            owner_id: owner,
            appointment_id: appointment.id,
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        assert!(first.completed);
        assert_eq!(first.version, 1);

        // Second call is a no-op success: no extra version bump.
        let second = handler.handle(cmd).await.unwrap();
        assert!(second.completed);
        assert_eq!(second.version, 1);
    }
}
