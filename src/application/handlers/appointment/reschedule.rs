//! RescheduleAppointmentHandler - moves an appointment in time.
//!
//! Deliberately narrow: only the timestamp changes, financials stay exactly
//! as priced.

use std::sync::Arc;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, OwnedByTenant, OwnerId, Timestamp,
};
use crate::ports::AppointmentRepository;

#[derive(Debug, Clone)]
pub struct RescheduleAppointmentCommand {
    pub owner_id: OwnerId,
    pub appointment_id: AppointmentId,
    pub new_time: Timestamp,
}

pub struct RescheduleAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl RescheduleAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        cmd: RescheduleAppointmentCommand,
    ) -> Result<Appointment, DomainError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.owner_id, &cmd.appointment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        appointment.check_ownership(&cmd.owner_id)?;

        appointment.reschedule(cmd.new_time, Timestamp::now());
        self.appointments.update_versioned(&appointment).await?;
        appointment.version += 1;
        Ok(appointment)
    }
}
