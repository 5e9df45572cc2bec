//! CreateAppointmentHandler - schedules and prices a new appointment.

use std::sync::Arc;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    DentistId, DomainError, ErrorCode, Money, OwnedByTenant, OwnerId, PatientId, Percentage,
    ProcedureId, Timestamp,
};
use crate::ports::{
    AppointmentRepository, DentistRepository, PatientRepository, ProcedureRepository,
};

#[derive(Debug, Clone)]
pub struct CreateAppointmentCommand {
    pub owner_id: OwnerId,
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: Timestamp,

    /// Price before discount; `None` or zero picks up the procedure's base
    /// price.
    pub raw_price: Option<Money>,

    pub discount_pct: Percentage,
    pub notes: Option<String>,
}

pub struct CreateAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    dentists: Arc<dyn DentistRepository>,
    procedures: Arc<dyn ProcedureRepository>,
}

impl CreateAppointmentHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        dentists: Arc<dyn DentistRepository>,
        procedures: Arc<dyn ProcedureRepository>,
    ) -> Self {
        Self {
            appointments,
            patients,
            dentists,
            procedures,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAppointmentCommand,
    ) -> Result<Appointment, DomainError> {
        let patient = self
            .patients
            .find_by_id(&cmd.owner_id, &cmd.patient_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PatientNotFound, "Patient not found"))?;
        patient.check_ownership(&cmd.owner_id)?;

        let procedure = self
            .procedures
            .find_by_id(&cmd.owner_id, &cmd.procedure_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProcedureNotFound, "Procedure not found")
            })?;
        procedure.check_ownership(&cmd.owner_id)?;

        let dentist_commission = match &cmd.dentist_id {
            Some(dentist_id) => {
                let dentist = self
                    .dentists
                    .find_by_id(&cmd.owner_id, dentist_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::new(ErrorCode::DentistNotFound, "Dentist not found")
                    })?;
                dentist.check_ownership(&cmd.owner_id)?;
                Some(dentist.commission_rate)
            }
            None => None,
        };

        let now = Timestamp::now();
        let mut appointment = Appointment::new(
            cmd.owner_id,
            cmd.patient_id,
            cmd.dentist_id,
            cmd.procedure_id,
            cmd.scheduled_at,
            cmd.raw_price.unwrap_or(Money::ZERO),
            cmd.discount_pct,
            now,
        );
        appointment.notes = cmd.notes;
        appointment.recompute_financials(procedure.base_price, dentist_commission);

        self.appointments.create(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            owner_id = %appointment.owner_id,
            final_price = %appointment.final_price,
            "appointment created"
        );
        Ok(appointment)
    }
}
