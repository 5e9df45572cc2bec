//! UpdateAppointmentHandler - edits an appointment and reprices it.

use std::sync::Arc;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DentistId, DomainError, ErrorCode, Money, OwnedByTenant, OwnerId, PatientId,
    Percentage, ProcedureId, Timestamp,
};
use crate::ports::{
    AppointmentRepository, DentistRepository, PatientRepository, ProcedureRepository,
};

#[derive(Debug, Clone)]
pub struct UpdateAppointmentCommand {
    pub owner_id: OwnerId,
    pub appointment_id: AppointmentId,
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: Timestamp,
    pub raw_price: Option<Money>,
    pub discount_pct: Percentage,
    pub notes: Option<String>,

    /// Version the client last saw; a mismatch means a lost update.
    pub version: i32,
}

pub struct UpdateAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    dentists: Arc<dyn DentistRepository>,
    procedures: Arc<dyn ProcedureRepository>,
}

impl UpdateAppointmentHandler {
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
        cmd: UpdateAppointmentCommand,
    ) -> Result<Appointment, DomainError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.owner_id, &cmd.appointment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AppointmentNotFound, "Appointment not found")
            })?;
        appointment.check_ownership(&cmd.owner_id)?;

        if appointment.version != cmd.version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Appointment was modified concurrently",
            )
            .with_detail("expected_version", cmd.version.to_string())
            .with_detail("actual_version", appointment.version.to_string()));
        }

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

        appointment.patient_id = cmd.patient_id;
        appointment.dentist_id = cmd.dentist_id;
        appointment.procedure_id = cmd.procedure_id;
        appointment.scheduled_at = cmd.scheduled_at;
        appointment.discount_pct = cmd.discount_pct;
        appointment.notes = cmd.notes;
        // An explicit price replaces the stored one; omitting it keeps the
        // current raw price (which recompute fills from the procedure when
        // zero).
        if let Some(raw) = cmd.raw_price {
            appointment.raw_price = raw;
        }
        appointment.recompute_financials(procedure.base_price, dentist_commission);
        appointment.updated_at = Timestamp::now();

        self.appointments.update_versioned(&appointment).await?;
        appointment.version += 1;
        Ok(appointment)
    }
}
