//! HTTP handlers for appointment endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::appointment::{
    CompleteAppointmentCommand, CreateAppointmentCommand, DeleteAppointmentCommand,
    MarkAppointmentPaidCommand, RescheduleAppointmentCommand, UpdateAppointmentCommand,
};
use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DentistId, Money, PatientId, Percentage, ProcedureId, Timestamp,
};

use super::error::ApiError;
use super::middleware::RequireTenant;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: DateTime<Utc>,
    pub raw_price: Option<Decimal>,
    #[serde(default)]
    pub discount_pct: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: DateTime<Utc>,
    pub raw_price: Option<Decimal>,
    #[serde(default)]
    pub discount_pct: Decimal,
    pub notes: Option<String>,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub dentist_id: Option<DentistId>,
    pub procedure_id: ProcedureId,
    pub scheduled_at: DateTime<Utc>,
    pub completed: bool,
    pub paid: bool,
    pub raw_price: Decimal,
    pub discount_pct: Decimal,
    pub final_price: Decimal,
    pub commission_amount: Decimal,
    pub notes: Option<String>,
    pub version: i32,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            patient_id: a.patient_id,
            dentist_id: a.dentist_id,
            procedure_id: a.procedure_id,
            scheduled_at: *a.scheduled_at.as_datetime(),
            completed: a.completed,
            paid: a.paid,
            raw_price: a.raw_price.amount(),
            discount_pct: a.discount_pct.value(),
            final_price: a.final_price.amount(),
            commission_amount: a.commission_amount.amount(),
            notes: a.notes,
            version: a.version,
        }
    }
}

fn parse_price(raw_price: Option<Decimal>) -> Result<Option<Money>, ApiError> {
    raw_price
        .map(Money::try_new)
        .transpose()
        .map_err(|e| ApiError(e.into()))
}

fn parse_discount(discount_pct: Decimal) -> Result<Percentage, ApiError> {
    Percentage::try_new(discount_pct).map_err(|e| ApiError(e.into()))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let appointment = state
        .create_appointment_handler()
        .handle(CreateAppointmentCommand {
            owner_id,
            patient_id: body.patient_id,
            dentist_id: body.dentist_id,
            procedure_id: body.procedure_id,
            scheduled_at: Timestamp::from_datetime(body.scheduled_at),
            raw_price: parse_price(body.raw_price)?,
            discount_pct: parse_discount(body.discount_pct)?,
            notes: body.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(appointment)),
    ))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(id): Path<AppointmentId>,
    Json(body): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment = state
        .update_appointment_handler()
        .handle(UpdateAppointmentCommand {
            owner_id,
            appointment_id: id,
            patient_id: body.patient_id,
            dentist_id: body.dentist_id,
            procedure_id: body.procedure_id,
            scheduled_at: Timestamp::from_datetime(body.scheduled_at),
            raw_price: parse_price(body.raw_price)?,
            discount_pct: parse_discount(body.discount_pct)?,
            notes: body.notes,
            version: body.version,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

pub async fn reschedule_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(id): Path<AppointmentId>,
    Json(body): Json<RescheduleRequest>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment = state
        .reschedule_appointment_handler()
        .handle(RescheduleAppointmentCommand {
            owner_id,
            appointment_id: id,
            new_time: Timestamp::from_datetime(body.scheduled_at),
        })
        .await?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

pub async fn pay_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(id): Path<AppointmentId>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment = state
        .mark_appointment_paid_handler()
        .handle(MarkAppointmentPaidCommand {
            owner_id,
            appointment_id: id,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

pub async fn complete_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(id): Path<AppointmentId>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let appointment = state
        .complete_appointment_handler()
        .handle(CompleteAppointmentCommand {
            owner_id,
            appointment_id: id,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(appointment)))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(id): Path<AppointmentId>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_appointment_handler()
        .handle(DeleteAppointmentCommand {
            owner_id,
            appointment_id: id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
