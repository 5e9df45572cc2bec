//! PostgreSQL implementation of AppointmentRepository.
//!
//! Updates are version-checked (optimistic concurrency) and deletion
//! cascades to the derived income entry inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{
    AppointmentId, DentistId, DomainError, ErrorCode, Money, OwnerId, PatientId, Percentage,
    ProcedureId, Timestamp,
};
use crate::ports::AppointmentRepository;

use super::db_error;

pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    owner_id: Uuid,
    patient_id: Uuid,
    dentist_id: Option<Uuid>,
    procedure_id: Uuid,
    scheduled_at: DateTime<Utc>,
    completed: bool,
    paid: bool,
    raw_price: Decimal,
    discount_pct: Decimal,
    final_price: Decimal,
    commission_amount: Decimal,
    notes: Option<String>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: AppointmentId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            patient_id: PatientId::from_uuid(row.patient_id),
            dentist_id: row.dentist_id.map(DentistId::from_uuid),
            procedure_id: ProcedureId::from_uuid(row.procedure_id),
            scheduled_at: Timestamp::from_datetime(row.scheduled_at),
            completed: row.completed,
            paid: row.paid,
            raw_price: Money::from_decimal(row.raw_price),
            discount_pct: Percentage::clamped(row.discount_pct),
            final_price: Money::from_decimal(row.final_price),
            commission_amount: Money::from_decimal(row.commission_amount),
            notes: row.notes,
            version: row.version,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, owner_id, patient_id, dentist_id, procedure_id, scheduled_at, \
                              completed, paid, raw_price, discount_pct, final_price, \
                              commission_amount, notes, version, created_at, updated_at";

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, DomainError> {
        let row: Option<AppointmentRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM appointments WHERE owner_id = $1 AND id = $2"
        ))
        .bind(owner_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find appointment", e))?;

        Ok(row.map(Appointment::from))
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM appointments WHERE owner_id = $1 ORDER BY scheduled_at"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list appointments", e))?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, owner_id, patient_id, dentist_id, procedure_id, scheduled_at,
                completed, paid, raw_price, discount_pct, final_price,
                commission_amount, notes, version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.owner_id.as_uuid())
        .bind(appointment.patient_id.as_uuid())
        .bind(appointment.dentist_id.as_ref().map(DentistId::as_uuid))
        .bind(appointment.procedure_id.as_uuid())
        .bind(appointment.scheduled_at.as_datetime())
        .bind(appointment.completed)
        .bind(appointment.paid)
        .bind(appointment.raw_price.amount())
        .bind(appointment.discount_pct.value())
        .bind(appointment.final_price.amount())
        .bind(appointment.commission_amount.amount())
        .bind(&appointment.notes)
        .bind(appointment.version)
        .bind(appointment.created_at.as_datetime())
        .bind(appointment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create appointment", e))?;

        Ok(())
    }

    async fn update_versioned(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                patient_id = $3,
                dentist_id = $4,
                procedure_id = $5,
                scheduled_at = $6,
                completed = $7,
                paid = $8,
                raw_price = $9,
                discount_pct = $10,
                final_price = $11,
                commission_amount = $12,
                notes = $13,
                updated_at = $14,
                version = version + 1
            WHERE owner_id = $1 AND id = $2 AND version = $15
            "#,
        )
        .bind(appointment.owner_id.as_uuid())
        .bind(appointment.id.as_uuid())
        .bind(appointment.patient_id.as_uuid())
        .bind(appointment.dentist_id.as_ref().map(DentistId::as_uuid))
        .bind(appointment.procedure_id.as_uuid())
        .bind(appointment.scheduled_at.as_datetime())
        .bind(appointment.completed)
        .bind(appointment.paid)
        .bind(appointment.raw_price.amount())
        .bind(appointment.discount_pct.value())
        .bind(appointment.final_price.amount())
        .bind(appointment.commission_amount.amount())
        .bind(&appointment.notes)
        .bind(appointment.updated_at.as_datetime())
        .bind(appointment.version)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update appointment", e))?;

        if result.rows_affected() == 0 {
            // Either the row is gone or someone got there first; distinguish
            // so the client sees 404 vs 409.
            let exists: Option<(i32,)> = sqlx::query_as(
                "SELECT version FROM appointments WHERE owner_id = $1 AND id = $2",
            )
            .bind(appointment.owner_id.as_uuid())
            .bind(appointment.id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check appointment version", e))?;

            return match exists {
                Some((current,)) => Err(DomainError::new(
                    ErrorCode::Conflict,
                    "Appointment was modified concurrently",
                )
                .with_detail("expected_version", appointment.version.to_string())
                .with_detail("actual_version", current.to_string())),
                None => Err(DomainError::new(
                    ErrorCode::AppointmentNotFound,
                    "Appointment not found",
                )),
            };
        }

        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId, id: &AppointmentId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        // Derived income goes first so no orphaned ledger entry survives.
        sqlx::query("DELETE FROM incomes WHERE owner_id = $1 AND appointment_id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete derived income", e))?;

        let result = sqlx::query("DELETE FROM appointments WHERE owner_id = $1 AND id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete appointment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            ));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }
}
