//! PostgreSQL implementation of PaymentRepository.
//!
//! Replay safety rests on the guarded status write: a terminal row is never
//! overwritten by a stale transition. The locked read only keeps a reader
//! from observing a row mid-write; the lock is released when the read
//! transaction commits, before the handler mutates anything.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Payment, PaymentMethod, PaymentStatus};
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PaymentId, SubscriptionId, Timestamp,
};
use crate::ports::PaymentRepository;

use super::{db_error, insert_error};

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    subscription_id: Uuid,
    external_reference: String,
    plan_label: String,
    amount: Decimal,
    method: String,
    status: String,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    raw_payload: Option<serde_json::Value>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            subscription_id: SubscriptionId::from_uuid(row.subscription_id),
            external_reference: row.external_reference,
            plan_label: row.plan_label,
            amount: Money::from_decimal(row.amount),
            method: parse_method(&row.method)?,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            raw_payload: row.raw_payload,
        })
    }
}

fn parse_method(s: &str) -> Result<PaymentMethod, DomainError> {
    match s {
        "pix" => Ok(PaymentMethod::Pix),
        "card" => Ok(PaymentMethod::Card),
        "boleto" => Ok(PaymentMethod::Boleto),
        "unknown" => Ok(PaymentMethod::Unknown),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment method value: {}", s),
        )),
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "paid" => Ok(PaymentStatus::Paid),
        "failed" => Ok(PaymentStatus::Failed),
        "cancelled" => Ok(PaymentStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status value: {}", s),
        )),
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, subscription_id, external_reference, plan_label, amount,
                method, status, created_at, paid_at, raw_payload
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.subscription_id.as_uuid())
        .bind(&payment.external_reference)
        .bind(&payment.plan_label)
        .bind(payment.amount.amount())
        .bind(payment.method.code())
        .bind(payment.status.code())
        .bind(payment.created_at.as_datetime())
        .bind(payment.paid_at.as_ref().map(Timestamp::as_datetime))
        .bind(&payment.raw_payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to create payment",
                "payments_external_reference_key",
                "Payment reference already exists",
                e,
            )
        })?;

        Ok(())
    }

    async fn find_by_reference_for_update(
        &self,
        external_reference: &str,
    ) -> Result<Option<Payment>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        // Waits behind any concurrent reconciliation writing this row, so
        // the state read here is never mid-transition. The lock ends at
        // commit; replay safety comes from the guarded update below.
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, subscription_id, external_reference, plan_label, amount,
                   method, status, created_at, paid_at, raw_payload
            FROM payments
            WHERE external_reference = $1
            FOR UPDATE
            "#,
        )
        .bind(external_reference)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to find payment", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        // The status guard keeps terminal rows terminal: a replayed or
        // racing transition writes nothing instead of regressing state.
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                method = $3,
                paid_at = $4,
                raw_payload = $5
            WHERE id = $1 AND (status = 'pending' OR status = $2)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.code())
        .bind(payment.method.code())
        .bind(payment.paid_at.as_ref().map(Timestamp::as_datetime))
        .bind(&payment.raw_payload)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                payment_id = %payment.id,
                "payment already in a different terminal state, write skipped"
            );
        }

        Ok(())
    }
}
