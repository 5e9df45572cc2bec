//! PostgreSQL implementation of LedgerRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cashflow::{Expense, Income, IncomeOrigin};
use crate::domain::foundation::{
    AppointmentId, DomainError, EntryId, ErrorCode, Money, OwnerId, Timestamp,
};
use crate::ports::LedgerRepository;

use super::{db_error, insert_error};

pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct IncomeRow {
    id: Uuid,
    owner_id: Uuid,
    description: String,
    amount: Decimal,
    date: NaiveDate,
    paid: bool,
    origin: String,
    appointment_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<IncomeRow> for Income {
    type Error = DomainError;

    fn try_from(row: IncomeRow) -> Result<Self, Self::Error> {
        let origin = match row.origin.as_str() {
            "manual" => IncomeOrigin::Manual,
            "appointment" => IncomeOrigin::Appointment,
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid income origin value: {}", other),
                ))
            }
        };

        Ok(Income {
            id: EntryId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            description: row.description,
            amount: Money::from_decimal(row.amount),
            date: row.date,
            paid: row.paid,
            origin,
            appointment_id: row.appointment_id.map(AppointmentId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn create_income(&self, income: &Income) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO incomes (
                id, owner_id, description, amount, date, paid, origin,
                appointment_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(income.id.as_uuid())
        .bind(income.owner_id.as_uuid())
        .bind(&income.description)
        .bind(income.amount.amount())
        .bind(income.date)
        .bind(income.paid)
        .bind(income.origin.code())
        .bind(income.appointment_id.as_ref().map(AppointmentId::as_uuid))
        .bind(income.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to create income",
                "incomes_appointment_id_idx",
                "Income for appointment already exists",
                e,
            )
        })?;

        Ok(())
    }

    async fn create_expense(&self, expense: &Expense) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, owner_id, description, amount, date, paid, category, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(expense.id.as_uuid())
        .bind(expense.owner_id.as_uuid())
        .bind(&expense.description)
        .bind(expense.amount.amount())
        .bind(expense.date)
        .bind(expense.paid)
        .bind(expense.category.code())
        .bind(expense.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create expense", e))?;

        Ok(())
    }

    async fn find_income_by_appointment(
        &self,
        owner_id: &OwnerId,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Income>, DomainError> {
        let row: Option<IncomeRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, description, amount, date, paid, origin,
                   appointment_id, created_at
            FROM incomes
            WHERE owner_id = $1 AND appointment_id = $2
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(appointment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find income", e))?;

        row.map(Income::try_from).transpose()
    }

    async fn delete_income(&self, owner_id: &OwnerId, id: &EntryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM incomes WHERE owner_id = $1 AND id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete income", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::EntryNotFound, "Entry not found"));
        }

        Ok(())
    }

    async fn delete_expense(&self, owner_id: &OwnerId, id: &EntryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM expenses WHERE owner_id = $1 AND id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete expense", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::EntryNotFound, "Entry not found"));
        }

        Ok(())
    }
}
