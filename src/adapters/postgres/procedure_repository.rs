//! PostgreSQL implementation of ProcedureRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::Procedure;
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, OwnerId, ProcedureId, Timestamp,
};
use crate::ports::ProcedureRepository;

use super::db_error;

pub struct PostgresProcedureRepository {
    pool: PgPool,
}

impl PostgresProcedureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProcedureRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    base_price: Decimal,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProcedureRow> for Procedure {
    fn from(row: ProcedureRow) -> Self {
        Procedure {
            id: ProcedureId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            base_price: Money::from_decimal(row.base_price),
            description: row.description,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, owner_id, name, base_price, description, created_at, updated_at";

#[async_trait]
impl ProcedureRepository for PostgresProcedureRepository {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &ProcedureId,
    ) -> Result<Option<Procedure>, DomainError> {
        let row: Option<ProcedureRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM procedures WHERE owner_id = $1 AND id = $2"
        ))
        .bind(owner_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find procedure", e))?;

        Ok(row.map(Procedure::from))
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Procedure>, DomainError> {
        let rows: Vec<ProcedureRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM procedures WHERE owner_id = $1 ORDER BY name"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list procedures", e))?;

        Ok(rows.into_iter().map(Procedure::from).collect())
    }

    async fn create(&self, procedure: &Procedure) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO procedures (
                id, owner_id, name, base_price, description, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(procedure.id.as_uuid())
        .bind(procedure.owner_id.as_uuid())
        .bind(&procedure.name)
        .bind(procedure.base_price.amount())
        .bind(&procedure.description)
        .bind(procedure.created_at.as_datetime())
        .bind(procedure.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create procedure", e))?;

        Ok(())
    }

    async fn update(&self, procedure: &Procedure) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE procedures SET
                name = $3, base_price = $4, description = $5, updated_at = $6
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(procedure.owner_id.as_uuid())
        .bind(procedure.id.as_uuid())
        .bind(&procedure.name)
        .bind(procedure.base_price.amount())
        .bind(&procedure.description)
        .bind(procedure.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update procedure", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProcedureNotFound,
                "Procedure not found",
            ));
        }

        Ok(())
    }
}
