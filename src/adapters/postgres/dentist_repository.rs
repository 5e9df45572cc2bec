//! PostgreSQL implementation of DentistRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::Dentist;
use crate::domain::foundation::{
    DentistId, DomainError, ErrorCode, OwnerId, Percentage, Timestamp,
};
use crate::ports::DentistRepository;

use super::{db_error, insert_error};

pub struct PostgresDentistRepository {
    pool: PgPool,
}

impl PostgresDentistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DentistRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    license_code: String,
    commission_rate: Decimal,
    specialty: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DentistRow> for Dentist {
    fn from(row: DentistRow) -> Self {
        Dentist {
            id: DentistId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            license_code: row.license_code,
            // Stored values were validated on the way in; clamp keeps a
            // manually edited row from breaking the calculator.
            commission_rate: Percentage::clamped(row.commission_rate),
            specialty: row.specialty,
            phone: row.phone,
            email: row.email,
            active: row.active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, owner_id, name, license_code, commission_rate, specialty, \
                              phone, email, active, created_at, updated_at";

#[async_trait]
impl DentistRepository for PostgresDentistRepository {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &DentistId,
    ) -> Result<Option<Dentist>, DomainError> {
        let row: Option<DentistRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM dentists WHERE owner_id = $1 AND id = $2"
        ))
        .bind(owner_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find dentist", e))?;

        Ok(row.map(Dentist::from))
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Dentist>, DomainError> {
        let rows: Vec<DentistRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM dentists WHERE owner_id = $1 ORDER BY name"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list dentists", e))?;

        Ok(rows.into_iter().map(Dentist::from).collect())
    }

    async fn create(&self, dentist: &Dentist) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO dentists (
                id, owner_id, name, license_code, commission_rate, specialty,
                phone, email, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(dentist.id.as_uuid())
        .bind(dentist.owner_id.as_uuid())
        .bind(&dentist.name)
        .bind(&dentist.license_code)
        .bind(dentist.commission_rate.value())
        .bind(&dentist.specialty)
        .bind(&dentist.phone)
        .bind(&dentist.email)
        .bind(dentist.active)
        .bind(dentist.created_at.as_datetime())
        .bind(dentist.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to create dentist",
                "dentists_owner_id_license_code_key",
                "A dentist with this license code already exists",
                e,
            )
        })?;

        Ok(())
    }

    async fn update(&self, dentist: &Dentist) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE dentists SET
                name = $3, license_code = $4, commission_rate = $5, specialty = $6,
                phone = $7, email = $8, active = $9, updated_at = $10
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(dentist.owner_id.as_uuid())
        .bind(dentist.id.as_uuid())
        .bind(&dentist.name)
        .bind(&dentist.license_code)
        .bind(dentist.commission_rate.value())
        .bind(&dentist.specialty)
        .bind(&dentist.phone)
        .bind(&dentist.email)
        .bind(dentist.active)
        .bind(dentist.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to update dentist",
                "dentists_owner_id_license_code_key",
                "A dentist with this license code already exists",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DentistNotFound,
                "Dentist not found",
            ));
        }

        Ok(())
    }
}
