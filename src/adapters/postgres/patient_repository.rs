//! PostgreSQL implementation of PatientRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::Patient;
use crate::domain::foundation::{DomainError, ErrorCode, OwnerId, PatientId, Timestamp};
use crate::ports::PatientRepository;

use super::{db_error, insert_error};

pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PatientRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    tax_id: String,
    phone: Option<String>,
    email: Option<String>,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: PatientId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            tax_id: row.tax_id,
            phone: row.phone,
            email: row.email,
            birth_date: row.birth_date,
            address: row.address,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = "id, owner_id, name, tax_id, phone, email, birth_date, address, \
                              notes, created_at, updated_at";

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &PatientId,
    ) -> Result<Option<Patient>, DomainError> {
        let row: Option<PatientRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM patients WHERE owner_id = $1 AND id = $2"
        ))
        .bind(owner_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find patient", e))?;

        Ok(row.map(Patient::from))
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Patient>, DomainError> {
        let rows: Vec<PatientRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM patients WHERE owner_id = $1 ORDER BY name"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list patients", e))?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    async fn create(&self, patient: &Patient) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO patients (
                id, owner_id, name, tax_id, phone, email, birth_date, address,
                notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(patient.id.as_uuid())
        .bind(patient.owner_id.as_uuid())
        .bind(&patient.name)
        .bind(&patient.tax_id)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(patient.birth_date)
        .bind(&patient.address)
        .bind(&patient.notes)
        .bind(patient.created_at.as_datetime())
        .bind(patient.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to create patient",
                "patients_owner_id_tax_id_key",
                "A patient with this tax id already exists",
                e,
            )
        })?;

        Ok(())
    }

    async fn update(&self, patient: &Patient) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE patients SET
                name = $3, tax_id = $4, phone = $5, email = $6, birth_date = $7,
                address = $8, notes = $9, updated_at = $10
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(patient.owner_id.as_uuid())
        .bind(patient.id.as_uuid())
        .bind(&patient.name)
        .bind(&patient.tax_id)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(patient.birth_date)
        .bind(&patient.address)
        .bind(&patient.notes)
        .bind(patient.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to update patient",
                "patients_owner_id_tax_id_key",
                "A patient with this tax id already exists",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PatientNotFound,
                "Patient not found",
            ));
        }

        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId, id: &PatientId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM patients WHERE owner_id = $1 AND id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete patient", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PatientNotFound,
                "Patient not found",
            ));
        }

        Ok(())
    }
}
