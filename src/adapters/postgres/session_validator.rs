//! Token-table session validator.
//!
//! Tokens are opaque strings provisioned by the identity layer out of band;
//! this adapter only checks existence and expiry.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, OwnerId};
use crate::ports::{Session, SessionValidator};

use super::db_error;

pub struct PostgresSessionValidator {
    pool: PgPool,
}

impl PostgresSessionValidator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionValidator for PostgresSessionValidator {
    async fn validate(&self, token: &str) -> Result<Session, DomainError> {
        let row = sqlx::query(
            "SELECT owner_id FROM api_sessions \
             WHERE token = $1 AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("validate session", e))?;

        match row {
            Some(row) => {
                let owner_id: uuid::Uuid = row
                    .try_get("owner_id")
                    .map_err(|e| db_error("read session row", e))?;
                Ok(Session {
                    owner_id: OwnerId::from_uuid(owner_id),
                })
            }
            None => Err(DomainError::new(
                ErrorCode::Unauthorized,
                "Invalid or expired session token",
            )),
        }
    }
}
