//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, OwnerId, SubscriptionId, Timestamp,
};
use crate::domain::subscription::{PlanTier, Subscription};
use crate::ports::SubscriptionRepository;

use super::{db_error, insert_error};

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    owner_id: Uuid,
    plan: String,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let plan = row.plan.parse::<PlanTier>().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan value: {}", row.plan),
            )
        })?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            plan,
            period_start: Timestamp::from_datetime(row.period_start),
            period_end: Timestamp::from_datetime(row.period_end),
            active: row.active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, owner_id, plan, period_start, period_end, active, created_at, updated_at";

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM subscriptions WHERE owner_id = $1"
        ))
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM subscriptions WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn create(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, owner_id, plan, period_start, period_end, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.owner_id.as_uuid())
        .bind(subscription.plan.code())
        .bind(subscription.period_start.as_datetime())
        .bind(subscription.period_end.as_datetime())
        .bind(subscription.active)
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            insert_error(
                "Failed to create subscription",
                "subscriptions_owner_id_key",
                "Owner already has a subscription",
                e,
            )
        })?;

        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                plan = $2,
                period_start = $3,
                period_end = $4,
                active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.plan.code())
        .bind(subscription.period_start.as_datetime())
        .bind(subscription.period_end.as_datetime())
        .bind(subscription.active)
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update subscription", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            ));
        }

        Ok(())
    }
}
