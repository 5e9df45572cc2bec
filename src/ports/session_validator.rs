//! Session validation port for the HTTP layer.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OwnerId};

/// An authenticated request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub owner_id: OwnerId,
}

/// Validates a bearer token into a session.
///
/// Token issuance is out of scope here; deployments front this service with
/// their identity provider and this port verifies what arrives.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<Session, DomainError>;
}
