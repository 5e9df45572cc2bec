//! Subscription plan tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Plan tier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Time-boxed free trial granted at registration.
    Trial,
    Basic,
    Professional,
    Premium,
}

impl PlanTier {
    /// Stable string code used in the database and in checkout URLs.
    pub fn code(&self) -> &'static str {
        match self {
            PlanTier::Trial => "trial",
            PlanTier::Basic => "basic",
            PlanTier::Professional => "professional",
            PlanTier::Premium => "premium",
        }
    }

    /// Human-readable plan name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Trial => "Free Trial",
            PlanTier::Basic => "Basic Plan",
            PlanTier::Professional => "Professional Plan",
            PlanTier::Premium => "Premium Plan",
        }
    }

    /// True for tiers that require payment.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Trial)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PlanTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(PlanTier::Trial),
            "basic" => Ok(PlanTier::Basic),
            "professional" => Ok(PlanTier::Professional),
            "premium" => Ok(PlanTier::Premium),
            other => Err(ValidationError::invalid_format(
                "plan",
                format!("unknown plan tier: {}", other),
            )),
        }
    }
}
