//! Payment gateway configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ValidationError;

/// Gateway connection settings and the plan price table.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Provider REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Provider access token
    pub access_token: String,

    /// Per-request timeout in seconds for provider calls
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Monthly price of the basic plan
    #[serde(default = "default_basic_price")]
    pub basic_price: Decimal,

    /// Monthly price of the professional plan
    #[serde(default = "default_professional_price")]
    pub professional_price: Decimal,

    /// Monthly price of the premium plan
    #[serde(default = "default_premium_price")]
    pub premium_price: Decimal,
}

impl PaymentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPaymentApiUrl);
        }
        if self.access_token.is_empty() {
            return Err(ValidationError::MissingRequired("payment.access_token"));
        }
        for price in [
            self.basic_price,
            self.professional_price,
            self.premium_price,
        ] {
            if price <= Decimal::ZERO {
                return Err(ValidationError::InvalidPlanPrice);
            }
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.mercadopago.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_basic_price() -> Decimal {
    Decimal::new(4990, 2)
}

fn default_professional_price() -> Decimal {
    Decimal::new(7990, 2)
}

fn default_premium_price() -> Decimal {
    Decimal::new(12990, 2)
}
