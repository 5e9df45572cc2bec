//! Mercado Pago implementation of the PaymentGateway port.
//!
//! Two REST calls: `POST /checkout/preferences` to open a checkout session,
//! and `GET /v1/payments/{id}` to fetch the live payment state during
//! webhook reconciliation. Provider errors are logged with context and
//! surfaced as opaque external-service failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::billing::ProviderPayment;
use crate::domain::foundation::{DomainError, ErrorCode, Money};
use crate::ports::{CheckoutPreference, PaymentGateway};

/// Configuration for the Mercado Pago client.
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    pub api_base_url: String,
    pub access_token: String,
    pub timeout: Duration,

    /// Where the browser lands after checkout.
    pub back_url: String,

    /// Where the provider posts payment notifications.
    pub notification_url: String,
}

pub struct MercadoPagoGateway {
    config: MercadoPagoConfig,
    client: Client,
}

impl MercadoPagoGateway {
    pub fn new(config: MercadoPagoConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    fn provider_error(context: &str, e: impl std::fmt::Display) -> DomainError {
        tracing::error!(error = %e, "{context}");
        DomainError::new(ErrorCode::ExternalServiceError, "Payment provider error")
    }
}

#[derive(Debug, Serialize)]
struct PreferenceItem {
    title: String,
    quantity: u32,
    unit_price: rust_decimal::Decimal,
    currency_id: &'static str,
}

#[derive(Debug, Serialize)]
struct PreferenceBackUrls {
    success: String,
    pending: String,
    failure: String,
}

#[derive(Debug, Serialize)]
struct PreferenceRequest {
    items: Vec<PreferenceItem>,
    external_reference: String,
    back_urls: PreferenceBackUrls,
    notification_url: String,
    auto_return: &'static str,
}

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    id: String,
    init_point: String,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    status: String,
    external_reference: Option<String>,
    payment_method_id: Option<String>,
}

#[async_trait]
impl PaymentGateway for MercadoPagoGateway {
    async fn create_preference(
        &self,
        external_reference: &str,
        plan_label: &str,
        amount: Money,
    ) -> Result<CheckoutPreference, DomainError> {
        let request = PreferenceRequest {
            items: vec![PreferenceItem {
                title: format!("Subscription - {plan_label}"),
                quantity: 1,
                unit_price: amount.amount(),
                currency_id: "BRL",
            }],
            external_reference: external_reference.to_string(),
            back_urls: PreferenceBackUrls {
                success: self.config.back_url.clone(),
                pending: self.config.back_url.clone(),
                failure: self.config.back_url.clone(),
            },
            notification_url: self.config.notification_url.clone(),
            auto_return: "approved",
        };

        let response = self
            .client
            .post(format!(
                "{}/checkout/preferences",
                self.config.api_base_url
            ))
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::provider_error("preference request failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(
                "preference request rejected",
                format!("status {status}: {body}"),
            ));
        }

        let preference: PreferenceResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error("preference response malformed", e))?;

        Ok(CheckoutPreference {
            preference_id: preference.id,
            checkout_url: preference.init_point,
        })
    }

    async fn get_payment(
        &self,
        provider_payment_id: &str,
    ) -> Result<ProviderPayment, DomainError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/payments/{provider_payment_id}",
                self.config.api_base_url
            ))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| Self::provider_error("payment fetch failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::provider_error(
                "payment fetch rejected",
                format!("status {status} for payment {provider_payment_id}"),
            ));
        }

        let payment: PaymentResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error("payment response malformed", e))?;

        Ok(ProviderPayment {
            status: payment.status,
            external_reference: payment.external_reference,
            payment_method_id: payment.payment_method_id,
        })
    }
}
