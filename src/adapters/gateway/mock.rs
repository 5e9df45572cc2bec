//! In-memory payment gateway for development and integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::ProviderPayment;
use crate::domain::foundation::{DomainError, ErrorCode, Money};
use crate::ports::{CheckoutPreference, PaymentGateway};

/// Gateway stand-in that records preferences and serves scripted payments.
#[derive(Default)]
pub struct MockPaymentGateway {
    payments: Mutex<HashMap<String, ProviderPayment>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the payment the provider will report for the given id.
    pub fn set_payment(&self, provider_payment_id: &str, payment: ProviderPayment) {
        self.payments
            .lock()
            .unwrap()
            .insert(provider_payment_id.to_string(), payment);
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_preference(
        &self,
        external_reference: &str,
        _plan_label: &str,
        _amount: Money,
    ) -> Result<CheckoutPreference, DomainError> {
        Ok(CheckoutPreference {
            preference_id: format!("mock-pref-{external_reference}"),
            checkout_url: format!("https://mock.gateway/checkout/{external_reference}"),
        })
    }

    async fn get_payment(
        &self,
        provider_payment_id: &str,
    ) -> Result<ProviderPayment, DomainError> {
        self.payments
            .lock()
            .unwrap()
            .get(provider_payment_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ExternalServiceError,
                    format!("Unknown mock payment: {provider_payment_id}"),
                )
            })
    }
}
