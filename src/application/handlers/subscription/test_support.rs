//! Shared in-memory port implementations for subscription and billing
//! handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::{Payment, ProviderPayment};
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, OwnerId, SubscriptionId,
};
use crate::domain::subscription::Subscription;
use crate::ports::{
    CheckoutPreference, PaymentGateway, PaymentRepository, SubscriptionRepository,
};

#[derive(Default)]
pub struct InMemorySubscriptions {
    rows: Mutex<HashMap<SubscriptionId, Subscription>>,
}

impl InMemorySubscriptions {
    pub fn with(subscription: Subscription) -> Self {
        let store = Self::default();
        store
            .rows
            .lock()
            .unwrap()
            .insert(subscription.id, subscription);
        store
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.rows.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|s| s.owner_id == *owner_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|s| s.owner_id == subscription.owner_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Owner already has a subscription",
            ));
        }
        rows.insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.rows
            .lock()
            .unwrap()
            .insert(subscription.id, subscription.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPayments {
    rows: Mutex<Vec<Payment>>,
}

impl InMemoryPayments {
    pub fn with(payment: Payment) -> Self {
        let store = Self::default();
        store.rows.lock().unwrap().push(payment);
        store
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn by_reference(&self, external_reference: &str) -> Option<Payment> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.external_reference == external_reference)
            .cloned()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPayments {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn find_by_reference_for_update(
        &self,
        external_reference: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self.by_reference(external_reference))
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(stored) = rows.iter_mut().find(|p| p.id == payment.id) {
            *stored = payment.clone();
        }
        Ok(())
    }
}

/// Gateway stub returning a canned preference and a configurable provider
/// payment.
pub struct StubGateway {
    pub provider_payment: Option<ProviderPayment>,
    pub fail_preference: bool,
}

impl StubGateway {
    pub fn approving(external_reference: &str) -> Self {
        Self {
            provider_payment: Some(ProviderPayment {
                status: "approved".to_string(),
                external_reference: Some(external_reference.to_string()),
                payment_method_id: Some("pix".to_string()),
            }),
            fail_preference: false,
        }
    }

    pub fn reporting(provider_payment: ProviderPayment) -> Self {
        Self {
            provider_payment: Some(provider_payment),
            fail_preference: false,
        }
    }

    pub fn healthy() -> Self {
        Self {
            provider_payment: None,
            fail_preference: false,
        }
    }

    pub fn failing_preference() -> Self {
        Self {
            provider_payment: None,
            fail_preference: true,
        }
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_preference(
        &self,
        external_reference: &str,
        _plan_label: &str,
        _amount: Money,
    ) -> Result<CheckoutPreference, DomainError> {
        if self.fail_preference {
            return Err(DomainError::new(
                ErrorCode::ExternalServiceError,
                "Simulated gateway outage",
            ));
        }
        Ok(CheckoutPreference {
            preference_id: format!("pref-{external_reference}"),
            checkout_url: format!("https://gateway.test/checkout/{external_reference}"),
        })
    }

    async fn get_payment(
        &self,
        _provider_payment_id: &str,
    ) -> Result<ProviderPayment, DomainError> {
        self.provider_payment.clone().ok_or_else(|| {
            DomainError::new(ErrorCode::ExternalServiceError, "Simulated gateway outage")
        })
    }
}
