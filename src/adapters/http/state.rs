//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::appointment::{
    CompleteAppointmentHandler, CreateAppointmentHandler, DeleteAppointmentHandler,
    MarkAppointmentPaidHandler, RescheduleAppointmentHandler, UpdateAppointmentHandler,
};
use crate::application::handlers::billing::ReconcileWebhookHandler;
use crate::application::handlers::cashflow::{
    GetCashFlowHandler, GetDentistProductionHandler, GetMonthlySeriesHandler,
};
use crate::application::handlers::subscription::{
    EvaluateSubscriptionHandler, PlanPricing, RegisterTrialHandler, StartCheckoutHandler,
};
use crate::config::SiteConfig;
use crate::ports::{
    AppointmentRepository, CashFlowReader, DentistRepository, LedgerRepository,
    PatientRepository, PaymentGateway, PaymentRepository, ProcedureRepository, SessionValidator,
    SubscriptionRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub dentists: Arc<dyn DentistRepository>,
    pub procedures: Arc<dyn ProcedureRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub cashflow: Arc<dyn CashFlowReader>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub pricing: PlanPricing,
    pub site: SiteConfig,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn create_appointment_handler(&self) -> CreateAppointmentHandler {
        CreateAppointmentHandler::new(
            self.appointments.clone(),
            self.patients.clone(),
            self.dentists.clone(),
            self.procedures.clone(),
        )
    }

    pub fn update_appointment_handler(&self) -> UpdateAppointmentHandler {
        UpdateAppointmentHandler::new(
            self.appointments.clone(),
            self.patients.clone(),
            self.dentists.clone(),
            self.procedures.clone(),
        )
    }

    pub fn reschedule_appointment_handler(&self) -> RescheduleAppointmentHandler {
        RescheduleAppointmentHandler::new(self.appointments.clone())
    }

    pub fn mark_appointment_paid_handler(&self) -> MarkAppointmentPaidHandler {
        MarkAppointmentPaidHandler::new(
            self.appointments.clone(),
            self.patients.clone(),
            self.ledger.clone(),
        )
    }

    pub fn complete_appointment_handler(&self) -> CompleteAppointmentHandler {
        CompleteAppointmentHandler::new(self.appointments.clone())
    }

    pub fn delete_appointment_handler(&self) -> DeleteAppointmentHandler {
        DeleteAppointmentHandler::new(self.appointments.clone())
    }

    pub fn register_trial_handler(&self) -> RegisterTrialHandler {
        RegisterTrialHandler::new(self.subscriptions.clone())
    }

    pub fn evaluate_subscription_handler(&self) -> EvaluateSubscriptionHandler {
        EvaluateSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(
            self.subscriptions.clone(),
            self.payments.clone(),
            self.gateway.clone(),
            self.pricing,
        )
    }

    pub fn reconcile_webhook_handler(&self) -> ReconcileWebhookHandler {
        ReconcileWebhookHandler::new(
            self.payments.clone(),
            self.subscriptions.clone(),
            self.gateway.clone(),
        )
    }

    pub fn get_cash_flow_handler(&self) -> GetCashFlowHandler {
        GetCashFlowHandler::new(self.cashflow.clone())
    }

    pub fn get_monthly_series_handler(&self) -> GetMonthlySeriesHandler {
        GetMonthlySeriesHandler::new(self.cashflow.clone())
    }

    pub fn get_dentist_production_handler(&self) -> GetDentistProductionHandler {
        GetDentistProductionHandler::new(self.cashflow.clone())
    }
}
