//! In-memory adapters and router assembly for end-to-end tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use chrono::Datelike;
use rust_decimal::Decimal;

use clinicore::adapters::http::{build_router, AppState};
use clinicore::application::handlers::subscription::PlanPricing;
use clinicore::config::{ServerConfig, SiteConfig};
use clinicore::domain::billing::{Payment, ProviderPayment};
use clinicore::domain::cashflow::{
    CashFlowSummary, CategoryBreakdown, DentistProductionRow, Expense, Income, MonthlySeries,
};
use clinicore::domain::clinic::{Appointment, Dentist, Patient, Procedure};
use clinicore::domain::foundation::{
    AppointmentId, DentistId, DomainError, EntryId, ErrorCode, Money, OwnerId, PatientId,
    ProcedureId, SubscriptionId,
};
use clinicore::domain::subscription::Subscription;
use clinicore::ports::{
    AppointmentRepository, CashFlowReader, CheckoutPreference, DentistRepository,
    LedgerRepository, PatientRepository, PaymentGateway, PaymentRepository, ProcedureRepository,
    ReportRange, Session, SessionValidator, SubscriptionRepository,
};

// ═══════════════════════════════════════════════════════════════════════
// Repositories
// ═══════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MemSubscriptions(pub Mutex<Vec<Subscription>>);

#[async_trait]
impl SubscriptionRepository for MemSubscriptions {
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.owner_id == *owner_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.0.lock().unwrap().iter().find(|s| s.id == *id).cloned())
    }

    async fn create(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        if rows.iter().any(|s| s.owner_id == subscription.owner_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Owner already has a subscription",
            ));
        }
        rows.push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        match rows.iter_mut().find(|s| s.id == subscription.id) {
            Some(row) => {
                *row = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            )),
        }
    }
}

#[derive(Default)]
pub struct MemPayments(pub Mutex<Vec<Payment>>);

#[async_trait]
impl PaymentRepository for MemPayments {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        if rows
            .iter()
            .any(|p| p.external_reference == payment.external_reference)
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Duplicate external reference",
            ));
        }
        rows.push(payment.clone());
        Ok(())
    }

    async fn find_by_reference_for_update(
        &self,
        external_reference: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.external_reference == external_reference)
            .cloned())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|p| p.id == payment.id) {
            *row = payment.clone();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemPatients(pub Mutex<Vec<Patient>>);

#[async_trait]
impl PatientRepository for MemPatients {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &PatientId,
    ) -> Result<Option<Patient>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id && p.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Patient>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, patient: &Patient) -> Result<(), DomainError> {
        self.0.lock().unwrap().push(patient.clone());
        Ok(())
    }

    async fn update(&self, _patient: &Patient) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _owner_id: &OwnerId, _id: &PatientId) -> Result<(), DomainError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemDentists(pub Mutex<Vec<Dentist>>);

#[async_trait]
impl DentistRepository for MemDentists {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &DentistId,
    ) -> Result<Option<Dentist>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == *id && d.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Dentist>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, dentist: &Dentist) -> Result<(), DomainError> {
        self.0.lock().unwrap().push(dentist.clone());
        Ok(())
    }

    async fn update(&self, _dentist: &Dentist) -> Result<(), DomainError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemProcedures(pub Mutex<Vec<Procedure>>);

#[async_trait]
impl ProcedureRepository for MemProcedures {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &ProcedureId,
    ) -> Result<Option<Procedure>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id && p.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Procedure>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, procedure: &Procedure) -> Result<(), DomainError> {
        self.0.lock().unwrap().push(procedure.clone());
        Ok(())
    }

    async fn update(&self, _procedure: &Procedure) -> Result<(), DomainError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemAppointments(pub Mutex<Vec<Appointment>>);

#[async_trait]
impl AppointmentRepository for MemAppointments {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id && a.owner_id == *owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Appointment>, DomainError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError> {
        self.0.lock().unwrap().push(appointment.clone());
        Ok(())
    }

    async fn update_versioned(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|a| a.id == appointment.id) else {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            ));
        };
        if row.version != appointment.version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Appointment was modified concurrently",
            ));
        }
        let mut updated = appointment.clone();
        updated.version += 1;
        *row = updated;
        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId, id: &AppointmentId) -> Result<(), DomainError> {
        let mut rows = self.0.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| !(a.id == *id && a.owner_id == *owner_id));
        if rows.len() == before {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemLedger {
    pub incomes: Mutex<Vec<Income>>,
    pub expenses: Mutex<Vec<Expense>>,
}

#[async_trait]
impl LedgerRepository for MemLedger {
    async fn create_income(&self, income: &Income) -> Result<(), DomainError> {
        let mut rows = self.incomes.lock().unwrap();
        if income.appointment_id.is_some()
            && rows
                .iter()
                .any(|i| i.appointment_id == income.appointment_id)
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Income already exists for appointment",
            ));
        }
        rows.push(income.clone());
        Ok(())
    }

    async fn create_expense(&self, expense: &Expense) -> Result<(), DomainError> {
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(())
    }

    async fn find_income_by_appointment(
        &self,
        owner_id: &OwnerId,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Income>, DomainError> {
        Ok(self
            .incomes
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.owner_id == *owner_id && i.appointment_id == Some(*appointment_id))
            .cloned())
    }

    async fn delete_income(&self, _owner_id: &OwnerId, _id: &EntryId) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete_expense(&self, _owner_id: &OwnerId, _id: &EntryId) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Report reader that aggregates the in-memory ledger and appointments the
/// way the SQL reader does: null-safe sums, zero-filled series, breakdowns
/// ordered by descending total.
pub struct MemCashFlow {
    pub ledger: Arc<MemLedger>,
    pub appointments: Arc<MemAppointments>,
    pub dentists: Arc<MemDentists>,
}

fn breakdown_of(entries: Vec<(String, Decimal)>) -> Vec<CategoryBreakdown> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for (label, amount) in entries {
        *totals.entry(label).or_default() += amount;
    }
    let mut rows: Vec<CategoryBreakdown> = totals
        .into_iter()
        .map(|(label, total)| CategoryBreakdown {
            label,
            total: Money::from_decimal(total),
        })
        .collect();
    rows.sort_by(|a, b| b.total.amount().cmp(&a.total.amount()));
    rows
}

#[async_trait]
impl CashFlowReader for MemCashFlow {
    async fn summary(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<CashFlowSummary, DomainError> {
        let total_income: Decimal = self
            .ledger
            .incomes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.owner_id == *owner_id && i.date >= range.start && i.date <= range.end)
            .map(|i| i.amount.amount())
            .sum();
        let total_expense: Decimal = self
            .ledger
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner_id == *owner_id && e.date >= range.start && e.date <= range.end)
            .map(|e| e.amount.amount())
            .sum();
        Ok(CashFlowSummary::new(
            Money::from_decimal(total_income),
            Money::from_decimal(total_expense),
        ))
    }

    async fn monthly_series(
        &self,
        owner_id: &OwnerId,
        year: i32,
    ) -> Result<MonthlySeries, DomainError> {
        let mut months: HashMap<u32, (Decimal, Decimal)> = HashMap::new();
        for income in self.ledger.incomes.lock().unwrap().iter() {
            if income.owner_id == *owner_id && income.date.year() == year {
                months.entry(income.date.month()).or_default().0 += income.amount.amount();
            }
        }
        for expense in self.ledger.expenses.lock().unwrap().iter() {
            if expense.owner_id == *owner_id && expense.date.year() == year {
                months.entry(expense.date.month()).or_default().1 += expense.amount.amount();
            }
        }
        let sums: Vec<(u32, Money, Money)> = months
            .into_iter()
            .map(|(month, (income, expense))| {
                (
                    month,
                    Money::from_decimal(income),
                    Money::from_decimal(expense),
                )
            })
            .collect();
        Ok(MonthlySeries::from_sparse(year, &sums))
    }

    async fn expense_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError> {
        Ok(breakdown_of(
            self.ledger
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| {
                    e.owner_id == *owner_id && e.date >= range.start && e.date <= range.end
                })
                .map(|e| (e.category.code().to_string(), e.amount.amount()))
                .collect(),
        ))
    }

    async fn income_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError> {
        Ok(breakdown_of(
            self.ledger
                .incomes
                .lock()
                .unwrap()
                .iter()
                .filter(|i| {
                    i.owner_id == *owner_id && i.date >= range.start && i.date <= range.end
                })
                .map(|i| (i.origin.code().to_string(), i.amount.amount()))
                .collect(),
        ))
    }

    async fn dentist_production(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<DentistProductionRow>, DomainError> {
        let dentists = self.dentists.0.lock().unwrap();
        let mut rows: HashMap<String, (i64, Decimal, Decimal)> = HashMap::new();
        for appointment in self.appointments.0.lock().unwrap().iter() {
            let date = appointment.scheduled_at.as_datetime().date_naive();
            if appointment.owner_id != *owner_id || date < range.start || date > range.end {
                continue;
            }
            let Some(name) = appointment
                .dentist_id
                .and_then(|id| dentists.iter().find(|d| d.id == id))
                .map(|d| d.name.clone())
            else {
                continue;
            };
            let row = rows.entry(name).or_default();
            row.0 += 1;
            row.1 += appointment.final_price.amount();
            row.2 += appointment.commission_amount.amount();
        }
        let mut production: Vec<DentistProductionRow> = rows
            .into_iter()
            .map(|(name, (count, revenue, commission))| {
                DentistProductionRow::new(
                    name,
                    count,
                    Money::from_decimal(revenue),
                    Money::from_decimal(commission),
                )
            })
            .collect();
        production.sort_by(|a, b| b.revenue.amount().cmp(&a.revenue.amount()));
        Ok(production)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Gateway and sessions
// ═══════════════════════════════════════════════════════════════════════

/// Gateway that serves scripted provider payments by id.
#[derive(Default)]
pub struct ScriptedGateway {
    pub payments: Mutex<HashMap<String, ProviderPayment>>,
}

impl ScriptedGateway {
    pub fn set_payment(&self, provider_id: &str, payment: ProviderPayment) {
        self.payments
            .lock()
            .unwrap()
            .insert(provider_id.to_string(), payment);
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_preference(
        &self,
        external_reference: &str,
        _plan_label: &str,
        _amount: Money,
    ) -> Result<CheckoutPreference, DomainError> {
        Ok(CheckoutPreference {
            preference_id: format!("pref-{external_reference}"),
            checkout_url: "https://checkout.test/session".to_string(),
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
                DomainError::new(ErrorCode::ExternalServiceError, "Provider unavailable")
            })
    }
}

/// Validator backed by a static token table.
#[derive(Default)]
pub struct StaticSessions(pub Mutex<HashMap<String, OwnerId>>);

impl StaticSessions {
    pub fn grant(&self, token: &str, owner_id: OwnerId) {
        self.0.lock().unwrap().insert(token.to_string(), owner_id);
    }
}

#[async_trait]
impl SessionValidator for StaticSessions {
    async fn validate(&self, token: &str) -> Result<Session, DomainError> {
        self.0
            .lock()
            .unwrap()
            .get(token)
            .map(|owner_id| Session {
                owner_id: *owner_id,
            })
            .ok_or_else(|| DomainError::new(ErrorCode::Unauthorized, "Invalid session token"))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Harness
// ═══════════════════════════════════════════════════════════════════════

pub struct TestApp {
    pub router: Router,
    pub subscriptions: Arc<MemSubscriptions>,
    pub payments: Arc<MemPayments>,
    pub patients: Arc<MemPatients>,
    pub dentists: Arc<MemDentists>,
    pub procedures: Arc<MemProcedures>,
    pub appointments: Arc<MemAppointments>,
    pub ledger: Arc<MemLedger>,
    pub gateway: Arc<ScriptedGateway>,
    pub sessions: Arc<StaticSessions>,
}

pub fn money(s: &str) -> Money {
    Money::try_new(s.parse().unwrap()).unwrap()
}

pub fn test_app() -> TestApp {
    let subscriptions = Arc::new(MemSubscriptions::default());
    let payments = Arc::new(MemPayments::default());
    let patients = Arc::new(MemPatients::default());
    let dentists = Arc::new(MemDentists::default());
    let procedures = Arc::new(MemProcedures::default());
    let appointments = Arc::new(MemAppointments::default());
    let ledger = Arc::new(MemLedger::default());
    let gateway = Arc::new(ScriptedGateway::default());
    let sessions = Arc::new(StaticSessions::default());

    let state = AppState {
        subscriptions: subscriptions.clone(),
        payments: payments.clone(),
        patients: patients.clone(),
        dentists: dentists.clone(),
        procedures: procedures.clone(),
        appointments: appointments.clone(),
        ledger: ledger.clone(),
        cashflow: Arc::new(MemCashFlow {
            ledger: ledger.clone(),
            appointments: appointments.clone(),
            dentists: dentists.clone(),
        }),
        gateway: gateway.clone(),
        session_validator: sessions.clone(),
        pricing: PlanPricing {
            basic: money("49.90"),
            professional: money("79.90"),
            premium: money("129.90"),
        },
        site: SiteConfig::default(),
    };

    let router = build_router(state, &ServerConfig::default());

    TestApp {
        router,
        subscriptions,
        payments,
        patients,
        dentists,
        procedures,
        appointments,
        ledger,
        gateway,
        sessions,
    }
}
