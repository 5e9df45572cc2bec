//! Ports - trait interfaces between the application core and adapters.
//!
//! Handlers depend only on these traits; postgres and gateway adapters
//! implement them. Every method is owner-scoped where the resource is
//! tenant-owned.

mod appointment_repository;
mod cashflow_reader;
mod dentist_repository;
mod ledger_repository;
mod patient_repository;
mod payment_gateway;
mod payment_repository;
mod procedure_repository;
mod session_validator;
mod subscription_repository;

pub use appointment_repository::AppointmentRepository;
pub use cashflow_reader::{CashFlowReader, ReportRange};
pub use dentist_repository::DentistRepository;
pub use ledger_repository::LedgerRepository;
pub use patient_repository::PatientRepository;
pub use payment_gateway::{CheckoutPreference, PaymentGateway};
pub use payment_repository::PaymentRepository;
pub use procedure_repository::ProcedureRepository;
pub use session_validator::{Session, SessionValidator};
pub use subscription_repository::SubscriptionRepository;
