//! PostgreSQL implementations of the repository ports.
//!
//! Every query on a tenant-owned table filters by `owner_id`; cross-tenant
//! rows are invisible at this layer, not just forbidden.

mod appointment_repository;
mod cashflow_reader;
mod dentist_repository;
mod ledger_repository;
mod patient_repository;
mod payment_repository;
mod procedure_repository;
mod session_validator;
mod subscription_repository;

pub use appointment_repository::PostgresAppointmentRepository;
pub use cashflow_reader::PostgresCashFlowReader;
pub use dentist_repository::PostgresDentistRepository;
pub use ledger_repository::PostgresLedgerRepository;
pub use patient_repository::PostgresPatientRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use procedure_repository::PostgresProcedureRepository;
pub use session_validator::PostgresSessionValidator;
pub use subscription_repository::PostgresSubscriptionRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wrap a sqlx error with context.
fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

/// Map a unique-constraint violation to `Conflict`, anything else to a
/// database error.
fn insert_error(context: &str, constraint: &str, conflict_message: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(constraint) {
            return DomainError::new(ErrorCode::Conflict, conflict_message);
        }
    }
    db_error(context, e)
}
