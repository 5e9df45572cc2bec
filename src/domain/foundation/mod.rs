//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Clinicore domain.

mod errors;
mod ids;
mod money;
mod ownership;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AppointmentId, DentistId, EntryId, OwnerId, PatientId, PaymentId, ProcedureId, SubscriptionId,
};
pub use money::Money;
pub use ownership::OwnedByTenant;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
