//! Appointment use cases.
//!
//! Every path that changes price inputs goes through the aggregate's
//! financial recompute; the repositories enforce tenant scoping and
//! optimistic concurrency.

#[cfg(test)]
pub(crate) mod test_support;

mod complete;
mod create;
mod delete;
mod mark_paid;
mod reschedule;
mod update;

pub use complete::{CompleteAppointmentCommand, CompleteAppointmentHandler};
pub use create::{CreateAppointmentCommand, CreateAppointmentHandler};
pub use delete::{DeleteAppointmentCommand, DeleteAppointmentHandler};
pub use mark_paid::{MarkAppointmentPaidCommand, MarkAppointmentPaidHandler};
pub use reschedule::{RescheduleAppointmentCommand, RescheduleAppointmentHandler};
pub use update::{UpdateAppointmentCommand, UpdateAppointmentHandler};
