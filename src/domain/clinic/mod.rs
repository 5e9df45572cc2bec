//! Clinic module - patients, dentists, procedures, and appointments.
//!
//! The Appointment is the central financial entity: every create/update
//! recomputes its derived price and commission through the pure calculator in
//! [`financials`].

mod appointment;
mod dentist;
mod financials;
mod patient;
mod procedure;

pub use appointment::Appointment;
pub use dentist::Dentist;
pub use financials::{compute_financials, Financials};
pub use patient::Patient;
pub use procedure::Procedure;
