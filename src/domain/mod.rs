//! Domain layer - pure business logic.
//!
//! No I/O lives here. Aggregates, value objects, and evaluators are
//! exercised by the application handlers through the ports.

pub mod billing;
pub mod cashflow;
pub mod clinic;
pub mod foundation;
pub mod subscription;
