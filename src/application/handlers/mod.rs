//! Handlers wiring ports to domain operations, one per use case.

pub mod appointment;
pub mod billing;
pub mod cashflow;
pub mod subscription;
