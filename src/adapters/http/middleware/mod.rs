//! HTTP middleware: authentication and the subscription access gate.

pub mod access_gate;
pub mod auth;

pub use access_gate::access_gate_middleware;
pub use auth::{auth_middleware, AuthenticatedTenant, RequireTenant};
