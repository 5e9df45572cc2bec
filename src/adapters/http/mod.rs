//! HTTP adapter - axum routes, middleware, and DTOs.

pub mod appointments;
pub mod cashflow;
pub mod error;
pub mod middleware;
pub mod reports;
pub mod routes;
pub mod state;
pub mod subscription;
pub mod webhook;

pub use routes::build_router;
pub use state::AppState;
