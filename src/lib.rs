//! Clinicore - Multi-tenant dental clinic management core.
//!
//! This crate implements the business core of a clinic management SaaS:
//! appointment financials (automatic pricing, discounts, dentist commissions),
//! the subscription/trial entitlement engine that gates every write, cash-flow
//! reporting, and payment-gateway reconciliation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
