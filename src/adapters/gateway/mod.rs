//! Payment gateway adapters.

mod mercadopago;
mod mock;

pub use mercadopago::{MercadoPagoConfig, MercadoPagoGateway};
pub use mock::MockPaymentGateway;
