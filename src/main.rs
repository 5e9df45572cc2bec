//! Service entry point: configuration, database pool, migrations, router.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use clinicore::adapters::gateway::{MercadoPagoConfig, MercadoPagoGateway};
use clinicore::adapters::http::{build_router, AppState};
use clinicore::adapters::postgres::{
    PostgresAppointmentRepository, PostgresCashFlowReader, PostgresDentistRepository,
    PostgresLedgerRepository, PostgresPatientRepository, PostgresPaymentRepository,
    PostgresProcedureRepository, PostgresSessionValidator, PostgresSubscriptionRepository,
};
use clinicore::application::handlers::subscription::PlanPricing;
use clinicore::config::AppConfig;
use clinicore::domain::foundation::Money;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting clinicore"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("migrations applied");

    let pricing = PlanPricing {
        basic: Money::try_new(config.payment.basic_price)?,
        professional: Money::try_new(config.payment.professional_price)?,
        premium: Money::try_new(config.payment.premium_price)?,
    };

    let gateway = MercadoPagoGateway::new(MercadoPagoConfig {
        api_base_url: config.payment.api_base_url.clone(),
        access_token: config.payment.access_token.clone(),
        timeout: Duration::from_secs(config.payment.timeout_secs),
        back_url: format!("{}/subscription", config.server.public_base_url),
        notification_url: format!("{}/webhook/payments", config.server.public_base_url),
    });

    let state = AppState {
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        patients: Arc::new(PostgresPatientRepository::new(pool.clone())),
        dentists: Arc::new(PostgresDentistRepository::new(pool.clone())),
        procedures: Arc::new(PostgresProcedureRepository::new(pool.clone())),
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        ledger: Arc::new(PostgresLedgerRepository::new(pool.clone())),
        cashflow: Arc::new(PostgresCashFlowReader::new(pool.clone())),
        gateway: Arc::new(gateway),
        session_validator: Arc::new(PostgresSessionValidator::new(pool)),
        pricing,
        site: config.site.clone(),
    };

    let router = build_router(state, &config.server);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
