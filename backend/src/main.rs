//! Enrollment service entry-point: loads settings, prepares persistence and
//! runs the HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use enrollment::inbound::http::health::HealthState;
use enrollment::outbound::persistence::{DbPool, apply_migrations};
use enrollment::settings::AppSettings;
use server::{ServerConfig, create_server};

async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(pool_config) = settings.pool_config() else {
        return Ok(None);
    };

    apply_migrations(pool_config.database_url())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!("connected to PostgreSQL");
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| {
        error!(error = %err, "failed to load settings");
        std::io::Error::other(err.to_string())
    })?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(bind_addr).with_cors_origin(settings.cors_origin());
    if let Some(pool) = connect_database(&settings).await.inspect_err(|err| {
        error!(error = %err, "database initialisation failed");
    })? {
        config = config.with_db_pool(pool);
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_prometheus());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "enrollment server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
