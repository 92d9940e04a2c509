//! Registry server entry point: loads settings, prepares storage and
//! sessions, and runs the Actix server.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registry_backend::inbound::http::health::HealthState;
use registry_backend::inbound::http::session_config::{BuildMode, session_settings};
use registry_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use registry_backend::settings::RegistrySettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        RegistrySettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())?;
    let bind_addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr()))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_example_data(settings.seed_example_data());

    if let Some(database_url) = settings.database_url() {
        let url = database_url.to_owned();
        tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .wrap_err("migration task panicked")??;
        let pool = DbPool::new(PoolConfig::new(database_url)).await?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database URL configured; using the in-process store");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "registry server listening");
    server.await?;
    Ok(())
}
