//! Ledger server entry point: loads settings, opens the store and serves the
//! REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_http_state, create_server};
use tuckshop::inbound::http::health::HealthState;
use tuckshop::settings::LedgerSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = LedgerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load configuration: {err}")))?;
    let config = ServerConfig::from_settings(&settings)?;
    let http_state = build_http_state(&settings)?;
    let health_state = web::Data::new(HealthState::new());

    info!(bind_addr = %config.bind_addr, in_memory = settings.in_memory, "starting ledger server");
    let server = create_server(health_state, http_state, config)?;
    server.await
}
