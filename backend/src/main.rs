//! Service entry-point: loads settings, wires the zKillboard source, and
//! serves badge and probe endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use eve_shields::inbound::http::health::HealthState;
use server::{ShieldsSettings, build_stats_source, create_server};

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

    let settings = ShieldsSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?
        .resolve()
        .map_err(std::io::Error::other)?;

    let source = build_stats_source(&settings)?;
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, source, &settings)?.await
}
