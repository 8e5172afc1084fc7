mod config;
mod document;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::profile::default_capacity_profile;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lexdoc API v{}", env!("CARGO_PKG_VERSION"));

    // A4 capacity profile with the configured layout overrides
    let profile = default_capacity_profile()
        .with_overrides(config.layout_high_water, config.signature_tolerance_pt);
    info!(
        "Capacity profile: {}pt per page, high-water {}, signature tolerance {}pt",
        profile.capacity_pt, profile.high_water_fraction, profile.signature_tolerance_pt
    );
    info!("Office: {} ({})", config.office.firm_name, config.office.attorney_oab);

    let state = AppState::new(config.office.clone(), profile);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
