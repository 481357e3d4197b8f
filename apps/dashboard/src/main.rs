mod config;
mod dashboard;
mod errors;
mod fallback;
mod gateway;
mod models;
mod normalize;
mod routes;
mod session;
mod state;
mod view;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::HttpGatewayFactory;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dashboard v{}", env!("CARGO_PKG_VERSION"));

    // One shared HTTP client for every session's gateway
    let gateways = Arc::new(HttpGatewayFactory::new(config.timeouts())?);
    info!(
        "Backend gateway ready (url: {}, enabled: {}, timeouts: {:?}/{:?})",
        config.backend_url, config.use_backend, config.request_timeout, config.upload_timeout
    );

    let state = AppState::new(config.clone(), gateways);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
