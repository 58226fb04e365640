//! Practice Relay - Binary Entry Point
//!
//! Serves the WebSocket and REST endpoints until Ctrl+C.

use std::sync::Arc;

use practice_relay::api::http::create_router;
use practice_relay::api::websocket::AppState;
use practice_relay::{Relay, RelayConfig, RelayResult};

#[tokio::main]
async fn main() -> RelayResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    if let Some(tenants) = &config.allowed_tenants {
        tracing::info!(tenants = tenants.len(), "join restricted to allow-listed tenants");
    }

    // Composition root: the relay is owned here and handed to the router
    let relay = Arc::new(Relay::with_policy(config.join_policy()));
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(Arc::clone(&relay), config));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, version = practice_relay::VERSION, "relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(connections = relay.connection_count(), "relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
