use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use daily_idioms::api::create_router;
use daily_idioms::core::config::AppConfig;
use daily_idioms::state::AppState;
use daily_idioms::tasks::{
    EXPRESSIONS_DELIVERY_UTC, IDIOMS_DELIVERY_UTC, spawn_daily_delivery,
    spawn_rate_limit_sweeper,
};

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    daily_idioms::setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    let port = config.port;
    let state = Arc::new(AppState::new(config));

    if let Some(idioms) = state.idioms.clone() {
        spawn_daily_delivery(idioms, IDIOMS_DELIVERY_UTC);
    }
    if let Some(expressions) = state.expressions.clone() {
        spawn_daily_delivery(expressions, EXPRESSIONS_DELIVERY_UTC);
    }
    spawn_rate_limit_sweeper(state.rate_limiter.clone());

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
