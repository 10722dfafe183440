//! Check-in Server - Main entry point

use anyhow::Context;
use checkin_server::housekeeping::spawn_housekeeping;
use checkin_server::{build_router, AppState, ServerConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "checkin_server=debug,checkin_engine=debug,checkin_persistence=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    tracing::info!("Starting check-in server");

    let db_path = config.database_path();
    let state = AppState::connect(&config)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::info!("Database ready at {}", db_path.display());

    let housekeeping = spawn_housekeeping(state.clone(), config.housekeeping_interval());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind))?;
    tracing::info!("Listening on {}", config.bind);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    housekeeping.abort();
    tracing::info!("Check-in server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
