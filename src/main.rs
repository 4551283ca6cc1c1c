//! BitJudge - Application Entry Point
//!
//! This is the main entry point for the BitJudge server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitjudge::{
    config::Config,
    handlers,
    services::{BackgroundSnapshotter, JsonFileStore, SnapshotStore},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BitJudge server...");

    let file_store = JsonFileStore::new(&config.ranking.snapshot_path);
    let restored = if config.ranking.restore {
        tracing::info!(path = %file_store.path().display(), "Restoring ranking snapshot...");
        Some(file_store.load()?)
    } else {
        None
    };

    let writer = Arc::new(BackgroundSnapshotter::spawn(file_store.clone()));
    let state = AppState::from_config(config, writer.clone(), restored)?;

    tracing::info!(
        questions = state.competition().question_count(),
        start = %state.competition().start(),
        interval_ms = state.breaker().min_interval().num_milliseconds(),
        teams = state.teams().len(),
        ranked = state.ranking().len(),
        "Competition loaded"
    );

    let app = handlers::app(state.clone());

    // Start the server
    let server = &state.config().server;
    let addr = SocketAddr::new(server.host.parse()?, server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The background writer may not have caught up with the last change.
    // Stop it first so an older in-flight write cannot land after this one.
    writer.close().await;
    match file_store.save(state.ranking().snapshot()) {
        Ok(()) => tracing::info!("Final ranking snapshot written"),
        Err(e) => tracing::error!(error = %e, "Failed to write final ranking snapshot"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
