use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod errors;
mod id;
mod image;
mod storage;

use app::AppState;
use config::AppConfig;
use id::RandomIdGenerator;
use storage::LocalFileStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;

    let storage = LocalFileStorage::new(config.storage_path.clone())?;
    tracing::info!(path = %config.storage_path.display(), "storing uploads");

    let state = AppState {
        storage: Arc::new(storage),
        ids: Arc::new(RandomIdGenerator::from_os_rng()),
        fallback_host: format!("localhost:{}", config.port),
    };
    let app = app::router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
