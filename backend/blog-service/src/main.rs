/// Blog Service Main Entry Point
///
/// Starts the gRPC server with:
/// - Bearer credential gate in front of every service
/// - Post, User and Session services over the in-process store
/// - gRPC health service
use anyhow::{Context, Result};
use blog_service::{config::Settings, db::MemoryStore, router, AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "blog_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Blog Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let codec = Arc::new(settings.jwt.codec()?);
    info!(
        token_duration_hours = settings.jwt.token_duration_hours,
        "JWT codec initialized"
    );

    let state = AppState::new(Arc::new(MemoryStore::new()), codec);
    let addr = settings.server.addr()?;

    info!("Starting gRPC server on {}", addr);

    router(state)
        .await
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Blog service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
