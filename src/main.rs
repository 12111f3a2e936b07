//! Photo Vault - image uploads, user records and a details cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_vault::api::{create_router, AppState};
use photo_vault::config::{Config, RecordBackend};
use photo_vault::records::{FileRecordStore, MemoryRecordStore, RecordStore};
use photo_vault::spawn_cleanup_task;

/// Main entry point for the photo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the record store and the upload directory
/// 4. Start the background cache sweep
/// 5. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_vault=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Photo Vault server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, upload_dir={:?}, data_dir={:?}, backend={:?}, cache_ttl={}s, check_period={}s",
        config.server_port,
        config.upload_dir,
        config.data_dir,
        config.record_backend,
        config.cache_ttl,
        config.cache_check_period
    );

    let records: Arc<dyn RecordStore> = match config.record_backend {
        RecordBackend::File => {
            let store = FileRecordStore::new(&config.data_dir);
            store
                .init()
                .await
                .with_context(|| format!("failed to open record store in {:?}", config.data_dir))?;
            Arc::new(store)
        }
        RecordBackend::Memory => {
            warn!("Using in-memory record store; records are lost on restart");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let state = AppState::from_config(&config, records);
    state
        .blobs
        .init()
        .await
        .with_context(|| format!("failed to create upload directory {:?}", config.upload_dir))?;

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cache_check_period);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache sweep task aborted");
}
