//! TTL Store - An in-memory string and list store with expiring entries
//!
//! Binary entry point serving the store over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_store::api::create_router;
use ttl_store::{AppState, Config, EntryStore, StoreService};

/// Main entry point for the TTL store server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the entry store, which starts its eviction task
/// 4. Create the store service and Axum router
/// 5. Serve on the configured port until SIGINT/SIGTERM
/// 6. Stop the eviction task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL Store Server");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: default_ttl={:?}, cleanup_interval={:?}, port={}, request_timeout={:?}",
        config.default_ttl,
        config.cleanup_interval,
        config.server_port,
        config.request_timeout,
    );

    let store = Arc::new(EntryStore::new(config.cleanup_interval));
    let service = Arc::new(StoreService::new(store.clone(), config.default_ttl));
    let app = create_router(AppState::from_config(&config, service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error");

    // Runs exactly once, whether or not serving failed
    store.shutdown().await;
    info!("Server shutdown complete");

    served
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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
}
