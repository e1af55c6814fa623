//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the store from the configured seed
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast on bind errors
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::catalog::seed;
use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{shutdown::Shutdown, signals};
use crate::observability::metrics;

/// Fatal startup or serving failures.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A config that skipped `validate_config` carried an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the service with a validated config until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());
    serve(config, shutdown).await
}

/// Run the service until `shutdown` is triggered.
///
/// `config` need not have been validated: addresses are parsed here and a bad
/// one ends startup with [`StartupError::InvalidConfig`] or [`StartupError::Bind`].
pub async fn serve(config: ServiceConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let store = Arc::new(seed::build_store(&config.store).await);
    metrics::record_store_size(store.len().await);

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e| StartupError::InvalidConfig(format!("metrics_address: {e}")))?;
        metrics::init_metrics(addr);
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = ServiceConfig::default();
        config.listener.bind_address = occupied.local_addr().unwrap().to_string();

        let result = serve(config, Shutdown::new()).await;
        assert!(matches!(result, Err(StartupError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_unvalidated_metrics_address_is_rejected() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let result = serve(config, Shutdown::new()).await;
        assert!(matches!(result, Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        let shutdown = Shutdown::new();

        let handle = tokio::spawn(serve(config, shutdown.clone()));
        // Wait until the server has subscribed before triggering.
        while shutdown.receiver_count() == 0 {
            tokio::task::yield_now().await;
        }
        shutdown.trigger();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
