//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table from the application bootstrap
//! - Start metrics when configured
//! - Bind the listener and run the server until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route table is complete before the listener binds

use tokio::net::TcpListener;

use crate::app;
use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::RouteError;

/// Error raised before the server starts accepting traffic.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Routes(#[from] RouteError),
    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Bring the service up and block until it has shut down.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let routes = app::build_router(&config)?;
    tracing::info!(routes = routes.len(), "Route table ready");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(config, routes)
        .run(listener, server_shutdown)
        .await?;
    Ok(())
}
