//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum service that hands every request to the route table
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and drain on shutdown
//! - Record dispatch metrics
//! - Act as the boundary where handler failures become 500s

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::{request, response};
use crate::observability::metrics;
use crate::routing::Router as RouteTable;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub script_name: Arc<str>,
}

/// HTTP front-end for the route table.
pub struct HttpServer {
    app: axum::Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: AppConfig, routes: RouteTable) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
            script_name: Arc::from(config.mount.script_name.as_str()),
        };
        let app = Self::build_app(&config, state);
        Self { app }
    }

    /// Build the Axum app with all middleware layers.
    ///
    /// Every method and path falls through to the dispatcher; the route
    /// table, not Axum, decides what exists.
    #[allow(deprecated)]
    fn build_app(config: &AppConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(request::set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(request::propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The service, for driving requests without a socket.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    /// Run the server until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Dispatch one request through the route table.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request::request_id(&request).to_string();
    let descriptor = request::descriptor(&request, &state.script_name);
    let method = metrics::method_label(&descriptor.method);

    let response = match state.routes.dispatch(&descriptor) {
        Ok(output) => response::into_response(output),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Handler failed");
            response::internal_error()
        }
    };

    if response.status() == StatusCode::NOT_FOUND {
        tracing::debug!(request_id = %request_id, target = %descriptor.target, "Not found");
    }
    metrics::record_dispatch(method, response.status().as_u16(), start_time);
    response
}
