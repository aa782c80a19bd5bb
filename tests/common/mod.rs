//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tokio::net::TcpListener;
use tower::ServiceExt;

use exam_router::config::AppConfig;
use exam_router::http::HttpServer;
use exam_router::lifecycle::Shutdown;
use exam_router::routing::{HandlerResult, Output, Params, Router};

/// Handler that always returns `body`.
#[allow(dead_code)]
pub fn text(body: &'static str) -> impl Fn(&Params, &mut Output) -> HandlerResult {
    move |_, _| Ok(Some(body.to_string()))
}

/// Build a request with an empty body.
#[allow(dead_code)]
pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send one request through the app without a socket.
#[allow(dead_code)]
pub async fn send(server: &HttpServer, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = server.app().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Start a server on an ephemeral port; returns its address and shutdown handle.
#[allow(dead_code)]
pub async fn start_server(config: AppConfig, routes: Router) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, routes);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
