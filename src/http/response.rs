//! Response conversion.
//!
//! # Responsibilities
//! - Turn a dispatched `Output` into an axum response
//! - Map handler failures to 500 at the process boundary
//!
//! # Design Decisions
//! - Bodies without an explicit content type are served as HTML, which is
//!   what server-rendered handlers emit
//! - Failure bodies never echo the handler's error text to the client

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::Output;

/// Convert a handler's output into a response.
pub fn into_response(output: Output) -> Response {
    let (status, mut headers, body) = output.into_parts();
    if !body.is_empty() && !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
    (status, headers, Body::from(body)).into_response()
}

/// The 500 served when a handler fails.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({
            "status": "error",
            "message": "Internal server error.",
        })),
    )
        .into_response()
}
