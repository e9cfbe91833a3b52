//! Request identification and tracing.
//!
//! # Responsibilities
//! - Name the request ID header shared by the middleware stack
//! - Build the per-request tracing span carrying that ID
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log line carries it
//! - Callers may supply their own ID; it is propagated unchanged

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, Request},
};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header name for the request ID middleware.
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Tracing span for one inbound request.
pub fn request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request.headers()),
    )
}

/// Request ID from headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
