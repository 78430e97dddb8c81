//! Request identification and per-request accounting.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Expose the ID to handlers via request extensions
//! - Echo the ID back to the client as `x-request-id`
//! - Emit the per-request log event and metrics sample

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::metrics;

/// Response header carrying the server-assigned request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Server-assigned request ID, available to handlers via extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware wrapping every request.
///
/// Runs inside the trace layer so the request ID is part of the span's
/// lifetime, and outside the handlers so the metrics sample covers handler
/// time including artificial delays.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    // Matched route template keeps metric cardinality bounded.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(req).await;

    let status = response.status();
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    tracing::debug!(
        request_id = %id,
        method = %method,
        route = %route,
        status = status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );
    metrics::record_request(&method, &route, status.as_u16(), start);

    response
}
