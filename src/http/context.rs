//! Sanitized per-request context.
//!
//! Every page handler receives a [`RequestContext`]: a read-only snapshot
//! of the incoming request built from an explicit header allow-list. Only
//! allow-listed names are ever read, so cookies and authorization material
//! never reach a template or a log line. The context is created fresh per
//! request and discarded with the response.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::http::request::RequestId;

/// Headers the debug endpoints are permitted to read and display.
///
/// Everything else (cookies, authorization, custom app headers) is treated
/// as sensitive and never surfaced.
pub const ALLOWED_HEADERS: [&str; 13] = [
    "host",
    "x-forwarded-for",
    "x-forwarded-proto",
    "x-real-ip",
    "cf-ray",
    "cf-ipcountry",
    "cf-ipcity",
    "cf-ipcontinent",
    "cf-region",
    "cf-connecting-ip",
    "user-agent",
    "accept-language",
    "accept-encoding",
];

/// Display limit for the user-agent header.
pub const USER_AGENT_MAX_CHARS: usize = 100;

/// Read-only, per-request view of the incoming request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// Short request ID (first 8 characters of the server-assigned UUID).
    pub request_id: String,
    /// Request arrival time, `YYYY-MM-DD HH:MM:SS UTC`.
    pub timestamp: String,
    pub method: String,
    /// Effective scheme: `x-forwarded-proto` wins over the transport.
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
    /// Allow-listed headers in allow-list order; absent headers omitted.
    pub headers: Vec<(String, String)>,
    /// Resolved client address; see [`resolve_client_ip`].
    pub client_ip: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub cf_ray: String,
}

impl RequestContext {
    /// Build a context from request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        let mut headers = Vec::new();
        for name in ALLOWED_HEADERS {
            if let Some(value) = header_str(parts, name) {
                headers.push((name.to_string(), sanitize_value(name, value)));
            }
        }

        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
            .chars()
            .take(8)
            .collect();

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);

        Self {
            request_id,
            timestamp: display_timestamp(),
            method: parts.method.to_string(),
            scheme: header_str(parts, "x-forwarded-proto")
                .or(parts.uri.scheme_str())
                .unwrap_or("http")
                .to_string(),
            host: header_str(parts, "host")
                .or(parts.uri.host())
                .unwrap_or("N/A")
                .to_string(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(ToString::to_string),
            headers,
            client_ip: resolve_client_ip(parts, peer),
            country: geo_field(parts, "cf-ipcountry"),
            city: geo_field(parts, "cf-ipcity"),
            region: geo_field(parts, "cf-region"),
            cf_ray: geo_field(parts, "cf-ray"),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Resolve the client IP.
///
/// `cf-connecting-ip` is the edge's authoritative statement of the original
/// client and wins when present. `x-real-ip` covers deployments behind a
/// plain reverse proxy. The transport peer address is the last resort and
/// is usually the edge itself.
pub fn resolve_client_ip(parts: &Parts, peer: Option<SocketAddr>) -> String {
    header_str(parts, "cf-connecting-ip")
        .or_else(|| header_str(parts, "x-real-ip"))
        .map(ToString::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Current wall-clock time as displayed on every page.
pub fn display_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn geo_field(parts: &Parts, name: &str) -> String {
    header_str(parts, name).unwrap_or("N/A").to_string()
}

fn sanitize_value(name: &str, value: &str) -> String {
    if name == "user-agent" && value.chars().count() > USER_AGENT_MAX_CHARS {
        let truncated: String = value.chars().take(USER_AGENT_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn only_allow_listed_headers_surface() {
        let req = Request::builder()
            .uri("/debug")
            .header("cookie", "session=secret")
            .header("authorization", "Bearer token")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        assert!(ctx.headers.iter().all(|(name, _)| name != "cookie"));
        assert!(ctx.headers.iter().all(|(name, _)| name != "authorization"));
        assert!(ctx
            .headers
            .iter()
            .any(|(name, value)| name == "user-agent" && value == "curl/8.0"));
    }

    #[test]
    fn long_user_agent_is_truncated() {
        let long_ua = "a".repeat(250);
        let req = Request::builder()
            .uri("/")
            .header("user-agent", &long_ua)
            .body(())
            .unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        let (_, ua) = ctx
            .headers
            .iter()
            .find(|(name, _)| name == "user-agent")
            .unwrap();
        assert_eq!(ua.len(), USER_AGENT_MAX_CHARS + 3);
        assert!(ua.ends_with("..."));
    }

    #[test]
    fn client_ip_prefers_edge_header() {
        let req = Request::builder()
            .uri("/")
            .header("cf-connecting-ip", "203.0.113.7")
            .header("x-real-ip", "198.51.100.1")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        assert_eq!(ctx.client_ip, "203.0.113.7");
    }

    #[test]
    fn client_ip_falls_back_to_real_ip_then_unknown() {
        let req = Request::builder()
            .uri("/")
            .header("x-real-ip", "198.51.100.1")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        assert_eq!(ctx.client_ip, "198.51.100.1");

        let bare = Request::builder().uri("/").body(()).unwrap();
        let ctx = RequestContext::from_parts(&parts_for(bare));
        assert_eq!(ctx.client_ip, "unknown");
    }

    #[test]
    fn missing_geo_headers_yield_na() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        assert_eq!(ctx.country, "N/A");
        assert_eq!(ctx.city, "N/A");
        assert_eq!(ctx.region, "N/A");
        assert_eq!(ctx.cf_ray, "N/A");
    }

    #[test]
    fn scheme_and_host_prefer_forwarded_headers() {
        let req = Request::builder()
            .uri("/host-lab?x=1")
            .header("x-forwarded-proto", "https")
            .header("host", "lab.example.com")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_parts(&parts_for(req));
        assert_eq!(ctx.scheme, "https");
        assert_eq!(ctx.host, "lab.example.com");
        assert_eq!(ctx.path, "/host-lab");
        assert_eq!(ctx.query.as_deref(), Some("x=1"));
    }
}
