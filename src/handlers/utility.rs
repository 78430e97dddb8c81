//! Utility endpoints: delay, status passthrough, sized payloads.

use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::context::display_timestamp;
use crate::http::server::AppState;

/// Status codes the passthrough endpoint will echo.
///
/// 204 is special-cased to carry no body; everything else returns a small
/// JSON description under the requested status.
pub const ALLOWED_STATUS_CODES: [u16; 17] = [
    200, 201, 202, 204, 301, 302, 307, 308, 400, 401, 403, 404, 418, 429, 500, 502, 503,
];

/// `GET /delay/{ms}`: suspend this request, then report timing.
///
/// The sleep is a plain tokio timer, so concurrent requests are unaffected;
/// each request owns its single in-flight wait.
pub async fn delay(State(state): State<AppState>, Path(ms): Path<u64>, uri: Uri) -> Response {
    let max_ms = state.config.limits.max_delay_ms;
    if ms > max_ms {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "delay out of range",
                "requested_ms": ms,
                "max_ms": max_ms,
            })),
        )
            .into_response();
    }

    let start = Instant::now();
    tokio::time::sleep(Duration::from_millis(ms)).await;

    Json(json!({
        "path": uri.path(),
        "requested_ms": ms,
        "elapsed_ms": start.elapsed().as_millis() as u64,
        "timestamp": display_timestamp(),
    }))
    .into_response()
}

/// `GET /status/{code}`: respond with the requested status code.
pub async fn status_passthrough(Path(code): Path<u16>) -> Response {
    if !ALLOWED_STATUS_CODES.contains(&code) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unsupported status code",
                "requested_code": code,
                "allowed_codes": ALLOWED_STATUS_CODES,
            })),
        )
            .into_response();
    }

    // Every allow-listed code is a valid StatusCode; the fallback is
    // unreachable but keeps the handler infallible.
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }

    (
        status,
        Json(json!({
            "code": code,
            "reason": status.canonical_reason().unwrap_or("Unknown"),
            "description": describe(code),
        })),
    )
        .into_response()
}

fn describe(code: u16) -> &'static str {
    match code {
        200 => "Standard success response",
        201 => "Resource created",
        202 => "Accepted for asynchronous processing",
        204 => "Success with no response body",
        301 => "Permanent redirect; method may change",
        302 => "Temporary redirect; method may change",
        307 => "Temporary redirect; method preserved",
        308 => "Permanent redirect; method preserved",
        400 => "Client sent an invalid request",
        401 => "Authentication required",
        403 => "Authenticated but not allowed",
        404 => "Resource does not exist",
        418 => "Short and stout",
        429 => "Client exceeded a rate limit",
        500 => "Origin failed to process the request",
        502 => "Upstream returned an invalid response",
        503 => "Origin temporarily unavailable",
        _ => "Unknown",
    }
}

/// Filler byte for payload synthesis. ASCII, so any byte-count arithmetic
/// or trimming on the result can never split a UTF-8 sequence.
const FILLER: u8 = b'x';

/// Produce a body whose encoded length is exactly `requested` bytes.
///
/// The body is a JSON envelope (path, requested size, generation timestamp)
/// whose `padding` field is sized to land the document on the target byte
/// count. When the target is smaller than the minimal envelope, the body
/// degrades to raw filler of exactly `requested` bytes rather than emitting
/// a truncated, corrupt JSON document.
pub fn synthesize_payload(path: &str, requested: usize, generated_at: &str) -> Vec<u8> {
    let envelope = |padding: &str| {
        json!({
            "path": path,
            "requested_bytes": requested,
            "generated_at": generated_at,
            "padding": padding,
        })
        .to_string()
    };

    let base_len = envelope("").len();
    if requested < base_len {
        return vec![FILLER; requested];
    }

    let padding = String::from_utf8(vec![FILLER; requested - base_len])
        .unwrap_or_default();
    let mut body = envelope(&padding).into_bytes();

    // The padding is ASCII and needs no JSON escaping, so this is already
    // exact; the resize is a guard, not a correction.
    debug_assert_eq!(body.len(), requested);
    body.resize(requested, FILLER);
    body
}

/// `GET /bytes/{n}`: byte-exact payload with explicit Content-Length.
pub async fn sized_payload(
    State(state): State<AppState>,
    Path(n): Path<usize>,
    uri: Uri,
) -> Response {
    let max_bytes = state.config.limits.max_payload_bytes;
    if n > max_bytes {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "payload size out of range",
                "requested_bytes": n,
                "max_bytes": max_bytes,
            })),
        )
            .into_response();
    }

    let body = synthesize_payload(uri.path(), n, &display_timestamp());
    (
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-08-29 12:00:00 UTC";

    #[test]
    fn payload_is_byte_exact_across_the_range() {
        for n in [0, 1, 10, 50, 100, 150, 256, 1024, 65_536, 1_048_576] {
            let body = synthesize_payload("/bytes/x", n, TS);
            assert_eq!(body.len(), n, "wrong length for n={n}");
        }
    }

    #[test]
    fn large_payload_is_valid_json_with_metadata() {
        let body = synthesize_payload("/bytes/512", 512, TS);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["path"], "/bytes/512");
        assert_eq!(value["requested_bytes"], 512);
        assert_eq!(value["generated_at"], TS);
        assert!(value["padding"].as_str().unwrap().bytes().all(|b| b == FILLER));
    }

    #[test]
    fn tiny_payload_degrades_to_raw_filler() {
        let body = synthesize_payload("/bytes/5", 5, TS);
        assert_eq!(body, vec![FILLER; 5]);
    }

    #[test]
    fn payload_boundary_at_envelope_size_is_exact() {
        // Walk across the envelope-size boundary; both branches must hold
        // the byte contract.
        for n in 80..130 {
            let body = synthesize_payload("/bytes/n", n, TS);
            assert_eq!(body.len(), n);
        }
    }

    #[test]
    fn status_allow_list_contains_only_valid_codes() {
        use axum::http::StatusCode;
        for code in ALLOWED_STATUS_CODES {
            assert!(StatusCode::from_u16(code).is_ok());
        }
    }

    #[test]
    fn descriptions_cover_the_allow_list() {
        for code in ALLOWED_STATUS_CODES {
            assert_ne!(describe(code), "Unknown", "missing description for {code}");
        }
    }
}
