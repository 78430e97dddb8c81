//! Cache-control variant handlers.
//!
//! A fixed table of cache directives, one endpoint per variant, so edge
//! caching behavior can be compared side by side. Every response carries
//! the variant's Cache-Control value, a content-derived ETag, Last-Modified
//! and a marker header identifying the variant.

use axum::{
    extract::Path,
    http::{header, HeaderName, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::http::context::display_timestamp;

/// Marker header identifying which variant produced a response.
pub const X_CACHE_LAB: HeaderName = HeaderName::from_static("x-cache-lab");

/// One entry of the cache lab table.
#[derive(Debug, Clone, Copy)]
pub struct CacheVariant {
    pub name: &'static str,
    pub cache_control: &'static str,
    pub description: &'static str,
}

/// The fixed table of demonstrated cache configurations.
pub const CACHE_VARIANTS: [CacheVariant; 8] = [
    CacheVariant {
        name: "no-store",
        cache_control: "no-store",
        description: "Never cached; every request reaches the origin",
    },
    CacheVariant {
        name: "no-cache",
        cache_control: "no-cache",
        description: "Stored but revalidated on every request",
    },
    CacheVariant {
        name: "private",
        cache_control: "private, max-age=60",
        description: "Browser-only caching for one minute",
    },
    CacheVariant {
        name: "short",
        cache_control: "public, max-age=60",
        description: "Shared caching for one minute",
    },
    CacheVariant {
        name: "medium",
        cache_control: "public, max-age=300",
        description: "Shared caching for five minutes",
    },
    CacheVariant {
        name: "long",
        cache_control: "public, max-age=86400",
        description: "Shared caching for one day",
    },
    CacheVariant {
        name: "immutable",
        cache_control: "public, max-age=31536000, immutable",
        description: "Cached for a year and never revalidated",
    },
    CacheVariant {
        name: "swr",
        cache_control: "public, max-age=60, stale-while-revalidate=300",
        description: "Stale responses served for five minutes while revalidating",
    },
];

/// Look up a variant by name.
pub fn lookup(name: &str) -> Option<&'static CacheVariant> {
    CACHE_VARIANTS.iter().find(|v| v.name == name)
}

/// Content-derived entity tag: first 16 hex chars of SHA-256, quoted.
pub fn body_etag(body: &str) -> String {
    let digest = hex::encode(Sha256::digest(body.as_bytes()));
    format!("\"{}\"", &digest[..16])
}

fn imf_fixdate_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `GET /cache/{name}`: JSON body under the variant's cache directives.
pub async fn cache_variant(Path(name): Path<String>, uri: Uri) -> Response {
    let Some(variant) = lookup(&name) else {
        let names: Vec<_> = CACHE_VARIANTS.iter().map(|v| v.name).collect();
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "unknown cache variant",
                "requested": name,
                "variants": names,
            })),
        )
            .into_response();
    };

    let body = json!({
        "path": uri.path(),
        "generated_at": display_timestamp(),
        "cache_control": variant.cache_control,
        "description": variant.description,
    })
    .to_string();

    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CACHE_CONTROL, variant.cache_control.to_string()),
            (header::ETAG, body_etag(&body)),
            (header::LAST_MODIFIED, imf_fixdate_now()),
            (X_CACHE_LAB, variant.name.to_string()),
        ],
        body,
    )
        .into_response()
}
