//! Structured logging initialization.
//!
//! Uses the tracing crate; `RUST_LOG` overrides the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// The configured level applies to this crate and tower_http unless
/// `RUST_LOG` is set in the environment.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "edge_lab={default_level},tower_http={default_level}"
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
