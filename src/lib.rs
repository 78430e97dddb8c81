//! Edge Lab: a demonstration site for CDN/edge configuration testing.
//!
//! A single-binary web service built with Tokio and Axum. Every endpoint
//! either echoes request metadata (allow-listed headers, geo fields, client
//! IP) or simulates an HTTP behavior an edge configuration cares about:
//! fixed-code redirects, cache-control variants, artificial delays, status
//! code passthrough, and byte-exact payloads.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  EDGE LAB                    │
//!                      │                                              │
//!   Client Request     │  ┌─────────┐    ┌──────────────────────────┐│
//!   ──────────────────▶│  │  http   │───▶│        handlers          ││
//!                      │  │ server  │    │ pages / redirect / cache ││
//!                      │  └─────────┘    │ delay / status / bytes   ││
//!                      │       │         └────────────┬─────────────┘│
//!                      │       │                      │              │
//!                      │       ▼                      ▼              │
//!                      │  ┌─────────────┐    ┌──────────────────┐    │
//!   Client Response    │  │ request id  │    │ request context  │    │
//!   ◀──────────────────│  │ middleware  │    │   (sanitized)    │    │
//!                      │  └─────────────┘    └──────────────────┘    │
//!                      │                                             │
//!                      │  ┌───────────────────────────────────────┐  │
//!                      │  │        Cross-Cutting Concerns         │  │
//!                      │  │  ┌────────┐ ┌───────────────┐ ┌─────┐ │  │
//!                      │  │  │ config │ │ observability │ │life │ │  │
//!                      │  │  │        │ │ logs/metrics  │ │cycle│ │  │
//!                      │  │  └────────┘ └───────────────┘ └─────┘ │  │
//!                      │  └───────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! All handlers are stateless and independent; no handler calls another and
//! no mutable state is shared across requests.

// Core subsystems
pub mod config;
pub mod handlers;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
