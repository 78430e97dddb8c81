//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes, middleware)
//!     → request.rs (request ID, per-request log + metrics)
//!     → context.rs (sanitized RequestContext for handlers that echo it)
//!     → handler produces response
//!     → Send to client
//! ```

pub mod context;
pub mod request;
pub mod server;

pub use context::RequestContext;
pub use request::{RequestId, X_REQUEST_ID};
pub use server::HttpServer;
