//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all lab handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve static assets
//! - Run the server with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::handlers::{cache, pages, redirect, utility};
use crate::http::request;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// HTTP server for the lab site.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            // Core pages
            .route("/", get(pages::index))
            .route("/debug", get(pages::debug))
            .route("/robots.txt", get(pages::robots))
            // Redirect lab
            .route("/redirect-lab", get(pages::redirect_lab))
            .route("/r/301", get(redirect::moved_permanently))
            .route("/r/302", get(redirect::found))
            .route("/r/307", get(redirect::temporary_redirect))
            .route("/r/308", get(redirect::permanent_redirect))
            .route("/final", get(pages::final_landing))
            // Geo lab
            .route("/geo-redirect", get(pages::geo_redirect))
            .route("/us", get(pages::region_us))
            .route("/ca", get(pages::region_ca))
            .route("/fi", get(pages::region_fi))
            .route("/row", get(pages::region_row))
            // Host lab
            .route("/host-lab", get(pages::host_lab))
            // Cache lab
            .route("/cache-lab", get(pages::cache_lab))
            .route("/cache/{name}", get(cache::cache_variant))
            // Utilities
            .route("/delay/{ms}", get(utility::delay))
            .route("/status/{code}", get(utility::status_passthrough))
            .route("/bytes/{n}", get(utility::sized_payload))
            // Static assets
            .nest_service("/static", ServeDir::new(&config.site.static_dir))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(request::request_id_middleware))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(concat!("edge-lab/", env!("CARGO_PKG_VERSION"))),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the shutdown channel fires or Ctrl+C is received and
    /// in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for Ctrl+C or a programmatic shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
