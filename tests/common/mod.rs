//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use edge_lab::{HttpServer, ServerConfig, Shutdown};

/// Start a lab server on an ephemeral port.
///
/// Returns the bound address and the shutdown trigger; dropping the trigger
/// without calling it leaves the server running until the test runtime
/// exits.
pub async fn start_lab(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Client that never follows redirects, so 3xx responses can be inspected.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
