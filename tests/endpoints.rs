//! End-to-end tests for the lab endpoints.

use std::time::{Duration, Instant};

use edge_lab::handlers::cache::CACHE_VARIANTS;
use edge_lab::handlers::utility::ALLOWED_STATUS_CODES;
use edge_lab::ServerConfig;

mod common;

#[tokio::test]
async fn sized_payload_is_byte_exact() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    for n in [0usize, 1, 10, 100, 150, 1024, 65_536, 1_048_576] {
        let res = client
            .get(format!("http://{addr}/bytes/{n}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers()["content-type"],
            "application/octet-stream",
            "wrong content type for n={n}"
        );
        assert_eq!(
            res.headers()["content-length"].to_str().unwrap(),
            n.to_string(),
            "wrong content-length for n={n}"
        );
        let body = res.bytes().await.unwrap();
        assert_eq!(body.len(), n, "wrong body length for n={n}");
    }

    let res = client
        .get(format!("http://{addr}/bytes/2000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400, "above-limit size must be rejected");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["requested_bytes"], 2_000_000);

    shutdown.trigger();
}

#[tokio::test]
async fn status_passthrough_echoes_allowed_codes() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    for code in ALLOWED_STATUS_CODES {
        let res = client
            .get(format!("http://{addr}/status/{code}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), code, "wrong status for {code}");

        let body = res.bytes().await.unwrap();
        if code == 204 {
            assert!(body.is_empty(), "204 must carry no body");
        } else {
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["code"], code);
        }
    }

    shutdown.trigger();
}

#[tokio::test]
async fn unsupported_status_code_yields_400_with_echo() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/status/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["requested_code"], 999);
    assert_eq!(
        body["allowed_codes"].as_array().unwrap().len(),
        ALLOWED_STATUS_CODES.len()
    );

    // 304 stays off the allow-list: it cannot carry the JSON body this
    // endpoint produces.
    let res = client
        .get(format!("http://{addr}/status/304"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["requested_code"], 304);

    shutdown.trigger();
}

#[tokio::test]
async fn redirect_endpoints_return_documented_codes() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    for code in [301u16, 302, 307, 308] {
        let res = client
            .get(format!("http://{addr}/r/{code}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), code, "wrong status for /r/{code}");
        assert_eq!(
            res.headers()["location"], "/final",
            "wrong target for /r/{code}"
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn cache_variants_carry_documented_headers() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    for variant in &CACHE_VARIANTS {
        let res = client
            .get(format!("http://{addr}/cache/{}", variant.name))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers()["cache-control"].to_str().unwrap(),
            variant.cache_control,
            "wrong cache-control for {}",
            variant.name
        );
        assert_eq!(
            res.headers()["x-cache-lab"].to_str().unwrap(),
            variant.name
        );
        let etag = res.headers()["etag"].to_str().unwrap().to_string();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(res.headers().contains_key("last-modified"));

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["cache_control"], variant.cache_control);
    }

    let res = client
        .get(format!("http://{addr}/cache/bogus"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn debug_page_never_leaks_unlisted_headers() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    let long_ua = "u".repeat(250);
    let res = client
        .get(format!("http://{addr}/debug"))
        .header("cookie", "session=super-secret-value")
        .header("authorization", "Bearer super-secret-token")
        .header("user-agent", &long_ua)
        .header("cf-connecting-ip", "203.0.113.9")
        .header("cf-ipcountry", "FI")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();

    assert!(!body.contains("super-secret-value"), "cookie leaked");
    assert!(!body.contains("super-secret-token"), "authorization leaked");

    // Truncated at 100 characters plus an ellipsis.
    assert!(body.contains(&format!("{}...", "u".repeat(100))));
    assert!(!body.contains(&"u".repeat(101)));

    assert!(body.contains("203.0.113.9"));
    assert!(body.contains("FI"));

    shutdown.trigger();
}

#[tokio::test]
async fn delay_endpoint_waits_and_reports_timing() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    let start = Instant::now();
    let res = client
        .get(format!("http://{addr}/delay/150"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(start.elapsed() >= Duration::from_millis(150));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["requested_ms"], 150);
    assert!(body["elapsed_ms"].as_u64().unwrap() >= 150);

    let res = client
        .get(format!("http://{addr}/delay/20000"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400, "above-limit delay must be rejected");

    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_delays_do_not_serialize() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    let start = Instant::now();
    let (a, b) = tokio::join!(
        client.get(format!("http://{addr}/delay/300")).send(),
        client.get(format!("http://{addr}/delay/300")).send(),
    );
    assert_eq!(a.unwrap().status(), 200);
    assert_eq!(b.unwrap().status(), 200);
    // Two 300ms waits in parallel must finish well under 600ms.
    assert!(start.elapsed() < Duration::from_millis(550));

    shutdown.trigger();
}

#[tokio::test]
async fn responses_carry_request_id_and_robots_disallows() {
    let (addr, shutdown) = common::start_lab(ServerConfig::default()).await;
    let client = common::client();

    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(!res.headers()["x-request-id"].is_empty());

    let res = client
        .get(format!("http://{addr}/robots.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "User-agent: *\nDisallow: /");

    shutdown.trigger();
}
