//! Upstream failure behavior: unreachable backends, timeouts, isolation.

use std::time::{Duration, Instant};

use ingress_router::config::{RouteConfig, RouterConfig};
use reqwest::StatusCode;
use tokio::net::TcpListener;

mod common;

fn route(host: &str, backend: &str) -> RouteConfig {
    RouteConfig {
        host: host.to_string(),
        path: None,
        backend: backend.to_string(),
    }
}

/// Reserve an ephemeral port and release it, so connections to it are
/// refused.
async fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let dead_port = refused_port().await;

    let mut config = RouterConfig::default();
    config.upstream_timeout_secs = 2;
    config
        .routes
        .push(route("a.test", &format!("http://127.0.0.1:{dead_port}")));

    let (proxy, _shutdown) = common::start_router(config).await;
    let client = common::client();

    let start = Instant::now();
    let res = client
        .get(format!("http://{proxy}/anything"))
        .header("host", "a.test")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    // A refused connection fails fast, well inside the upstream timeout.
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn slow_backend_times_out_with_gateway_timeout() {
    let slow = common::start_slow_backend(Duration::from_secs(10)).await;

    let mut config = RouterConfig::default();
    config.upstream_timeout_secs = 1;
    config.routes.push(route("a.test", &format!("http://{slow}")));

    let (proxy, _shutdown) = common::start_router(config).await;
    let client = common::client();

    let start = Instant::now();
    let res = client
        .get(format!("http://{proxy}/"))
        .header("host", "a.test")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    // Bounded by the configured deadline, not the backend's delay.
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn upstream_failure_does_not_affect_other_requests() {
    let dead_port = refused_port().await;
    let healthy = common::start_echo_backend("ok").await;

    let mut config = RouterConfig::default();
    config.upstream_timeout_secs = 2;
    config
        .routes
        .push(route("dead.test", &format!("http://127.0.0.1:{dead_port}")));
    config
        .routes
        .push(route("ok.test", &format!("http://{healthy}")));

    let (proxy, _shutdown) = common::start_router(config).await;
    let client = common::client();

    let dead_req = client
        .get(format!("http://{proxy}/"))
        .header("host", "dead.test")
        .send();
    let ok_req = client
        .get(format!("http://{proxy}/"))
        .header("host", "ok.test")
        .send();

    let (dead_res, ok_res) = tokio::join!(dead_req, ok_req);

    assert_eq!(dead_res.unwrap().status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ok_res.unwrap().status(), StatusCode::OK);
}
