//! Dev server: cover proxy and history fallback.

use std::time::Duration;

use comic_shelf::config::{AppConfig, ProxyRule};
use serde_json::Value;

mod common;

fn config_for(upstream: std::net::SocketAddr, change_origin: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.dev_server.proxy = vec![ProxyRule {
        prefix: "/covers".into(),
        target: format!("http://{}/public", upstream),
        change_origin,
    }];
    config
}

#[tokio::test]
async fn test_covers_are_forwarded_with_rewritten_host() {
    let upstream = common::start_echo_upstream().await;
    let server = common::start_dev_server(config_for(upstream, true)).await;

    let res = common::client()
        .get(format!("http://{}/covers/42.jpg?w=200", server.addr))
        .send()
        .await
        .expect("Dev server unreachable");

    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert_eq!(body, format!("/public/covers/42.jpg?w=200|{}", upstream));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_host_is_kept_without_change_origin() {
    let upstream = common::start_echo_upstream().await;
    let server = common::start_dev_server(config_for(upstream, false)).await;

    let res = common::client()
        .get(format!("http://{}/covers/1.png", server.addr))
        .send()
        .await
        .unwrap();

    let body = res.text().await.unwrap();
    assert_eq!(body, format!("/public/covers/1.png|{}", server.addr));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Bind then drop to get a port nobody listens on.
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_addr = closed.local_addr().unwrap();
    drop(closed);

    let server = common::start_dev_server(config_for(closed_addr, true)).await;

    let res = common::client()
        .get(format!("http://{}/covers/1.png", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_history_fallback_resolves_reader() {
    let server = common::start_dev_server(AppConfig::default()).await;

    let res = common::client()
        .get(format!(
            "http://{}/reader?comicUrl=https%3A%2F%2Fexample.com%2Fa.cbz",
            server.addr
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    let json: Value = res.json().await.unwrap();
    assert_eq!(json["route"], "reader");
    assert_eq!(json["view"]["title"], "Comic Reader");
    assert_eq!(json["props"]["comicUrl"], "https://example.com/a.cbz");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_history_fallback_lazy_about() {
    let server = common::start_dev_server(AppConfig::default()).await;

    let json: Value = common::client()
        .get(format!("http://{}/about", server.addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["route"], "about");
    assert_eq!(json["props"], serde_json::json!({}));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_history_fallback_unknown_path() {
    let server = common::start_dev_server(AppConfig::default()).await;

    let res = common::client()
        .get(format!("http://{}/does-not-exist", server.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let json: Value = res.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("/does-not-exist"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_proxy_rules_reload() {
    let upstream = common::start_echo_upstream().await;
    let server = common::start_dev_server(AppConfig::default()).await;
    let client = common::client();

    // Default rule points at a service that is not running in tests;
    // swap it for one under a new prefix.
    let rules = vec![ProxyRule {
        prefix: "/thumbs".into(),
        target: format!("http://{}", upstream),
        change_origin: true,
    }];
    server.updates.send(rules).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let res = client
        .get(format!("http://{}/thumbs/7.jpg", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), format!("/thumbs/7.jpg|{}", upstream));

    // `/covers` is no longer proxied and is not a route either.
    let res = client
        .get(format!("http://{}/covers/7.jpg", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_history_base_is_stripped() {
    let mut config = AppConfig::default();
    config.history_base = "/comics/".into();
    let server = common::start_dev_server(config).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/comics/shelf", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["route"], "shelf");

    let json: Value = client
        .get(format!("http://{}/comics", server.addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["route"], "home");

    // Outside the base nothing renders.
    let res = client
        .get(format!("http://{}/shelf", server.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}
