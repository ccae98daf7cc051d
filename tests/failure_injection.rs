//! Failure injection tests for the research proxy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

mod common;

#[tokio::test]
async fn unreachable_upstream_returns_json_500() {
    // Bind then drop to get a port nothing listens on.
    let dead = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let proxy = common::start_proxy(common::proxy_config(dead)).await;

    let res = common::client()
        .get(proxy.url("/api/ai/openrouter/v1/models"))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 500);
    assert!(body["message"].as_str().unwrap().contains("error sending request"));

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn upstream_closing_without_response_returns_json_500() {
    let upstream = common::start_programmable_backend(|mut socket| async move {
        let _ = socket.shutdown().await;
    })
    .await;
    let proxy = common::start_proxy(common::proxy_config(upstream)).await;

    let res = common::client()
        .get(proxy.url("/api/ai/openrouter/v1/models"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 500);

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn slow_upstream_hits_request_timeout() {
    let upstream = common::start_programmable_backend(|mut socket| async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}")
            .await;
    })
    .await;
    let mut config = common::proxy_config(upstream);
    config.timeouts.request_secs = 1;
    let proxy = common::start_proxy(config).await;

    let res = common::client()
        .get(proxy.url("/api/ai/openrouter/v1/models"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 504);
    assert_eq!(body["message"], "upstream did not respond within 1s");

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn oversized_body_is_rejected_before_forwarding() {
    let (upstream, mut recorded) = common::start_recording_upstream(StatusCode::OK, "{}").await;
    let mut config = common::proxy_config(upstream);
    config.security.max_body_size = 64;
    let proxy = common::start_proxy(config).await;

    let res = common::client()
        .post(proxy.url("/api/ai/openrouter/v1/chat/completions"))
        .header("content-type", "application/json")
        .body(format!(r#"{{"prompt":"{}"}}"#, "x".repeat(256)))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 413);
    assert!(recorded.try_recv().is_err(), "upstream must not be called");

    proxy.shutdown.trigger();
}

#[tokio::test]
async fn concurrency_limit_is_shared_across_methods() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (current, highest) = (in_flight.clone(), peak.clone());

    let upstream = common::start_programmable_backend(move |mut socket| {
        let current = current.clone();
        let highest = highest.clone();
        async move {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            highest.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(300)).await;
            current.fetch_sub(1, Ordering::SeqCst);
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}")
                .await;
            let _ = socket.shutdown().await;
        }
    })
    .await;

    let mut config = common::proxy_config(upstream);
    config.listener.max_connections = 1;
    let proxy = common::start_proxy(config).await;

    let client = common::client();
    let url = proxy.url("/api/ai/openrouter/v1/chat/completions");
    let mut tasks = Vec::new();
    for method in [
        reqwest::Method::GET,
        reqwest::Method::POST,
        reqwest::Method::PUT,
        reqwest::Method::DELETE,
    ] {
        let request = client
            .request(method, &url)
            .json(&serde_json::json!({"model": "openai/gpt-4o-mini"}));
        tasks.push(tokio::spawn(async move { request.send().await }));
    }

    for task in tasks {
        let res = task.await.unwrap().expect("Proxy unreachable");
        assert_eq!(res.status(), 200);
    }
    assert_eq!(
        peak.load(Ordering::SeqCst),
        1,
        "upstream saw overlapping requests"
    );

    proxy.shutdown.trigger();
}
