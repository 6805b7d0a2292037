use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bean_brew_barista::config::Limits;
use bean_brew_barista::errors::{UNCONFIGURED_MESSAGE, UPSTREAM_RATE_LIMITED_MESSAGE};
use bean_brew_barista::knowledge::KNOWLEDGE_BASE;
use bean_brew_barista::models::AskResponse;
use bean_brew_barista::{routes, AnswerService, Config, GeminiClient};
use hyper::{Body, Client, Method, Request};
use serde_json::json;
use warp::http::StatusCode;
use warp::Filter;

/// Success body in the same shape `StubReply::answer` produces for the unit tests.
fn gemini_reply(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

/// Gemini stand-in: answers the first call, returns 429 afterwards.
async fn spawn_upstream() -> (SocketAddr, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let route = warp::post().and(warp::body::bytes()).and_then(move |_body: bytes::Bytes| {
        let counter = counter.clone();
        async move {
            let reply = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                warp::reply::with_status(gemini_reply("We open at 6:30 AM."), StatusCode::OK)
            } else {
                warp::reply::with_status("{}".to_string(), StatusCode::TOO_MANY_REQUESTS)
            };
            Ok::<_, Infallible>(reply)
        }
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, calls)
}

fn spawn_barista(service: AnswerService) -> SocketAddr {
    let (addr, server) = warp::serve(routes(Arc::new(service))).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

async fn ask(addr: SocketAddr, question: &str) -> (StatusCode, AskResponse) {
    let client = Client::new();
    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("http://{}/ask", addr))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "question": question }).to_string()))
        .unwrap();

    let resp = client.request(req).await.unwrap();
    let status = resp.status();
    let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_end_to_end_answer_and_cache() {
    let (upstream, calls) = spawn_upstream().await;
    let client = GeminiClient::new(&format!("http://{}", upstream), "test-model", "test-key", Duration::from_secs(5));
    let addr = spawn_barista(AnswerService::new(Limits::default(), Some(client), KNOWLEDGE_BASE));

    let (status, first) = ask(addr, "What are your hours?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.answer, "We open at 6:30 AM.");

    let (_, again) = ask(addr, "What are your hours?").await;
    assert_eq!(again.answer, "We open at 6:30 AM.");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let (_, other) = ask(addr, "Do you sell bagels?").await;
    assert_eq!(other.answer, UPSTREAM_RATE_LIMITED_MESSAGE);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_end_to_end_unconfigured() {
    let config = Config {
        api_key: "YOUR_API_KEY_HERE".to_string(),
        ..Config::default()
    };
    let addr = spawn_barista(AnswerService::from_config(&config, None));

    let (status, body) = ask(addr, "What are your hours?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.answer, UNCONFIGURED_MESSAGE);

    let resp = Client::new()
        .get(format!("http://{}/status", addr).parse().unwrap())
        .await
        .unwrap();
    let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    let status: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status["online"], false);
}
