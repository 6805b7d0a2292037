//! Local stand-in for the Gemini endpoint, served by warp on an ephemeral port.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use warp::http::StatusCode;
use warp::Filter;

#[derive(Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn answer(text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        Self::raw(200, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Handle on a running stub: how often it was called and what it received.
pub struct Stub {
    pub base_url: String,
    pub calls: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Stub {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Serve `replies` in order; once they run out every call gets a 500.
pub async fn spawn_stub(replies: Vec<StubReply>) -> Stub {
    let calls = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let replies = Arc::new(replies);

    let counter = calls.clone();
    let recorder = requests.clone();
    let route = warp::post()
        .and(warp::query::raw())
        .and(warp::body::json())
        .and_then(move |query: String, body: Value| {
            let counter = counter.clone();
            let recorder = recorder.clone();
            let replies = replies.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                recorder.lock().unwrap().push((query, body));
                let reply = replies
                    .get(n)
                    .cloned()
                    .unwrap_or_else(|| StubReply::raw(500, "{}"));
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                let status = StatusCode::from_u16(reply.status).unwrap();
                Ok::<_, Infallible>(warp::reply::with_status(reply.body, status))
            }
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    Stub {
        base_url: format!("http://{}", addr),
        calls,
        requests,
    }
}
