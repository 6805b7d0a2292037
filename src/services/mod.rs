use crate::config::{Limits, CACHE_KEY_PREFIX};
use crate::models::{AppState, CacheEntry};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;

pub mod answer;
pub mod gemini;


pub use answer::AnswerService;
pub use gemini::GeminiClient;

pub type SharedState = Arc<RwLock<AppState>>;

pub fn cache_key(question: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, question)
}

pub async fn check_rate_limit(state: &SharedState, limits: &Limits, caller: &str) -> bool {
    check_rate_limit_at(state, limits, caller, Instant::now()).await
}

/// Fixed-window admission check. Both paths prune; only an admit records `now`.
pub async fn check_rate_limit_at(
    state: &SharedState,
    limits: &Limits,
    caller: &str,
    now: Instant,
) -> bool {
    let mut state = state.write().await;
    let window = state.rate_limits.entry(caller.to_string()).or_default();
    window
        .timestamps
        .retain(|t| now.saturating_duration_since(*t) < limits.rate_limit_window);

    if window.timestamps.len() >= limits.rate_limit {
        debug!(caller, recent = window.timestamps.len(), "rate limit reached");
        return false;
    }
    window.timestamps.push(now);
    true
}

pub async fn get_cached_response(state: &SharedState, limits: &Limits, question: &str) -> Option<String> {
    get_cached_response_at(state, limits, question, Instant::now()).await
}

/// Stale entries are treated as absent and left in place.
pub async fn get_cached_response_at(
    state: &SharedState,
    limits: &Limits,
    question: &str,
    now: Instant,
) -> Option<String> {
    let state = state.read().await;
    if let Some(entry) = state.cache.get(&cache_key(question)) {
        if now.saturating_duration_since(entry.stored_at) < limits.cache_ttl {
            return Some(entry.answer.clone());
        }
    }
    None
}

pub async fn cache_response(state: &SharedState, limits: &Limits, question: &str, answer: &str) {
    cache_response_at(state, limits, question, answer, Instant::now()).await
}

/// Insert or overwrite the entry for `question`, sweeping expired entries first
/// so the map stays bounded by what was asked within one TTL.
pub async fn cache_response_at(
    state: &SharedState,
    limits: &Limits,
    question: &str,
    answer: &str,
    now: Instant,
) {
    let mut state = state.write().await;
    let before = state.cache.len();
    state
        .cache
        .retain(|_, e| now.saturating_duration_since(e.stored_at) < limits.cache_ttl);
    let swept = before - state.cache.len();
    if swept > 0 {
        debug!(swept, "dropped expired cache entries");
    }
    state.cache.insert(
        cache_key(question),
        CacheEntry {
            answer: answer.to_string(),
            stored_at: now,
        },
    );
}
