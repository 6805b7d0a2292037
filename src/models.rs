use std::collections::HashMap;
use std::time::Instant;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct CacheEntry {
    pub answer: String,
    pub stored_at: Instant,
}

/// Admission instants for one caller, oldest first.
#[derive(Debug, Default)]
pub struct RateWindow {
    pub timestamps: Vec<Instant>,
}

#[derive(Debug)]
pub struct AppState {
    pub cache: HashMap<String, CacheEntry>,
    pub rate_limits: HashMap<String, RateWindow>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            rate_limits: HashMap::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub online: bool,
    pub assistant: String,
    pub greeting: String,
}
