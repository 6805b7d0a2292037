use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lazy_static::lazy_static;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";
pub const DEFAULT_CALLER: &str = "user";
pub const RATE_LIMIT_REQUESTS: usize = 10; // requests per window
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60; // window size in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 20;
pub const CACHE_DURATION_SECS: u64 = 300; // 5 minutes
pub const CACHE_KEY_PREFIX: &str = "coffee:";
pub const TEMPERATURE: f64 = 0.8;
pub const MAX_OUTPUT_TOKENS: u32 = 600;

lazy_static! {
    /// Values that mean "no key has been filled in yet".
    pub static ref PLACEHOLDER_API_KEYS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("");
        s.insert("YOUR_API_KEY_HERE");
        s
    };
}

/// Runtime configuration. Every knob falls back to the constants above.
#[derive(Debug, Clone, Parser)]
#[command(name = "bean-brew-barista", version, about = "Bean & Brew coffee shop assistant")]
pub struct Config {
    /// Gemini API key; empty or the placeholder value leaves the assistant offline.
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "BARISTA_MODEL", default_value = GEMINI_MODEL)]
    pub model: String,

    #[arg(long, env = "BARISTA_API_BASE", default_value = GEMINI_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "BARISTA_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[arg(long, env = "BARISTA_RATE_LIMIT", default_value_t = RATE_LIMIT_REQUESTS)]
    pub rate_limit: usize,

    #[arg(long, env = "BARISTA_RATE_LIMIT_WINDOW_SECS", default_value_t = RATE_LIMIT_WINDOW_SECS)]
    pub rate_limit_window_secs: u64,

    #[arg(long, env = "BARISTA_CACHE_TTL_SECS", default_value_t = CACHE_DURATION_SECS)]
    pub cache_ttl_secs: u64,

    #[arg(long, env = "BARISTA_REQUEST_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Replace the built-in shop information with the contents of this file.
    #[arg(long, env = "BARISTA_KNOWLEDGE_FILE")]
    pub knowledge_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: GEMINI_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            bind: ([127, 0, 0, 1], 3030).into(),
            rate_limit: RATE_LIMIT_REQUESTS,
            rate_limit_window_secs: RATE_LIMIT_WINDOW_SECS,
            cache_ttl_secs: CACHE_DURATION_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            knowledge_file: None,
        }
    }
}

impl Config {
    pub fn is_configured(&self) -> bool {
        !PLACEHOLDER_API_KEYS.contains(self.api_key.trim())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            rate_limit: self.rate_limit,
            rate_limit_window: Duration::from_secs(self.rate_limit_window_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Gate parameters shared by the rate limiter and the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub rate_limit: usize,
    pub rate_limit_window: Duration,
    pub cache_ttl: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            rate_limit: RATE_LIMIT_REQUESTS,
            rate_limit_window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            cache_ttl: Duration::from_secs(CACHE_DURATION_SECS),
        }
    }
}
