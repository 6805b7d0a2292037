pub mod config;
pub mod errors;
pub mod handlers;
pub mod knowledge;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;

pub use config::{Config, Limits};
pub use errors::{AnswerError, ApiError};
pub use models::{AppState, CacheEntry, RateWindow};
pub use routes::routes;
pub use services::{AnswerService, GeminiClient};
