//! One question in, one customer-facing string out.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::{Config, Limits, DEFAULT_CALLER};
use crate::errors::AnswerError;
use crate::knowledge::{build_prompt, KNOWLEDGE_BASE};
use crate::models::AppState;
use crate::services::gemini::GeminiClient;
use crate::services::{cache_response, check_rate_limit, get_cached_response, SharedState};

/// Gate, cache and upstream call for a single session.
///
/// `client` is `None` when no usable API key is configured; the service still
/// runs so that rate limiting and cached answers keep working.
#[derive(Debug)]
pub struct AnswerService {
    state: SharedState,
    limits: Limits,
    client: Option<GeminiClient>,
    knowledge: String,
}

impl AnswerService {
    pub fn new(limits: Limits, client: Option<GeminiClient>, knowledge: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            limits,
            client,
            knowledge: knowledge.into(),
        }
    }

    pub fn from_config(config: &Config, knowledge: Option<String>) -> Self {
        let client = if config.is_configured() {
            Some(GeminiClient::from_config(config))
        } else {
            warn!("no API key configured; answers will report the system as not configured");
            None
        };
        let knowledge = knowledge.unwrap_or_else(|| KNOWLEDGE_BASE.to_string());
        Self::new(config.limits(), client, knowledge)
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    /// Answer on behalf of the single implicit caller.
    pub async fn answer(&self, question: &str) -> String {
        self.answer_for(DEFAULT_CALLER, question).await
    }

    pub async fn answer_for(&self, caller: &str, question: &str) -> String {
        match self.answer_detailed(caller, question).await {
            Ok(answer) => answer,
            Err(e) => e.user_message().to_string(),
        }
    }

    /// Same protocol as [`answer_for`](Self::answer_for) but keeps the failure kind.
    /// Only `Ok` results are ever written to the cache.
    pub async fn answer_detailed(&self, caller: &str, question: &str) -> Result<String, AnswerError> {
        if !check_rate_limit(&self.state, &self.limits, caller).await {
            info!(caller, "question rejected by local rate limit");
            return Err(AnswerError::RateLimited);
        }

        if let Some(cached) = get_cached_response(&self.state, &self.limits, question).await {
            debug!("answer served from cache");
            return Ok(cached);
        }

        let client = self.client.as_ref().ok_or(AnswerError::Unconfigured)?;

        let prompt = build_prompt(&self.knowledge, question);
        let answer = client.generate(&prompt).await?;

        // An empty answer is returned but not kept, so the next ask fetches again.
        if answer.is_empty() {
            warn!("upstream returned an empty answer; not caching");
            return Ok(answer);
        }
        cache_response(&self.state, &self.limits, question, &answer).await;
        info!(bytes = answer.len(), "answer generated and cached");
        Ok(answer)
    }
}
