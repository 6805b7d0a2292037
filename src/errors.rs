use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "⏱️ Please wait a moment before asking another question!";
pub const UNCONFIGURED_MESSAGE: &str = "❌ System not configured. Please contact administrator.";
pub const TIMEOUT_MESSAGE: &str = "⏰ Request timed out. Please try again!";
pub const UPSTREAM_RATE_LIMITED_MESSAGE: &str = "😅 Oops! Too many questions right now.

**What to do:**
• Wait 60 seconds and try again
• The system has rate limits to prevent overload

Sorry for the inconvenience! ☕";
pub const UPSTREAM_ERROR_MESSAGE: &str = "❌ Sorry, something went wrong. Please try again in a moment.";
pub const TRANSPORT_MESSAGE: &str = "❌ Sorry, I'm having trouble right now. Please try again!";

/// Every way a single answer attempt can end without an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("local rate limit exceeded")]
    RateLimited,
    #[error("API key not configured")]
    Unconfigured,
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream rate limited the request")]
    UpstreamRateLimited,
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl AnswerError {
    /// The fixed text shown to the customer for this outcome.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited => RATE_LIMITED_MESSAGE,
            Self::Unconfigured => UNCONFIGURED_MESSAGE,
            Self::Timeout => TIMEOUT_MESSAGE,
            Self::UpstreamRateLimited => UPSTREAM_RATE_LIMITED_MESSAGE,
            Self::UpstreamStatus(_) => UPSTREAM_ERROR_MESSAGE,
            // A 2xx we cannot read lands in the same bucket as any other unexpected failure.
            Self::MalformedResponse(_) | Self::Transport(_) => TRANSPORT_MESSAGE,
        }
    }
}

/// Rejections raised by the HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("question must not be empty")]
    EmptyQuestion,
}

impl warp::reject::Reject for ApiError {}
