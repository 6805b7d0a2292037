//! Outbound client for the Gemini `generateContent` endpoint.
//!
//! One POST per question, bounded by a single timeout covering both the
//! response head and the body. Responses are classified into [`AnswerError`]
//! kinds; nothing is retried.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request, Uri};
use hyper_rustls::HttpsConnector;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::{Config, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::errors::AnswerError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

pub fn build_request_body(prompt: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a success body.
pub fn extract_text(response: &Value) -> Option<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
}

/// Map a completed exchange to an answer or a failure kind.
pub fn classify(status: StatusCode, body: &Bytes) -> Result<String, AnswerError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AnswerError::UpstreamRateLimited);
    }
    if !status.is_success() {
        return Err(AnswerError::UpstreamStatus(status.as_u16()));
    }

    let json: Value = serde_json::from_slice(body)
        .map_err(|e| AnswerError::MalformedResponse(e.to_string()))?;
    extract_text(&json).ok_or_else(|| {
        AnswerError::MalformedResponse("missing candidates[0].content.parts[0].text".to_string())
    })
}

pub struct GeminiClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    api_base: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_base: &str, model: &str, api_key: &str, request_timeout: Duration) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        Self {
            client: Client::builder().build(https),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.trim().to_string(),
            timeout: request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base, &config.model, &config.api_key, config.request_timeout())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        )
    }

    /// Send `prompt` and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AnswerError> {
        let body = serde_json::to_vec(&build_request_body(prompt))
            .map_err(|e| AnswerError::Transport(e.to_string()))?;

        // The URI carries the key, so it is never logged.
        let uri: Uri = self
            .endpoint()
            .parse()
            .map_err(|e: http::uri::InvalidUri| AnswerError::Transport(e.to_string()))?;

        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|e| AnswerError::Transport(e.to_string()))?;

        let exchange = async move {
            let response = self.client.request(req).await?;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<_, hyper::Error>((status, body))
        };

        debug!(model = %self.model, "sending generateContent request");
        let (status, body) = match timeout(self.timeout, exchange).await {
            Ok(Ok(parts)) => parts,
            Ok(Err(e)) => {
                warn!(error = %e, "Gemini request failed");
                return Err(AnswerError::Transport(e.to_string()));
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f64(), "Gemini request timed out");
                return Err(AnswerError::Timeout);
            }
        };

        let result = classify(status, &body);
        if let Err(e) = &result {
            warn!(status = status.as_u16(), error = %e, "Gemini request unsuccessful");
        }
        result
    }
}
