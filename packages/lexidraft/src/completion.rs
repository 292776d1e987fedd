//! Client for the remote text-completion service.
//!
//! The public contract is deliberately coarse: [`CompletionClient::complete`]
//! folds every failure (transport, status, body shape, empty candidates)
//! into [`FAILURE_MESSAGE`]. [`CompletionClient::try_complete`] exposes the
//! typed error underneath for strict callers.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::LexidraftConfig;
use crate::error::{LexidraftError, Result};

/// The single text substituted for any completion failure.
pub const FAILURE_MESSAGE: &str =
    "Error: Unable to fetch response. Please check the prompt or API.";

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("lexidraft/", env!("CARGO_PKG_VERSION"));

/// Outcome of one completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub text: String,
    pub success: bool,
}

impl CompletionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    /// The uniform failure result.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            text: FAILURE_MESSAGE.to_string(),
            success: false,
        }
    }
}

/// A text-completion backend.
///
/// Implementations only provide [`try_complete`](Self::try_complete); the
/// sentinel collapsing in [`complete`](Self::complete) is shared.
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` and return the first candidate's text, or the precise error.
    fn try_complete(&self, prompt: &str) -> Result<String>;

    /// Send `prompt`; any failure becomes [`CompletionResult::failure`].
    fn complete(&self, prompt: &str) -> CompletionResult {
        match self.try_complete(prompt) {
            Ok(text) => CompletionResult::success(text),
            Err(e) => {
                tracing::warn!(error = %e, "completion failed, substituting failure message");
                CompletionResult::failure()
            }
        }
    }
}

/// Google Gemini `generateContent` client.
///
/// NOTE: Do NOT derive `Debug` on this struct, `api_key` would be exposed.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorDetail>,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(config: &LexidraftConfig) -> Result<Self> {
        // No timeout unless configured: the wait is bounded by the transport only.
        let http = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LexidraftError::Http(e.without_url()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base_url, self.model
        ))
        .map_err(|e| LexidraftError::Config(format!("invalid API base URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl CompletionClient for GeminiClient {
    fn try_complete(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        // The key travels in the URL, so strip URLs from transport errors.
        let resp = self
            .http
            .post(self.endpoint()?)
            .json(&body)
            .send()
            .map_err(|e| LexidraftError::Http(e.without_url()))?;

        let status = resp.status();
        let body_text = resp
            .text()
            .map_err(|e| LexidraftError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body_text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body_text);
            return Err(LexidraftError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        extract_first_text(&body_text)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
fn extract_first_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| LexidraftError::ResponseParse(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(LexidraftError::EmptyResponse)?;

    let part = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .ok_or_else(|| LexidraftError::ResponseParse("first candidate has no parts".into()))?;

    part.text
        .ok_or_else(|| LexidraftError::ResponseParse("first part has no text".into()))
}

/// Test utilities for the completion client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock client. Returns pre-configured replies in order and records prompts.
    pub struct MockCompletionClient {
        replies: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockCompletionClient {
        pub fn new(replies: Vec<Result<String>>) -> Self {
            // Reverse so we can pop from the end
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        pub fn failing(error: LexidraftError) -> Self {
            Self::new(vec![Err(error)])
        }

        /// Prompts received so far, oldest first.
        pub fn prompts(&self) -> Vec<String> {
            self.prompts
                .lock()
                .map(|p| p.clone())
                .unwrap_or_default()
        }
    }

    impl CompletionClient for MockCompletionClient {
        fn try_complete(&self, prompt: &str) -> Result<String> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            let mut replies = self.replies.lock().map_err(|e| {
                LexidraftError::ResponseParse(format!("mock lock poisoned: {e}"))
            })?;
            replies.pop().unwrap_or(Err(LexidraftError::EmptyResponse))
        }
    }
}
