//! Chat-completions oracle implementation
//!
//! Talks to an OpenAI-style chat-completions API. The pipeline only ever
//! sends a single user message and reads back the first choice, so that is
//! all this client models.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Configurable endpoint, model, and API key
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use claimlens_oracle::ChatOracle;
//!
//! let oracle = ChatOracle::new("https://api.openai.com", "gpt-3.5-turbo", "sk-...");
//! // The complete method is async; the TextOracle trait impl wraps it for
//! // callers in blocking contexts.
//! ```

use crate::OracleError;
use claimlens_domain::traits::TextOracle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default model, matching what the analysis prompts were tuned against
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default timeout for oracle requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chat-completions API client
pub struct ChatOracle {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatOracle {
    /// Create a new chat oracle
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g. "https://api.openai.com")
    /// - `model`: model name (e.g. "gpt-3.5-turbo")
    /// - `api_key`: bearer token for the API
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| OracleError::Other(format!("Client build failed: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create an oracle against the default endpoint and model
    pub fn default_endpoint(api_key: impl Into<String>) -> Result<Self, OracleError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate a completion for the given prompt
    ///
    /// Sends the prompt as a single user message at temperature 0 and
    /// returns the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, authentication fails,
    /// the rate limit is hit, or the response carries no choices.
    pub async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.0,
        };

        // Retry loop with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                            OracleError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .map(|c| c.message.content)
                            .ok_or_else(|| {
                                OracleError::InvalidResponse("Response carried no choices".to_string())
                            });
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        // No point retrying a bad key
                        return Err(OracleError::Auth(format!("HTTP {}", status)));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(OracleError::RateLimited);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(OracleError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(OracleError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| OracleError::Communication("Max retries exceeded".to_string())))
    }
}

impl TextOracle for ChatOracle {
    type Error = OracleError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async client; the pipeline calls this
        // from spawn_blocking, never from an async context directly.
        tokio::runtime::Runtime::new()
            .map_err(|e| OracleError::Other(format!("Runtime error: {}", e)))?
            .block_on(async { self.complete(prompt).await })
    }
}
