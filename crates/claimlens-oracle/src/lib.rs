//! Claimlens Oracle Layer
//!
//! Implementations of the [`TextOracle`] trait from `claimlens-domain`.
//!
//! # Providers
//!
//! - `MockOracle`: deterministic mock for testing
//! - `ChatOracle`: OpenAI-style chat-completions API client
//!
//! # Examples
//!
//! ```
//! use claimlens_oracle::MockOracle;
//! use claimlens_domain::traits::TextOracle;
//!
//! let oracle = MockOracle::new("Hello from the oracle!");
//! let result = oracle.complete("any prompt").unwrap();
//! assert_eq!(result, "Hello from the oracle!");
//! ```

#![warn(missing_docs)]

pub mod chat;

use claimlens_domain::traits::TextOracle;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chat::ChatOracle;

/// Errors that can occur during oracle operations
#[derive(Error, Debug)]
pub enum OracleError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Authentication or authorization failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Response that could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("Oracle error: {0}")]
    Other(String),
}

/// A canned response rule for [`MockOracle`]
#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(String),
    Fail,
}

/// Mock oracle for deterministic testing
///
/// Returns pre-configured responses without making any network calls. Rules
/// are keyed by prompt *substring* rather than whole-prompt equality, because
/// pipeline prompts embed variable corpus text; the first matching rule wins,
/// in registration order. Prompts matching no rule get the default response.
///
/// # Examples
///
/// ```
/// use claimlens_oracle::MockOracle;
/// use claimlens_domain::traits::TextOracle;
///
/// let mut oracle = MockOracle::new("Other");
/// oracle.add_response("Statement: Sugar causes diabetes.", "Nutrition");
///
/// assert_eq!(oracle.complete("...\nStatement: Sugar causes diabetes.").unwrap(), "Nutrition");
/// assert_eq!(oracle.complete("unrelated prompt").unwrap(), "Other");
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, MockOutcome)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockOracle {
    /// Create a new MockOracle with a fixed response for unmatched prompts
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Respond with `response` to any prompt containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((needle.into(), MockOutcome::Respond(response.into())));
    }

    /// Fail any prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((needle.into(), MockOutcome::Fail));
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextOracle for MockOracle {
    type Error = OracleError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let rules = self.rules.lock().unwrap();
        for (needle, outcome) in rules.iter() {
            if prompt.contains(needle.as_str()) {
                return match outcome {
                    MockOutcome::Respond(response) => Ok(response.clone()),
                    MockOutcome::Fail => Err(OracleError::Other("Mock error".to_string())),
                };
            }
        }

        Ok(self.default_response.clone())
    }
}
