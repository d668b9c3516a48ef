//! Twitter API v2 post source
//!
//! Fetches an influencer's recent tweets in two steps: resolve the handle to
//! a user id, then page that user's timeline. Only the fields the pipeline
//! consumes (text, created_at) are modeled.

use crate::SourceError;
use chrono::DateTime;
use claimlens_domain::traits::PostSource;
use claimlens_domain::RawPost;
use serde::Deserialize;
use std::time::Duration;

/// Default Twitter API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Default timeout for API requests (15 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Twitter API v2 client implementing [`PostSource`]
pub struct TwitterSource {
    base_url: String,
    bearer_token: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct UserLookupResponse {
    data: Option<UserData>,
}

#[derive(Deserialize)]
struct UserData {
    id: String,
}

#[derive(Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    data: Vec<TweetData>,
}

#[derive(Deserialize)]
struct TweetData {
    text: String,
    created_at: Option<String>,
}

impl TwitterSource {
    /// Create a new Twitter source
    pub fn new(bearer_token: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, bearer_token)
    }

    /// Create a source against a non-default base URL (used by tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SourceError::Unavailable(format!("Client build failed: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            client,
        })
    }

    /// Fetch up to `max_count` recent posts for `handle`
    ///
    /// # Errors
    ///
    /// - `UnknownHandle` when the user lookup finds nobody
    /// - `Unavailable` on transport failures or non-success HTTP statuses
    /// - `InvalidResponse` when a payload cannot be decoded
    pub async fn fetch_posts(
        &self,
        handle: &str,
        max_count: usize,
    ) -> Result<Vec<RawPost>, SourceError> {
        let user_id = self.lookup_user(handle).await?;

        let url = format!(
            "{}/2/users/{}/tweets?max_results={}&tweet.fields=created_at",
            self.base_url, user_id, max_count
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("Timeline fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "Timeline fetch failed: HTTP {}",
                response.status()
            )));
        }

        let timeline = response
            .json::<TimelineResponse>()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("Timeline decode failed: {}", e)))?;

        Ok(timeline
            .data
            .into_iter()
            .map(|tweet| RawPost::new(tweet.text, parse_created_at(tweet.created_at.as_deref())))
            .collect())
    }

    async fn lookup_user(&self, handle: &str) -> Result<String, SourceError> {
        let url = format!("{}/2/users/by/username/{}", self.base_url, handle);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("User lookup failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::UnknownHandle(handle.to_string()));
        }
        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "User lookup failed: HTTP {}",
                response.status()
            )));
        }

        let lookup = response
            .json::<UserLookupResponse>()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("Lookup decode failed: {}", e)))?;

        match lookup.data {
            Some(user) => Ok(user.id),
            // The API reports unknown usernames as an errors-only body
            None => Err(SourceError::UnknownHandle(handle.to_string())),
        }
    }
}

/// Parse the API's RFC 3339 created_at into Unix seconds; 0 when absent
fn parse_created_at(raw: Option<&str>) -> u64 {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp().max(0) as u64)
        .unwrap_or(0)
}

impl PostSource for TwitterSource {
    type Error = SourceError;

    fn fetch_posts(&self, handle: &str, max_count: usize) -> Result<Vec<RawPost>, Self::Error> {
        // Blocking wrapper for the async client; the pipeline calls this
        // from spawn_blocking, never from an async context directly.
        tokio::runtime::Runtime::new()
            .map_err(|e| SourceError::Unavailable(format!("Runtime error: {}", e)))?
            .block_on(async { self.fetch_posts(handle, max_count).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twitter_source_creation() {
        let source = TwitterSource::new("bearer-token").unwrap();
        assert_eq!(source.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_created_at_rfc3339() {
        let secs = parse_created_at(Some("2024-01-15T10:30:00.000Z"));
        assert_eq!(secs, 1_705_314_600);
    }

    #[test]
    fn test_parse_created_at_missing_or_garbage() {
        assert_eq!(parse_created_at(None), 0);
        assert_eq!(parse_created_at(Some("yesterday")), 0);
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_unavailable() {
        let source = TwitterSource::with_base_url("http://127.0.0.1:1", "token").unwrap();
        let result = source.fetch_posts("drhealth", 5).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
