//! Claimlens Post Source Layer
//!
//! Implementations of the [`PostSource`] trait from `claimlens-domain`.
//!
//! # Sources
//!
//! - `MockSource`: deterministic mock for testing
//! - `TwitterSource`: Twitter API v2 client (user lookup + recent tweets)

#![warn(missing_docs)]

pub mod twitter;

use claimlens_domain::traits::PostSource;
use claimlens_domain::RawPost;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use twitter::TwitterSource;

/// Errors that can occur while fetching posts
#[derive(Error, Debug)]
pub enum SourceError {
    /// The upstream service could not be reached or returned a failure
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The handle does not exist upstream
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),

    /// Upstream response that could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Mock post source for deterministic testing
///
/// Handles must be registered with [`MockSource::add_posts`] before fetching;
/// unregistered handles fail with `UnknownHandle`. Registering an empty post
/// list is valid and exercises the pipeline's no-posts path.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    posts: Arc<Mutex<HashMap<String, Vec<RawPost>>>>,
    unavailable: Arc<Mutex<bool>>,
}

impl MockSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register posts for a handle
    pub fn add_posts(&mut self, handle: impl Into<String>, posts: Vec<RawPost>) {
        self.posts.lock().unwrap().insert(handle.into(), posts);
    }

    /// Make every fetch fail with `Unavailable`
    pub fn set_unavailable(&mut self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }
}

impl PostSource for MockSource {
    type Error = SourceError;

    fn fetch_posts(&self, handle: &str, max_count: usize) -> Result<Vec<RawPost>, Self::Error> {
        if *self.unavailable.lock().unwrap() {
            return Err(SourceError::Unavailable("Mock outage".to_string()));
        }

        let posts = self.posts.lock().unwrap();
        match posts.get(handle) {
            Some(posts) => Ok(posts.iter().take(max_count).cloned().collect()),
            None => Err(SourceError::UnknownHandle(handle.to_string())),
        }
    }
}
