//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the pipeline and its
//! infrastructure. Implementations live in sibling crates; tests substitute
//! deterministic doubles.

use crate::{Claim, InfluencerId, RawPost};

/// Trait for retrieving an influencer's recent posts
///
/// Implemented by the infrastructure layer (claimlens-source)
pub trait PostSource {
    /// Error type for source operations
    type Error;

    /// Fetch up to `max_count` recent posts for a handle, newest first
    ///
    /// An empty sequence is a valid, non-error result.
    fn fetch_posts(&self, handle: &str, max_count: usize) -> Result<Vec<RawPost>, Self::Error>;
}

/// Trait for the text-understanding oracle
///
/// Implemented by the infrastructure layer (claimlens-oracle)
pub trait TextOracle {
    /// Error type for oracle operations
    type Error;

    /// Generate a text completion for the given prompt
    fn complete(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for persisting pipeline output
///
/// Implemented by the infrastructure layer (claimlens-store)
pub trait ClaimSink {
    /// Error type for persistence operations
    type Error;

    /// Persist one claim record
    fn save_claim(&mut self, claim: &Claim) -> Result<(), Self::Error>;

    /// Update an influencer's trust score and last-analyzed timestamp
    fn update_influencer_trust(
        &mut self,
        id: InfluencerId,
        trust_score: f64,
        analyzed_at: u64,
    ) -> Result<(), Self::Error>;
}
