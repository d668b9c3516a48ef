//! Claim module - a single factual health statement under analysis

use crate::{Category, InfluencerId, VerificationStatus};
use std::fmt;

/// Default confidence assigned when the verifier cannot obtain a usable score
pub const DEFAULT_CONFIDENCE: f64 = 50.0;

/// Unique identifier for a claim, based on UUIDv7
///
/// UUIDv7 gives chronological sortability without any coordination, which
/// keeps claim listings in collection order for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid claim id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A factual health claim attributed to an influencer
///
/// Claims are immutable once created; a correction is a new claim, never an
/// update to an existing one. Exactly one influencer owns each claim.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// Owning influencer
    pub influencer_id: InfluencerId,

    /// The claim text as extracted from the corpus
    pub text: String,

    /// Assigned category; `Other` until categorized
    pub category: Category,

    /// Verification status; `Questionable` until verified
    pub status: VerificationStatus,

    /// Confidence score in [0, 100]
    pub confidence: f64,

    /// When this claim was collected (Unix seconds)
    pub collected_at: u64,
}

impl Claim {
    /// Create a claim with default category, status, and confidence
    ///
    /// The defaults match the pipeline's fallback values: `Other`,
    /// `Questionable`, confidence 50.0.
    pub fn new(influencer_id: InfluencerId, text: impl Into<String>, collected_at: u64) -> Self {
        Self {
            id: ClaimId::new(),
            influencer_id,
            text: text.into(),
            category: Category::Other,
            status: VerificationStatus::Questionable,
            confidence: DEFAULT_CONFIDENCE,
            collected_at,
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the verification status and confidence together
    ///
    /// Confidence is clamped to [0, 100]; the verifier substitutes the
    /// default for out-of-range oracle values before ever reaching here, so
    /// the clamp only guards direct construction.
    pub fn with_verification(mut self, status: VerificationStatus, confidence: f64) -> Self {
        self.status = status;
        self.confidence = confidence.clamp(0.0, 100.0);
        self
    }
}
