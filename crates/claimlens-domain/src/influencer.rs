//! Influencer module - the subject of an analysis run

use std::fmt;

/// Unique identifier for an influencer, based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InfluencerId(u128);

impl InfluencerId {
    /// Generate a new UUIDv7-based InfluencerId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an InfluencerId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an InfluencerId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid influencer id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for InfluencerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InfluencerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A social-media influencer whose health claims are analyzed
///
/// `trust_score` and `last_analyzed` are owned by the pipeline: only the
/// persisting stage of a completed run mutates them. All other fields belong
/// to whoever registered the influencer.
#[derive(Debug, Clone, PartialEq)]
pub struct Influencer {
    /// Unique identifier
    pub id: InfluencerId,

    /// Display name
    pub name: String,

    /// Unique handle on the upstream platform
    pub handle: String,

    /// Follower count at registration time
    pub follower_count: u64,

    /// Mean confidence across the most recent run's claims; 0.0 until analyzed
    pub trust_score: f64,

    /// When the last completed run finished (Unix seconds), if any
    pub last_analyzed: Option<u64>,
}

impl Influencer {
    /// Register a new influencer with no analysis history
    pub fn new(name: impl Into<String>, handle: impl Into<String>, follower_count: u64) -> Self {
        Self {
            id: InfluencerId::new(),
            name: name.into(),
            handle: handle.into(),
            follower_count,
            trust_score: 0.0,
            last_analyzed: None,
        }
    }
}
