//! Trust aggregation over a run's finalized claims

use claimlens_domain::{Claim, VerificationStatus};

/// Aggregate view of one run's claims
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustSummary {
    /// Arithmetic mean of confidence scores; 0.0 for an empty run
    pub trust_score: f64,

    /// Number of claims whose status is Verified
    pub verified_count: usize,
}

/// Compute the trust summary for a set of claims
///
/// Pure and deterministic. The empty list maps to a trust score of 0.0 by
/// definition rather than dividing by zero.
pub fn summarize(claims: &[Claim]) -> TrustSummary {
    if claims.is_empty() {
        return TrustSummary {
            trust_score: 0.0,
            verified_count: 0,
        };
    }

    let total: f64 = claims.iter().map(|claim| claim.confidence).sum();
    let verified_count = claims
        .iter()
        .filter(|claim| claim.status == VerificationStatus::Verified)
        .count();

    TrustSummary {
        trust_score: total / claims.len() as f64,
        verified_count,
    }
}
