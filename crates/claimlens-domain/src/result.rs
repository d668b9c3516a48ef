//! Analysis run outcome

/// The outcome of one pipeline run for one influencer
///
/// Transient by design: only the trust-score component persists, on the
/// influencer row. A zero-claims result is a valid completed outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    /// Number of unique claims analyzed this run
    pub claims_analyzed: usize,

    /// Number of those claims whose status came back Verified
    pub claims_verified: usize,

    /// Mean confidence across analyzed claims; 0.0 for a zero-claims run
    pub trust_score: f64,
}

impl AnalysisResult {
    /// The result of a run that found nothing to analyze
    pub fn empty() -> Self {
        Self {
            claims_analyzed: 0,
            claims_verified: 0,
            trust_score: 0.0,
        }
    }
}
