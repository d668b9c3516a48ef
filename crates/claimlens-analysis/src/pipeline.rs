//! Pipeline orchestrator
//!
//! Sequences the analysis stages for one influencer and enforces the
//! pipeline's failure and ordering guarantees: source failures resolve to a
//! no-op run, oracle failures degrade to per-stage fallbacks, and only
//! persistence failures abort a run.

use crate::aggregate::summarize;
use crate::categorize::map_category_label;
use crate::config::AnalysisConfig;
use crate::corpus::build_corpus;
use crate::dedup::dedupe_claims;
use crate::error::PipelineError;
use crate::extract::parse_claim_lines;
use crate::prompt;
use crate::verify::parse_verification;
use claimlens_domain::claim::DEFAULT_CONFIDENCE;
use claimlens_domain::traits::{ClaimSink, PostSource, TextOracle};
use claimlens_domain::{AnalysisResult, Category, Claim, Influencer, VerificationStatus};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// The states of one analysis run
///
/// `NoOp` is a terminal reachable from `Fetching` (no posts, source down,
/// unknown handle) or `Extracting` (no claims found); it short-circuits the
/// remaining states and reports a zero-claims result without touching the
/// influencer's trust score. `Done` always persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Retrieving recent posts
    Fetching,
    /// Extracting claim candidates from the corpus
    Extracting,
    /// Collapsing near-duplicate claims
    Deduplicating,
    /// Categorizing and verifying each unique claim
    ClassifyingEach,
    /// Computing the trust summary
    Aggregating,
    /// Writing claims and the trust score
    Persisting,
    /// Run completed and persisted
    Done,
    /// Run ended early with nothing to analyze
    NoOp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Deduplicating => "deduplicating",
            Stage::ClassifyingEach => "classifying-each",
            Stage::Aggregating => "aggregating",
            Stage::Persisting => "persisting",
            Stage::Done => "done",
            Stage::NoOp => "no-op",
        };
        write!(f, "{}", name)
    }
}

/// The analysis pipeline for one influencer at a time
///
/// Generic over its collaborators so tests can substitute doubles. One
/// logical run per call to [`run`](AnalysisPipeline::run); no state is
/// shared across runs beyond the injected collaborators themselves.
pub struct AnalysisPipeline<O, P, S>
where
    O: TextOracle,
    P: PostSource,
    S: ClaimSink,
{
    oracle: Arc<O>,
    source: Arc<P>,
    sink: Arc<Mutex<S>>,
    config: AnalysisConfig,
}

impl<O, P, S> AnalysisPipeline<O, P, S>
where
    O: TextOracle + Send + Sync + 'static,
    P: PostSource + Send + Sync + 'static,
    S: ClaimSink,
    O::Error: fmt::Display,
    P::Error: fmt::Display,
    S::Error: fmt::Display,
{
    /// Create a new pipeline around the given collaborators
    pub fn new(oracle: O, source: P, sink: S, config: AnalysisConfig) -> Self {
        Self {
            oracle: Arc::new(oracle),
            source: Arc::new(source),
            sink: Arc::new(Mutex::new(sink)),
            config,
        }
    }

    /// Run one full analysis for `influencer`
    ///
    /// Returns a completed [`AnalysisResult`] (possibly a zero-claims no-op)
    /// or a [`PipelineError`] when persistence fails. Oracle and source
    /// faults never surface here.
    ///
    /// Persistence is per-row: claims already written when a write fails
    /// stay written, and the influencer's trust score is only updated after
    /// every claim insert succeeded.
    pub async fn run(&self, influencer: &Influencer) -> Result<AnalysisResult, PipelineError> {
        info!("Starting analysis run for @{}", influencer.handle);

        debug!("Stage: {}", Stage::Fetching);
        let posts = {
            let source = Arc::clone(&self.source);
            let handle = influencer.handle.clone();
            let max_posts = self.config.max_posts;
            let fetched = tokio::task::spawn_blocking(move || {
                source.fetch_posts(&handle, max_posts).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| e.to_string())
            .and_then(|result| result);

            match fetched {
                Ok(posts) => posts,
                Err(e) => {
                    warn!("Post source failed for @{}: {}", influencer.handle, e);
                    return Ok(self.no_op(influencer, Stage::Fetching));
                }
            }
        };

        if posts.is_empty() {
            return Ok(self.no_op(influencer, Stage::Fetching));
        }

        debug!("Stage: {}", Stage::Extracting);
        let corpus = build_corpus(&posts);
        let extraction = call_oracle(
            Arc::clone(&self.oracle),
            prompt::extraction_prompt(&corpus),
            self.config.oracle_timeout(),
        )
        .await;

        let raw_claims = match extraction {
            Ok(response) => parse_claim_lines(&response),
            Err(e) => {
                warn!("Claim extraction failed, treating corpus as claim-free: {}", e);
                Vec::new()
            }
        };

        if raw_claims.is_empty() {
            return Ok(self.no_op(influencer, Stage::Extracting));
        }

        debug!("Stage: {}", Stage::Deduplicating);
        let unique = dedupe_claims(raw_claims);
        info!("{} unique claims to classify", unique.len());

        debug!("Stage: {}", Stage::ClassifyingEach);
        let outcomes = self.classify_all(&unique).await;

        let collected_at = now_unix();
        let claims: Vec<Claim> = unique
            .into_iter()
            .zip(outcomes)
            .map(|(text, outcome)| {
                let claim = Claim::new(influencer.id, text, collected_at);
                match outcome {
                    Some((category, status, confidence)) => claim
                        .with_category(category)
                        .with_verification(status, confidence),
                    None => claim,
                }
            })
            .collect();

        debug!("Stage: {}", Stage::Aggregating);
        let summary = summarize(&claims);

        debug!("Stage: {}", Stage::Persisting);
        {
            let mut sink = self
                .sink
                .lock()
                .map_err(|e| PipelineError::Storage(format!("Sink lock poisoned: {}", e)))?;

            for claim in &claims {
                sink.save_claim(claim)
                    .map_err(|e| PipelineError::Storage(e.to_string()))?;
            }
            sink.update_influencer_trust(influencer.id, summary.trust_score, collected_at)
                .map_err(|e| PipelineError::Storage(e.to_string()))?;
        }

        info!(
            "Analysis {} for @{}: {} claims, {} verified, trust score {:.1}",
            Stage::Done,
            influencer.handle,
            claims.len(),
            summary.verified_count,
            summary.trust_score
        );

        Ok(AnalysisResult {
            claims_analyzed: claims.len(),
            claims_verified: summary.verified_count,
            trust_score: summary.trust_score,
        })
    }

    /// Classify every unique claim with a bounded concurrent fan-out
    ///
    /// Completion order is arbitrary; results are reassembled by index so
    /// the caller sees dedup order. A slot that comes back `None` (task
    /// failure) leaves its claim on the default fallback values.
    async fn classify_all(
        &self,
        unique: &[String],
    ) -> Vec<Option<(Category, VerificationStatus, f64)>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_classifications));
        let mut join_set = JoinSet::new();

        for (idx, text) in unique.iter().cloned().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let semaphore = Arc::clone(&semaphore);
            let limit = self.config.oracle_timeout();

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = classify_claim(oracle, &text, limit).await;
                (idx, outcome)
            });
        }

        let mut outcomes = vec![None; unique.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(e) => {
                    warn!("Classification task failed, claim keeps fallback values: {}", e);
                }
            }
        }
        outcomes
    }

    /// A zero-claims result that leaves the influencer untouched
    fn no_op(&self, influencer: &Influencer, stage: Stage) -> AnalysisResult {
        info!(
            "Run for @{} ended as {} during {}",
            influencer.handle,
            Stage::NoOp,
            stage
        );
        AnalysisResult {
            claims_analyzed: 0,
            claims_verified: 0,
            trust_score: influencer.trust_score,
        }
    }
}

/// Categorize and verify one claim
///
/// The two calls are independent and run concurrently; each degrades to its
/// own fallback on failure so one bad call never costs the other's result.
async fn classify_claim<O>(
    oracle: Arc<O>,
    text: &str,
    limit: Duration,
) -> (Category, VerificationStatus, f64)
where
    O: TextOracle + Send + Sync + 'static,
    O::Error: fmt::Display,
{
    let category_call = call_oracle(
        Arc::clone(&oracle),
        prompt::categorization_prompt(text),
        limit,
    );
    let verify_call = call_oracle(oracle, prompt::verification_prompt(text), limit);

    let (category_response, verify_response) = tokio::join!(category_call, verify_call);

    let category = match category_response {
        Ok(response) => map_category_label(&response),
        Err(e) => {
            warn!("Categorization failed, falling back to Other: {}", e);
            Category::Other
        }
    };

    let (status, confidence) = match verify_response {
        Ok(response) => parse_verification(&response),
        Err(e) => {
            warn!("Verification failed, using fallback pair: {}", e);
            (VerificationStatus::default(), DEFAULT_CONFIDENCE)
        }
    };

    (category, status, confidence)
}

/// Call the oracle with a timeout, off the async runtime
///
/// The oracle trait is synchronous, so the call runs on the blocking pool;
/// a timeout is reported like any other oracle failure.
async fn call_oracle<O>(oracle: Arc<O>, prompt: String, limit: Duration) -> Result<String, String>
where
    O: TextOracle + Send + Sync + 'static,
    O::Error: fmt::Display,
{
    let call = tokio::task::spawn_blocking(move || {
        oracle.complete(&prompt).map_err(|e| e.to_string())
    });

    match tokio::time::timeout(limit, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(format!("Oracle task failed: {}", join_error)),
        Err(_) => Err(format!("Oracle call timed out after {:?}", limit)),
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_oracle::MockOracle;
    use claimlens_source::MockSource;
    use claimlens_store::SqliteStore;

    fn pipeline_with(
        oracle: MockOracle,
        source: MockSource,
    ) -> AnalysisPipeline<MockOracle, MockSource, SqliteStore> {
        let store = SqliteStore::new(":memory:").unwrap();
        AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default())
    }

    #[tokio::test]
    async fn test_unknown_handle_is_a_no_op() {
        let pipeline = pipeline_with(MockOracle::new(""), MockSource::new());

        let mut influencer = Influencer::new("Ghost", "ghost", 0);
        influencer.trust_score = 42.0;

        let result = pipeline.run(&influencer).await.unwrap();
        assert_eq!(result.claims_analyzed, 0);
        assert_eq!(result.trust_score, 42.0);
    }

    #[tokio::test]
    async fn test_no_posts_is_a_no_op_without_oracle_calls() {
        let oracle = MockOracle::new("should never be used");
        let mut source = MockSource::new();
        source.add_posts("quiet", vec![]);

        let pipeline = pipeline_with(oracle.clone(), source);
        let result = pipeline
            .run(&Influencer::new("Quiet", "quiet", 0))
            .await
            .unwrap();

        assert_eq!(result.claims_analyzed, 0);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_claim_free_corpus_is_a_no_op() {
        let oracle = MockOracle::new("");
        let mut source = MockSource::new();
        source.add_posts(
            "vibes",
            vec![claimlens_domain::RawPost::new("Just vibes today.", 0)],
        );

        let pipeline = pipeline_with(oracle, source);
        let result = pipeline
            .run(&Influencer::new("Vibes", "vibes", 0))
            .await
            .unwrap();

        assert_eq!(result.claims_analyzed, 0);
        assert_eq!(result.claims_verified, 0);
    }
}
