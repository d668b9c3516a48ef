//! Claimlens Analysis
//!
//! The claim-processing pipeline: turns an influencer's raw posts into
//! persisted, categorized, verified claims and an aggregate trust score.
//!
//! # Architecture
//!
//! ```text
//! Posts → Corpus → Extractor → Deduplicator → {Categorizer, Verifier} → Aggregator → Sink
//! ```
//!
//! The pipeline is generic over the collaborator traits from
//! `claimlens-domain`, so every external dependency (oracle, post source,
//! persistence) can be substituted with a test double.
//!
//! # Example Usage
//!
//! ```
//! use claimlens_analysis::{AnalysisConfig, AnalysisPipeline};
//! use claimlens_domain::{Influencer, RawPost};
//! use claimlens_oracle::MockOracle;
//! use claimlens_source::MockSource;
//! use claimlens_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oracle = MockOracle::new("");
//! let mut source = MockSource::new();
//! source.add_posts("drhealth", vec![RawPost::new("Just vibes today.", 0)]);
//! let store = SqliteStore::new(":memory:")?;
//!
//! let pipeline = AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default());
//!
//! let influencer = Influencer::new("Dr. Health", "drhealth", 1000);
//! let result = pipeline.run(&influencer).await?;
//! assert_eq!(result.claims_analyzed, 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod categorize;
mod config;
mod corpus;
mod dedup;
mod error;
mod extract;
mod pipeline;
mod prompt;
mod verify;

pub use aggregate::{summarize, TrustSummary};
pub use categorize::map_category_label;
pub use config::AnalysisConfig;
pub use corpus::build_corpus;
pub use dedup::dedupe_claims;
pub use error::PipelineError;
pub use extract::parse_claim_lines;
pub use pipeline::{AnalysisPipeline, Stage};
pub use verify::parse_verification;
