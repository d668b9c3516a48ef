//! Error types for the analysis pipeline

use thiserror::Error;

/// Errors that abort an analysis run
///
/// Deliberately small: oracle failures degrade to per-stage fallback values
/// and source failures resolve to a no-op run, so only the persistence layer
/// can make a run fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Persistence failure; the run did not complete
    #[error("Storage error: {0}")]
    Storage(String),
}
