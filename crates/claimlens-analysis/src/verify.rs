//! Parse the oracle's verification response
//!
//! The verifier expects a JSON object `{"status": ..., "confidence": ...}`
//! but never lets a malformed payload abort the pipeline: each field falls
//! back independently, and a payload that fails to parse at all yields the
//! full fallback pair.

use claimlens_domain::claim::DEFAULT_CONFIDENCE;
use claimlens_domain::VerificationStatus;
use serde_json::Value;
use tracing::warn;

/// Parse a verification response into a (status, confidence) pair
///
/// Fallbacks, applied per field: unknown or missing status →
/// `Questionable`; missing or out-of-range confidence → 50.0. A response
/// that is not a JSON object yields the full fallback pair.
///
/// # Examples
///
/// ```
/// use claimlens_analysis::parse_verification;
/// use claimlens_domain::VerificationStatus;
///
/// let (status, confidence) = parse_verification(r#"{"status": "Verified", "confidence": 90}"#);
/// assert_eq!(status, VerificationStatus::Verified);
/// assert_eq!(confidence, 90.0);
///
/// let (status, confidence) = parse_verification("I'd rather not say.");
/// assert_eq!(status, VerificationStatus::Questionable);
/// assert_eq!(confidence, 50.0);
/// ```
pub fn parse_verification(response: &str) -> (VerificationStatus, f64) {
    let json = strip_code_fences(response);

    let payload: Value = match serde_json::from_str(json.trim()) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable verification payload ({}), using fallback pair", e);
            return (VerificationStatus::default(), DEFAULT_CONFIDENCE);
        }
    };

    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(VerificationStatus::parse_label)
        .unwrap_or_default();

    let confidence = payload
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| (0.0..=100.0).contains(c))
        .unwrap_or(DEFAULT_CONFIDENCE);

    (status, confidence)
}

/// Strip a markdown code fence, if present
///
/// Oracles sometimes wrap JSON in ```json blocks despite being told not to.
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Skip the opening ``` / ```json line and the closing ``` line
        lines[1..lines.len().saturating_sub(1)].join("\n")
    } else {
        trimmed.to_string()
    }
}
