//! Parse the oracle's claim-extraction response
//!
//! The extraction contract is one claim per line, but the oracle sometimes
//! bullets its output or wraps claims in prose. Any line that survives
//! trimming and bullet-stripping is accepted as a candidate claim; stricter
//! filtering would silently change which claims get analyzed.

/// Split an extraction response into claim strings
///
/// Leading bullet markers (`-`, `*`) and surrounding whitespace are
/// stripped; empty lines are discarded. An empty result is a valid outcome,
/// not an error.
///
/// # Examples
///
/// ```
/// use claimlens_analysis::parse_claim_lines;
///
/// let response = "- Sugar causes diabetes.\n\n* Exercise improves mood.";
/// assert_eq!(
///     parse_claim_lines(response),
///     vec!["Sugar causes diabetes.", "Exercise improves mood."]
/// );
/// ```
pub fn parse_claim_lines(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
