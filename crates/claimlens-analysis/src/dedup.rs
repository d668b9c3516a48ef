//! Order-preserving claim deduplication

use std::collections::HashSet;

/// Collapse near-duplicate claims, keeping the first occurrence
///
/// The equality key is the claim text trimmed and case-folded; the surviving
/// claim keeps its original spelling. Pure and total.
///
/// # Examples
///
/// ```
/// use claimlens_analysis::dedupe_claims;
///
/// let claims = vec![
///     "Sugar causes diabetes.".to_string(),
///     "sugar causes diabetes.".to_string(),
///     "Exercise improves mood.".to_string(),
/// ];
/// assert_eq!(
///     dedupe_claims(claims),
///     vec!["Sugar causes diabetes.", "Exercise improves mood."]
/// );
/// ```
pub fn dedupe_claims(claims: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    claims
        .into_iter()
        .filter(|claim| seen.insert(claim.trim().to_lowercase()))
        .collect()
}
