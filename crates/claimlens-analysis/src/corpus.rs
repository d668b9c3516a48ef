//! Corpus construction from raw posts

use claimlens_domain::RawPost;

/// Join post texts into a single corpus string, newline-separated
///
/// Preserves input order and does no filtering; whitespace-only and empty
/// posts pass through unchanged, and downstream stages absorb the resulting
/// empty-claim edge cases.
pub fn build_corpus(posts: &[RawPost]) -> String {
    posts
        .iter()
        .map(|post| post.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
