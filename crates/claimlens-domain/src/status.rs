//! Verification status for claims

use std::fmt;

/// Outcome of verifying a claim against the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerificationStatus {
    /// Supported by evidence
    Verified,
    /// Unclear or contested; also the fallback when verification fails
    #[default]
    Questionable,
    /// Contradicted by evidence
    Debunked,
}

impl VerificationStatus {
    /// Canonical label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Questionable => "Questionable",
            VerificationStatus::Debunked => "Debunked",
        }
    }

    /// Parse a label case-insensitively
    ///
    /// Returns `None` for unknown labels; the verifier maps `None` to
    /// `Questionable`.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "verified" => Some(VerificationStatus::Verified),
            "questionable" => Some(VerificationStatus::Questionable),
            "debunked" => Some(VerificationStatus::Debunked),
            _ => None,
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_case_insensitively() {
        assert_eq!(
            VerificationStatus::parse_label("verified"),
            Some(VerificationStatus::Verified)
        );
        assert_eq!(
            VerificationStatus::parse_label(" DEBUNKED "),
            Some(VerificationStatus::Debunked)
        );
        assert_eq!(
            VerificationStatus::parse_label("Questionable"),
            Some(VerificationStatus::Questionable)
        );
    }

    #[test]
    fn test_parse_unknown_label() {
        assert_eq!(VerificationStatus::parse_label("plausible"), None);
        assert_eq!(VerificationStatus::parse_label(""), None);
    }

    #[test]
    fn test_default_is_questionable() {
        assert_eq!(VerificationStatus::default(), VerificationStatus::Questionable);
    }
}
