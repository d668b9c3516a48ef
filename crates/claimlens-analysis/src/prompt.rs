//! Oracle prompt construction
//!
//! One builder per oracle-backed stage. The prompts pin the response shape
//! each stage's parser expects; the parsers still tolerate deviation, since
//! an unstructured text contract with an external model is inherently
//! fragile.

use claimlens_domain::Category;

const EXTRACTION_INSTRUCTIONS: &str = "\
Extract every factual health-related claim from the following text.
List one claim per line, with no numbering and no commentary.
If the text contains no health claims, return an empty list.";

const VERIFICATION_INSTRUCTIONS: &str = r#"Assess the scientific standing of the following health claim.
Respond with ONLY a JSON object in this form, no markdown, no explanations:
{"status": "Verified" | "Questionable" | "Debunked", "confidence": 0-100}
"confidence" expresses how strongly the evidence supports the claim."#;

/// Build the claim-extraction prompt for a corpus
pub fn extraction_prompt(corpus: &str) -> String {
    format!("{}\n---\n{}\n---\n", EXTRACTION_INSTRUCTIONS, corpus)
}

/// Build the categorization prompt for one claim
pub fn categorization_prompt(claim: &str) -> String {
    let labels = Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Assign the following health claim to exactly one of these categories: {}.\n\
         Respond with the category name only.\n\n\
         Statement: {}",
        labels, claim
    )
}

/// Build the verification prompt for one claim
pub fn verification_prompt(claim: &str) -> String {
    format!("{}\n\nClaim: {}", VERIFICATION_INSTRUCTIONS, claim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_embeds_corpus() {
        let prompt = extraction_prompt("Sugar causes diabetes.");
        assert!(prompt.contains("one claim per line"));
        assert!(prompt.contains("---\nSugar causes diabetes.\n---"));
    }

    #[test]
    fn test_categorization_prompt_offers_all_labels() {
        let prompt = categorization_prompt("Kale cures cancer.");
        for category in Category::ALL {
            assert!(prompt.contains(category.as_str()));
        }
        assert!(prompt.contains("Statement: Kale cures cancer."));
    }

    #[test]
    fn test_verification_prompt_pins_json_shape() {
        let prompt = verification_prompt("Kale cures cancer.");
        assert!(prompt.contains(r#""status""#));
        assert!(prompt.contains(r#""confidence""#));
        assert!(prompt.contains("Claim: Kale cures cancer."));
    }
}
