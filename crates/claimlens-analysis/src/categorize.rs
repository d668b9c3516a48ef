//! Map the oracle's categorization response onto the fixed category set

use claimlens_domain::Category;
use tracing::debug;

/// Resolve a categorization response to a [`Category`]
///
/// Prefers an exact (case-insensitive) label match. When the oracle wraps
/// the label in prose, the first known label found as a substring wins,
/// scanning in the fixed category order. Anything else maps to `Other`.
pub fn map_category_label(response: &str) -> Category {
    if let Some(category) = Category::parse_label(response) {
        return category;
    }

    let lowered = response.to_lowercase();
    for category in Category::ALL {
        // "Other" is the fallback already; matching it as a substring would
        // misfire on ordinary prose
        if category == Category::Other {
            continue;
        }
        if lowered.contains(&category.as_str().to_lowercase()) {
            return category;
        }
    }

    debug!("Unmappable category response, falling back to Other: {:?}", response);
    Category::Other
}
