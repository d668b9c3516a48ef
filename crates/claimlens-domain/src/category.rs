//! Claim categories

use std::fmt;

/// The fixed set of categories a health claim can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Diet, supplements, food science
    Nutrition,
    /// Drugs, treatments, clinical medicine
    Medicine,
    /// Psychology, stress, wellbeing
    MentalHealth,
    /// Exercise and physical training
    Fitness,
    /// Anything that does not fit the above
    #[default]
    Other,
}

impl Category {
    /// All categories, in the order they are offered to the oracle
    pub const ALL: [Category; 5] = [
        Category::Nutrition,
        Category::Medicine,
        Category::MentalHealth,
        Category::Fitness,
        Category::Other,
    ];

    /// Canonical label for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nutrition => "Nutrition",
            Category::Medicine => "Medicine",
            Category::MentalHealth => "Mental Health",
            Category::Fitness => "Fitness",
            Category::Other => "Other",
        }
    }

    /// Parse a label case-insensitively
    ///
    /// Returns `None` for anything outside the fixed set; callers decide the
    /// fallback (the categorizer maps `None` to `Other`).
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::Category;
    ///
    /// assert_eq!(Category::parse_label("nutrition"), Some(Category::Nutrition));
    /// assert_eq!(Category::parse_label("MENTAL HEALTH"), Some(Category::MentalHealth));
    /// assert_eq!(Category::parse_label("astrology"), None);
    /// ```
    pub fn parse_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Category::ALL
            .iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
            .copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
