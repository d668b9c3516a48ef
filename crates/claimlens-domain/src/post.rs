//! Raw post content retrieved from the upstream source

/// A single post as retrieved from the upstream platform
///
/// Posts are immutable inputs to the pipeline; nothing downstream mutates or
/// filters them, including empty or whitespace-only texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    /// Post text content
    pub text: String,

    /// When the post was created (Unix seconds)
    pub created_at: u64,
}

impl RawPost {
    /// Create a post
    pub fn new(text: impl Into<String>, created_at: u64) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }
}
