//! Outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a 0-based rank among heading font sizes (largest first).
    ///
    /// Ranks past the third clamp to `H3`.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text, trimmed and with numbering stripped
    pub text: String,

    /// 0-based page index
    pub page: u32,
}

impl Heading {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus flat, level-tagged outline of one document.
///
/// The outline is not validated as a tree: an `H3` may precede any `H1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title, possibly empty
    pub title: String,

    /// Headings ordered by page
    pub outline: Vec<Heading>,
}

impl OutlineResult {
    /// The fallback record emitted for documents that could not be processed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Number of headings at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|h| h.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank_clamps() {
        assert_eq!(HeadingLevel::from_rank(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_rank(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_rank(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_rank(7), HeadingLevel::H3);
    }

    #[test]
    fn test_outline_serializes_level_names() {
        let result = OutlineResult {
            title: "Report".into(),
            outline: vec![Heading::new(HeadingLevel::H2, "Background", 1)],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Report","outline":[{"level":"H2","text":"Background","page":1}]}"#
        );
    }

    #[test]
    fn test_empty_result() {
        let result = OutlineResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.count_level(HeadingLevel::H1), 0);
    }
}
