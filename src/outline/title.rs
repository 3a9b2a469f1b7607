//! Title extraction from the first page.

use regex::Regex;

use super::OutlineOptions;
use crate::model::Document;

/// Picks a document title from the largest text on page 0.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    edge_punct: Regex,
    min_chars: usize,
    fallback_min_chars: usize,
}

impl TitleExtractor {
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            edge_punct: Regex::new(r"^[^\w\s]+|[^\w\s]+$").unwrap(),
            min_chars: options.title_min_chars,
            fallback_min_chars: options.title_fallback_min_chars,
        }
    }

    /// Title of the document, or an empty string.
    ///
    /// The first span at the page's maximum font size that is long enough
    /// wins. Failing that, the first long-enough span on the page is used.
    pub fn extract(&self, doc: &Document) -> String {
        let Some(page) = doc.pages.first() else {
            return String::new();
        };

        let spans: Vec<_> = page
            .spans
            .iter()
            .filter(|s| !s.trimmed().is_empty())
            .collect();
        if spans.is_empty() {
            return String::new();
        }

        let max_size = spans.iter().map(|s| s.font_size).fold(f32::MIN, f32::max);

        let largest = spans
            .iter()
            .filter(|s| s.font_size == max_size && s.trimmed_len() > self.min_chars)
            .map(|s| self.clean(s.trimmed()))
            .find(|t| !t.is_empty());
        if let Some(title) = largest {
            return title;
        }

        spans
            .iter()
            .filter(|s| s.trimmed_len() > self.fallback_min_chars)
            .map(|s| self.clean(s.trimmed()))
            .find(|t| !t.is_empty())
            .unwrap_or_default()
    }

    /// Strip leading and trailing punctuation.
    pub fn clean(&self, text: &str) -> String {
        self.edge_punct.replace_all(text, "").trim().to_string()
    }
}
