//! Document and page types.

use super::TextSpan;
use serde::{Deserialize, Serialize};

/// How the spans of a document were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionQuality {
    /// Spans carry real font metadata
    #[default]
    Rich,
    /// Spans are plain lines with defaulted font fields
    Plain,
    /// Nothing could be extracted
    Empty,
}

/// A single page: spans in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based)
    pub index: u32,

    /// Spans in extraction order
    pub spans: Vec<TextSpan>,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            spans: Vec::new(),
        }
    }

    /// Build a page from plain text, one span per non-empty trimmed line.
    pub fn from_plain_text(index: u32, text: &str) -> Self {
        let spans = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| TextSpan::plain(line, index))
            .collect();
        Self { index, spans }
    }

    /// Add a span to the page.
    pub fn add_span(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Text of the page, one span per line, trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// 1-based page number used in persona output.
    pub fn number(&self) -> u32 {
        self.index + 1
    }
}

/// One PDF's pages, owned for the duration of an engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File name of the source document
    pub name: String,

    /// Pages in order
    pub pages: Vec<Page>,

    /// Extraction quality of the spans
    pub quality: ExtractionQuality,
}

impl Document {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
            quality: ExtractionQuality::Rich,
        }
    }

    /// Create an empty document marked as having no extractable content.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            quality: ExtractionQuality::Empty,
            ..Self::new(name)
        }
    }

    /// Set the extraction quality.
    pub fn with_quality(mut self, quality: ExtractionQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|p| p.spans.len()).sum()
    }

    /// Iterate over every span of the document in page order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|p| p.spans.iter())
    }
}
