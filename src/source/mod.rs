//! Span sources.
//!
//! A span source turns one document into pages of text spans. Two qualities
//! are offered: rich spans with font metadata, and plain per-line text with
//! defaulted font fields. [`SpanSource::extract`] tries them in that order
//! and reports which one succeeded as an [`ExtractionOutcome`].

mod pdf;
mod memory;
mod options;

pub use pdf::{is_pdf, LopdfSource};
pub use memory::MemorySource;
pub use options::{ErrorMode, ExtractMode, ExtractOptions};

use crate::error::{Error, Result};
use crate::model::{Document, ExtractionQuality};

/// Result of running a span source.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// Spans with font metadata
    Rich(Document),
    /// Plain line text only; `reason` says why the rich path was not used
    Degraded { document: Document, reason: String },
    /// Neither path produced anything
    Failed(Error),
}

impl ExtractionOutcome {
    /// Quality of the extracted document.
    pub fn quality(&self) -> ExtractionQuality {
        match self {
            ExtractionOutcome::Rich(_) => ExtractionQuality::Rich,
            ExtractionOutcome::Degraded { .. } => ExtractionQuality::Plain,
            ExtractionOutcome::Failed(_) => ExtractionQuality::Empty,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed(_))
    }

    /// Take the document, substituting an empty one for a failure.
    pub fn into_document(self, name: &str) -> Document {
        match self {
            ExtractionOutcome::Rich(doc) => doc.with_quality(ExtractionQuality::Rich),
            ExtractionOutcome::Degraded { document, .. } => {
                document.with_quality(ExtractionQuality::Plain)
            }
            ExtractionOutcome::Failed(_) => Document::empty(name),
        }
    }
}

/// Something that can yield a document's pages of spans.
pub trait SpanSource {
    /// File name of the underlying document.
    fn name(&self) -> &str;

    /// Extract spans with font name, size, style flags and bounding box.
    fn extract_rich(&self, options: &ExtractOptions) -> Result<Document>;

    /// Extract plain per-line text with defaulted font fields.
    fn extract_plain(&self, options: &ExtractOptions) -> Result<Document>;

    /// Run the configured extraction paths, rich first.
    fn extract(&self, options: &ExtractOptions) -> ExtractionOutcome {
        let reason = match options.mode {
            ExtractMode::PlainOnly => "plain text requested".to_string(),
            ExtractMode::RichOnly => {
                return match self.extract_rich(options) {
                    Ok(doc) => ExtractionOutcome::Rich(doc),
                    Err(e) => ExtractionOutcome::Failed(e),
                };
            }
            ExtractMode::Auto => match self.extract_rich(options) {
                Ok(doc) if doc.span_count() > 0 => return ExtractionOutcome::Rich(doc),
                Ok(_) => "no text spans found".to_string(),
                Err(e) => e.to_string(),
            },
        };

        if options.mode == ExtractMode::Auto {
            log::warn!(
                "Rich extraction unavailable for {} ({}), falling back to plain text",
                self.name(),
                reason
            );
        }

        match self.extract_plain(options) {
            Ok(document) => ExtractionOutcome::Degraded { document, reason },
            Err(e) => {
                log::warn!("Plain text extraction failed for {}: {}", self.name(), e);
                ExtractionOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn doc_with_text(name: &str, text: &str) -> Document {
        let mut doc = Document::new(name);
        doc.add_page(Page::from_plain_text(0, text));
        doc
    }

    #[test]
    fn test_rich_path_preferred() {
        let source = MemorySource::new("a.pdf")
            .with_rich(doc_with_text("a.pdf", "Rich"))
            .with_plain(doc_with_text("a.pdf", "Plain"));
        let outcome = source.extract(&ExtractOptions::default());
        assert_eq!(outcome.quality(), ExtractionQuality::Rich);
    }

    #[test]
    fn test_falls_back_to_plain() {
        let source = MemorySource::new("a.pdf").with_plain(doc_with_text("a.pdf", "Plain"));
        match source.extract(&ExtractOptions::default()) {
            ExtractionOutcome::Degraded { document, reason } => {
                assert_eq!(document.span_count(), 1);
                assert!(!reason.is_empty());
            }
            other => panic!("expected degraded outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_rich_result_falls_back() {
        let mut empty = Document::new("a.pdf");
        empty.add_page(Page::new(0));
        let source = MemorySource::new("a.pdf")
            .with_rich(empty)
            .with_plain(doc_with_text("a.pdf", "Plain"));
        let outcome = source.extract(&ExtractOptions::default());
        assert_eq!(outcome.quality(), ExtractionQuality::Plain);
    }

    #[test]
    fn test_both_paths_fail() {
        let source = MemorySource::new("broken.pdf");
        let outcome = source.extract(&ExtractOptions::default());
        assert!(outcome.is_failed());

        let doc = outcome.into_document("broken.pdf");
        assert!(doc.is_empty());
        assert_eq!(doc.quality, ExtractionQuality::Empty);
    }

    #[test]
    fn test_rich_only_does_not_fall_back() {
        let source = MemorySource::new("a.pdf").with_plain(doc_with_text("a.pdf", "Plain"));
        let options = ExtractOptions::new().with_mode(ExtractMode::RichOnly);
        assert!(source.extract(&options).is_failed());
    }

    #[test]
    fn test_plain_only_skips_rich() {
        let source = MemorySource::new("a.pdf")
            .with_rich(doc_with_text("a.pdf", "Rich"))
            .with_plain(doc_with_text("a.pdf", "Plain"));
        let outcome = source.extract(&ExtractOptions::new().plain_only());
        let doc = outcome.into_document("a.pdf");
        assert_eq!(doc.quality, ExtractionQuality::Plain);
        assert_eq!(doc.pages[0].text(), "Plain");
    }
}
