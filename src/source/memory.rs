//! In-memory span source.

use super::{ExtractOptions, SpanSource};
use crate::error::{Error, Result};
use crate::model::Document;

/// A span source over documents that were already extracted elsewhere.
///
/// A missing rich or plain document makes that path fail, which lets callers
/// feed pre-built spans (or simulate extraction failures) through the same
/// pipeline as real PDFs.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    rich: Option<Document>,
    plain: Option<Document>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rich: None,
            plain: None,
        }
    }

    /// Set the document returned by the rich path.
    pub fn with_rich(mut self, document: Document) -> Self {
        self.rich = Some(document);
        self
    }

    /// Set the document returned by the plain path.
    pub fn with_plain(mut self, document: Document) -> Self {
        self.plain = Some(document);
        self
    }
}

impl SpanSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_rich(&self, _options: &ExtractOptions) -> Result<Document> {
        self.rich
            .clone()
            .ok_or_else(|| Error::TextExtract(format!("{}: no font data", self.name)))
    }

    fn extract_plain(&self, _options: &ExtractOptions) -> Result<Document> {
        self.plain
            .clone()
            .ok_or_else(|| Error::TextExtract(format!("{}: no text layer", self.name)))
    }
}
