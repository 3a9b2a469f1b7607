//! Outline extraction engine.
//!
//! Produces a title and a flat list of H1/H2/H3 headings from a document's
//! spans. Candidacy is decided by a gate over text length, pattern rules,
//! size, weight and case. The level comes from the first leveled pattern
//! rule that matches, otherwise from the document's font statistics.

mod options;
mod rules;
mod stats;
mod title;

pub use options::OutlineOptions;
pub use rules::{is_all_caps, HeadingRules, PatternRule};
pub use stats::FontStatistics;
pub use title::TitleExtractor;

use std::collections::HashSet;

use crate::model::{Document, Heading, OutlineResult, TextSpan};

/// Title and heading extractor.
///
/// Holds compiled rules only, so one engine can serve many documents
/// concurrently.
#[derive(Debug, Clone)]
pub struct OutlineEngine {
    options: OutlineOptions,
    rules: HeadingRules,
    title: TitleExtractor,
}

impl OutlineEngine {
    /// Create an engine with default options and rules.
    pub fn new() -> Self {
        Self::with_options(OutlineOptions::default())
    }

    pub fn with_options(options: OutlineOptions) -> Self {
        let title = TitleExtractor::new(&options);
        Self {
            options,
            rules: HeadingRules::new(),
            title,
        }
    }

    /// Replace the heading rules.
    pub fn with_rules(mut self, rules: HeadingRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Extract the title and outline of a document.
    pub fn extract(&self, doc: &Document) -> OutlineResult {
        if doc.is_empty() {
            return OutlineResult::empty();
        }

        let result = OutlineResult {
            title: self.extract_title(doc),
            outline: self.extract_headings(doc),
        };
        log::debug!(
            "{}: title {:?}, {} headings",
            doc.name,
            result.title,
            result.outline.len()
        );
        result
    }

    /// Title from the largest text on the first page.
    pub fn extract_title(&self, doc: &Document) -> String {
        self.title.extract(doc)
    }

    /// Headings in page order, deduplicated by (level, text, page).
    pub fn extract_headings(&self, doc: &Document) -> Vec<Heading> {
        let stats = FontStatistics::collect(doc.spans(), &self.options);
        if stats.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut headings = Vec::new();
        for page in &doc.pages {
            for span in &page.spans {
                if let Some(heading) = self.classify(span, page.index, &stats) {
                    if seen.insert(heading.clone()) {
                        headings.push(heading);
                    }
                }
            }
        }

        headings.sort_by_key(|h| h.page);
        headings
    }

    /// Heading for a span, if it passes the gate and earns a level.
    pub fn classify(&self, span: &TextSpan, page: u32, stats: &FontStatistics) -> Option<Heading> {
        let text = span.trimmed();
        let len = text.chars().count();
        if len < self.options.min_heading_chars || len > self.options.max_heading_chars {
            return None;
        }
        if !self.is_candidate(span, text, len, stats) {
            return None;
        }

        let level = self
            .rules
            .level_for(text)
            .or_else(|| stats.level_for_size(span.font_size))?;

        let text = self.rules.strip_numbering(text);
        if text.is_empty() {
            return None;
        }
        Some(Heading::new(level, text, page))
    }

    fn is_candidate(&self, span: &TextSpan, text: &str, len: usize, stats: &FontStatistics) -> bool {
        let opts = &self.options;
        self.rules.matches_any(text)
            || stats.exceeds_mean(span.font_size, opts.gate_size_ratio)
            || (span.is_bold() && len < opts.bold_max_chars)
            || (is_all_caps(text) && (opts.caps_min_chars..=opts.caps_max_chars).contains(&len))
    }
}

impl Default for OutlineEngine {
    fn default() -> Self {
        Self::new()
    }
}
