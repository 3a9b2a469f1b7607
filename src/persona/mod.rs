//! Persona relevance engine.
//!
//! Detects which reader profile best fits a corpus of documents, then
//! scores and ranks every page against that profile's vocabulary.
//!
//! # Example
//!
//! ```no_run
//! use docsift::persona::{PersonaEngine, ProfileTable};
//! use docsift::model::{Document, Page};
//!
//! let mut doc = Document::new("menu.pdf");
//! doc.add_page(Page::from_plain_text(0, "Breakfast recipe ideas\nEggs and toast"));
//!
//! let engine = PersonaEngine::new(ProfileTable::builtin())?;
//! let result = engine.analyze(&[doc])?;
//! println!("{}: {}", result.persona, result.job_to_be_done);
//! # Ok::<(), docsift::Error>(())
//! ```

mod detect;
mod options;
mod profiles;
mod scoring;

pub use detect::{corpus_text, detect_persona, score_profile, KeywordMatcher, PersonaDetection};
pub use options::PersonaOptions;
pub use profiles::{PersonaProfile, ProfileTable, GENERIC_JOB_TEMPLATE};
pub use scoring::{
    rank_sections, refine_text, section_title, PageScore, SectionScorer, DEFAULT_SECTION_TITLE,
};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, PersonaIntelligenceResult, SectionCandidate};

/// Persona detection and section ranking over a profile table.
///
/// Keyword patterns are compiled once when the engine is built.
#[derive(Debug, Clone)]
pub struct PersonaEngine {
    table: ProfileTable,
    matchers: Vec<KeywordMatcher>,
    options: PersonaOptions,
}

impl PersonaEngine {
    /// Create an engine with default options.
    pub fn new(table: ProfileTable) -> Result<Self> {
        Self::with_options(table, PersonaOptions::default())
    }

    pub fn with_options(table: ProfileTable, options: PersonaOptions) -> Result<Self> {
        let matchers = KeywordMatcher::compile_table(&table)?;
        Ok(Self {
            table,
            matchers,
            options,
        })
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }

    pub fn options(&self) -> &PersonaOptions {
        &self.options
    }

    /// Detect the persona of the whole corpus.
    pub fn detect(&self, documents: &[Document]) -> PersonaDetection {
        let corpus = corpus_text(documents);
        detect_persona(&corpus, &self.table, &self.matchers)
    }

    /// Section candidates of every page, in document then page order.
    pub fn score_sections(&self, documents: &[Document], persona: usize) -> Vec<SectionCandidate> {
        let Some(matcher) = self.matchers.get(persona) else {
            return Vec::new();
        };
        let scorer = SectionScorer::new(matcher, &self.options);

        let pages: Vec<_> = documents
            .iter()
            .flat_map(|d| d.pages.iter().map(move |p| (d.name.as_str(), p)))
            .collect();

        if self.options.parallel {
            pages
                .par_iter()
                .filter_map(|(doc, page)| scorer.candidate(doc, page.number(), &page.text()))
                .collect()
        } else {
            pages
                .iter()
                .filter_map(|(doc, page)| scorer.candidate(doc, page.number(), &page.text()))
                .collect()
        }
    }

    /// Run detection, scoring and ranking over a corpus.
    ///
    /// Documents without pages are listed but contribute nothing.
    pub fn analyze(&self, documents: &[Document]) -> Result<PersonaIntelligenceResult> {
        if documents.is_empty() {
            return Err(Error::EmptyInput);
        }

        let detection = self.detect(documents);
        let profile = self.table.profiles().get(detection.index);
        let persona = profile.map(PersonaProfile::display_name).unwrap_or_default();
        let job_to_be_done = self
            .table
            .job_to_be_done(&detection.persona_id, documents.len());

        log::info!(
            "Detected persona {} (confidence {:.1}) over {} documents",
            persona,
            detection.confidence,
            documents.len()
        );

        let candidates = self.score_sections(documents, detection.index);
        log::debug!("{} pages passed the relevance gate", candidates.len());
        let (extracted_sections, subsection_analysis) = rank_sections(candidates);

        Ok(PersonaIntelligenceResult {
            documents: documents.iter().map(|d| d.name.clone()).collect(),
            persona,
            persona_id: detection.persona_id,
            job_to_be_done,
            confidence: detection.confidence,
            extracted_sections,
            subsection_analysis,
            persona_scores: detection.scores,
        })
    }
}
