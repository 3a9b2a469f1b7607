//! Persona analysis result types.

use serde::{Deserialize, Serialize};

/// A page that passed the minimum-relevance gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCandidate {
    /// Source document file name
    pub document: String,

    /// 1-based page number
    pub page_number: u32,

    /// Section title guessed from the page's first lines
    pub section_title: String,

    /// Relevance score (always above the minimum-relevance gate)
    pub relevance_score: f64,

    /// Keywords and priority sections that contributed to the score
    pub matched_keywords: Vec<String>,

    /// Length-capped digest of the page text
    pub refined_text: String,
}

/// A ranked section in the persona output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    /// 1-based position after sorting by descending relevance
    pub importance_rank: u32,
}

/// Refined text and scoring details for a ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page_number: u32,
    pub refined_text: String,
    pub relevance_score: f64,
    pub matched_keywords: Vec<String>,
}

/// Score of one persona profile against the whole corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaScore {
    /// Profile name
    pub name: String,

    /// Occurrence total plus diversity bonus
    pub score: f64,

    /// Number of distinct keywords with at least one occurrence
    pub keyword_matches: usize,

    /// `keyword_matches` over the profile's keyword count
    pub coverage: f64,
}

/// Output of the persona relevance engine for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaIntelligenceResult {
    /// Input document names, in input order
    pub documents: Vec<String>,

    /// Display name of the detected persona
    pub persona: String,

    /// Profile name of the detected persona
    pub persona_id: String,

    /// Job-to-be-done summary
    pub job_to_be_done: String,

    /// Score of the detected persona
    pub confidence: f64,

    /// Sections sorted by descending relevance
    pub extracted_sections: Vec<RankedSection>,

    /// Refined text per section, in the same order as `extracted_sections`
    pub subsection_analysis: Vec<SubsectionAnalysis>,

    /// Scores of every profile, in table order
    pub persona_scores: Vec<PersonaScore>,
}

impl PersonaIntelligenceResult {
    /// Number of ranked sections.
    pub fn section_count(&self) -> usize {
        self.extracted_sections.len()
    }
}
