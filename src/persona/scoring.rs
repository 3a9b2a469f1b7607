//! Per-page relevance scoring and ranking.

use super::detect::KeywordMatcher;
use super::PersonaOptions;
use crate::model::{RankedSection, SectionCandidate, SubsectionAnalysis};

/// Title used when none of a page's leading lines looks like one.
pub const DEFAULT_SECTION_TITLE: &str = "Content Section";

/// Relevance score of a page and the terms that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageScore {
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

/// Scores pages against one profile.
pub struct SectionScorer<'a> {
    matcher: &'a KeywordMatcher,
    options: &'a PersonaOptions,
}

impl<'a> SectionScorer<'a> {
    pub fn new(matcher: &'a KeywordMatcher, options: &'a PersonaOptions) -> Self {
        Self { matcher, options }
    }

    /// Score page text.
    ///
    /// Keyword occurrences, priority-section substrings and a capped length
    /// bonus are summed. Matched terms are listed keywords first, in
    /// profile order.
    pub fn score(&self, text: &str) -> PageScore {
        let opts = self.options;
        let lower = text.to_lowercase();
        let mut score = 0.0;
        let mut matched_keywords: Vec<String> = Vec::new();

        for (keyword, count) in self.matcher.occurrences(&lower) {
            if count > 0 {
                score += count as f64 * opts.keyword_weight;
                matched_keywords.push(keyword.to_string());
            }
        }

        for priority in self.matcher.priority_hits(&lower) {
            score += opts.priority_bonus;
            if !matched_keywords.iter().any(|k| k == priority) {
                matched_keywords.push(priority.to_string());
            }
        }

        let words = lower.split_whitespace().count();
        if words > opts.length_bonus_min_words {
            score += (words as f64 / opts.length_bonus_divisor).min(opts.length_bonus_cap);
        }

        PageScore {
            score,
            matched_keywords,
        }
    }

    /// Candidate for a page, if its text is non-empty and scores above the
    /// minimum relevance.
    pub fn candidate(&self, document: &str, page_number: u32, text: &str) -> Option<SectionCandidate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let PageScore {
            score,
            matched_keywords,
        } = self.score(text);
        if score <= self.options.min_relevance {
            return None;
        }

        Some(SectionCandidate {
            document: document.to_string(),
            page_number,
            section_title: section_title(text, self.options.title_scan_lines),
            relevance_score: score,
            matched_keywords,
            refined_text: refine_text(text, self.options.refined_text_chars),
        })
    }
}

/// First of the leading lines with a title-like length (11 to 99 characters).
pub fn section_title(text: &str, scan_lines: usize) -> String {
    text.split('\n')
        .take(scan_lines)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 10 && len < 100
        })
        .unwrap_or(DEFAULT_SECTION_TITLE)
        .to_string()
}

/// Trimmed text, cut to `max_chars` characters with a trailing "..." when longer.
pub fn refine_text(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Sort candidates by descending score, keeping discovery order for ties,
/// and split them into ranked sections and their analyses.
pub fn rank_sections(
    mut candidates: Vec<SectionCandidate>,
) -> (Vec<RankedSection>, Vec<SubsectionAnalysis>) {
    candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

    let mut sections = Vec::with_capacity(candidates.len());
    let mut analyses = Vec::with_capacity(candidates.len());
    for (i, c) in candidates.into_iter().enumerate() {
        sections.push(RankedSection {
            document: c.document.clone(),
            page_number: c.page_number,
            section_title: c.section_title,
            importance_rank: i as u32 + 1,
        });
        analyses.push(SubsectionAnalysis {
            document: c.document,
            page_number: c.page_number,
            refined_text: c.refined_text,
            relevance_score: c.relevance_score,
            matched_keywords: c.matched_keywords,
        });
    }
    (sections, analyses)
}
