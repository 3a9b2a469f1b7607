//! Corpus-level persona detection.

use regex::Regex;

use super::profiles::{PersonaProfile, ProfileTable};
use crate::error::Result;
use crate::model::{Document, PersonaScore};

/// Compiled whole-word keyword patterns for one profile.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<(String, Regex)>,
    priority_sections: Vec<String>,
}

impl KeywordMatcher {
    pub fn new(profile: &PersonaProfile) -> Result<Self> {
        let mut keywords = Vec::with_capacity(profile.keywords.len());
        for kw in &profile.keywords {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(kw)))?;
            keywords.push((kw.clone(), pattern));
        }

        Ok(Self {
            keywords,
            priority_sections: profile.priority_sections.clone(),
        })
    }

    /// Compile every profile of a table, in table order.
    pub fn compile_table(table: &ProfileTable) -> Result<Vec<Self>> {
        table.iter().map(Self::new).collect()
    }

    /// Whole-word occurrence count of each keyword in lower-cased text, in
    /// keyword order.
    pub fn occurrences<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        self.keywords
            .iter()
            .map(move |(kw, re)| (kw.as_str(), re.find_iter(text).count()))
    }

    /// Priority sections present as substrings of lower-cased text.
    pub fn priority_hits<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.priority_sections
            .iter()
            .map(String::as_str)
            .filter(move |p| text.contains(p))
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

/// The winning profile and the score table it was picked from.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaDetection {
    /// Index of the winning profile in the table
    pub index: usize,

    /// Profile name of the winner
    pub persona_id: String,

    /// Winner's score
    pub confidence: f64,

    /// Every profile's score, in table order
    pub scores: Vec<PersonaScore>,
}

/// Lower-cased text of every page of every document, joined by spaces.
pub fn corpus_text(documents: &[Document]) -> String {
    documents
        .iter()
        .flat_map(|d| d.pages.iter())
        .map(|p| p.text().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score a profile against lower-cased corpus text.
///
/// The score is the total keyword occurrence count plus a diversity bonus
/// of 100 times the share of keywords that occurred at least once.
pub fn score_profile(name: &str, matcher: &KeywordMatcher, corpus: &str) -> PersonaScore {
    let mut occurrences = 0usize;
    let mut keyword_matches = 0usize;
    for (_, count) in matcher.occurrences(corpus) {
        if count > 0 {
            keyword_matches += 1;
            occurrences += count;
        }
    }

    let coverage = if matcher.keyword_count() == 0 {
        0.0
    } else {
        keyword_matches as f64 / matcher.keyword_count() as f64
    };

    PersonaScore {
        name: name.to_string(),
        score: occurrences as f64 + coverage * 100.0,
        keyword_matches,
        coverage,
    }
}

/// Pick the highest-scoring profile. Ties go to the earlier profile.
///
/// `matchers` must be compiled from `table`, in the same order.
pub fn detect_persona(
    corpus: &str,
    table: &ProfileTable,
    matchers: &[KeywordMatcher],
) -> PersonaDetection {
    let scores: Vec<PersonaScore> = table
        .iter()
        .zip(matchers)
        .map(|(profile, matcher)| score_profile(&profile.name, matcher, corpus))
        .collect();

    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if score.score > scores[best].score {
            best = i;
        }
    }

    log::debug!("Persona detection results:");
    for s in &scores {
        log::debug!(
            "  {}: score={:.1}, matches={}, coverage={:.2}%",
            s.name,
            s.score,
            s.keyword_matches,
            s.coverage * 100.0
        );
    }

    let (persona_id, confidence) = scores
        .get(best)
        .map(|s| (s.name.clone(), s.score))
        .unwrap_or_default();

    PersonaDetection {
        index: best,
        persona_id,
        confidence,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn table(profiles: Vec<PersonaProfile>) -> (ProfileTable, Vec<KeywordMatcher>) {
        let table = ProfileTable::new(profiles).unwrap();
        let matchers = KeywordMatcher::compile_table(&table).unwrap();
        (table, matchers)
    }

    #[test]
    fn test_whole_word_matching() {
        let profile = PersonaProfile::new("p", ["main", "things to do"], Vec::<String>::new());
        let matcher = KeywordMatcher::new(&profile).unwrap();
        let counts: Vec<_> = matcher
            .occurrences("the main course; maintain things to do, remains main")
            .collect();
        assert_eq!(counts, [("main", 2), ("things to do", 1)]);
    }

    #[test]
    fn test_score_includes_diversity_bonus() {
        let profile = PersonaProfile::new("p", ["recipe", "ingredient", "oven", "salt"], ["x"]);
        let matcher = KeywordMatcher::new(&profile).unwrap();
        let score = score_profile("p", &matcher, "recipe recipe ingredient");
        assert_eq!(score.keyword_matches, 2);
        assert_eq!(score.coverage, 0.5);
        assert_eq!(score.score, 3.0 + 50.0);
    }

    #[test]
    fn test_home_cook_detected() {
        let table = ProfileTable::builtin();
        let matchers = KeywordMatcher::compile_table(&table).unwrap();
        let corpus = "recipe recipe recipe recipe recipe ingredient ingredient ingredient";
        let detection = detect_persona(corpus, &table, &matchers);
        assert_eq!(detection.persona_id, "home_cook");
        assert_eq!(detection.index, 2);
        assert_eq!(detection.scores.len(), 3);
    }

    #[test]
    fn test_tie_goes_to_first_profile() {
        let (table, matchers) = table(vec![
            PersonaProfile::new("first", ["alpha"], Vec::<String>::new()),
            PersonaProfile::new("second", ["beta"], Vec::<String>::new()),
        ]);
        let detection = detect_persona("alpha beta", &table, &matchers);
        assert_eq!(detection.persona_id, "first");

        let detection = detect_persona("nothing relevant", &table, &matchers);
        assert_eq!(detection.persona_id, "first");
        assert_eq!(detection.confidence, 0.0);
    }

    #[test]
    fn test_corpus_text_lowercases_and_joins() {
        let mut a = Document::new("a.pdf");
        a.add_page(Page::from_plain_text(0, "Hello World"));
        let mut b = Document::new("b.pdf");
        b.add_page(Page::from_plain_text(0, "Second DOC"));
        assert_eq!(corpus_text(&[a, b]), "hello world second doc");
    }
}
