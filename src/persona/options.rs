//! Persona engine options.

/// Section scoring weights and output limits.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaOptions {
    /// Points per whole-word keyword occurrence
    pub keyword_weight: f64,

    /// Points per priority section found in the page
    pub priority_bonus: f64,

    /// Pages must score strictly above this to be kept
    pub min_relevance: f64,

    /// Pages with more words than this earn a length bonus
    pub length_bonus_min_words: usize,

    /// Length bonus is `words / length_bonus_divisor`...
    pub length_bonus_divisor: f64,

    /// ...capped at this value
    pub length_bonus_cap: f64,

    /// Refined text is cut to this many characters
    pub refined_text_chars: usize,

    /// Number of leading page lines searched for a section title
    pub title_scan_lines: usize,

    /// Score pages on the rayon pool
    pub parallel: bool,
}

impl PersonaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum relevance a page must exceed.
    pub fn with_min_relevance(mut self, score: f64) -> Self {
        self.min_relevance = score;
        self
    }

    /// Set the refined text length.
    pub fn with_refined_text_chars(mut self, chars: usize) -> Self {
        self.refined_text_chars = chars;
        self
    }

    /// Enable or disable parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score pages on the current thread.
    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }
}

impl Default for PersonaOptions {
    fn default() -> Self {
        Self {
            keyword_weight: 2.0,
            priority_bonus: 10.0,
            min_relevance: 5.0,
            length_bonus_min_words: 50,
            length_bonus_divisor: 10.0,
            length_bonus_cap: 20.0,
            refined_text_chars: 500,
            title_scan_lines: 5,
            parallel: true,
        }
    }
}
