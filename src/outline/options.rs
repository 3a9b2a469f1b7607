//! Outline extraction options.

/// Thresholds used by the title and heading heuristics.
///
/// Character counts are measured on trimmed text, in Unicode scalar values.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Shortest heading text considered
    pub min_heading_chars: usize,

    /// Longest heading text considered
    pub max_heading_chars: usize,

    /// Spans must be longer than this to feed the font statistics
    pub stats_min_chars: usize,

    /// A size is a heading size only if it occurs on fewer than this share of spans
    pub candidate_frequency_ratio: f64,

    /// Spans larger than `mean * gate_size_ratio` pass the candidacy gate
    pub gate_size_ratio: f64,

    /// Fallback ratio to the mean size for H1
    pub h1_ratio: f64,

    /// Fallback ratio to the mean size for H2
    pub h2_ratio: f64,

    /// Fallback ratio to the mean size for H3
    pub h3_ratio: f64,

    /// Bold spans pass the gate only when shorter than this
    pub bold_max_chars: usize,

    /// All-caps spans pass the gate when their length is within this range
    pub caps_min_chars: usize,
    pub caps_max_chars: usize,

    /// Title candidates at the maximum size must be longer than this
    pub title_min_chars: usize,

    /// Fallback title candidates must be longer than this
    pub title_fallback_min_chars: usize,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading length bounds.
    pub fn with_heading_chars(mut self, min: usize, max: usize) -> Self {
        self.min_heading_chars = min;
        self.max_heading_chars = max.max(min);
        self
    }

    /// Set the fallback size ratios for H1, H2 and H3.
    pub fn with_ratios(mut self, h1: f64, h2: f64, h3: f64) -> Self {
        self.h1_ratio = h1;
        self.h2_ratio = h2;
        self.h3_ratio = h3;
        self
    }

    /// Set the maximum share of spans a heading font size may cover.
    pub fn with_candidate_frequency(mut self, ratio: f64) -> Self {
        self.candidate_frequency_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the size ratio that lets a span through the candidacy gate.
    pub fn with_gate_ratio(mut self, ratio: f64) -> Self {
        self.gate_size_ratio = ratio;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_heading_chars: 3,
            max_heading_chars: 200,
            stats_min_chars: 3,
            candidate_frequency_ratio: 0.1,
            gate_size_ratio: 1.1,
            h1_ratio: 1.5,
            h2_ratio: 1.2,
            h3_ratio: 1.1,
            bold_max_chars: 100,
            caps_min_chars: 6,
            caps_max_chars: 99,
            title_min_chars: 3,
            title_fallback_min_chars: 5,
        }
    }
}
