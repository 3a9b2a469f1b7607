//! Font statistics for heading-level assignment.

use std::collections::BTreeMap;

use super::OutlineOptions;
use crate::model::{HeadingLevel, TextSpan};

/// Sizes are compared at 0.01pt precision.
fn size_key(size: f32) -> i64 {
    (f64::from(size) * 100.0).round() as i64
}

fn key_size(key: i64) -> f64 {
    key as f64 / 100.0
}

/// Per-document font statistics and the level thresholds derived from them.
///
/// Built once per document from that document's spans only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStatistics {
    /// Mean size of the sampled spans
    pub mean_size: f64,

    /// Number of sampled spans
    pub sample_count: usize,

    /// Observed sizes (in 0.01pt keys) with frequency
    pub size_histogram: BTreeMap<i64, usize>,

    /// Heading sizes, largest first
    pub heading_sizes: Vec<f64>,

    ratios: [f64; 3],
}

impl FontStatistics {
    /// Compute statistics over the spans whose trimmed text is longer than
    /// `stats_min_chars`.
    pub fn collect<'a, I>(spans: I, options: &OutlineOptions) -> Self
    where
        I: IntoIterator<Item = &'a TextSpan>,
    {
        let mut stats = FontStatistics {
            ratios: [options.h1_ratio, options.h2_ratio, options.h3_ratio],
            ..Default::default()
        };

        let mut total = 0.0;
        for span in spans {
            if span.trimmed_len() > options.stats_min_chars {
                *stats.size_histogram.entry(size_key(span.font_size)).or_insert(0) += 1;
                total += f64::from(span.font_size);
                stats.sample_count += 1;
            }
        }

        if stats.sample_count == 0 {
            return stats;
        }
        stats.mean_size = total / stats.sample_count as f64;

        let max_count = stats.sample_count as f64 * options.candidate_frequency_ratio;
        stats.heading_sizes = stats
            .size_histogram
            .iter()
            .rev()
            .filter(|(&key, &count)| key_size(key) > stats.mean_size && (count as f64) < max_count)
            .map(|(&key, _)| key_size(key))
            .collect();

        log::debug!(
            "Font statistics: mean={:.2}, samples={}, heading sizes={:?}",
            stats.mean_size,
            stats.sample_count,
            stats.heading_sizes
        );

        stats
    }

    /// No span was long enough to sample.
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Whether a size exceeds `ratio` times the mean.
    pub fn exceeds_mean(&self, size: f32, ratio: f64) -> bool {
        f64::from(size) > self.mean_size * ratio
    }

    /// Level for a font size.
    ///
    /// The three largest heading sizes map to H1, H2 and H3 (a size at or
    /// above a rank's size takes that rank). Heading sizes past the third
    /// clamp to H3. Anything else falls back to ratios against the mean.
    pub fn level_for_size(&self, size: f32) -> Option<HeadingLevel> {
        let size = key_size(size_key(size));

        for (rank, &heading_size) in self.heading_sizes.iter().take(3).enumerate() {
            if size >= heading_size {
                return Some(HeadingLevel::from_rank(rank));
            }
        }
        if self.heading_sizes.iter().skip(3).any(|&s| s == size) {
            return Some(HeadingLevel::H3);
        }

        let [h1, h2, h3] = self.ratios;
        if size > self.mean_size * h1 {
            Some(HeadingLevel::H1)
        } else if size > self.mean_size * h2 {
            Some(HeadingLevel::H2)
        } else if size > self.mean_size * h3 {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}
