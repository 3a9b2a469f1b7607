//! Document model types.
//!
//! Spans, pages and documents are what the span source hands to the
//! engines; headings and ranked sections are what the engines hand back.

mod document;
mod outline;
mod persona;
mod span;

pub use document::{Document, ExtractionQuality, Page};
pub use outline::{Heading, HeadingLevel, OutlineResult};
pub use persona::{
    PersonaIntelligenceResult, PersonaScore, RankedSection, SectionCandidate, SubsectionAnalysis,
};
pub use span::{BoundingBox, StyleFlags, TextSpan, DEFAULT_FONT_SIZE};
