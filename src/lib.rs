//! # docsift
//!
//! Heuristic PDF outline extraction and persona-driven section ranking.
//!
//! Two engines work on text spans pulled out of PDF files:
//!
//! - the **outline engine** finds a document title and H1/H2/H3 headings
//!   from font statistics and numbering patterns;
//! - the **persona engine** decides which reader profile a set of documents
//!   serves and ranks their pages by relevance to it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline, render};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Rich and plain extraction**: font metadata from content streams, with
//!   a plain-text fallback when a document's fonts cannot be read
//! - **Deterministic**: same input, same output
//! - **Failure isolation**: an unreadable PDF never aborts a batch
//! - **Injectable profiles**: persona tables load from JSON
//! - **Parallel processing**: Uses Rayon across documents and pages

pub mod error;
pub mod model;
pub mod outline;
pub mod persona;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Document, Heading, HeadingLevel, OutlineResult, Page, PersonaIntelligenceResult,
    RankedSection, SectionCandidate, SubsectionAnalysis, TextSpan,
};
pub use outline::{OutlineEngine, OutlineOptions};
pub use persona::{PersonaEngine, PersonaOptions, PersonaProfile, ProfileTable};
pub use pipeline::{collect_pdfs, OutlineEntry};
pub use render::{JsonFormat, PersonaReport};
pub use source::{ExtractOptions, ExtractionOutcome, LopdfSource, SpanSource};

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// Unlike the batch functions in [`pipeline`], opening or parsing errors
/// are returned to the caller.
///
/// # Example
///
/// ```no_run
/// use docsift::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_outline_with_options(path, &ExtractOptions::default(), &OutlineOptions::default())
}

/// Extract the title and outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use docsift::{extract_outline_with_options, ExtractOptions, OutlineOptions};
///
/// let extract = ExtractOptions::new().plain_only();
/// let outline = OutlineOptions::new().with_heading_chars(4, 120);
/// let result = extract_outline_with_options("document.pdf", &extract, &outline).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    extract: &ExtractOptions,
    options: &OutlineOptions,
) -> Result<OutlineResult> {
    let source = LopdfSource::open(path)?;
    let document = match source.extract(extract) {
        ExtractionOutcome::Failed(e) => return Err(e),
        outcome => outcome.into_document(source.name()),
    };
    Ok(OutlineEngine::with_options(options.clone()).extract(&document))
}

/// Run persona analysis over every PDF in a directory with the built-in
/// profiles.
///
/// # Example
///
/// ```no_run
/// use docsift::analyze_directory;
///
/// let result = analyze_directory("input/").unwrap();
/// for section in &result.extracted_sections {
///     println!("{} {} p{}", section.importance_rank, section.document, section.page_number);
/// }
/// ```
pub fn analyze_directory<P: AsRef<Path>>(dir: P) -> Result<PersonaIntelligenceResult> {
    analyze_directory_with_profiles(dir, ProfileTable::builtin())
}

/// Run persona analysis over every PDF in a directory with a custom
/// profile table.
pub fn analyze_directory_with_profiles<P: AsRef<Path>>(
    dir: P,
    profiles: ProfileTable,
) -> Result<PersonaIntelligenceResult> {
    let paths = collect_pdfs(dir)?;
    let engine = PersonaEngine::new(profiles)?;
    pipeline::analyze_files(&paths, &ExtractOptions::default(), &engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_outline_missing_file() {
        assert!(matches!(
            extract_outline("/nonexistent/docsift.pdf"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_analyze_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            analyze_directory(dir.path()),
            Err(Error::EmptyInput)
        ));
    }
}
