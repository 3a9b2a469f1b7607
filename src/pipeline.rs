//! Batch processing of PDF files.
//!
//! Each document is extracted independently; a document that cannot be read
//! is logged and replaced by an empty one so the rest of the batch goes on.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, ExtractionQuality, OutlineResult, PersonaIntelligenceResult};
use crate::outline::OutlineEngine;
use crate::persona::PersonaEngine;
use crate::source::{ExtractOptions, ExtractionOutcome, LopdfSource, SpanSource};

/// Outline of one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// Input path
    pub path: PathBuf,

    /// Extraction quality the outline was computed from
    pub quality: ExtractionQuality,

    /// Title and headings; empty when extraction failed
    pub result: OutlineResult,
}

impl OutlineEntry {
    /// File stem used to name the output record.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string())
    }

    pub fn is_failed(&self) -> bool {
        self.quality == ExtractionQuality::Empty
    }
}

/// PDF files of a directory, sorted by file name.
///
/// The extension match is case-insensitive. Subdirectories are not searched.
pub fn collect_pdfs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract a document from a span source. Failures yield an empty document.
pub fn extract_document<S: SpanSource + ?Sized>(source: &S, options: &ExtractOptions) -> Document {
    let outcome = source.extract(options);
    if let ExtractionOutcome::Failed(e) = &outcome {
        log::warn!("{}: extraction failed: {}", source.name(), e);
    }
    outcome.into_document(source.name())
}

/// Open and extract a PDF file. Failures yield an empty document.
pub fn load_document(path: &Path, options: &ExtractOptions) -> Document {
    match LopdfSource::open(path) {
        Ok(source) => extract_document(&source, options),
        Err(e) => {
            let name = file_name(path);
            log::warn!("{}: cannot open: {}", name, e);
            Document::empty(name)
        }
    }
}

/// Load many PDF files, in input order.
pub fn load_documents<P>(paths: &[P], options: &ExtractOptions) -> Vec<Document>
where
    P: AsRef<Path> + Sync,
{
    if options.parallel {
        paths
            .par_iter()
            .map(|p| load_document(p.as_ref(), options))
            .collect()
    } else {
        paths
            .iter()
            .map(|p| load_document(p.as_ref(), options))
            .collect()
    }
}

/// Outline of a span source. Never fails; extraction failures give the
/// empty outline.
pub fn outline_document<S: SpanSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
    engine: &OutlineEngine,
) -> OutlineResult {
    engine.extract(&extract_document(source, options))
}

/// Outline of one PDF file.
pub fn outline_file(path: &Path, options: &ExtractOptions, engine: &OutlineEngine) -> OutlineEntry {
    let document = load_document(path, options);
    OutlineEntry {
        path: path.to_path_buf(),
        quality: document.quality,
        result: engine.extract(&document),
    }
}

/// Outlines of many PDF files, one entry per path in input order.
pub fn outline_files<P>(
    paths: &[P],
    options: &ExtractOptions,
    engine: &OutlineEngine,
) -> Result<Vec<OutlineEntry>>
where
    P: AsRef<Path> + Sync,
{
    if paths.is_empty() {
        return Err(Error::EmptyInput);
    }

    let entries: Vec<OutlineEntry> = if options.parallel {
        paths
            .par_iter()
            .map(|p| outline_file(p.as_ref(), options, engine))
            .collect()
    } else {
        paths
            .iter()
            .map(|p| outline_file(p.as_ref(), options, engine))
            .collect()
    };

    let failed = entries.iter().filter(|e| e.is_failed()).count();
    log::info!(
        "Outlined {} documents ({} failed)",
        entries.len(),
        failed
    );
    Ok(entries)
}

/// Persona analysis of already extracted documents.
pub fn analyze_documents(
    documents: &[Document],
    engine: &PersonaEngine,
) -> Result<PersonaIntelligenceResult> {
    engine.analyze(documents)
}

/// Persona analysis of PDF files.
///
/// Documents are extracted first; persona detection then runs once over
/// the whole corpus before any page is scored.
pub fn analyze_files<P>(
    paths: &[P],
    options: &ExtractOptions,
    engine: &PersonaEngine,
) -> Result<PersonaIntelligenceResult>
where
    P: AsRef<Path> + Sync,
{
    if paths.is_empty() {
        return Err(Error::EmptyInput);
    }
    let documents = load_documents(paths, options);
    analyze_documents(&documents, engine)
}
