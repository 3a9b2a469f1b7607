//! Integration tests for outline extraction from PDF files.

mod common;

use docsift::model::ExtractionQuality;
use docsift::source::{ExtractMode, SpanSource};
use docsift::{
    extract_outline, ExtractOptions, Heading, HeadingLevel, LopdfSource, OutlineEngine,
};

#[test]
fn test_outline_from_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    common::write_pdf(&path, &common::report_pages());

    let result = extract_outline(&path).unwrap();
    assert_eq!(result.title, "Annual Research Report");
    assert_eq!(
        result.outline,
        vec![
            Heading::new(HeadingLevel::H1, "Annual Research Report", 0),
            Heading::new(HeadingLevel::H1, "Introduction", 1),
            Heading::new(HeadingLevel::H2, "Background", 1),
        ]
    );
}

#[test]
fn test_rich_spans_carry_font_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    common::write_pdf(&path, &common::report_pages());

    let source = LopdfSource::open(&path).unwrap();
    assert_eq!(source.page_count(), 2);

    let doc = source.extract_rich(&ExtractOptions::default()).unwrap();
    let first = &doc.pages[0].spans[0];
    assert_eq!(first.text, "Annual Research Report");
    assert_eq!(first.font_size, 24.0);
    assert_eq!(first.font_name, "Helvetica");

    let heading = &doc.pages[1].spans[0];
    assert_eq!(heading.text, "1. Introduction");
    assert!(heading.is_bold());
    assert_eq!(heading.page_index, 1);
}

#[test]
fn test_plain_extraction_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    common::write_pdf(&path, &common::report_pages());

    let source = LopdfSource::open(&path).unwrap();
    let options = ExtractOptions::new().with_mode(ExtractMode::PlainOnly);
    let doc = source.extract(&options).into_document(source.name());

    assert_eq!(doc.quality, ExtractionQuality::Plain);
    assert_eq!(doc.page_count(), 2);
    assert!(doc.pages[1].text().contains("Introduction"));
    assert!(doc.spans().all(|s| s.font_size == 12.0));
}

#[test]
fn test_outline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    common::write_pdf(&path, &common::report_pages());

    let source = LopdfSource::open(&path).unwrap();
    let doc = source
        .extract(&ExtractOptions::default())
        .into_document(source.name());
    let engine = OutlineEngine::new();
    assert_eq!(engine.extract(&doc), engine.extract(&doc));
}

#[test]
fn test_outline_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.pdf");
    std::fs::write(&path, b"plain text, not a PDF").unwrap();
    assert!(extract_outline(&path).is_err());
}

#[test]
fn test_split_line_is_one_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nice.pdf");
    common::write_pages(&path, &[common::split_line_page()]);

    let source = LopdfSource::open(&path).unwrap();
    let doc = source.extract_rich(&ExtractOptions::default()).unwrap();
    let texts: Vec<_> = doc.pages[0].spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts.len(), 5);
    assert_eq!(texts[0], "1. Introduction");
    assert_eq!(texts[4], "Things to do near the old port of Nice");

    let result = extract_outline(&path).unwrap();
    assert_eq!(
        result.outline,
        vec![Heading::new(HeadingLevel::H1, "Introduction", 0)]
    );
}

#[test]
fn test_unreadable_page_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gap.pdf");
    common::write_pages(
        &path,
        &[
            common::section_page("1. Overview"),
            common::PageContent::Invalid,
            common::section_page("2. Results"),
        ],
    );

    let source = LopdfSource::open(&path).unwrap();
    let doc = source.extract_rich(&ExtractOptions::default()).unwrap();
    assert_eq!(doc.page_count(), 3);
    assert!(doc.pages[1].is_empty());

    let result = extract_outline(&path).unwrap();
    assert_eq!(
        result.outline,
        vec![
            Heading::new(HeadingLevel::H1, "Overview", 0),
            Heading::new(HeadingLevel::H1, "Results", 2),
        ]
    );

    assert!(source
        .extract_rich(&ExtractOptions::new().strict())
        .is_err());
}

#[test]
fn test_page_without_contents_is_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.pdf");
    common::write_pages(
        &path,
        &[common::section_page("1. Overview"), common::PageContent::Blank],
    );

    let source = LopdfSource::open(&path).unwrap();
    let doc = source.extract_rich(&ExtractOptions::new().strict()).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert!(doc.pages[1].is_empty());
    assert_eq!(doc.pages[0].spans[0].text, "1. Overview");
}
