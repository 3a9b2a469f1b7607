//! Integration tests for batch processing.

mod common;

use std::fs;

use docsift::model::ExtractionQuality;
use docsift::pipeline::{collect_pdfs, load_documents, outline_files};
use docsift::render::{write_json, JsonFormat, OutlineRecord};
use docsift::{ExtractOptions, HeadingLevel, OutlineEngine};

#[test]
fn test_outline_batch_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    common::write_pdf(&dir.path().join("a_report.pdf"), &common::report_pages());
    fs::write(dir.path().join("b_broken.pdf"), b"not a pdf").unwrap();
    common::write_pdf(&dir.path().join("c_recipes.PDF"), &common::recipe_pages());

    let paths = collect_pdfs(dir.path()).unwrap();
    let entries = outline_files(&paths, &ExtractOptions::default(), &OutlineEngine::new()).unwrap();

    let stems: Vec<_> = entries.iter().map(|e| e.stem()).collect();
    assert_eq!(stems, ["a_report", "b_broken", "c_recipes"]);

    assert_eq!(entries[0].quality, ExtractionQuality::Rich);
    assert_eq!(entries[0].result.count_level(HeadingLevel::H2), 1);

    assert!(entries[1].is_failed());
    assert!(entries[1].result.is_empty());

    assert_eq!(entries[2].result.title, "Breakfast Recipes for Busy Mornings");
}

#[test]
fn test_sequential_matches_parallel() {
    let dir = tempfile::tempdir().unwrap();
    common::write_pdf(&dir.path().join("one.pdf"), &common::report_pages());
    common::write_pdf(&dir.path().join("two.pdf"), &common::travel_pages());
    let paths = collect_pdfs(dir.path()).unwrap();

    let engine = OutlineEngine::new();
    let parallel = outline_files(&paths, &ExtractOptions::default(), &engine).unwrap();
    let sequential = outline_files(&paths, &ExtractOptions::new().sequential(), &engine).unwrap();
    assert_eq!(parallel, sequential);

    let docs = load_documents(&paths, &ExtractOptions::new().sequential());
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name, "one.pdf");
}

#[test]
fn test_outline_records_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_pdf(&dir.path().join("report.pdf"), &common::report_pages());

    let paths = collect_pdfs(dir.path()).unwrap();
    let entries = outline_files(&paths, &ExtractOptions::default(), &OutlineEngine::new()).unwrap();
    for entry in &entries {
        let file = out.path().join(format!("{}.json", entry.stem()));
        write_json(&file, &entry.result, JsonFormat::Pretty).unwrap();
    }

    let json = fs::read_to_string(out.path().join("report.json")).unwrap();
    let record: OutlineRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record.title, "Annual Research Report");
    assert_eq!(record.outline[1].text, "Introduction");
    assert_eq!(record.outline[1].page, 1);
}
