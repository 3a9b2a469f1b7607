//! Input-directory heuristics that choose between the two engines.

use std::fs;
use std::io;
use std::path::Path;

/// File names that mark an input as a persona task.
const PERSONA_INDICATORS: &[&str] = &[
    "persona.json",
    "persona.txt",
    "job_description.json",
    "job_description.txt",
    "requirements.json",
    "requirements.txt",
];

/// Known persona collection names.
const COLLECTION_PATTERNS: &[&str] = &[
    "Collection 1",
    "Collection 2",
    "Collection 3",
    "South of France",
    "Learn Acrobat",
    "Dinner Ideas",
    "Breakfast Ideas",
    "Lunch Ideas",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Outline,
    Persona,
}

/// What the heuristics saw in an input directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub pdf_count: usize,
    pub has_persona_dir: bool,
    pub has_persona_file: bool,
    pub known_collection: bool,
    pub file_collection_match: bool,
}

impl Detection {
    pub fn engine(&self) -> Engine {
        if self.has_persona_dir
            || self.has_persona_file
            || self.known_collection
            || self.file_collection_match
        {
            Engine::Persona
        } else {
            Engine::Outline
        }
    }
}

/// Inspect an input directory and an optional persona directory.
pub fn detect(input: &Path, persona_dir: Option<&Path>) -> io::Result<Detection> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }

    let dir_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Detection {
        pdf_count: names
            .iter()
            .filter(|n| n.to_ascii_lowercase().ends_with(".pdf"))
            .count(),
        has_persona_dir: persona_dir.map(has_json_files).unwrap_or(false),
        has_persona_file: names
            .iter()
            .any(|n| PERSONA_INDICATORS.iter().any(|ind| n.contains(ind))),
        known_collection: matches_collection(&dir_name),
        file_collection_match: names.iter().any(|n| matches_collection(n)),
    })
}

fn matches_collection(name: &str) -> bool {
    COLLECTION_PATTERNS.iter().any(|p| name.contains(p))
}

fn has_json_files(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|e| {
        e.path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    })
}
