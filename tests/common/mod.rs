//! Synthetic PDF fixtures.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: font resource key, size, text.
pub type Line<'a> = (&'a str, f32, &'a str);

pub const REGULAR: &str = "F1";
pub const BOLD: &str = "F2";

/// Content of one fixture page.
pub enum PageContent<'a> {
    /// One text-showing operator per line
    Lines(Vec<Line<'a>>),
    /// Each line drawn as several fragments moved right with `Td`
    Runs(Vec<Vec<Line<'a>>>),
    /// A page without `/Contents`
    Blank,
    /// A `/Contents` entry that is not a stream
    Invalid,
}

/// Write a PDF with one page per entry of `pages`, lines laid out top-down.
pub fn write_pdf(path: &Path, pages: &[Vec<Line<'_>>]) {
    let pages: Vec<_> = pages
        .iter()
        .map(|lines| PageContent::Lines(lines.clone()))
        .collect();
    write_pages(path, &pages);
}

/// Write a PDF with one page per entry of `pages`.
pub fn write_pages(path: &Path, pages: &[PageContent<'_>]) {
    let mut doc = build_document(pages);
    doc.save(path).unwrap();
}

/// Build an in-memory PDF with one page per entry of `pages`.
pub fn build_document(pages: &[PageContent<'_>]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular,
            BOLD => bold,
        },
    });

    let mut kids = Vec::new();
    for page in pages {
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        let runs: Vec<Vec<Line<'_>>> = match page {
            PageContent::Lines(lines) => lines.iter().map(|&line| vec![line]).collect(),
            PageContent::Runs(runs) => runs.clone(),
            PageContent::Blank => Vec::new(),
            PageContent::Invalid => {
                page_dict.set("Contents", Object::Integer(0));
                Vec::new()
            }
        };
        if matches!(page, PageContent::Lines(_) | PageContent::Runs(_)) {
            let content = Content {
                operations: run_operations(&runs),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page_dict.set("Contents", content_id);
        }
        let page_id = doc.add_object(page_dict);
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn run_operations(runs: &[Vec<Line<'_>>]) -> Vec<Operation> {
    let mut operations = Vec::new();
    let mut y = 760.0;
    for run in runs {
        operations.push(Operation::new("BT", vec![]));
        let mut advance = 0.0;
        let mut line_size: f32 = 0.0;
        for (i, &(font, size, text)) in run.iter().enumerate() {
            operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
            if i == 0 {
                operations.push(Operation::new("Td", vec![72.into(), Object::Real(y)]));
            } else {
                operations.push(Operation::new("Td", vec![Object::Real(advance), 0.into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            advance = text.chars().count() as f32 * size * 0.55;
            line_size = line_size.max(size);
        }
        operations.push(Operation::new("ET", vec![]));
        y -= line_size + 6.0;
    }
    operations
}

/// A report whose first page carries a large title and whose second page
/// has numbered H1 and H2 headings.
pub fn report_pages() -> Vec<Vec<Line<'static>>> {
    let body = (REGULAR, 11.0, "This paragraph describes the research program in detail.");

    let mut first = vec![(REGULAR, 24.0, "Annual Research Report")];
    first.extend(std::iter::repeat(body).take(12));

    let mut second = vec![(BOLD, 16.0, "1. Introduction")];
    second.extend(std::iter::repeat(body).take(6));
    second.push((BOLD, 13.0, "1.1 Background"));
    second.extend(std::iter::repeat(body).take(6));

    vec![first, second]
}

/// A page whose heading and last line are each drawn as two fragments.
pub fn split_line_page() -> PageContent<'static> {
    let body = vec![(REGULAR, 11.0, "The harbour walk passes the fishing boats.")];
    PageContent::Runs(vec![
        vec![(REGULAR, 11.0, "1."), (REGULAR, 11.0, "Introduction")],
        body.clone(),
        body.clone(),
        body,
        vec![(REGULAR, 11.0, "Things"), (REGULAR, 11.0, "to do near the old port of Nice")],
    ])
}

/// A numbered section page: bold heading and a few body lines.
pub fn section_page(heading: &'static str) -> PageContent<'static> {
    let body = (REGULAR, 11.0, "This paragraph describes the research program in detail.");
    let mut lines = vec![(BOLD, 16.0, heading)];
    lines.extend(std::iter::repeat(body).take(4));
    PageContent::Lines(lines)
}

/// Pages of recipe text.
pub fn recipe_pages() -> Vec<Vec<Line<'static>>> {
    vec![
        vec![
            (BOLD, 18.0, "Breakfast Recipes for Busy Mornings"),
            (REGULAR, 11.0, "Each recipe lists every ingredient and the cooking time."),
            (REGULAR, 11.0, "A healthy breakfast with fresh vegetables and protein."),
        ],
        vec![(REGULAR, 11.0, "Notes")],
    ]
}

/// Pages of travel guide text.
pub fn travel_pages() -> Vec<Vec<Line<'static>>> {
    vec![vec![
        (BOLD, 18.0, "Travel Tips for the South of France"),
        (REGULAR, 11.0, "Visit the old cities and enjoy the local cuisine."),
    ]]
}
