//! Span source backed by lopdf.
//!
//! The rich path walks each page's content stream. Text fragments drawn in
//! the same font and size on one baseline are merged into a single span,
//! with the effective font size taken from the text matrix. The plain path
//! uses lopdf's own page text extraction.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::{ErrorMode, ExtractOptions, SpanSource};
use crate::error::{Error, Result};
use crate::model::{BoundingBox, Document, ExtractionQuality, Page, StyleFlags, TextSpan};

/// Adjustment (in 1/1000 text space units) inside a `TJ` array that is
/// treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline tolerance for joining fragments into one span, as a fraction
/// of the font size.
const BASELINE_TOLERANCE: f32 = 0.3;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers accept junk before the header within the first kilobyte.
const HEADER_SEARCH_LEN: usize = 1024;

/// Whether the data carries a PDF header.
pub fn is_pdf(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_LEN)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// A PDF file loaded with lopdf.
pub struct LopdfSource {
    name: String,
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Load a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path)?;
        Self::from_bytes(name, &data)
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        if !is_pdf(data) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self {
            name: name.into(),
            doc,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract the spans of one page.
    fn page_spans(&self, index: u32, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut base_fonts = HashMap::new();
        for (key, font) in &fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            base_fonts.insert(key.clone(), base_font);
        }

        let content = self.page_content(page_id)?;
        self.parse_content_stream(index, &content, &base_fonts, &fonts)
    }

    /// Get the decompressed content stream of a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // A page without content is blank
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .or_else(|_| Ok(s.content.clone()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            let data = s
                                .decompressed_content()
                                .unwrap_or_else(|_| s.content.clone());
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn parse_content_stream(
        &self,
        page_index: u32,
        content: &[u8],
        base_fonts: &HashMap<Vec<u8>, String>,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = SpanMerger::new(page_index);
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::from("unknown");
        let mut font_size: f32 = 12.0;
        let mut leading: f32 = 0.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            let shown: Option<String> = match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                    None
                }
                "ET" => {
                    in_text = false;
                    None
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(key) = &op.operands[0] {
                            font_name = base_fonts
                                .get(key)
                                .cloned()
                                .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                            font_key = key.clone();
                        }
                        font_size = number(&op.operands[1]).unwrap_or(12.0);
                    }
                    None
                }
                "TL" => {
                    leading = op.operands.first().and_then(number).unwrap_or(0.0);
                    None
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = number(&op.operands[0]).unwrap_or(0.0);
                        let ty = number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                    None
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let v: Vec<f32> = op
                            .operands
                            .iter()
                            .map(|o| number(o).unwrap_or(0.0))
                            .collect();
                        matrix.set(v[0], v[1], v[2], v[3], v[4], v[5]);
                    }
                    None
                }
                "T*" => {
                    matrix.next_line(leading, font_size);
                    None
                }
                "Tj" | "TJ" | "'" | "\"" if in_text => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line(leading, font_size);
                    }
                    let encoding = fonts
                        .get(&font_key)
                        .and_then(|f| f.get_font_encoding(&self.doc).ok());
                    let decode = |bytes: &[u8]| match encoding.as_ref() {
                        Some(enc) => LopdfDocument::decode_text(enc, bytes)
                            .unwrap_or_else(|_| decode_text_simple(bytes)),
                        None => decode_text_simple(bytes),
                    };

                    match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => Some(tj_text(items, &decode)),
                            _ => None,
                        },
                        "\"" => match op.operands.get(2) {
                            Some(Object::String(bytes, _)) => Some(decode(bytes.as_slice())),
                            _ => None,
                        },
                        _ => match op.operands.first() {
                            Some(Object::String(bytes, _)) => Some(decode(bytes.as_slice())),
                            _ => None,
                        },
                    }
                }
                _ => None,
            };

            if let Some(text) = shown {
                let (x, y) = matrix.position();
                spans.push(&text, &font_name, font_size * matrix.scale(), x, y);
            }
        }

        Ok(spans.finish())
    }
}

/// Joins text fragments into spans.
///
/// A fragment continues the previous span when it uses the same font and
/// size, sits on the same baseline and does not start left of the previous
/// fragment. A fragment placed to the right of the previous one starts a new
/// word; fragments shown at the same point run on without a space.
struct SpanMerger {
    page_index: u32,
    spans: Vec<TextSpan>,
    baseline: f32,
    last_x: f32,
    pending_space: bool,
}

impl SpanMerger {
    fn new(page_index: u32) -> Self {
        Self {
            page_index,
            spans: Vec::new(),
            baseline: 0.0,
            last_x: 0.0,
            pending_space: false,
        }
    }

    fn push(&mut self, text: &str, font_name: &str, size: f32, x: f32, y: f32) {
        if text.trim().is_empty() {
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        let width = text.chars().count() as f32 * size * 0.5;
        let continues = self.spans.last().map_or(false, |last| {
            last.font_name == font_name
                && (last.font_size - size).abs() < 0.01
                && (y - self.baseline).abs() <= size * BASELINE_TOLERANCE
                && x >= self.last_x
        });

        if continues {
            let moved = x > self.last_x + 0.01;
            if let Some(last) = self.spans.last_mut() {
                if needs_space(&last.text, text, moved || self.pending_space) {
                    last.text.push(' ');
                }
                last.text.push_str(text);
                last.bbox.x1 = last.bbox.x1.max(x + width);
            }
        } else {
            let bbox = BoundingBox::new(x, y - size * 0.2, x + width, y + size * 0.8);
            self.spans.push(TextSpan::new(
                text,
                font_name,
                size,
                StyleFlags::from_font_name(font_name),
                bbox,
                self.page_index,
            ));
            self.baseline = y;
        }

        self.last_x = x;
        self.pending_space = false;
    }

    fn finish(self) -> Vec<TextSpan> {
        self.spans
    }
}

/// Whether a space goes between two joined fragments.
fn needs_space(prev: &str, next: &str, separated: bool) -> bool {
    if !separated || prev.ends_with(char::is_whitespace) || next.starts_with(char::is_whitespace) {
        return false;
    }
    let spaceless = |c: Option<char>| c.map(is_spaceless_script_char).unwrap_or(false);
    !(spaceless(prev.chars().last()) && spaceless(next.chars().next()))
}

impl SpanSource for LopdfSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract_rich(&self, options: &ExtractOptions) -> Result<Document> {
        let mut document = Document::new(self.name.clone()).with_quality(ExtractionQuality::Rich);

        for (page_num, page_id) in self.doc.get_pages() {
            let index = page_num.saturating_sub(1);
            match self.page_spans(index, page_id) {
                Ok(spans) => document.add_page(Page { index, spans }),
                Err(e) => {
                    if options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("{}: skipping page {}: {}", self.name, page_num, e);
                    document.add_page(Page::new(index));
                }
            }
        }

        Ok(document)
    }

    fn extract_plain(&self, options: &ExtractOptions) -> Result<Document> {
        let mut document = Document::new(self.name.clone()).with_quality(ExtractionQuality::Plain);

        for page_num in self.doc.get_pages().keys().copied() {
            let index = page_num.saturating_sub(1);
            match self.doc.extract_text(&[page_num]) {
                Ok(text) => document.add_page(Page::from_plain_text(index, &text)),
                Err(e) => {
                    let err = Error::TextExtract(format!("Page {}: {}", page_num, e));
                    if options.error_mode == ErrorMode::Strict {
                        return Err(err);
                    }
                    log::warn!("{}: {}", self.name, err);
                    document.add_page(Page::new(index));
                }
            }
        }

        Ok(document)
    }
}

/// Concatenate the strings of a `TJ` array, inserting spaces at large
/// negative adjustments.
fn tj_text(items: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes.as_slice())),
            other => {
                let adjustment = match number(other) {
                    Some(n) => -n,
                    None => continue,
                };
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined
                        .chars()
                        .last()
                        .map(is_spaceless_script_char)
                        .unwrap_or(false)
                {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Move to the next line; falls back to the font size when no leading is set.
    fn next_line(&mut self, leading: f32, font_size: f32) {
        let leading = if leading > 0.0 { leading } else { font_size };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Whether a character belongs to a script written without word spaces
/// (Chinese, Japanese kana, CJK punctuation). Hangul uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Decode string bytes when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
