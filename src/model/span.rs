//! Span-level types.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Font size assigned to spans that come from plain-text extraction.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

bitflags! {
    /// Style flags carried by a text span.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StyleFlags: u32 {
        /// Superscript text
        const SUPERSCRIPT = 1 << 0;
        /// Italic or oblique face
        const ITALIC = 1 << 1;
        /// Serifed face
        const SERIF = 1 << 2;
        /// Monospaced face
        const MONOSPACE = 1 << 3;
        /// Bold, black or heavy face
        const BOLD = 1 << 4;
    }
}

impl StyleFlags {
    /// Infer style flags from a font's base name (e.g. "Helvetica-BoldOblique").
    pub fn from_font_name(font_name: &str) -> Self {
        let lower = font_name.to_lowercase();
        let mut flags = StyleFlags::empty();
        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            flags |= StyleFlags::BOLD;
        }
        if lower.contains("italic") || lower.contains("oblique") {
            flags |= StyleFlags::ITALIC;
        }
        if lower.contains("courier") || lower.contains("mono") {
            flags |= StyleFlags::MONOSPACE;
        }
        flags
    }
}

/// Axis-aligned rectangle in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The zero rectangle used when no geometry is known.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A contiguous run of text sharing one font size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font base name, "unknown" when not available
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Style flags (bold, italic, ...)
    pub flags: StyleFlags,
    /// Approximate location on the page
    pub bbox: BoundingBox,
    /// 0-based index of the owning page
    pub page_index: u32,
}

impl TextSpan {
    /// Create a span with full font metadata.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f32,
        flags: StyleFlags,
        bbox: BoundingBox,
        page_index: u32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            font_size,
            flags,
            bbox,
            page_index,
        }
    }

    /// Create a span from plain line text, with defaulted font fields.
    pub fn plain(text: impl Into<String>, page_index: u32) -> Self {
        Self::new(
            text,
            "unknown",
            DEFAULT_FONT_SIZE,
            StyleFlags::empty(),
            BoundingBox::zero(),
            page_index,
        )
    }

    /// Trimmed text of the span.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Length of the trimmed text in characters.
    pub fn trimmed_len(&self) -> usize {
        self.trimmed().chars().count()
    }

    pub fn is_bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_flags_from_font_name() {
        let flags = StyleFlags::from_font_name("Helvetica-Bold");
        assert!(flags.contains(StyleFlags::BOLD));
        assert!(!flags.contains(StyleFlags::ITALIC));

        let flags = StyleFlags::from_font_name("Times-BoldItalic");
        assert!(flags.contains(StyleFlags::BOLD | StyleFlags::ITALIC));

        let flags = StyleFlags::from_font_name("Helvetica-Oblique");
        assert_eq!(flags, StyleFlags::ITALIC);
    }

    #[test]
    fn test_plain_span_defaults() {
        let span = TextSpan::plain("  Overview  ", 2);
        assert_eq!(span.font_size, DEFAULT_FONT_SIZE);
        assert!(span.flags.is_empty());
        assert_eq!(span.bbox, BoundingBox::zero());
        assert_eq!(span.page_index, 2);
        assert_eq!(span.trimmed(), "Overview");
        assert_eq!(span.trimmed_len(), 8);
    }

    #[test]
    fn test_trimmed_len_counts_chars() {
        let span = TextSpan::plain("Résumé", 0);
        assert_eq!(span.trimmed_len(), 6);
    }
}
