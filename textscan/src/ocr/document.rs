//! Hierarchical OCR result: document → pages → blocks → lines → words.
//!
//! This is the read-only contract between an [`OcrEngine`](super::OcrEngine)
//! and the rest of the service. Engines build it, the scan pipeline only walks it.

use serde::{Deserialize, Serialize};

/// Relative bounding box `((x0, y0), (x1, y1))` with every coordinate in `[0, 1]`.
///
/// Serializes as `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry(pub [f64; 2], pub [f64; 2]);

impl Geometry {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self(
            [x0.clamp(0.0, 1.0), y0.clamp(0.0, 1.0)],
            [x1.clamp(0.0, 1.0), y1.clamp(0.0, 1.0)],
        )
    }

    /// Convert a pixel box to page-relative coordinates.
    pub fn from_pixels(left: u32, top: u32, width: u32, height: u32, page: (u32, u32)) -> Self {
        let page_w = page.0.max(1) as f64;
        let page_h = page.1.max(1) as f64;
        Self::new(
            left as f64 / page_w,
            top as f64 / page_h,
            left.saturating_add(width) as f64 / page_w,
            top.saturating_add(height) as f64 / page_h,
        )
    }

    /// The whole page.
    pub fn full() -> Self {
        Self([0.0, 0.0], [1.0, 1.0])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub value: String,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Word {
    /// Out-of-range confidences are clamped; NaN counts as no confidence.
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            value: value.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
}

impl Line {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn render(&self) -> String {
        self.words
            .iter()
            .map(|w| w.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub geometry: Geometry,
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new(geometry: Geometry, lines: Vec<Line>) -> Self {
        Self { geometry, lines }
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(Line::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Pixel dimensions `(width, height)` of the recognised image.
    pub dimensions: (u32, u32),
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(dimensions: (u32, u32), blocks: Vec<Block>) -> Self {
        Self { dimensions, blocks }
    }

    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Flatten the whole document into one string.
    ///
    /// Words are joined by a space, lines by `\n`, blocks by `\n\n` and pages by
    /// `\n\n\n\n`. Lines without words still contribute an empty line here.
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(Page::render)
            .collect::<Vec<_>>()
            .join("\n\n\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(lines: &[&[&str]]) -> Block {
        Block::new(
            Geometry::full(),
            lines
                .iter()
                .map(|words| Line::new(words.iter().map(|w| Word::new(*w, 1.0)).collect()))
                .collect(),
        )
    }

    #[test]
    fn render_joins_each_level_with_its_separator() {
        let doc = Document::new(vec![
            Page::new(
                (100, 100),
                vec![block(&[&["Hello", "there"], &["World"]]), block(&[&["Bye"]])],
            ),
            Page::new((100, 100), vec![block(&[&["Second"]])]),
        ]);

        assert_eq!(doc.render(), "Hello there\nWorld\n\nBye\n\n\n\nSecond");
    }

    #[test]
    fn render_keeps_empty_lines() {
        let doc = Document::new(vec![Page::new(
            (10, 10),
            vec![block(&[&["a"], &[], &["b"]])],
        )]);
        assert_eq!(doc.render(), "a\n\nb");
    }

    #[test]
    fn empty_document_renders_empty_string() {
        assert_eq!(Document::default().render(), "");
    }

    #[test]
    fn geometry_from_pixels_is_relative() {
        let g = Geometry::from_pixels(50, 25, 100, 50, (200, 100));
        assert_eq!(g, Geometry([0.25, 0.25], [0.75, 0.75]));
    }

    #[test]
    fn geometry_is_clamped_to_unit_square() {
        let g = Geometry::from_pixels(150, 0, 100, 120, (200, 100));
        assert_eq!(g, Geometry([0.75, 0.0], [1.0, 1.0]));
    }

    #[test]
    fn geometry_tolerates_zero_sized_page() {
        let g = Geometry::from_pixels(0, 0, 0, 0, (0, 0));
        assert_eq!(g, Geometry([0.0, 0.0], [0.0, 0.0]));
    }

    #[test]
    fn geometry_serializes_as_nested_pairs() {
        let json = serde_json::to_value(Geometry([0.1, 0.2], [0.3, 0.4])).expect("serialize");
        assert_eq!(json, serde_json::json!([[0.1, 0.2], [0.3, 0.4]]));
    }

    #[test]
    fn word_confidence_is_clamped() {
        assert_eq!(Word::new("x", 1.5).confidence, 1.0);
        assert_eq!(Word::new("x", -0.2).confidence, 0.0);
    }

    #[test]
    fn word_confidence_nan_becomes_zero() {
        assert_eq!(Word::new("x", f64::NAN).confidence, 0.0);
    }
}
