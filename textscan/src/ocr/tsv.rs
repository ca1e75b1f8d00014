//! Builds a [`Document`] from Tesseract's TSV output.
//!
//! Each row is `level page block par line word left top width height conf text`.
//! Rows arrive in reading order with every parent emitted before its children,
//! so the hierarchy can be assembled in a single pass.

use super::document::{Block, Document, Geometry, Line, Page, Word};
use crate::error::{Result, TextScanError};

const LEVEL_PAGE: u8 = 1;
const LEVEL_BLOCK: u8 = 2;
const LEVEL_PARAGRAPH: u8 = 3;
const LEVEL_LINE: u8 = 4;
const LEVEL_WORD: u8 = 5;

#[derive(Debug)]
struct Row<'a> {
    level: u8,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    conf: f64,
    text: &'a str,
}

fn parse_row(line: &str, line_no: usize) -> Result<Option<Row<'_>>> {
    let fields: Vec<&str> = line.splitn(12, '\t').collect();
    if fields.len() < 11 {
        return Err(malformed(line_no, "expected at least 11 columns"));
    }

    // Header row, present when the output comes from the TSV renderer.
    let Ok(level) = fields[0].trim().parse::<u8>() else {
        if fields[0].trim() == "level" {
            return Ok(None);
        }
        return Err(malformed(line_no, "invalid level"));
    };

    let num = |idx: usize, name: &str| -> Result<u32> {
        fields[idx]
            .trim()
            .parse::<i64>()
            .map(|v| v.max(0) as u32)
            .map_err(|_| malformed(line_no, &format!("invalid {name}")))
    };

    let conf = fields[10]
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(line_no, "invalid conf"))?;

    Ok(Some(Row {
        level,
        left: num(6, "left")?,
        top: num(7, "top")?,
        width: num(8, "width")?,
        height: num(9, "height")?,
        conf,
        text: fields.get(11).copied().unwrap_or(""),
    }))
}

fn malformed(line_no: usize, reason: &str) -> TextScanError {
    TextScanError::Ocr(format!("Malformed TSV output at line {line_no}: {reason}"))
}

fn orphan(line_no: usize, level: &str) -> TextScanError {
    malformed(line_no, &format!("{level} row without a parent"))
}

pub fn parse_tsv(tsv: &str) -> Result<Document> {
    let mut pages: Vec<Page> = Vec::new();

    for (idx, raw) in tsv.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let Some(row) = parse_row(raw, line_no)? else {
            continue;
        };

        match row.level {
            LEVEL_PAGE => pages.push(Page::new((row.width, row.height), Vec::new())),
            LEVEL_BLOCK => {
                let page = pages.last_mut().ok_or_else(|| orphan(line_no, "block"))?;
                let geometry =
                    Geometry::from_pixels(row.left, row.top, row.width, row.height, page.dimensions);
                page.blocks.push(Block::new(geometry, Vec::new()));
            }
            // Paragraphs are flattened: their lines belong directly to the block.
            LEVEL_PARAGRAPH => {}
            LEVEL_LINE => {
                let block = pages
                    .last_mut()
                    .and_then(|p| p.blocks.last_mut())
                    .ok_or_else(|| orphan(line_no, "line"))?;
                block.lines.push(Line::default());
            }
            LEVEL_WORD => {
                let line = pages
                    .last_mut()
                    .and_then(|p| p.blocks.last_mut())
                    .and_then(|b| b.lines.last_mut())
                    .ok_or_else(|| orphan(line_no, "word"))?;
                let text = row.text.trim();
                // Tesseract marks non-text components with a negative confidence.
                if text.is_empty() || row.conf < 0.0 {
                    continue;
                }
                line.words.push(Word::new(text, row.conf / 100.0));
            }
            other => {
                tracing::debug!(level = other, line_no, "Skipping unknown TSV level");
            }
        }
    }

    Ok(Document::new(pages))
}
