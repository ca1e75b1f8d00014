//! OCR (Optical Character Recognition) Module
//!
//! # Architecture
//!
//! - `OcrEngine` trait: a loaded model turning an image file into a [`Document`]
//! - `TesseractEngine`: local OCR via leptess, read through Tesseract's TSV output
//! - `extract_simple_blocks`: flattens a [`Document`] into text blocks with mean
//!   confidence and page-relative location
//!
//! # Configuration
//!
//! Engine behavior is controlled via `OcrConfig` (see `config.rs`):
//! - `languages`: Tesseract language codes, `+`-separated
//! - `data_path`: optional tessdata directory
//! - `preprocess`: grayscale/contrast/downscale pass before recognition
//! - `max/min_image_dimension`: limits enforced by the preprocessing pass

mod blocks;
mod document;
mod engine;
mod preprocessing;
mod tsv;

pub use blocks::{extract_simple_blocks, SimpleBlock, SimpleBlocks};
pub use document::{Block, Document, Geometry, Line, Page, Word};
pub use engine::{OcrEngine, TesseractEngine};
pub use preprocessing::preprocess_image;
pub use tsv::parse_tsv;
