use std::path::Path;
use std::sync::Mutex;

use leptess::LepTess;
use tracing::{debug, info};

use super::document::Document;
use super::preprocessing::preprocess_image;
use super::tsv::parse_tsv;
use crate::config::OcrConfig;
use crate::error::{Result, TextScanError};

/// A loaded OCR model.
///
/// Implementations are constructed once at startup and shared across requests,
/// so `recognize` takes `&self`. Calls are blocking; async callers should run
/// them on the blocking thread pool.
pub trait OcrEngine: Send + Sync {
    /// Run recognition on the image stored at `path`.
    fn recognize(&self, path: &Path) -> Result<Document>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Tesseract via `leptess`.
///
/// The native handle is not re-entrant, so concurrent requests take turns on it.
pub struct TesseractEngine {
    tesseract: Mutex<LepTess>,
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let tesseract = LepTess::new(config.data_path.as_deref(), &config.languages)
            .map_err(|e| TextScanError::Ocr(format!("Tesseract not available: {e}")))?;
        info!(languages = %config.languages, preprocess = config.preprocess, "Tesseract OCR initialized");

        Ok(Self {
            tesseract: Mutex::new(tesseract),
            config: config.clone(),
        })
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, path: &Path) -> Result<Document> {
        let mut lt = self
            .tesseract
            .lock()
            .map_err(|_| TextScanError::Internal("Tesseract handle poisoned".to_string()))?;

        if self.config.preprocess {
            let bytes = std::fs::read(path)?;
            let processed = preprocess_image(&bytes, &self.config)?;
            lt.set_image_from_mem(&processed)
                .map_err(|e| TextScanError::Ocr(format!("Failed to set image: {e}")))?;
        } else {
            lt.set_image(path)
                .map_err(|e| TextScanError::Ocr(format!("Failed to set image: {e}")))?;
        }

        let tsv = lt
            .get_tsv_text(0)
            .map_err(|e| TextScanError::Ocr(format!("Failed to extract text: {e}")))?;
        let document = parse_tsv(&tsv)?;

        debug!(
            path = %path.display(),
            pages = document.pages.len(),
            "Tesseract recognition finished"
        );
        Ok(document)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
