use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, TextScanError};
use crate::ocr::{extract_simple_blocks, OcrEngine, SimpleBlocks};

use super::upload::{ensure_image_upload, TempImage, Upload};

/// What the caller wants back from a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Only the engine's rendered text.
    TextOnly,
    /// Full text plus per-block text, confidence and location.
    #[default]
    Blocks,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutput {
    Text(String),
    Blocks(SimpleBlocks),
}

/// Runs one upload through the OCR engine.
///
/// The engine is shared read-only between all clones of the service.
#[derive(Clone)]
pub struct ScanService {
    engine: Arc<dyn OcrEngine>,
    temp_dir: PathBuf,
}

impl ScanService {
    pub fn new(engine: Arc<dyn OcrEngine>, temp_dir: PathBuf) -> Self {
        Self { engine, temp_dir }
    }

    pub async fn scan(&self, upload: Upload, mode: ScanMode) -> Result<ScanOutput> {
        ensure_image_upload(upload.content_type.as_deref(), upload.file_name.as_deref())?;

        let temp = TempImage::write(&self.temp_dir, &upload).await?;

        let engine = Arc::clone(&self.engine);
        let path = temp.path().to_path_buf();
        let recognized = tokio::task::spawn_blocking(move || engine.recognize(&path)).await;

        temp.cleanup().await;

        let document =
            recognized.map_err(|e| TextScanError::Internal(format!("OCR task panicked: {e}")))??;

        info!(
            engine = self.engine.name(),
            file_name = upload.file_name.as_deref().unwrap_or(""),
            bytes = upload.bytes.len(),
            pages = document.pages.len(),
            ?mode,
            "Scan completed"
        );

        Ok(match mode {
            ScanMode::TextOnly => ScanOutput::Text(document.render()),
            ScanMode::Blocks => ScanOutput::Blocks(extract_simple_blocks(&document)),
        })
    }
}
