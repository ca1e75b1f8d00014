use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TextScanError};

/// File extensions accepted when the declared content type is not `image/*`.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tiff", "bmp"];

/// A file received from a client, held only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Lower-cased extension of `file_name`, without the dot.
fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// An upload is image-like when it declares an `image/*` content type, or
/// failing that, when its filename carries a known image extension.
pub fn is_image_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    if content_type.is_some_and(|ct| ct.starts_with("image/")) {
        return true;
    }

    file_name
        .and_then(extension)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn ensure_image_upload(content_type: Option<&str>, file_name: Option<&str>) -> Result<()> {
    if is_image_upload(content_type, file_name) {
        Ok(())
    } else {
        Err(TextScanError::InvalidFileType)
    }
}

/// Upload bytes written to the temp directory.
///
/// The file is named with a random UUID plus the client's extension, so the
/// client-supplied name never becomes part of a filesystem path.
#[derive(Debug)]
pub struct TempImage {
    path: PathBuf,
}

impl TempImage {
    pub async fn write(dir: &Path, upload: &Upload) -> Result<Self> {
        let suffix = upload
            .file_name
            .as_deref()
            .and_then(extension)
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let path = dir.join(format!("textscan-{}{}", Uuid::new_v4(), suffix));

        if let Err(e) = tokio::fs::write(&path, &upload.bytes).await {
            // A failed write may still have created the file.
            tokio::fs::remove_file(&path).await.ok();
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = upload.bytes.len(), "Wrote temp image");

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal: a failure is logged and otherwise ignored, it never
    /// changes the outcome of the request.
    pub async fn cleanup(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            debug!(path = %self.path.display(), error = %e, "Failed to remove temp image");
        }
    }
}
