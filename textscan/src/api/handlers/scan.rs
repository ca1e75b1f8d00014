//! `POST /scan`: image upload in, OCR text and blocks out.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum_extra::extract::{Query, WithRejection};

use crate::api::dto::{ErrorResponse, ScanQuery, ScanResponse, ScanUploadForm};
use crate::api::AppState;
use crate::error::{Result, TextScanError};
use crate::services::{ensure_image_upload, ScanMode, Upload};

fn parse_form_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn scan_mode(query: &ScanQuery) -> Result<ScanMode> {
    match query.text_only.as_deref().map(parse_form_bool) {
        None | Some(Some(false)) => Ok(ScanMode::Blocks),
        Some(Some(true)) => Ok(ScanMode::TextOnly),
        Some(None) => Err(TextScanError::Validation(
            "text_only must be one of true/false/1/0/yes/no/on/off".to_string(),
        )),
    }
}

/// Pull the `file` field out of the form. Other fields are ignored.
///
/// The declared type is checked before the body is read so that a rejected
/// upload costs nothing.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        ensure_image_upload(content_type.as_deref(), file_name.as_deref())?;

        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                TextScanError::from(e)
            } else {
                TextScanError::Internal(format!("Failed to read file: {}", e.body_text()))
            }
        })?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(TextScanError::Validation(
        "Missing required 'file' field".to_string(),
    ))
}

/// `POST /scan`
///
/// Extracts text from an uploaded image. By default the response carries the
/// full text and one entry per text block; with `text_only=true` only the text.
#[utoipa::path(
    post,
    path = "/scan",
    tag = "scan",
    params(ScanQuery),
    request_body(content = ScanUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Text extracted", body = ScanResponse),
        (status = 400, description = "Upload is not an image or the request is malformed", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the configured size limit", body = ErrorResponse),
        (status = 500, description = "Reading the file or running OCR failed", body = ErrorResponse),
    )
)]
pub async fn scan(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ScanQuery>, TextScanError>,
    WithRejection(mut multipart, _): WithRejection<Multipart, TextScanError>,
) -> Result<ScanResponse> {
    let mode = scan_mode(&query)?;
    let upload = read_upload(&mut multipart).await?;

    let output = state.scanner.scan(upload, mode).await?;
    Ok(output.into())
}
