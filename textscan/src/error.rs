use axum::{
    extract::multipart::MultipartError,
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::QueryRejection;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextScanError {
    #[error("File must be an image")]
    InvalidFileType,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl TextScanError {
    pub fn status(&self) -> StatusCode {
        match self {
            TextScanError::InvalidFileType | TextScanError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            TextScanError::Multipart { status, .. } => *status,
            TextScanError::Io(_)
            | TextScanError::Image(_)
            | TextScanError::Ocr(_)
            | TextScanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for TextScanError {
    fn from(err: MultipartError) -> Self {
        TextScanError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for TextScanError {
    fn from(rejection: MultipartRejection) -> Self {
        TextScanError::Multipart {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for TextScanError {
    fn from(rejection: QueryRejection) -> Self {
        TextScanError::Validation(rejection.to_string())
    }
}

impl IntoResponse for TextScanError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Scan request failed");
        } else {
            tracing::debug!(error = %self, "Scan request rejected");
        }

        let message = match &self {
            TextScanError::InvalidFileType => self.to_string(),
            TextScanError::Validation(msg) | TextScanError::Multipart { message: msg, .. } => {
                msg.clone()
            }
            _ => format!("Error: {self}"),
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, TextScanError>;
