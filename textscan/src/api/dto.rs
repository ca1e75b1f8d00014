//! Wire types for the scan API.
//!
//! Success bodies carry `success: true`; every failure is rendered by
//! [`TextScanError`](crate::error::TextScanError) as `{ "success": false, "error": "..." }`.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::ocr::{Geometry, SimpleBlock};
use crate::services::ScanOutput;

/// Query string accepted by `POST /scan`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScanQuery {
    /// Return only the extracted text without block details.
    /// Accepts true/false/1/0/yes/no/on/off; defaults to false.
    #[param(value_type = Option<bool>)]
    pub text_only: Option<String>,
}

/// Multipart form accepted by `POST /scan`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ScanUploadForm {
    /// The image to process.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlockResponse {
    pub text: String,
    /// Mean word confidence in `[0, 1]`; `0` for a block without words.
    pub confidence: f64,
    /// Relative bounding box `[[x0, y0], [x1, y1]]`.
    #[schema(value_type = Vec<Vec<f64>>)]
    pub location: Geometry,
}

impl From<SimpleBlock> for BlockResponse {
    fn from(block: SimpleBlock) -> Self {
        Self {
            text: block.text,
            confidence: block.confidence,
            location: block.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanResponse {
    pub success: bool,
    pub text: String,
    /// Absent when `text_only=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockResponse>>,
}

impl From<ScanOutput> for ScanResponse {
    fn from(output: ScanOutput) -> Self {
        match output {
            ScanOutput::Text(text) => Self {
                success: true,
                text,
                blocks: None,
            },
            ScanOutput::Blocks(result) => Self {
                success: true,
                text: result.text,
                blocks: Some(result.blocks.into_iter().map(BlockResponse::from).collect()),
            },
        }
    }
}

impl IntoResponse for ScanResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failure body shared by every error status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::SimpleBlocks;

    #[test]
    fn text_only_response_omits_blocks() {
        let resp = ScanResponse::from(ScanOutput::Text("hi".into()));
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json, serde_json::json!({ "success": true, "text": "hi" }));
    }

    #[test]
    fn blocks_response_shape() {
        let resp = ScanResponse::from(ScanOutput::Blocks(SimpleBlocks {
            text: "Hello".into(),
            blocks: vec![SimpleBlock {
                text: "Hello".into(),
                confidence: 0.5,
                location: Geometry([0.25, 0.5], [0.75, 1.0]),
            }],
        }));

        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["text"], "Hello");
        assert_eq!(
            json["blocks"],
            serde_json::json!([{
                "text": "Hello",
                "confidence": 0.5,
                "location": [[0.25, 0.5], [0.75, 1.0]]
            }])
        );
    }
}
