//! HTTP error responses

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use vidmark_processing::ProcessingError;

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Neither or both of logo and text were supplied
    #[error("{0}")]
    InvalidCombination(&'static str),

    #[error("Logo file is empty")]
    EmptyAsset,

    /// Missing or malformed form field
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured body limit
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("FFmpeg error: {0}")]
    ExternalTool(String),

    #[error("Failed to create output video")]
    OutputMissing,

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn neither_provided() -> Self {
        ApiError::InvalidCombination("Either logo or text must be provided")
    }

    pub fn both_provided() -> Self {
        ApiError::InvalidCombination("Provide either logo or text, not both")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCombination(_) | ApiError::EmptyAsset | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ExternalTool(_) | ApiError::OutputMissing | ApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidCombination(_) => "InvalidCombination",
            ApiError::EmptyAsset => "EmptyAsset",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::PayloadTooLarge(_) => "PayloadTooLarge",
            ApiError::ExternalTool(_) => "ExternalToolError",
            ApiError::OutputMissing => "OutputMissing",
            ApiError::Unexpected(_) => "Unexpected",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "detail": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::ToolFailed { stderr, .. } => ApiError::ExternalTool(stderr),
            ProcessingError::OutputMissing(_) => ApiError::OutputMissing,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(err.body_text()),
            _ => ApiError::BadRequest(err.body_text()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(ApiError::neither_provided().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::both_provided().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmptyAsset.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_tool_failure_keeps_stderr() {
        let err: ApiError = ProcessingError::ToolFailed {
            code: Some(1),
            stderr: "Invalid argument".to_string(),
        }
        .into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "FFmpeg error: Invalid argument");
    }

    #[test]
    fn test_missing_output_maps_to_server_error() {
        let err: ApiError = ProcessingError::OutputMissing("out.mp4".into()).into();
        assert!(matches!(err, ApiError::OutputMissing));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
