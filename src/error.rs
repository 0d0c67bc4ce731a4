//! Error codes shared by JSON responses.

use serde::Serialize;

/// Stable machine-readable code for an error, reported alongside its message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// JSON error envelope: `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn from_error(err: &impl ErrorCode) -> Self {
        Self { error: ErrorDetail { code: err.error_code(), message: err.to_string() } }
    }
}
