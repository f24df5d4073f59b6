// Rust guideline compliant 2026-10-15

//! Response envelopes for machine-readable command output.

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

/// Envelope for a command that ran to completion.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// `"ok"` when nothing failed, `"partial"` when failures were logged.
    pub status: &'static str,
    /// Command that produced the payload.
    pub action: &'static str,
    /// Result payload.
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    /// Creates an envelope, marking it partial when `clean` is false.
    #[must_use]
    pub fn new(action: &'static str, result: T, clean: bool) -> Self {
        Self {
            status: if clean { "ok" } else { "partial" },
            action,
            result,
        }
    }
}

/// Envelope for a command that aborted.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `"error"`.
    pub status: &'static str,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Creates a new error envelope from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            status: "error",
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}
