// Rust guideline compliant 2026-10-15

//! Error handling for Stowage application services.

use serde::Serialize;
use stowage_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Configuration failed to load or validate.
    InvalidConfig,
    /// A source, destination or log path cannot be used.
    UnusablePath,
    /// The staging directory could not be prepared.
    StagingUnavailable,
    /// The source tree could not be scanned completely.
    ScanFailed,
    /// An archive could not be written.
    ArchiveError,
    /// An archive was not found at rest after relocation.
    VerificationFailed,
    /// The remote log source could not be queried.
    RemoteSourceError,
    /// IO failure not covered by a more specific code.
    IoError,
    /// A fallback for unexpected errors.
    Unknown,
}

/// Application-level errors. Every variant aborts the run it occurs in.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The remote log source failed to enumerate hosts.
    #[error("Remote log source error: {0}")]
    RemoteSource(String),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RemoteSource(_) => ErrorCode::RemoteSourceError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::InvalidConfig(_) | CoreError::Toml(_) => ErrorCode::InvalidConfig,
                CoreError::UnusablePath { .. } => ErrorCode::UnusablePath,
                CoreError::Staging { .. } => ErrorCode::StagingUnavailable,
                CoreError::Walk(_) => ErrorCode::ScanFailed,
                CoreError::Zip(_) => ErrorCode::ArchiveError,
                CoreError::Verification(_) => ErrorCode::VerificationFailed,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::InvalidTransition(_) => ErrorCode::Unknown,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Core(CoreError::UnusablePath { role, path, reason }) => {
                Some(serde_json::json!({
                    "role": role,
                    "path": path,
                    "reason": reason,
                }))
            }
            AppError::Core(CoreError::Staging { path, .. }) => Some(serde_json::json!({
                "path": path,
            })),
            _ => None,
        }
    }
}
