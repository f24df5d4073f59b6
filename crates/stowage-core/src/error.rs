// Rust guideline compliant 2026-10-12

//! Error types for the Stowage core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stowage core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Stowage core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory walk could not read part of the tree.
    #[error("Scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The archive writer failed.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The configuration file is not valid TOML.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A configured path cannot be used for its role.
    #[error("Unusable {role} path {}: {reason}", path.display())]
    UnusablePath {
        /// Role of the path (source, destination, log folder).
        role: &'static str,
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// The staging directory could not be prepared.
    #[error("Staging error at {}: {source}", path.display())]
    Staging {
        /// Staging directory path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// An archive was not found at rest where it was expected.
    #[error("Verification failed: {}", .0.display())]
    Verification(PathBuf),

    /// Invalid archive job state transition.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}
