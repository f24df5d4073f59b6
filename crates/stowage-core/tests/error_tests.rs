// Rust guideline compliant 2026-10-15

//! Unit tests for error types and messages.

use std::path::PathBuf;
use stowage_core::Error;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let msg = Error::Io(io_err).to_string();
    assert!(msg.starts_with("IO error"), "got {msg}");
}

#[test]
fn test_invalid_config_formatting() {
    let error = Error::InvalidConfig("keep_days must be greater than 0".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid config: keep_days must be greater than 0"
    );
}

#[test]
fn test_unusable_path_mentions_role_and_path() {
    let error = Error::UnusablePath {
        role: "destination",
        path: PathBuf::from("/mnt/gone"),
        reason: "not a directory".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("destination"));
    assert!(msg.contains("/mnt/gone"));
    assert!(msg.contains("not a directory"));
}

#[test]
fn test_staging_error_keeps_source() {
    use std::error::Error as _;

    let error = Error::Staging {
        path: PathBuf::from("/stage"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.to_string().contains("/stage"));
    assert!(error.source().is_some());
}

#[test]
fn test_verification_formatting() {
    let error = Error::Verification(PathBuf::from("/dest/App-20260101.zip"));
    assert_eq!(
        error.to_string(),
        "Verification failed: /dest/App-20260101.zip"
    );
}
