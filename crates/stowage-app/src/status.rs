// Rust guideline compliant 2026-10-16

//! Mapping from run results to process exit codes.

/// Exit code for a run that completed.
pub const EXIT_OK: u8 = 0;

/// Exit code for a run aborted by a run-level error.
pub const EXIT_FATAL: u8 = 1;

/// Exit code for a completed run with logged failures under `--strict`.
pub const EXIT_PARTIAL: u8 = 3;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Completed without any logged failure.
    Clean,
    /// Completed, but some bucket, file or host failed.
    Partial,
    /// Aborted before completion.
    Fatal,
}

impl RunStatus {
    /// Classifies a completed run.
    pub fn completed(clean: bool) -> Self {
        if clean {
            RunStatus::Clean
        } else {
            RunStatus::Partial
        }
    }

    /// Returns the process exit code.
    ///
    /// Partial failures exit `0` unless `strict` is set.
    pub fn exit_code(self, strict: bool) -> u8 {
        match self {
            RunStatus::Clean => EXIT_OK,
            RunStatus::Partial if strict => EXIT_PARTIAL,
            RunStatus::Partial => EXIT_OK,
            RunStatus::Fatal => EXIT_FATAL,
        }
    }
}
