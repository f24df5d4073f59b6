// Rust guideline compliant 2026-10-15

//! Run reports for the archival and event-log pipelines.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use stowage_core::DateKey;

/// Commit-protocol step at which a bucket failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    /// Building the archive in staging.
    Compress,
    /// Moving the archive to the destination.
    Relocate,
    /// Confirming the archive at the destination.
    Verify,
}

/// Outcome of one date bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BucketOutcome {
    /// Archive verified at the destination; sources were deleted.
    Archived {
        /// Bucket date key.
        date_key: DateKey,
        /// Archive path at the destination.
        archive: PathBuf,
        /// Number of files in the bucket.
        members: usize,
        /// Number of source files deleted.
        deleted: usize,
        /// Source files that could not be deleted.
        delete_failures: Vec<PathBuf>,
    },
    /// The bucket failed; all of its sources were kept.
    Failed {
        /// Bucket date key.
        date_key: DateKey,
        /// Archive path that was intended at the destination.
        archive: PathBuf,
        /// Number of files in the bucket.
        members: usize,
        /// Step that failed.
        stage: FailedStage,
        /// Failure description.
        reason: String,
    },
}

impl BucketOutcome {
    /// Returns the bucket's date key.
    pub fn date_key(&self) -> DateKey {
        match self {
            BucketOutcome::Archived { date_key, .. } | BucketOutcome::Failed { date_key, .. } => {
                *date_key
            }
        }
    }

    /// Returns true if the archive was verified.
    pub fn is_archived(&self) -> bool {
        matches!(self, BucketOutcome::Archived { .. })
    }
}

/// Summary of one file archival run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Application identifier.
    pub app_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Number of eligible files found.
    pub eligible_files: usize,
    /// Per-bucket outcomes in date order.
    pub buckets: Vec<BucketOutcome>,
}

impl RunReport {
    /// Number of buckets archived and verified.
    pub fn archived_count(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_archived()).count()
    }

    /// Number of buckets that failed.
    pub fn failed_count(&self) -> usize {
        self.buckets.len() - self.archived_count()
    }

    /// Total number of source files deleted.
    pub fn deleted_files(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| match b {
                BucketOutcome::Archived { deleted, .. } => *deleted,
                BucketOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Total number of source files that could not be deleted.
    pub fn delete_failures(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| match b {
                BucketOutcome::Archived {
                    delete_failures, ..
                } => delete_failures.len(),
                BucketOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Returns true if no bucket- or file-level failure was recorded.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0 && self.delete_failures() == 0
    }

    /// One-line summary used for the run's end marker.
    pub fn summary(&self) -> String {
        format!(
            "{} eligible file(s), {} bucket(s) archived, {} failed, {} source file(s) deleted, {} deletion failure(s)",
            self.eligible_files,
            self.archived_count(),
            self.failed_count(),
            self.deleted_files(),
            self.delete_failures()
        )
    }
}

/// A bucket that would be archived, as reported by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedBucket {
    /// Bucket date key.
    pub date_key: DateKey,
    /// Archive file name.
    pub archive_name: String,
    /// Files in the bucket, ordered by path.
    pub files: Vec<PathBuf>,
}

/// Outcome of copying one event log from one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogCopyOutcome {
    /// Copied and verified; the remote log was left as is.
    Copied {
        /// Log name.
        log: String,
        /// Local copy.
        copy: PathBuf,
    },
    /// Copied, verified and then cleared on the host.
    Cleared {
        /// Log name.
        log: String,
        /// Local copy.
        copy: PathBuf,
    },
    /// Copied and verified, but clearing the remote log failed.
    ClearFailed {
        /// Log name.
        log: String,
        /// Local copy.
        copy: PathBuf,
        /// Failure description.
        reason: String,
    },
    /// The log file was not present on the host.
    Missing {
        /// Log name.
        log: String,
    },
    /// Copy or verification failed; the remote log was not cleared.
    Failed {
        /// Log name.
        log: String,
        /// Failure description.
        reason: String,
    },
}

impl LogCopyOutcome {
    /// Returns true if the outcome is a failure worth surfacing.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            LogCopyOutcome::Copied { .. } | LogCopyOutcome::Cleared { .. }
        )
    }
}

/// Per-host result of an event-log run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
    /// Host name.
    pub host: String,
    /// Whether the host answered the reachability probe.
    pub reachable: bool,
    /// Per-log outcomes; empty when unreachable.
    pub logs: Vec<LogCopyOutcome>,
}

/// Summary of one event-log backup run.
#[derive(Debug, Clone, Serialize)]
pub struct EventLogReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Per-host results in processing order.
    pub hosts: Vec<HostReport>,
}

impl EventLogReport {
    /// Number of logs copied and verified.
    pub fn copied(&self) -> usize {
        self.hosts
            .iter()
            .flat_map(|h| &h.logs)
            .filter(|l| {
                matches!(
                    l,
                    LogCopyOutcome::Copied { .. }
                        | LogCopyOutcome::Cleared { .. }
                        | LogCopyOutcome::ClearFailed { .. }
                )
            })
            .count()
    }

    /// Number of failed or missing logs plus unreachable hosts.
    pub fn failures(&self) -> usize {
        let unreachable = self.hosts.iter().filter(|h| !h.reachable).count();
        let logs = self
            .hosts
            .iter()
            .flat_map(|h| &h.logs)
            .filter(|l| l.is_failure())
            .count();
        unreachable + logs
    }

    /// Returns true if every host was reachable and every log copied cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }

    /// One-line summary used for the run's end marker.
    pub fn summary(&self) -> String {
        format!(
            "{} host(s), {} log(s) copied, {} failure(s)",
            self.hosts.len(),
            self.copied(),
            self.failures()
        )
    }
}
