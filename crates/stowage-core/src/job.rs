// Rust guideline compliant 2026-10-14

//! Archive job lifecycle.
//!
//! A job moves through the commit protocol in a fixed order:
//!
//! - Pending → Staged (staging target chosen)
//! - Staged → Compressed (archive built)
//! - Compressed → Relocated (archive moved to destination)
//! - Relocated → Verified (archive confirmed at rest)
//! - Any non-terminal state → Failed
//!
//! Source files may only be deleted once a job is `Verified`.

use crate::models::{archive_file_name, DateBucket};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// State of an [`ArchiveJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Created, nothing done yet.
    Pending,
    /// Staging location prepared.
    Staged,
    /// Archive written to staging.
    Compressed,
    /// Archive moved to the destination.
    Relocated,
    /// Archive confirmed at the destination.
    Verified,
    /// A step failed; sources must be kept.
    Failed,
}

impl JobState {
    /// Checks if a transition to the target state is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition skips a step, moves backwards, or
    /// leaves a terminal state.
    pub fn can_transition_to(&self, target: JobState) -> Result<()> {
        if self.valid_transitions().contains(&target) {
            return Ok(());
        }
        Err(Error::InvalidTransition(format!(
            "Cannot transition archive job from {:?} to {:?}",
            self, target
        )))
    }

    /// Returns the list of valid target states for the current state.
    pub fn valid_transitions(&self) -> Vec<JobState> {
        match self {
            JobState::Pending => vec![JobState::Staged, JobState::Failed],
            JobState::Staged => vec![JobState::Compressed, JobState::Failed],
            JobState::Compressed => vec![JobState::Relocated, JobState::Failed],
            JobState::Relocated => vec![JobState::Verified, JobState::Failed],
            JobState::Verified | JobState::Failed => Vec::new(),
        }
    }

    /// Returns true for `Verified` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Verified | JobState::Failed)
    }
}

/// One bucket's trip through the commit protocol.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    bucket: DateBucket,
    archive_name: String,
    staging_path: PathBuf,
    final_path: PathBuf,
    state: JobState,
}

impl ArchiveJob {
    /// Creates a pending job for `bucket`.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Files to archive
    /// * `app_name` - Archive name prefix
    /// * `staging_dir` - Staging directory
    /// * `destination` - Destination directory
    pub fn new(bucket: DateBucket, app_name: &str, staging_dir: &Path, destination: &Path) -> Self {
        let archive_name = archive_file_name(app_name, bucket.key());
        Self {
            staging_path: staging_dir.join(&archive_name),
            final_path: destination.join(&archive_name),
            archive_name,
            bucket,
            state: JobState::Pending,
        }
    }

    /// Returns the bucket being archived.
    pub fn bucket(&self) -> &DateBucket {
        &self.bucket
    }

    /// Returns the archive file name.
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Returns the staged archive path.
    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    /// Returns the archive path at the destination.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Returns the current state.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Moves the job to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn advance(&mut self, target: JobState) -> Result<()> {
        self.state.can_transition_to(target)?;
        self.state = target;
        Ok(())
    }

    /// Marks the job failed unless it already reached a terminal state.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = JobState::Failed;
        }
    }

    /// Returns true if the archive is confirmed and sources may be deleted.
    pub fn may_delete_sources(&self) -> bool {
        self.state == JobState::Verified
    }
}
