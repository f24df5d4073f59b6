// Rust guideline compliant 2026-10-16

//! File archival pipeline.
//!
//! Scans the source tree, buckets aged files by last-write date and runs
//! each bucket through the commit protocol:
//!
//! 1. compress the bucket into the staging area
//! 2. move the archive to the destination
//! 3. verify the archive is at rest there
//! 4. only then delete the bucket's source files
//!
//! A failure in steps 1-3 keeps every source file of that bucket and moves
//! on to the next bucket. An archive that already exists at the destination
//! for the same date is merged into the new one rather than overwritten. Run-level problems (unusable paths, no staging
//! area, unreadable source tree) abort the run.

use crate::error::Result;
use crate::report::{BucketOutcome, FailedStage, PlannedBucket, RunReport};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use stowage_core::{
    archive_file_name, bucket_by_date, build_archive_onto, default_staging_volume, scan_eligible,
    ArchiveConfig, ArchiveJob, DateBucket, Error as CoreError, FileOps, JobState, LocalFs,
    RunLogger, StagingArea,
};

/// Drives one file archival run.
pub struct ArchivePipeline<'a> {
    config: &'a ArchiveConfig,
    logger: &'a RunLogger,
    fs: &'a dyn FileOps,
}

/// Why a bucket left the commit protocol early.
#[derive(Debug)]
struct BucketFailure {
    stage: FailedStage,
    reason: String,
}

impl BucketFailure {
    fn new(stage: FailedStage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }

    fn at(stage: FailedStage) -> impl Fn(CoreError) -> Self {
        move |err| Self::new(stage, err.to_string())
    }
}

impl<'a> ArchivePipeline<'a> {
    /// Creates a pipeline using the local filesystem.
    pub fn new(config: &'a ArchiveConfig, logger: &'a RunLogger) -> Self {
        Self {
            config,
            logger,
            fs: &LocalFs,
        }
    }

    /// Replaces the filesystem collaborator.
    #[must_use]
    pub fn with_file_ops(mut self, fs: &'a dyn FileOps) -> Self {
        self.fs = fs;
        self
    }

    /// Lists the buckets a run would archive without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unusable or cannot be scanned.
    pub fn plan(&self) -> Result<Vec<PlannedBucket>> {
        check_dir("source", &self.config.source)?;
        let buckets = self.scan(None)?;

        self.logger.info(format!(
            "Dry run: {} date bucket(s) eligible under {}",
            buckets.len(),
            self.config.source.display()
        ));

        Ok(buckets
            .into_iter()
            .map(|bucket| PlannedBucket {
                date_key: bucket.key(),
                archive_name: archive_file_name(&self.config.app_name, bucket.key()),
                files: bucket.members().iter().map(|m| m.path.clone()).collect(),
            })
            .collect())
    }

    /// Runs the pipeline to completion.
    ///
    /// Start and end markers are always logged, including when the run aborts.
    ///
    /// # Returns
    ///
    /// A report with one outcome per bucket. Bucket and file failures are
    /// recorded in the report, not returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source or destination is missing or not a directory
    /// - The staging directory cannot be created
    /// - Any part of the source tree cannot be read
    pub fn run(&self) -> Result<RunReport> {
        let started_at = self.logger.clock().now();
        self.logger.start(format!(
            "File archival started: source={} destination={} keep_days={}",
            self.config.source.display(),
            self.config.destination.display(),
            self.config.keep.as_days()
        ));

        let result = self.execute(started_at);
        match &result {
            Ok(report) => self
                .logger
                .end(format!("File archival finished: {}", report.summary())),
            Err(err) => {
                self.logger.error(format!("File archival aborted: {err}"));
                self.logger.end("File archival finished: aborted");
            }
        }
        result
    }

    fn execute(&self, started_at: DateTime<Utc>) -> Result<RunReport> {
        check_dir("source", &self.config.source)?;
        check_dir("destination", &self.config.destination)?;
        check_outside_source(&self.config.source, &self.config.destination)?;

        let volume = self
            .config
            .staging_volume
            .clone()
            .unwrap_or_else(|| default_staging_volume(&self.config.source));
        let staging = StagingArea::ensure(self.fs, &volume)?;
        self.logger
            .info(format!("Staging area ready at {}", staging.path().display()));

        let buckets = self.scan(Some(staging.path()))?;
        let eligible_files = buckets.iter().map(DateBucket::len).sum();
        self.logger.info(format!(
            "Found {eligible_files} eligible file(s) in {} date bucket(s)",
            buckets.len()
        ));

        let buckets = buckets
            .into_iter()
            .map(|bucket| self.archive_bucket(bucket, &staging))
            .collect();

        Ok(RunReport {
            app_name: self.config.app_name.clone(),
            started_at,
            finished_at: self.logger.clock().now(),
            eligible_files,
            buckets,
        })
    }

    fn scan(&self, staging: Option<&Path>) -> Result<Vec<DateBucket>> {
        let now = self.logger.clock().now();
        let mut scan = scan_eligible(&self.config.source, self.config.keep, now);
        if let Some(staging) = staging {
            scan = scan.excluding(staging);
        }
        Ok(bucket_by_date(scan)?)
    }

    fn archive_bucket(&self, bucket: DateBucket, staging: &StagingArea) -> BucketOutcome {
        let mut job = ArchiveJob::new(
            bucket,
            &self.config.app_name,
            staging.path(),
            &self.config.destination,
        );
        self.logger.info(format!(
            "Archiving {} file(s) dated {} into {}",
            job.bucket().len(),
            job.bucket().key(),
            job.archive_name()
        ));

        match self.commit(&mut job) {
            Ok(()) => self.delete_sources(&job),
            Err(failure) => {
                job.fail();
                self.logger.error(format!(
                    "Bucket {} failed during {:?}: {}; {} source file(s) kept",
                    job.bucket().key(),
                    failure.stage,
                    failure.reason,
                    job.bucket().len()
                ));
                self.discard_staged(&job);
                BucketOutcome::Failed {
                    date_key: job.bucket().key(),
                    archive: job.final_path().to_path_buf(),
                    members: job.bucket().len(),
                    stage: failure.stage,
                    reason: failure.reason,
                }
            }
        }
    }

    fn commit(&self, job: &mut ArchiveJob) -> std::result::Result<(), BucketFailure> {
        job.advance(JobState::Staged)
            .map_err(BucketFailure::at(FailedStage::Compress))?;

        // An archive already at the destination is merged, never replaced.
        let previous = self
            .fs
            .regular_file_len(job.final_path())
            .map(|_| job.final_path().to_path_buf());
        if let Some(previous) = &previous {
            self.logger.info(format!(
                "{} already exists; its entries are carried into the new archive",
                previous.display()
            ));
        }

        let built = build_archive_onto(job.bucket(), job.staging_path(), previous.as_deref())
            .map_err(BucketFailure::at(FailedStage::Compress))?;
        job.advance(JobState::Compressed)
            .map_err(BucketFailure::at(FailedStage::Compress))?;
        self.logger.info(format!(
            "Compressed {} entr(ies), {} carried, into {} ({} bytes)",
            built.entries,
            built.carried,
            built.path.display(),
            built.bytes
        ));

        self.fs
            .move_file(job.staging_path(), job.final_path())
            .map_err(|err| {
                BucketFailure::new(
                    FailedStage::Relocate,
                    format!(
                        "moving {} to {}: {err}",
                        job.staging_path().display(),
                        job.final_path().display()
                    ),
                )
            })?;
        job.advance(JobState::Relocated)
            .map_err(BucketFailure::at(FailedStage::Relocate))?;

        match self.fs.regular_file_len(job.final_path()) {
            Some(len) if len == built.bytes => {}
            Some(len) => {
                return Err(BucketFailure::new(
                    FailedStage::Verify,
                    format!(
                        "{} is {len} bytes, expected {}",
                        job.final_path().display(),
                        built.bytes
                    ),
                ));
            }
            None => {
                return Err(BucketFailure::new(
                    FailedStage::Verify,
                    CoreError::Verification(job.final_path().to_path_buf()).to_string(),
                ));
            }
        }
        job.advance(JobState::Verified)
            .map_err(BucketFailure::at(FailedStage::Verify))?;
        self.logger
            .info(format!("Verified {}", job.final_path().display()));

        Ok(())
    }

    fn delete_sources(&self, job: &ArchiveJob) -> BucketOutcome {
        let mut deleted = 0;
        let mut delete_failures = Vec::new();

        if job.may_delete_sources() {
            for member in job.bucket().members() {
                match self.fs.remove_file(&member.path) {
                    Ok(()) => deleted += 1,
                    Err(err) => {
                        self.logger.error(format!(
                            "Could not delete {}: {err}",
                            member.path.display()
                        ));
                        delete_failures.push(member.path.clone());
                    }
                }
            }
        }

        self.logger.info(format!(
            "Deleted {deleted} of {} source file(s) for {}",
            job.bucket().len(),
            job.bucket().key()
        ));

        BucketOutcome::Archived {
            date_key: job.bucket().key(),
            archive: job.final_path().to_path_buf(),
            members: job.bucket().len(),
            deleted,
            delete_failures,
        }
    }

    fn discard_staged(&self, job: &ArchiveJob) {
        if self.fs.regular_file_len(job.staging_path()).is_none() {
            return;
        }
        if let Err(err) = self.fs.remove_file(job.staging_path()) {
            self.logger.warn(format!(
                "Could not remove staged archive {}: {err}",
                job.staging_path().display()
            ));
        }
    }
}

fn check_dir(role: &'static str, path: &Path) -> std::result::Result<(), CoreError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CoreError::UnusablePath {
            role,
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(err) => Err(CoreError::UnusablePath {
            role,
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

/// Rejects a destination that resolves to the source or a directory inside it.
///
/// Archives written there would age into the scan and be archived and
/// deleted by a later run.
fn check_outside_source(source: &Path, destination: &Path) -> std::result::Result<(), CoreError> {
    let resolve = |role: &'static str, path: &Path| {
        fs::canonicalize(path).map_err(|err| CoreError::UnusablePath {
            role,
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    };
    let source = resolve("source", source)?;
    let resolved = resolve("destination", destination)?;

    if resolved.starts_with(&source) {
        return Err(CoreError::UnusablePath {
            role: "destination",
            path: destination.to_path_buf(),
            reason: format!("resolves inside the source tree {}", source.display()),
        });
    }
    Ok(())
}
