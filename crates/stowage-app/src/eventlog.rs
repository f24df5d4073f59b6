// Rust guideline compliant 2026-10-16

//! Event-log backup loop.
//!
//! Hosts are processed one after another. For each reachable host every
//! configured log is copied into `{destination}/{host}/`, the copy is
//! verified and only then, if asked to, the remote log is cleared. A missing
//! log, a failed copy or an unreachable host is logged and the loop moves on.

use crate::error::Result;
use crate::remote::{RemoteLogSource, EVENT_LOG_EXTENSION};
use crate::report::{EventLogReport, HostReport, LogCopyOutcome};
use std::path::{Path, PathBuf};
use stowage_core::{Error as CoreError, EventLogConfig, FileOps, LocalFs, RunLogger};

/// Timestamp format embedded in copied log names.
const COPY_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Drives one event-log backup run.
pub struct EventLogBackup<'a> {
    config: &'a EventLogConfig,
    logger: &'a RunLogger,
    source: &'a dyn RemoteLogSource,
    fs: &'a dyn FileOps,
}

impl<'a> EventLogBackup<'a> {
    /// Creates a backup loop over `source` using the local filesystem.
    pub fn new(
        config: &'a EventLogConfig,
        logger: &'a RunLogger,
        source: &'a dyn RemoteLogSource,
    ) -> Self {
        Self {
            config,
            logger,
            source,
            fs: &LocalFs,
        }
    }

    /// Replaces the filesystem collaborator.
    #[must_use]
    pub fn with_file_ops(mut self, fs: &'a dyn FileOps) -> Self {
        self.fs = fs;
        self
    }

    /// Runs the loop over every host.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be created or the host
    /// list cannot be resolved. Per-host and per-log failures are recorded
    /// in the report instead.
    pub fn run(&self) -> Result<EventLogReport> {
        let started_at = self.logger.clock().now();
        self.logger.start(format!(
            "Event log backup started: destination={} logs={}",
            self.config.destination.display(),
            self.config.logs.join(",")
        ));

        let result = self.execute(started_at);
        match &result {
            Ok(report) => self
                .logger
                .end(format!("Event log backup finished: {}", report.summary())),
            Err(err) => {
                self.logger.error(format!("Event log backup aborted: {err}"));
                self.logger.end("Event log backup finished: aborted");
            }
        }
        result
    }

    fn execute(&self, started_at: chrono::DateTime<chrono::Utc>) -> Result<EventLogReport> {
        self.fs
            .create_dir_all(&self.config.destination)
            .map_err(|err| CoreError::UnusablePath {
                role: "destination",
                path: self.config.destination.clone(),
                reason: err.to_string(),
            })?;

        let hosts = self.source.hosts()?;
        if hosts.is_empty() {
            self.logger.warn("No hosts to back up");
        }

        let hosts = hosts.iter().map(|host| self.backup_host(host)).collect();

        Ok(EventLogReport {
            started_at,
            finished_at: self.logger.clock().now(),
            hosts,
        })
    }

    fn backup_host(&self, host: &str) -> HostReport {
        if !self.source.is_reachable(host) {
            self.logger
                .error(format!("{host} is unreachable, skipping"));
            return HostReport {
                host: host.to_string(),
                reachable: false,
                logs: Vec::new(),
            };
        }

        self.logger.info(format!("Backing up event logs from {host}"));
        let logs = self
            .config
            .logs
            .iter()
            .map(|log| self.backup_log(host, log))
            .collect();

        HostReport {
            host: host.to_string(),
            reachable: true,
            logs,
        }
    }

    fn backup_log(&self, host: &str, log: &str) -> LogCopyOutcome {
        let remote = self.source.remote_log_path(host, log);
        if self.fs.regular_file_len(&remote).is_none() {
            self.logger
                .error(format!("{log} log not found on {host} at {}", remote.display()));
            return LogCopyOutcome::Missing {
                log: log.to_string(),
            };
        }

        let copy = match self.copy_and_verify(host, log, &remote) {
            Ok(copy) => copy,
            Err(reason) => {
                self.logger
                    .error(format!("Copy of {log} log from {host} failed: {reason}"));
                return LogCopyOutcome::Failed {
                    log: log.to_string(),
                    reason,
                };
            }
        };
        self.logger.info(format!(
            "Copied {log} log from {host} to {}",
            copy.display()
        ));

        if !self.config.clear_after_copy {
            return LogCopyOutcome::Copied {
                log: log.to_string(),
                copy,
            };
        }

        match self.source.clear_log(host, log) {
            Ok(()) => {
                self.logger.info(format!("Cleared {log} log on {host}"));
                LogCopyOutcome::Cleared {
                    log: log.to_string(),
                    copy,
                }
            }
            Err(err) => {
                self.logger
                    .error(format!("Could not clear {log} log on {host}: {err}"));
                LogCopyOutcome::ClearFailed {
                    log: log.to_string(),
                    copy,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn copy_and_verify(
        &self,
        host: &str,
        log: &str,
        remote: &Path,
    ) -> std::result::Result<PathBuf, String> {
        let host_dir = self.config.destination.join(host);
        self.fs
            .create_dir_all(&host_dir)
            .map_err(|err| format!("creating {}: {err}", host_dir.display()))?;

        let copy = host_dir.join(copy_file_name(
            host,
            log,
            &self.logger.clock().now().format(COPY_STAMP_FORMAT).to_string(),
        ));
        let copied = self
            .fs
            .copy_file(remote, &copy)
            .map_err(|err| format!("copying {}: {err}", remote.display()))?;

        match self.fs.regular_file_len(&copy) {
            Some(len) if len == copied => Ok(copy),
            Some(len) => Err(format!(
                "{} is {len} bytes, expected {copied}",
                copy.display()
            )),
            None => Err(CoreError::Verification(copy).to_string()),
        }
    }
}

/// Builds the local file name of a copied log.
pub fn copy_file_name(host: &str, log: &str, stamp: &str) -> String {
    format!("{host}_{log}_{stamp}.{EVENT_LOG_EXTENSION}")
}
