// Rust guideline compliant 2026-10-13

//! Date-partitioned structured run log.
//!
//! A [`RunLogger`] appends one line per event to
//! `{root}/{app}/{YYYY}/{MM}/{app}_{YYYYMMDD}.log` and mirrors every line to
//! the console through `tracing`. The day file is chosen from the injected
//! clock on every call, and a header block is written when a day file is
//! first created.

use crate::clock::Clock;
use crate::config::validate_app_name;
use crate::host::host_name;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Severity or lifecycle marker of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Routine progress.
    Info,
    /// Something unexpected that did not cause a failure.
    Warn,
    /// A failure; the run may still continue.
    Error,
    /// Marks the beginning of a run.
    Start,
    /// Marks the end of a run.
    End,
}

impl LogLevel {
    /// Returns the tag written into the log file.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Start => "START",
            LogLevel::End => "END",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only log sink partitioned by application and calendar day.
#[derive(Clone)]
pub struct RunLogger {
    root: PathBuf,
    app: String,
    host: String,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for RunLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLogger")
            .field("root", &self.root)
            .field("app", &self.app)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl RunLogger {
    /// Creates a logger rooted at `root` for application `app`.
    ///
    /// # Arguments
    ///
    /// * `root` - Root of the log tree; created if missing
    /// * `app` - Application identifier used in directory and file names
    /// * `clock` - Time source for timestamps and day partitioning
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `app` is not a valid application identifier
    /// - The root directory cannot be created
    pub fn new(root: impl Into<PathBuf>, app: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let root = root.into();
        validate_app_name(app)?;
        fs::create_dir_all(&root).map_err(|err| Error::UnusablePath {
            role: "log folder",
            path: root.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            root,
            app: app.to_string(),
            host: host_name(),
            clock,
        })
    }

    /// Overrides the host name written into new day-file headers.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Returns the application identifier.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Returns the logger's time source.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns the day file a line logged at `at` is written to.
    pub fn path_for(&self, at: DateTime<Utc>) -> PathBuf {
        self.root
            .join(&self.app)
            .join(at.format("%Y").to_string())
            .join(at.format("%m").to_string())
            .join(format!("{}_{}.log", self.app, at.format("%Y%m%d")))
    }

    /// Returns the day file for the current clock reading.
    pub fn current_path(&self) -> PathBuf {
        self.path_for(self.clock.now())
    }

    /// Records a line in the day file and mirrors it to the console.
    ///
    /// A failure to write the file is reported on the console and otherwise
    /// ignored so that logging never aborts the caller.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let message = message.as_ref();
        let at = self.clock.now();

        match level {
            LogLevel::Error => tracing::error!(app = %self.app, level = %level, "{message}"),
            LogLevel::Warn => tracing::warn!(app = %self.app, level = %level, "{message}"),
            _ => tracing::info!(app = %self.app, level = %level, "{message}"),
        }

        if let Err(err) = self.append(at, level, message) {
            tracing::error!(
                app = %self.app,
                path = %self.path_for(at).display(),
                error = %err,
                "failed to write run log"
            );
        }
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    /// Logs at [`LogLevel::Warn`].
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Logs a [`LogLevel::Start`] marker.
    pub fn start(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Start, message);
    }

    /// Logs a [`LogLevel::End`] marker.
    pub fn end(&self, message: impl AsRef<str>) {
        self.log(LogLevel::End, message);
    }

    fn append(&self, at: DateTime<Utc>, level: LogLevel, message: &str) -> io::Result<()> {
        let path = self.path_for(at);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = self.open_day_file(&path, at)?;
        writeln!(
            file,
            "{}Z [{:<5}] {}",
            at.format("%Y-%m-%d %H:%M:%S"),
            level.as_str(),
            message
        )
    }

    fn open_day_file(&self, path: &Path, at: DateTime<Utc>) -> io::Result<File> {
        match OpenOptions::new().append(true).create_new(true).open(path) {
            Ok(mut file) => {
                self.write_header(&mut file, at)?;
                Ok(file)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                OpenOptions::new().append(true).open(path)
            }
            Err(err) => Err(err),
        }
    }

    fn write_header(&self, file: &mut File, at: DateTime<Utc>) -> io::Result<()> {
        let rule = "#".repeat(60);
        writeln!(file, "{rule}")?;
        writeln!(file, "# Application : {}", self.app)?;
        writeln!(file, "# Created     : {} UTC", at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "# Host        : {}", self.host)?;
        writeln!(file, "{rule}")
    }
}
