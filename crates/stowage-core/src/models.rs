// Rust guideline compliant 2026-10-12

//! Core data models for Stowage.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A regular file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Absolute or source-rooted path of the file.
    pub path: PathBuf,
    /// Last-write time of the file in UTC.
    pub last_write: DateTime<Utc>,
}

impl FileRecord {
    /// Creates a new record.
    pub fn new(path: PathBuf, last_write: DateTime<Utc>) -> Self {
        Self { path, last_write }
    }

    /// Returns the calendar date key derived from the last-write time.
    ///
    /// Creation time is never consulted: copies and moves reset it while
    /// last-write time survives them.
    pub fn date_key(&self) -> DateKey {
        DateKey::from_timestamp(self.last_write)
    }

    /// Returns the final path component, used as the entry name inside an archive.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// UTC calendar date rendered as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Derives the key for a UTC timestamp.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// Wraps a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

/// Group of eligible files sharing one last-write date.
///
/// Every member's [`FileRecord::date_key`] equals the bucket key. Buckets are
/// only built by [`crate::bucket::bucket_by_date`], which upholds that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    key: DateKey,
    members: Vec<FileRecord>,
}

impl DateBucket {
    pub(crate) fn new(key: DateKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: FileRecord) {
        debug_assert_eq!(record.date_key(), self.key);
        self.members.push(record);
    }

    pub(crate) fn sort_members(&mut self) {
        self.members.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Returns the bucket's date key.
    pub fn key(&self) -> DateKey {
        self.key
    }

    /// Returns the bucket members ordered by path.
    pub fn members(&self) -> &[FileRecord] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the bucket has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if `path` is a member of this bucket.
    pub fn contains(&self, path: &Path) -> bool {
        self.members.iter().any(|member| member.path == path)
    }
}

/// Minimum age, in whole days, before a file may be archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetentionThreshold {
    days: u32,
}

impl RetentionThreshold {
    /// Default retention window in days.
    pub const DEFAULT_DAYS: u32 = 14;

    /// Creates a threshold of `days` days.
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    /// Returns the threshold in days.
    pub fn as_days(&self) -> u32 {
        self.days
    }

    /// Returns the threshold as a duration.
    pub fn as_duration(&self) -> Duration {
        Duration::days(i64::from(self.days))
    }

    /// Returns true if a file last written at `last_write` is strictly older
    /// than the threshold at `now`.
    pub fn is_eligible(&self, last_write: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(last_write) > self.as_duration()
    }
}

impl Default for RetentionThreshold {
    fn default() -> Self {
        Self::days(Self::DEFAULT_DAYS)
    }
}

/// Deterministic archive file name for an application and date.
///
/// # Arguments
///
/// * `app_name` - Application identifier used as the file name prefix
/// * `key` - Date key of the bucket
///
/// # Returns
///
/// A name of the form `{app_name}-{YYYYMMDD}.zip`.
pub fn archive_file_name(app_name: &str, key: DateKey) -> String {
    format!("{app_name}-{key}.zip")
}
