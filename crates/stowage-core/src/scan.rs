// Rust guideline compliant 2026-10-13

//! Eligible-file scanner.
//!
//! Walks a source tree lazily and yields the regular files whose last-write
//! time is older than the retention threshold. Any unreadable entry surfaces
//! as an error item; callers treat it as fatal.

use crate::models::{FileRecord, RetentionThreshold};
use crate::staging::STAGING_DIR_NAME;
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazy sequence of eligible files under one root.
///
/// Not restartable: build a new one with [`scan_eligible`] to rescan.
pub struct EligibleFiles {
    walker: walkdir::IntoIter,
    threshold: RetentionThreshold,
    now: DateTime<Utc>,
    excluded: Vec<PathBuf>,
}

/// Starts a scan of `root`.
///
/// # Arguments
///
/// * `root` - Source tree root
/// * `threshold` - Retention threshold; only strictly older files are yielded
/// * `now` - Reference instant for age computation
///
/// # Returns
///
/// An iterator of `Result<FileRecord>`. Symlinks and directories are never
/// yielded, and directories named like the staging area are not entered.
pub fn scan_eligible(
    root: &Path,
    threshold: RetentionThreshold,
    now: DateTime<Utc>,
) -> EligibleFiles {
    EligibleFiles {
        walker: WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter(),
        threshold,
        now,
        excluded: Vec::new(),
    }
}

impl EligibleFiles {
    /// Skips the subtree rooted at `path` (e.g. a staging area inside the source).
    #[must_use]
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded.push(path.into());
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == STAGING_DIR_NAME)
            || self.excluded.iter().any(|excluded| excluded == path)
    }
}

impl Iterator for EligibleFiles {
    type Item = Result<FileRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if entry.depth() > 0 && self.is_excluded(entry.path()) {
                    self.walker.skip_current_dir();
                }
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let modified = match entry.metadata() {
                Ok(meta) => match meta.modified() {
                    Ok(modified) => modified,
                    Err(err) => return Some(Err(err.into())),
                },
                Err(err) => return Some(Err(err.into())),
            };
            let last_write = DateTime::<Utc>::from(modified);

            if self.threshold.is_eligible(last_write, self.now) {
                return Some(Ok(FileRecord::new(entry.into_path(), last_write)));
            }
        }
    }
}
