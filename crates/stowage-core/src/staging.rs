// Rust guideline compliant 2026-10-13

//! Local staging area for archive builds.
//!
//! Archives are compressed into a hidden directory on a local volume and then
//! moved to the destination in one operation, which is far faster than
//! compressing many small files straight onto a network share.

use crate::fsops::FileOps;
use crate::{Error, Result};
use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Name of the staging directory created on the staging volume.
pub const STAGING_DIR_NAME: &str = ".stowage-staging";

/// An existing staging directory, shared by all buckets of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Ensures the staging directory exists under `volume`, reusing it if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Staging`] if the directory cannot be created or a
    /// non-directory occupies its path. Callers treat this as fatal.
    pub fn ensure(fs: &dyn FileOps, volume: &Path) -> Result<Self> {
        let dir = volume.join(STAGING_DIR_NAME);

        if dir.exists() && !dir.is_dir() {
            return Err(Error::Staging {
                path: dir,
                source: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "staging path exists and is not a directory",
                ),
            });
        }

        fs.create_dir_all(&dir).map_err(|source| Error::Staging {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Returns the staging directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Returns the staged location of an archive named `file_name`.
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Returns the volume hosting the staging area when none is configured.
///
/// On paths with a drive or UNC prefix this is the volume root (`D:\`).
/// Without a prefix the parent of the source is used, which sits on the same
/// volume in every practical layout; a source with no parent stages under itself.
pub fn default_staging_volume(source: &Path) -> PathBuf {
    if let Some(Component::Prefix(prefix)) = source.components().next() {
        let mut root = PathBuf::from(prefix.as_os_str());
        root.push(MAIN_SEPARATOR.to_string());
        return root;
    }

    source
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| source.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsops::LocalFs;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_and_reuses() {
        let temp_dir = TempDir::new().unwrap();
        let first = StagingArea::ensure(&LocalFs, temp_dir.path()).unwrap();
        assert!(first.path().is_dir());
        assert_eq!(first.path(), temp_dir.path().join(STAGING_DIR_NAME));

        std::fs::write(first.archive_path("left-over.zip"), b"x").unwrap();
        let second = StagingArea::ensure(&LocalFs, temp_dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(second.archive_path("left-over.zip").exists());
    }

    #[test]
    fn test_ensure_fails_when_file_occupies_path() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STAGING_DIR_NAME), b"not a dir").unwrap();
        let result = StagingArea::ensure(&LocalFs, temp_dir.path());
        assert!(matches!(result, Err(Error::Staging { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_default_volume_is_parent_without_prefix() {
        assert_eq!(
            default_staging_volume(Path::new("/srv/app/logs")),
            PathBuf::from("/srv/app")
        );
        assert_eq!(default_staging_volume(Path::new("/")), PathBuf::from("/"));
    }

    #[cfg(windows)]
    #[test]
    fn test_default_volume_is_drive_root() {
        assert_eq!(
            default_staging_volume(Path::new(r"D:\Apps\Orders\Logs")),
            PathBuf::from(r"D:\")
        );
    }
}
