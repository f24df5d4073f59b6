// Rust guideline compliant 2026-10-13

//! Filesystem collaborator used by the archival pipeline.
//!
//! The pipeline never touches `std::fs` for relocation or deletion directly;
//! it goes through [`FileOps`] so that failure paths can be exercised.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Directory, move, copy and delete operations.
pub trait FileOps {
    /// Creates a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Moves a file, renaming when possible and copying across volumes.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies a file, returning the number of bytes copied.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Removes a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Returns the length of `path` if it is an existing regular file.
    fn regular_file_len(&self, path: &Path) -> Option<u64>;
}

/// [`FileOps`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileOps for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        if from == to {
            return Ok(());
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(err),
            Err(_rename_err) => {
                // Different volume: copy beside the target, then swap it in.
                let partial = partial_path(to);
                if let Err(err) = copy_synced(from, &partial) {
                    let _ = fs::remove_file(&partial);
                    return Err(err);
                }
                if let Err(err) = replace(&partial, to) {
                    let _ = fs::remove_file(&partial);
                    return Err(err);
                }
                fs::remove_file(from)
            }
        }
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        copy_synced(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn regular_file_len(&self, path: &Path) -> Option<u64> {
        fs::symlink_metadata(path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

fn copy_synced(from: &Path, to: &Path) -> io::Result<u64> {
    let copied = fs::copy(from, to)?;
    File::open(to)?.sync_all()?;
    Ok(copied)
}

/// Renames `from` over `to`, removing an existing `to` first on platforms
/// where rename does not replace.
fn replace(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists || cfg!(windows) => {
            if to.exists() {
                fs::remove_file(to)?;
                fs::rename(from, to)
            } else {
                Err(err)
            }
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_file_same_volume() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("a.zip");
        let to = temp_dir.path().join("out").join("a.zip");
        fs::write(&from, b"payload").unwrap();

        LocalFs.move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"payload");
    }

    #[test]
    fn test_move_file_overwrites_existing_target() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("new.zip");
        let to = temp_dir.path().join("old.zip");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old contents").unwrap();

        LocalFs.move_file(&from, &to).unwrap();

        assert_eq!(fs::read(&to).unwrap(), b"new");
    }

    #[test]
    fn test_move_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = LocalFs.move_file(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("target"),
        );
        assert!(result.is_err());
        assert!(!temp_dir.path().join("target").exists());
    }

    #[test]
    fn test_regular_file_len() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("f");
        fs::write(&file, b"12345").unwrap();

        assert_eq!(LocalFs.regular_file_len(&file), Some(5));
        assert_eq!(LocalFs.regular_file_len(temp_dir.path()), None);
        assert_eq!(LocalFs.regular_file_len(&temp_dir.path().join("nope")), None);
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/dest/App-20260101.zip")),
            PathBuf::from("/dest/App-20260101.zip.partial")
        );
    }
}
