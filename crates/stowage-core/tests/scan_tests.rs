// Rust guideline compliant 2026-10-15

//! Integration tests for the eligible-file scanner.

use chrono::{Duration, Utc};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use stowage_core::{scan_eligible, RetentionThreshold, STAGING_DIR_NAME};
use tempfile::TempDir;

/// Writes a file and backdates its modification time by `age_days`.
fn write_aged(path: &Path, age_days: i64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent");
    }
    fs::write(path, b"log line\n").expect("Failed to write file");
    let modified = SystemTime::now() - Duration::days(age_days).to_std().unwrap();
    File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file")
        .set_times(FileTimes::new().set_modified(modified))
        .expect("Failed to set mtime");
}

fn scanned_paths(root: &Path, keep_days: u32) -> Vec<PathBuf> {
    scan_eligible(root, RetentionThreshold::days(keep_days), Utc::now())
        .map(|r| r.expect("scan should succeed").path)
        .collect()
}

#[test]
fn test_only_aged_files_are_yielded() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_aged(&root.join("old.log"), 20);
    write_aged(&root.join("fresh.log"), 5);
    write_aged(&root.join("nested/deeper/old2.log"), 30);

    let paths = scanned_paths(root, 14);

    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&root.join("old.log")));
    assert!(paths.contains(&root.join("nested/deeper/old2.log")));
}

#[test]
fn test_directories_are_never_yielded() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir_all(temp_dir.path().join("empty/sub")).unwrap();

    assert!(scanned_paths(temp_dir.path(), 1).is_empty());
}

#[test]
fn test_staging_directory_is_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_aged(&root.join(STAGING_DIR_NAME).join("App-20200101.zip"), 40);
    write_aged(&root.join("kept/old.log"), 40);

    let paths = scanned_paths(root, 14);
    assert_eq!(paths, vec![root.join("kept/old.log")]);
}

#[test]
fn test_explicit_exclusion_is_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_aged(&root.join("skip/old.log"), 40);
    write_aged(&root.join("take/old.log"), 40);

    let paths: Vec<_> = scan_eligible(root, RetentionThreshold::days(14), Utc::now())
        .excluding(root.join("skip"))
        .map(|r| r.unwrap().path)
        .collect();
    assert_eq!(paths, vec![root.join("take/old.log")]);
}

#[test]
fn test_last_write_time_is_reported_in_utc() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("old.log");
    write_aged(&path, 20);

    let record = scan_eligible(temp_dir.path(), RetentionThreshold::days(14), Utc::now())
        .next()
        .expect("one record")
        .expect("scan ok");
    let age = Utc::now() - record.last_write;
    assert!(age > Duration::days(19) && age < Duration::days(21));
}

#[test]
fn test_missing_root_is_a_scan_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut scan = scan_eligible(
        &temp_dir.path().join("does-not-exist"),
        RetentionThreshold::days(14),
        Utc::now(),
    );
    assert!(matches!(scan.next(), Some(Err(_))));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_excluded() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path().join("src");
    let outside = temp_dir.path().join("outside.log");
    write_aged(&outside, 40);
    fs::create_dir_all(&root).unwrap();
    std::os::unix::fs::symlink(&outside, root.join("link.log")).unwrap();

    assert!(scanned_paths(&root, 14).is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_subtree_aborts_scan() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let locked = temp_dir.path().join("locked");
    write_aged(&locked.join("old.log"), 40);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits, so only assert when the lock is effective.
    let effective = fs::read_dir(&locked).is_err();
    let results: Vec<_> =
        scan_eligible(temp_dir.path(), RetentionThreshold::days(14), Utc::now()).collect();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    if effective {
        assert!(results.iter().any(|r| r.is_err()));
    }
}
