// Rust guideline compliant 2026-10-15

//! Integration tests for archive building and job paths.

use chrono::{TimeZone, Utc};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use stowage_core::{
    build_archive, build_archive_onto, group_by_date, ArchiveJob, FileRecord, JobState, StagingArea, LocalFs,
};
use tempfile::TempDir;
use zip::{CompressionMethod, ZipArchive};

fn record(path: &Path) -> FileRecord {
    FileRecord::new(
        path.to_path_buf(),
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0).unwrap(),
    )
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_build_archive_contains_all_members_flattened() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let src = temp_dir.path().join("src");
    write(&src.join("a/first.log"), "first");
    write(&src.join("b/c/second.log"), "second");

    let buckets = group_by_date(vec![
        record(&src.join("a/first.log")),
        record(&src.join("b/c/second.log")),
    ]);
    assert_eq!(buckets.len(), 1);

    let target = temp_dir.path().join("App-20260301.zip");
    let built = build_archive(&buckets[0], &target).expect("build should succeed");
    assert_eq!(built.entries, 2);
    assert_eq!(built.bytes, fs::metadata(&target).unwrap().len());

    let mut zip = ZipArchive::new(File::open(&target).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["first.log", "second.log"]);

    let mut entry = zip.by_name("second.log").unwrap();
    assert_eq!(entry.compression(), CompressionMethod::Deflated);
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "second");
}

#[test]
fn test_build_archive_same_name_in_different_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let src = temp_dir.path().join("src");
    write(&src.join("east/app.log"), "east");
    write(&src.join("west/app.log"), "west");

    let buckets = group_by_date(vec![
        record(&src.join("west/app.log")),
        record(&src.join("east/app.log")),
    ]);
    let target = temp_dir.path().join("out.zip");
    build_archive(&buckets[0], &target).unwrap();

    let mut zip = ZipArchive::new(File::open(&target).unwrap()).unwrap();
    let mut east = String::new();
    zip.by_name("app.log").unwrap().read_to_string(&mut east).unwrap();
    let mut west = String::new();
    zip.by_name("app (2).log").unwrap().read_to_string(&mut west).unwrap();
    assert_eq!(east, "east");
    assert_eq!(west, "west");
}

#[test]
fn test_build_archive_overwrites_stale_target() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let src = temp_dir.path().join("src/one.log");
    write(&src, "fresh");
    let target = temp_dir.path().join("out.zip");
    fs::write(&target, vec![b'x'; 4096]).unwrap();

    let buckets = group_by_date(vec![record(&src)]);
    build_archive(&buckets[0], &target).unwrap();

    let zip = ZipArchive::new(File::open(&target).unwrap()).unwrap();
    assert_eq!(zip.len(), 1);
}

#[test]
fn test_build_archive_onto_carries_previous_entries() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("src/a/app.log");
    write(&first, "earlier run");
    let previous = temp_dir.path().join("previous.zip");
    build_archive(&group_by_date(vec![record(&first)])[0], &previous).unwrap();

    let second = temp_dir.path().join("src/b/app.log");
    let third = temp_dir.path().join("src/b/late.log");
    write(&second, "later run");
    write(&third, "late");
    let buckets = group_by_date(vec![record(&second), record(&third)]);
    let target = temp_dir.path().join("merged.zip");

    let built = build_archive_onto(&buckets[0], &target, Some(&previous)).unwrap();

    assert_eq!(built.entries, 3);
    assert_eq!(built.carried, 1);
    let mut zip = ZipArchive::new(File::open(&target).unwrap()).unwrap();
    let mut earlier = String::new();
    zip.by_name("app.log").unwrap().read_to_string(&mut earlier).unwrap();
    let mut later = String::new();
    zip.by_name("app (2).log").unwrap().read_to_string(&mut later).unwrap();
    assert_eq!(earlier, "earlier run");
    assert_eq!(later, "later run");
    assert!(zip.by_name("late.log").is_ok());
}

#[test]
fn test_build_archive_onto_rejects_unreadable_previous() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let src = temp_dir.path().join("src/one.log");
    write(&src, "data");
    let previous = temp_dir.path().join("previous.zip");
    fs::write(&previous, b"not a zip").unwrap();
    let target = temp_dir.path().join("out.zip");

    let buckets = group_by_date(vec![record(&src)]);
    assert!(build_archive_onto(&buckets[0], &target, Some(&previous)).is_err());
    assert!(!target.exists());
    assert_eq!(fs::read(&previous).unwrap(), b"not a zip");
}

#[test]
fn test_build_archive_failure_removes_partial_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let present = temp_dir.path().join("src/present.log");
    write(&present, "here");
    let missing = temp_dir.path().join("src/vanished.log");

    let buckets = group_by_date(vec![record(&present), record(&missing)]);
    let target = temp_dir.path().join("out.zip");

    assert!(build_archive(&buckets[0], &target).is_err());
    assert!(!target.exists());
    assert!(present.exists());
}

#[test]
fn test_archive_job_paths_and_state() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let staging = StagingArea::ensure(&LocalFs, temp_dir.path()).unwrap();
    let destination = temp_dir.path().join("dest");
    let buckets = group_by_date(vec![record(&temp_dir.path().join("x.log"))]);

    let mut job = ArchiveJob::new(buckets[0].clone(), "Orders", staging.path(), &destination);
    assert_eq!(job.archive_name(), "Orders-20260301.zip");
    assert_eq!(job.staging_path(), staging.archive_path("Orders-20260301.zip"));
    assert_eq!(job.final_path(), destination.join("Orders-20260301.zip"));
    assert_eq!(job.state(), JobState::Pending);
    assert!(!job.may_delete_sources());

    assert!(job.advance(JobState::Verified).is_err());
    job.advance(JobState::Staged).unwrap();
    job.advance(JobState::Compressed).unwrap();
    job.fail();
    assert_eq!(job.state(), JobState::Failed);
    assert!(!job.may_delete_sources());
}
