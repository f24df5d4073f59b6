// Rust guideline compliant 2026-10-14

//! Per-bucket archive builder.
//!
//! Each date bucket becomes exactly one zip file. Members are flattened to
//! the archive root; duplicate file names within a bucket receive a
//! ` (2)`, ` (3)`, ... suffix in member order. Compression favours speed.
//!
//! When an archive for the same date already exists at the destination its
//! entries are carried into the new archive unchanged, so a later run for an
//! already archived date never drops what an earlier run stored.

use crate::models::{DateBucket, FileRecord};
use crate::Result;
use chrono::{Datelike, Timelike};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Deflate level used for retention archives.
pub const FAST_COMPRESSION_LEVEL: i32 = 1;

/// Result of building one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltArchive {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Number of entries written, including carried ones.
    pub entries: usize,
    /// Number of entries carried over from a previous archive.
    pub carried: usize,
    /// Size of the finished archive in bytes.
    pub bytes: u64,
}

/// Compresses every member of `bucket` into a zip at `target`.
///
/// An existing file at `target` is replaced. If the build fails, whatever
/// was written to `target` is removed before the error is returned.
///
/// # Arguments
///
/// * `bucket` - Files to archive
/// * `target` - Output path, normally inside the staging area
///
/// # Errors
///
/// Returns an error if:
/// - The target cannot be created
/// - A member cannot be opened or read
/// - The zip writer fails
pub fn build_archive(bucket: &DateBucket, target: &Path) -> Result<BuiltArchive> {
    build_archive_onto(bucket, target, None)
}

/// Like [`build_archive`], but first copies every entry of `previous`.
///
/// Carried entries keep their names and compressed bytes. Bucket members
/// whose names collide with a carried entry get a numbered suffix.
///
/// # Errors
///
/// Returns an error if `previous` cannot be opened or is not a readable
/// zip, in addition to the errors of [`build_archive`].
pub fn build_archive_onto(
    bucket: &DateBucket,
    target: &Path,
    previous: Option<&Path>,
) -> Result<BuiltArchive> {
    match write_zip(bucket.members(), target, previous) {
        Ok((entries, carried)) => {
            let bytes = fs::metadata(target)?.len();
            Ok(BuiltArchive {
                path: target.to_path_buf(),
                entries,
                carried,
                bytes,
            })
        }
        Err(err) => {
            let _ = fs::remove_file(target);
            Err(err)
        }
    }
}

fn write_zip(
    members: &[FileRecord],
    target: &Path,
    previous: Option<&Path>,
) -> Result<(usize, usize)> {
    let file = File::create(target)?;
    let mut zip = ZipWriter::new(file);
    let mut taken: HashSet<String> = HashSet::new();

    let mut carried = 0;
    if let Some(previous) = previous {
        let mut old = ZipArchive::new(File::open(previous)?)?;
        for index in 0..old.len() {
            let entry = old.by_index_raw(index)?;
            taken.insert(entry.name().to_lowercase());
            zip.raw_copy_file(entry)?;
            carried += 1;
        }
    }

    let names = unique_names(&mut taken, members);
    for (member, name) in members.iter().zip(&names) {
        let mut source = File::open(&member.path)?;
        let size = source.metadata()?.len();
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(FAST_COMPRESSION_LEVEL))
            .last_modified_time(zip_time(member))
            .large_file(size > u64::from(u32::MAX));

        zip.start_file(name.as_str(), options)?;
        io::copy(&mut source, &mut zip)?;
    }

    let file = zip.finish()?;
    file.sync_all()?;
    Ok((carried + names.len(), carried))
}

fn zip_time(member: &FileRecord) -> zip::DateTime {
    let at = member.last_write;
    // Zip timestamps cannot represent years before 1980 or after 2107.
    zip::DateTime::from_date_and_time(
        u16::try_from(at.year()).unwrap_or(1980),
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second() as u8,
    )
    .unwrap_or_default()
}

/// Returns the flattened entry name for each member, in member order.
///
/// Names are compared case-insensitively so that archives extract cleanly
/// on case-insensitive filesystems.
pub fn entry_names(members: &[FileRecord]) -> Vec<String> {
    unique_names(&mut HashSet::new(), members)
}

/// Names members so that none collides with `taken` or with each other.
fn unique_names(taken: &mut HashSet<String>, members: &[FileRecord]) -> Vec<String> {
    let mut names = Vec::with_capacity(members.len());

    for member in members {
        let original = member.file_name();
        let mut candidate = original.clone();
        let mut counter = 2;
        while !taken.insert(candidate.to_lowercase()) {
            candidate = numbered(&original, counter);
            counter += 1;
        }
        names.push(candidate);
    }

    names
}

fn numbered(name: &str, counter: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], counter, &name[dot..]),
        _ => format!("{name} ({counter})"),
    }
}
