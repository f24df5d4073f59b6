// Rust guideline compliant 2026-10-12

//! Stowage Core Library
//!
//! This crate provides the building blocks of the Stowage retention tools:
//! - Data models (FileRecord, DateBucket, RetentionThreshold)
//! - Configuration loading and validation
//! - Structured, date-partitioned run logging
//! - Eligible-file scanning and date bucketing
//! - Staging area management and per-bucket archive building
//! - The archive job state machine
//! - Filesystem operations behind a replaceable trait

pub mod archive;
pub mod bucket;
pub mod clock;
pub mod config;
pub mod error;
pub mod fsops;
pub mod host;
pub mod job;
pub mod logger;
pub mod models;
pub mod scan;
pub mod staging;

pub use archive::{build_archive, build_archive_onto, BuiltArchive};
pub use bucket::{bucket_by_date, group_by_date};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ArchiveConfig, Config, EventLogConfig};
pub use error::{Error, Result};
pub use fsops::{FileOps, LocalFs};
pub use job::{ArchiveJob, JobState};
pub use logger::{LogLevel, RunLogger};
pub use models::{archive_file_name, DateBucket, DateKey, FileRecord, RetentionThreshold};
pub use scan::{scan_eligible, EligibleFiles};
pub use staging::{default_staging_volume, StagingArea, STAGING_DIR_NAME};
