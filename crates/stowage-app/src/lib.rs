// Rust guideline compliant 2026-10-16

//! Application services for Stowage.
//!
//! This crate drives the two runs the binary offers: the file archival
//! pipeline and the event-log backup loop. It also owns run reports,
//! response envelopes and the mapping from results to exit codes.

pub mod error;
pub mod eventlog;
pub mod pipeline;
pub mod remote;
pub mod report;
pub mod response;
pub mod status;

pub use error::{AppError, ErrorCode, Result};
pub use eventlog::EventLogBackup;
pub use pipeline::ArchivePipeline;
pub use remote::{RemoteLogSource, ShareLogSource};
pub use report::{
    BucketOutcome, EventLogReport, FailedStage, HostReport, LogCopyOutcome, PlannedBucket,
    RunReport,
};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use status::RunStatus;
