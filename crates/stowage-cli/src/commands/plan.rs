// Rust guideline compliant 2026-10-17

//! Implementation of the `stowage plan` command.
//!
//! Shows which archives `stowage files` would create, without writing any.

use super::{open_logger, ArchiveOverrides};
use crate::output::OutputFormatter;
use anyhow::Result;
use stowage_app::{AppError, ArchivePipeline, RunStatus};
use stowage_core::{ArchiveConfig, Config};

/// Lists the date buckets that are old enough to archive.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the source cannot be
/// scanned.
pub fn execute(
    mut config: Config,
    overrides: &ArchiveOverrides,
    formatter: &dyn OutputFormatter,
) -> Result<RunStatus> {
    overrides.apply(&mut config);
    let archive = ArchiveConfig::try_from(&config).map_err(AppError::from)?;
    let logger = open_logger(&archive.log_folder, &archive.app_name)?;

    let plan = ArchivePipeline::new(&archive, &logger).plan()?;

    println!("{}", formatter.format_plan(&plan));
    Ok(RunStatus::Clean)
}
