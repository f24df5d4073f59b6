// Rust guideline compliant 2026-10-17

//! Implementation of the `stowage files` command.
//!
//! Archives aged files into one zip per last-write date, moves each archive
//! to the destination and deletes the sources once it is verified there.

use super::{open_logger, ArchiveOverrides};
use crate::output::OutputFormatter;
use anyhow::Result;
use stowage_app::{AppError, ArchivePipeline, RunStatus};
use stowage_core::{ArchiveConfig, Config};

/// Runs the file archival pipeline.
///
/// # Arguments
///
/// * `config` - Configuration loaded from file and environment
/// * `overrides` - Command-line overrides
/// * `formatter` - Output formatter
///
/// # Returns
///
/// The run status; bucket and file failures yield [`RunStatus::Partial`].
///
/// # Errors
///
/// Returns an error if:
/// - The merged configuration is invalid
/// - The log folder cannot be created
/// - The run aborts on an unusable path, staging area or scan
pub fn execute(
    mut config: Config,
    overrides: &ArchiveOverrides,
    formatter: &dyn OutputFormatter,
) -> Result<RunStatus> {
    overrides.apply(&mut config);
    let archive = ArchiveConfig::try_from(&config).map_err(AppError::from)?;
    let logger = open_logger(&archive.log_folder, &archive.app_name)?;

    let report = ArchivePipeline::new(&archive, &logger).run()?;

    println!("{}", formatter.format_run_report(&report));
    Ok(RunStatus::completed(report.is_clean()))
}
