// Rust guideline compliant 2026-10-17

//! Implementation of the `stowage eventlogs` command.
//!
//! Copies event logs from each host's administrative share and optionally
//! clears them once the copy is verified.

use super::{open_logger, EventLogOverrides};
use crate::output::OutputFormatter;
use anyhow::Result;
use stowage_app::{AppError, EventLogBackup, RunStatus, ShareLogSource};
use stowage_core::{Config, EventLogConfig};

/// Runs the event-log backup loop.
///
/// # Arguments
///
/// * `config` - Configuration loaded from file and environment
/// * `overrides` - Command-line overrides
/// * `formatter` - Output formatter
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log folder or
/// destination cannot be created, or the host list cannot be resolved.
pub fn execute(
    mut config: Config,
    overrides: &EventLogOverrides,
    formatter: &dyn OutputFormatter,
) -> Result<RunStatus> {
    overrides.apply(&mut config);
    let settings = EventLogConfig::try_from(&config).map_err(AppError::from)?;
    let logger = open_logger(&settings.log_folder, &settings.app_name)?;
    let source = ShareLogSource::from_config(&settings);

    let report = EventLogBackup::new(&settings, &logger, &source).run()?;

    println!("{}", formatter.format_event_log_report(&report));
    Ok(RunStatus::completed(report.is_clean()))
}
