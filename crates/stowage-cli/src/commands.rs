// Rust guideline compliant 2026-10-17

//! Command implementations for the Stowage CLI.

pub mod eventlogs;
pub mod files;
pub mod init;
pub mod plan;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use stowage_app::AppError;
use stowage_core::{Config, RunLogger, SystemClock};

/// Archive settings that override the config file and environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ArchiveOverrides {
    /// Root of the file tree to archive
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory receiving the archives
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Archive name prefix and log identifier
    #[arg(long)]
    pub app_name: Option<String>,

    /// Minimum age in days before a file is archived (at least 1)
    #[arg(long)]
    pub keep_days: Option<u32>,

    /// Volume to build archives on before moving them
    #[arg(long)]
    pub compress_drive: Option<PathBuf>,

    /// Root folder for run logs
    #[arg(long)]
    pub log_folder: Option<PathBuf>,
}

impl ArchiveOverrides {
    /// Applies the overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.archive.source = Some(source.clone());
        }
        if let Some(destination) = &self.destination {
            config.archive.destination = Some(destination.clone());
        }
        if let Some(app_name) = &self.app_name {
            config.archive.app_name = Some(app_name.clone());
        }
        if let Some(keep_days) = self.keep_days {
            config.archive.keep_days = keep_days;
        }
        if let Some(drive) = &self.compress_drive {
            config.archive.compress_drive = Some(drive.clone());
        }
        if let Some(folder) = &self.log_folder {
            config.logging.folder = folder.clone();
        }
    }
}

/// Event-log settings that override the config file and environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EventLogOverrides {
    /// Host to back up (repeatable); replaces the configured host list
    #[arg(long = "host")]
    pub hosts: Vec<String>,

    /// Log name to copy (repeatable); replaces the configured log list
    #[arg(long = "log")]
    pub logs: Vec<String>,

    /// Directory receiving copied logs
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Clear each remote log after a verified copy
    #[arg(long)]
    pub clear: bool,

    /// Root folder for run logs
    #[arg(long)]
    pub log_folder: Option<PathBuf>,
}

impl EventLogOverrides {
    /// Applies the overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if !self.hosts.is_empty() {
            config.event_logs.hosts = self.hosts.clone();
        }
        if !self.logs.is_empty() {
            config.event_logs.logs = self.logs.clone();
        }
        if let Some(destination) = &self.destination {
            config.event_logs.destination = Some(destination.clone());
        }
        if self.clear {
            config.event_logs.clear_after_copy = true;
        }
        if let Some(folder) = &self.log_folder {
            config.logging.folder = folder.clone();
        }
    }
}

/// Loads configuration from an optional file and the environment.
///
/// # Errors
///
/// Returns an error if the named file is missing or invalid, or an
/// environment override cannot be parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    Ok(Config::load(path)?)
}

/// Opens the structured run logger on the system clock.
///
/// # Errors
///
/// Returns an error if the app name is invalid or the log folder cannot be
/// created.
pub fn open_logger(folder: &Path, app_name: &str) -> Result<RunLogger, AppError> {
    Ok(RunLogger::new(folder, app_name, Arc::new(SystemClock))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_overrides_replace_only_given_fields() {
        let mut config = Config::default();
        config.archive.keep_days = 30;
        let overrides = ArchiveOverrides {
            source: Some(PathBuf::from("/data/logs")),
            app_name: Some("Orders".to_string()),
            ..ArchiveOverrides::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.archive.source, Some(PathBuf::from("/data/logs")));
        assert_eq!(config.archive.app_name.as_deref(), Some("Orders"));
        assert_eq!(config.archive.keep_days, 30);
        assert_eq!(config.archive.destination, None);
    }

    #[test]
    fn test_event_log_overrides_replace_lists() {
        let mut config = Config::default();
        let overrides = EventLogOverrides {
            hosts: vec!["dc01".to_string()],
            clear: true,
            ..EventLogOverrides::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.event_logs.hosts, vec!["dc01".to_string()]);
        assert_eq!(config.event_logs.logs.len(), 3);
        assert!(config.event_logs.clear_after_copy);
    }
}
