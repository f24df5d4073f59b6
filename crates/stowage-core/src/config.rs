// Rust guideline compliant 2026-10-12

//! Configuration management for Stowage.

use crate::models::RetentionThreshold;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the file archival pipeline as read from file and environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSection {
    /// Root of the file tree to scan.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Directory receiving finished archives.
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Archive file name prefix and log identifier.
    #[serde(default)]
    pub app_name: Option<String>,

    /// Retention threshold in days.
    #[serde(default = "default_keep_days")]
    pub keep_days: u32,

    /// Volume or directory hosting the staging area.
    #[serde(default)]
    pub compress_drive: Option<PathBuf>,
}

/// Settings for the structured logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Root of the date-partitioned log tree.
    #[serde(default = "default_log_folder")]
    pub folder: PathBuf,

    /// Console verbosity (env-filter syntax).
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Settings for the event-log backup loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogSection {
    /// Identifier used for the event-log run's own log files.
    #[serde(default = "default_event_log_app")]
    pub app_name: String,

    /// Hosts to back up.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Log names to copy from every host.
    #[serde(default = "default_event_logs")]
    pub logs: Vec<String>,

    /// Directory receiving copied logs.
    #[serde(default)]
    pub destination: Option<PathBuf>,

    /// Whether to clear a remote log after a verified copy.
    #[serde(default)]
    pub clear_after_copy: bool,

    /// Remote log directory; `{host}` is replaced with the host name.
    #[serde(default = "default_share_template")]
    pub share_template: String,
}

/// Configuration for Stowage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File archival settings.
    #[serde(default)]
    pub archive: ArchiveSection,

    /// Structured logger settings.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Event-log backup settings.
    #[serde(default)]
    pub event_logs: EventLogSection,
}

fn default_keep_days() -> u32 {
    RetentionThreshold::DEFAULT_DAYS
}

/// Fixed operational log root.
fn default_log_folder() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\ProgramData\Stowage\Logs")
    } else {
        PathBuf::from("/var/log/stowage")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_event_log_app() -> String {
    "EventLogBackup".to_string()
}

fn default_event_logs() -> Vec<String> {
    vec![
        "Application".to_string(),
        "System".to_string(),
        "Security".to_string(),
    ]
}

fn default_share_template() -> String {
    r"\\{host}\admin$\System32\winevt\Logs".to_string()
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            app_name: None,
            keep_days: default_keep_days(),
            compress_drive: None,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            folder: default_log_folder(),
            level: default_log_level(),
        }
    }
}

impl Default for EventLogSection {
    fn default() -> Self {
        Self {
            app_name: default_event_log_app(),
            hosts: Vec::new(),
            logs: default_event_logs(),
            destination: None,
            clear_after_copy: false,
            share_template: default_share_template(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. The TOML file at `path`, when given
    /// 3. Environment variables with `STOWAGE_` prefix
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` is given but the file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - An environment variable holds an unparsable value
    /// - Configuration values fail validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `STOWAGE_SOURCE` - Archive source root
    /// - `STOWAGE_DESTINATION` - Archive destination
    /// - `STOWAGE_APP_NAME` - Archive name prefix
    /// - `STOWAGE_KEEP_DAYS` - Retention threshold in days
    /// - `STOWAGE_COMPRESS_DRIVE` - Staging volume
    /// - `STOWAGE_LOG_FOLDER` - Structured logger root
    /// - `STOWAGE_CLEAR_AFTER_COPY` - Clear remote event logs (true/false)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("STOWAGE_SOURCE") {
            self.archive.source = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("STOWAGE_DESTINATION") {
            self.archive.destination = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("STOWAGE_APP_NAME") {
            self.archive.app_name = Some(val);
        }

        if let Ok(val) = std::env::var("STOWAGE_KEEP_DAYS") {
            self.archive.keep_days = val.parse().map_err(|_| {
                Error::InvalidConfig("STOWAGE_KEEP_DAYS must be a positive number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("STOWAGE_COMPRESS_DRIVE") {
            self.archive.compress_drive = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("STOWAGE_LOG_FOLDER") {
            self.logging.folder = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("STOWAGE_CLEAR_AFTER_COPY") {
            self.event_logs.clear_after_copy = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "STOWAGE_CLEAR_AFTER_COPY must be true or false".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates values that do not depend on which pipeline will run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - keep_days is zero
    /// - the log folder is empty
    pub fn validate(&self) -> Result<()> {
        if self.archive.keep_days == 0 {
            return Err(Error::InvalidConfig(
                "keep_days must be greater than 0".to_string(),
            ));
        }

        if self.logging.folder.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "logging.folder cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization fails
    /// - The file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Validated settings for one file archival run.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveConfig {
    /// Root of the file tree to scan.
    pub source: PathBuf,
    /// Directory receiving finished archives.
    pub destination: PathBuf,
    /// Archive file name prefix and log identifier.
    pub app_name: String,
    /// Retention threshold.
    pub keep: RetentionThreshold,
    /// Explicit staging volume, or `None` for the source's own volume.
    pub staging_volume: Option<PathBuf>,
    /// Root of the structured log tree.
    pub log_folder: PathBuf,
}

impl TryFrom<&Config> for ArchiveConfig {
    type Error = Error;

    fn try_from(config: &Config) -> Result<Self> {
        config.validate()?;
        let section = &config.archive;

        let source = section
            .source
            .clone()
            .ok_or_else(|| Error::InvalidConfig("archive.source is required".to_string()))?;
        let destination = section.destination.clone().ok_or_else(|| {
            Error::InvalidConfig("archive.destination is required".to_string())
        })?;
        let app_name = section
            .app_name
            .clone()
            .ok_or_else(|| Error::InvalidConfig("archive.app_name is required".to_string()))?;

        validate_app_name(&app_name)?;

        if source.as_os_str().is_empty() || destination.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "archive.source and archive.destination cannot be empty".to_string(),
            ));
        }
        if source == destination {
            return Err(Error::InvalidConfig(
                "archive.destination must differ from archive.source".to_string(),
            ));
        }
        // Lexical only; links and `..` are resolved when the run starts.
        if destination.starts_with(&source) {
            return Err(Error::InvalidConfig(
                "archive.destination cannot be inside archive.source".to_string(),
            ));
        }

        Ok(Self {
            source,
            destination,
            app_name,
            keep: RetentionThreshold::days(section.keep_days),
            staging_volume: section.compress_drive.clone(),
            log_folder: config.logging.folder.clone(),
        })
    }
}

/// Validated settings for one event-log backup run.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogConfig {
    /// Identifier for the run's own log files.
    pub app_name: String,
    /// Hosts to back up, in order.
    pub hosts: Vec<String>,
    /// Log names copied from every host.
    pub logs: Vec<String>,
    /// Directory receiving copied logs.
    pub destination: PathBuf,
    /// Whether to clear a remote log after a verified copy.
    pub clear_after_copy: bool,
    /// Remote log directory template.
    pub share_template: String,
    /// Root of the structured log tree.
    pub log_folder: PathBuf,
}

impl TryFrom<&Config> for EventLogConfig {
    type Error = Error;

    fn try_from(config: &Config) -> Result<Self> {
        config.validate()?;
        let section = &config.event_logs;

        validate_app_name(&section.app_name)?;
        let destination = section.destination.clone().ok_or_else(|| {
            Error::InvalidConfig("event_logs.destination is required".to_string())
        })?;
        if section.logs.is_empty() {
            return Err(Error::InvalidConfig(
                "event_logs.logs must name at least one log".to_string(),
            ));
        }
        for host in &section.hosts {
            validate_path_component("event_logs.hosts", host)?;
        }
        for log in &section.logs {
            validate_path_component("event_logs.logs", log)?;
        }
        if !section.share_template.contains("{host}") {
            return Err(Error::InvalidConfig(
                "event_logs.share_template must contain {host}".to_string(),
            ));
        }

        Ok(Self {
            app_name: section.app_name.clone(),
            hosts: section.hosts.clone(),
            logs: section.logs.clone(),
            destination,
            clear_after_copy: section.clear_after_copy,
            share_template: section.share_template.clone(),
            log_folder: config.logging.folder.clone(),
        })
    }
}

/// Checks that an application identifier is safe to embed in file names.
///
/// # Errors
///
/// Returns an error if the name is empty or contains characters outside
/// `[A-Za-z0-9._-]`.
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidConfig("app_name cannot be empty".to_string()));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(Error::InvalidConfig(format!(
            "app_name contains invalid character {:?}",
            bad
        )));
    }
    Ok(())
}

/// Checks that a host or log name names exactly one path component.
///
/// # Errors
///
/// Returns an error if the name is empty, contains a path separator, or
/// contains `..`.
fn validate_path_component(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidConfig(format!(
            "{field} cannot contain an empty name"
        )));
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(Error::InvalidConfig(format!(
            "{field} entry {name:?} must not contain path separators or '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("STOWAGE_SOURCE");
        std::env::remove_var("STOWAGE_DESTINATION");
        std::env::remove_var("STOWAGE_APP_NAME");
        std::env::remove_var("STOWAGE_KEEP_DAYS");
        std::env::remove_var("STOWAGE_COMPRESS_DRIVE");
        std::env::remove_var("STOWAGE_LOG_FOLDER");
        std::env::remove_var("STOWAGE_CLEAR_AFTER_COPY");
    }

    fn sample_config() -> Config {
        let mut config = Config::default();
        config.archive.source = Some(PathBuf::from("/data/app/logs"));
        config.archive.destination = Some(PathBuf::from("/mnt/archive/app"));
        config.archive.app_name = Some("Orders".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.archive.keep_days, 14);
        assert!(config.archive.source.is_none());
        assert!(config.archive.compress_drive.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.event_logs.logs.len(), 3);
        assert!(!config.event_logs.clear_after_copy);
    }

    #[test]
    fn test_config_load_without_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let config = Config::load(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_missing_named_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(Some(&temp_dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("stowage.toml");
        let content = r#"
[archive]
source = "/srv/app/logs"
destination = "/mnt/backup/app"
app_name = "Billing"
keep_days = 30

[logging]
folder = "/tmp/stowage-logs"

[event_logs]
hosts = ["dc01", "dc02"]
logs = ["System"]
destination = "/mnt/backup/events"
clear_after_copy = true
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.archive.keep_days, 30);
        assert_eq!(config.archive.app_name.as_deref(), Some("Billing"));
        assert_eq!(config.logging.folder, PathBuf::from("/tmp/stowage-logs"));
        assert_eq!(config.event_logs.hosts, vec!["dc01", "dc02"]);
        assert!(config.event_logs.clear_after_copy);
    }

    #[test]
    fn test_config_validation_zero_keep_days() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("stowage.toml");
        std::fs::write(&config_path, "[archive]\nkeep_days = 0\n").unwrap();

        assert!(Config::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_config_env_override_keep_days() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();

        std::env::set_var("STOWAGE_KEEP_DAYS", "90");
        let config = Config::load(None).unwrap();
        assert_eq!(config.archive.keep_days, 90);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_keep_days() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();

        std::env::set_var("STOWAGE_KEEP_DAYS", "fortnight");
        assert!(Config::load(None).is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("stowage.toml");
        std::fs::write(&config_path, "[archive]\napp_name = \"FromFile\"\n").unwrap();

        std::env::set_var("STOWAGE_APP_NAME", "FromEnv");
        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.archive.app_name.as_deref(), Some("FromEnv"));

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stowage.toml");

        let original = sample_config();
        original.save(&path).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_archive_config_requires_fields() {
        let mut config = sample_config();
        config.archive.app_name = None;
        assert!(ArchiveConfig::try_from(&config).is_err());

        let mut config = sample_config();
        config.archive.source = None;
        assert!(ArchiveConfig::try_from(&config).is_err());
    }

    #[test]
    fn test_archive_config_rejects_nested_destination() {
        let mut config = sample_config();
        config.archive.destination = Some(PathBuf::from("/data/app/logs/archive"));
        assert!(ArchiveConfig::try_from(&config).is_err());
    }

    #[test]
    fn test_archive_config_typed_values() {
        let config = sample_config();
        let typed = ArchiveConfig::try_from(&config).unwrap();
        assert_eq!(typed.keep, RetentionThreshold::days(14));
        assert_eq!(typed.app_name, "Orders");
        assert!(typed.staging_volume.is_none());
    }

    #[test]
    fn test_app_name_validation() {
        assert!(validate_app_name("Orders-Api_2.1").is_ok());
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("a/b").is_err());
        assert!(validate_app_name("has space").is_err());
    }

    #[test]
    fn test_event_log_config_requires_destination() {
        let config = Config::default();
        assert!(EventLogConfig::try_from(&config).is_err());

        let mut config = Config::default();
        config.event_logs.destination = Some(PathBuf::from("/mnt/events"));
        let typed = EventLogConfig::try_from(&config).unwrap();
        assert_eq!(typed.logs, vec!["Application", "System", "Security"]);
        assert!(typed.hosts.is_empty());
    }

    #[test]
    fn test_event_log_config_rejects_path_like_hosts() {
        let mut config = Config::default();
        config.event_logs.destination = Some(PathBuf::from("/mnt/events"));
        config.event_logs.hosts = vec!["web01".to_string()];
        assert!(EventLogConfig::try_from(&config).is_ok());

        for bad in ["..", "../etc", "web/01", "web\\01", "", "  "] {
            config.event_logs.hosts = vec!["web01".to_string(), bad.to_string()];
            let err = EventLogConfig::try_from(&config).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{bad:?} accepted");
        }

        config.event_logs.hosts = vec!["web01".to_string()];
        config.event_logs.logs = vec!["../System".to_string()];
        assert!(EventLogConfig::try_from(&config).is_err());
    }
}
