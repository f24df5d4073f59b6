// Rust guideline compliant 2026-10-17

//! Stowage CLI Application
//!
//! Command-line interface for archiving aged files and backing up remote
//! event logs.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stowage_app::{AppError, RunStatus};
use stowage_cli::commands::{self, init::DEFAULT_CONFIG_FILE};
use stowage_cli::{create_formatter, telemetry, ArchiveOverrides, EventLogOverrides, OutputFormatter};
use stowage_core::Config;

#[derive(Parser, Debug)]
#[command(
    name = "stowage",
    version,
    about = "Stowage: verified archival of aged files and remote event logs",
    long_about = "Stowage compresses aged files into one zip per day, moves each archive to its destination and deletes the sources only once the archive is verified there. It also copies event logs from remote hosts.",
    after_help = "Examples:\n  stowage init\n  stowage plan --source /srv/orders/logs --destination /mnt/archive --app-name Orders\n  stowage files --config stowage.toml --keep-days 30\n  stowage eventlogs --host dc01 --host dc02 --destination /mnt/eventlogs --clear\n"
)]
struct Cli {
    /// Emit JSON envelopes on stdout and JSON log lines on stderr
    #[arg(long, global = true)]
    json: bool,

    /// Console log filter, e.g. `info` or `stowage=debug`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Exit with code 3 when a completed run logged any failure
    #[arg(long, global = true)]
    strict: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "STOWAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Archive aged files by date and delete verified sources
    Files {
        #[command(flatten)]
        overrides: ArchiveOverrides,
    },

    /// Show which archives `files` would create
    Plan {
        #[command(flatten)]
        overrides: ArchiveOverrides,
    },

    /// Copy event logs from remote hosts
    Eventlogs {
        #[command(flatten)]
        overrides: EventLogOverrides,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let strict = cli.strict;
    let json = cli.json;
    let formatter = create_formatter(json);

    match run(cli, formatter.as_ref()) {
        Ok(status) => ExitCode::from(status.exit_code(strict)),
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            if json {
                println!("{}", formatter.format_error(&err));
            } else {
                eprintln!("{}", formatter.format_error(&err));
            }
            ExitCode::from(RunStatus::Fatal.exit_code(strict))
        }
    }
}

fn run(cli: Cli, formatter: &dyn OutputFormatter) -> anyhow::Result<RunStatus> {
    match cli.command {
        Commands::Init { force } => {
            telemetry::init(&telemetry::directive(cli.log_level.as_deref(), None), cli.json);
            let path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            commands::init::execute(&path, force, formatter)
        }
        Commands::Files { overrides } => {
            let config = load_config(cli.config.as_deref(), cli.log_level.as_deref(), cli.json)?;
            commands::files::execute(config, &overrides, formatter)
        }
        Commands::Plan { overrides } => {
            let config = load_config(cli.config.as_deref(), cli.log_level.as_deref(), cli.json)?;
            commands::plan::execute(config, &overrides, formatter)
        }
        Commands::Eventlogs { overrides } => {
            let config = load_config(cli.config.as_deref(), cli.log_level.as_deref(), cli.json)?;
            commands::eventlogs::execute(config, &overrides, formatter)
        }
    }
}

/// Loads configuration and installs the console subscriber.
///
/// The subscriber is installed even when loading fails so that the failure
/// is reported with the requested verbosity.
fn load_config(
    path: Option<&Path>,
    log_level: Option<&str>,
    json: bool,
) -> Result<Config, AppError> {
    match commands::load_config(path) {
        Ok(config) => {
            telemetry::init(
                &telemetry::directive(log_level, Some(&config.logging.level)),
                json,
            );
            Ok(config)
        }
        Err(err) => {
            telemetry::init(&telemetry::directive(log_level, None), json);
            Err(err)
        }
    }
}
