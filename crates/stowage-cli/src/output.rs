// Rust guideline compliant 2026-10-17

//! Output formatting for the Stowage CLI.
//!
//! Every command result is rendered either as a human summary or as a JSON
//! envelope for machine consumption.

use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use stowage_app::{
    AppError, BucketOutcome, ErrorCode, ErrorEnvelope, EventLogReport, LogCopyOutcome,
    PlannedBucket, RunReport, SuccessEnvelope,
};

/// Output formatter trait.
///
/// Defines how command results are presented.
pub trait OutputFormatter {
    /// Formats the result of a file archival run.
    fn format_run_report(&self, report: &RunReport) -> String;

    /// Formats the buckets a dry run would archive.
    fn format_plan(&self, plan: &[PlannedBucket]) -> String;

    /// Formats the result of an event-log backup run.
    fn format_event_log_report(&self, report: &EventLogReport) -> String;

    /// Formats a notice that has no structured payload, such as `init`.
    fn format_notice(&self, action: &'static str, message: &str) -> String;

    /// Formats an error that aborted a command.
    ///
    /// # Arguments
    ///
    /// * `error` - The error chain returned by the command
    fn format_error(&self, error: &anyhow::Error) -> String;
}

/// JSON output formatter.
///
/// Wraps every payload in a success or error envelope.
pub struct JsonFormatter;

impl JsonFormatter {
    fn envelope<T: Serialize>(action: &'static str, result: T, clean: bool) -> String {
        to_json(&SuccessEnvelope::new(action, result, clean))
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| json!({ "status": "error", "message": err.to_string() }).to_string())
}

impl OutputFormatter for JsonFormatter {
    fn format_run_report(&self, report: &RunReport) -> String {
        Self::envelope("files", report, report.is_clean())
    }

    fn format_plan(&self, plan: &[PlannedBucket]) -> String {
        Self::envelope("plan", plan, true)
    }

    fn format_event_log_report(&self, report: &EventLogReport) -> String {
        Self::envelope("eventlogs", report, report.is_clean())
    }

    fn format_notice(&self, action: &'static str, message: &str) -> String {
        Self::envelope(action, json!({ "message": message }), true)
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        let envelope = match error.downcast_ref::<AppError>() {
            Some(app_error) => ErrorEnvelope::from_error(app_error),
            None => ErrorEnvelope {
                status: "error",
                code: ErrorCode::Unknown,
                message: format!("{error:#}"),
                details: None,
            },
        };
        to_json(&envelope)
    }
}

/// Plain-text output formatter for terminals and scheduled-task logs.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_run_report(&self, report: &RunReport) -> String {
        let mut out = String::new();
        for bucket in &report.buckets {
            match bucket {
                BucketOutcome::Archived {
                    date_key,
                    archive,
                    members,
                    deleted,
                    delete_failures,
                } => {
                    let _ = writeln!(
                        out,
                        "{date_key}  archived  {members} file(s) -> {} ({deleted} deleted)",
                        archive.display()
                    );
                    for path in delete_failures {
                        let _ = writeln!(out, "          not deleted: {}", path.display());
                    }
                }
                BucketOutcome::Failed {
                    date_key,
                    members,
                    stage,
                    reason,
                    ..
                } => {
                    let _ = writeln!(
                        out,
                        "{date_key}  FAILED    {members} file(s) kept, {stage:?}: {reason}"
                    );
                }
            }
        }
        let _ = write!(out, "{}", report.summary());
        out
    }

    fn format_plan(&self, plan: &[PlannedBucket]) -> String {
        if plan.is_empty() {
            return "Dry run: nothing is old enough to archive.".to_string();
        }

        let mut out = String::from("Dry run: archives to create:\n");
        for bucket in plan {
            let _ = writeln!(
                out,
                "- {} ({} file(s))",
                bucket.archive_name,
                bucket.files.len()
            );
        }
        let total: usize = plan.iter().map(|b| b.files.len()).sum();
        let _ = write!(out, "{} archive(s), {total} file(s)", plan.len());
        out
    }

    fn format_event_log_report(&self, report: &EventLogReport) -> String {
        let mut out = String::new();
        for host in &report.hosts {
            if !host.reachable {
                let _ = writeln!(out, "{}: unreachable", host.host);
                continue;
            }
            for outcome in &host.logs {
                let line = match outcome {
                    LogCopyOutcome::Copied { log, copy } => {
                        format!("{log} copied to {}", copy.display())
                    }
                    LogCopyOutcome::Cleared { log, copy } => {
                        format!("{log} copied to {} and cleared", copy.display())
                    }
                    LogCopyOutcome::ClearFailed { log, copy, reason } => {
                        format!("{log} copied to {}, clear failed: {reason}", copy.display())
                    }
                    LogCopyOutcome::Missing { log } => format!("{log} not found"),
                    LogCopyOutcome::Failed { log, reason } => format!("{log} FAILED: {reason}"),
                };
                let _ = writeln!(out, "{}: {line}", host.host);
            }
        }
        let _ = write!(out, "{}", report.summary());
        out
    }

    fn format_notice(&self, _action: &'static str, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("Error: {error:#}")
    }
}

/// Creates a formatter for the selected output mode.
pub fn create_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}
