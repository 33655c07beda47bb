//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying spinners, status lines,
//! task listings and errors to the user.

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::orchestrator::{TaskAction, TaskListing, TaskReport};
use crate::error::BuildstackError;

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";

    /// Build step prefix
    pub const BUILD: &str = "→";
}

/// Render the task listing, one task per line
pub fn format_task_listing(listing: &[TaskListing]) -> String {
    listing.iter().map(|t| format!("  {t}\n")).collect()
}

/// Print the task listing to stdout
pub fn print_task_listing(listing: &[TaskListing]) {
    println!("Available tasks:");
    print!("{}", format_task_listing(listing));
}

/// Summarise what the run did
pub fn format_summary(reports: &[TaskReport]) -> String {
    let built = reports
        .iter()
        .filter(|r| matches!(r.action, TaskAction::Built { .. }))
        .count();
    let skipped = reports
        .iter()
        .filter(|r| r.action == TaskAction::Skipped)
        .count();
    format!(
        "{} Done: {built} built, {skipped} up to date",
        status::SUCCESS
    )
}

/// Render an error with its cause chain and a remediation hint where one applies
pub fn format_error(error: &anyhow::Error) -> String {
    let mut text = format!("{} Error: {error}\n", status::ERROR);
    for cause in error.chain().skip(1) {
        text.push_str(&format!("  caused by: {cause}\n"));
    }
    if let Some(hint) = hint_for(error) {
        text.push_str(&format!("  hint: {hint}\n"));
    }
    text
}

/// Print an error to stderr
pub fn display_error(error: &anyhow::Error) {
    eprint!("{}", format_error(error));
}

fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<BuildstackError>()? {
        BuildstackError::Manifest(_) => {
            Some("check the [[task]] entries in your manifest, or point --manifest at another file")
        }
        BuildstackError::Overlay(_) => {
            Some("the overlay must be a JSON object keyed by task name; fix it or move it aside")
        }
        BuildstackError::Graph(_) => {
            Some("every name in `depends` must be a declared task and dependencies may not loop")
        }
        BuildstackError::Orchestrator(_) => {
            Some("rerun with -v to see the external tool's output, or drop --strict to continue past failures")
        }
    }
}
