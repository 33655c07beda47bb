//! External process execution
//!
//! Runs a command to completion in an explicit working directory. In quiet
//! mode output is captured behind a spinner; in verbose mode stdout is echoed
//! line by line as it arrives (and still captured) while stderr goes straight
//! to the terminal. Exit status is reported, never acted upon, here.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::cli::output::create_spinner;
use crate::core::backend::ExternalOutcome;

/// Blocking process runner
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    /// Stream output instead of capturing it silently
    verbose: bool,
    /// Show a spinner while a captured command runs
    progress: bool,
}

impl ProcessRunner {
    pub fn new(verbose: bool, progress: bool) -> Self {
        Self { verbose, progress }
    }

    /// Run `program args...` in `cwd` and wait for it
    ///
    /// `changed` is always false; callers interpret the output.
    pub fn run(&self, program: &str, args: &[String], cwd: &Path) -> ExternalOutcome {
        if !program.contains(std::path::MAIN_SEPARATOR) && which::which(program).is_err() {
            return ExternalOutcome::failure(format!("'{program}' not found in PATH"));
        }

        tracing::debug!("Running {program} {} in {}", args.join(" "), cwd.display());

        let mut command = Command::new(program);
        command.args(args).current_dir(cwd).stdin(Stdio::null());

        if self.verbose {
            Self::run_streaming(command, program)
        } else {
            self.run_captured(command, program)
        }
    }

    fn run_captured(&self, mut command: Command, program: &str) -> ExternalOutcome {
        let spinner = self
            .progress
            .then(|| create_spinner(&format!("Running {program}...")));

        let result = command.output();

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                if output.status.success() {
                    ExternalOutcome::success(false, text)
                } else {
                    tracing::debug!("{program} exited with {}", output.status);
                    ExternalOutcome::failure(text)
                }
            }
            Err(e) => ExternalOutcome::failure(format!("Failed to run {program}: {e}")),
        }
    }

    fn run_streaming(mut command: Command, program: &str) -> ExternalOutcome {
        command.stdout(Stdio::piped()).stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return ExternalOutcome::failure(format!("Failed to run {program}: {e}")),
        };

        let mut captured = String::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                println!("{line}");
                captured.push_str(&line);
                captured.push('\n');
            }
        }

        match child.wait() {
            Ok(status) if status.success() => ExternalOutcome::success(false, captured),
            Ok(status) => {
                tracing::debug!("{program} exited with {status}");
                ExternalOutcome::failure(captured)
            }
            Err(e) => ExternalOutcome::failure(format!("Failed to wait for {program}: {e}")),
        }
    }
}
