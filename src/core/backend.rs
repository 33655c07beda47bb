//! Seams to the external tools
//!
//! The orchestrator never spawns processes itself. It talks to a
//! [`VcsBackend`] for source checkouts and a [`BuildBackend`] for the
//! configure, compile and install steps. [`crate::infra`] provides the real
//! implementations; tests substitute recording fakes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::source::VcsKind;

/// Result of one external operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalOutcome {
    /// Whether the process ran and exited successfully
    pub succeeded: bool,
    /// Whether the operation brought new content (only meaningful for source operations)
    pub changed: bool,
    /// Captured output (stdout followed by stderr)
    pub output: String,
}

impl ExternalOutcome {
    /// Successful outcome
    pub fn success(changed: bool, output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            changed,
            output: output.into(),
        }
    }

    /// Failed outcome; never reports a change
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            changed: false,
            output: output.into(),
        }
    }
}

/// Version-control operations
pub trait VcsBackend {
    /// First-time fetch of `location` into the empty directory `target`
    fn materialize(&self, kind: VcsKind, location: &str, target: &Path) -> ExternalOutcome;

    /// Update the existing checkout at `target`
    fn refresh(&self, kind: VcsKind, location: &str, target: &Path) -> ExternalOutcome;
}

/// Build phase steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    Configure,
    Compile,
    Install,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure => write!(f, "configure"),
            Self::Compile => write!(f, "compile"),
            Self::Install => write!(f, "install"),
        }
    }
}

/// Everything an external build step needs to know about the task it builds
///
/// Each invocation receives its working directory explicitly; the process
/// working directory is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Task being built
    pub task: String,
    /// Source checkout
    pub source_dir: PathBuf,
    /// Out-of-tree build directory, used as the working directory
    pub build_dir: PathBuf,
    /// Install prefix
    pub prefix: PathBuf,
    /// Compile parallelism
    pub jobs: usize,
}

/// Configure, compile and install operations
pub trait BuildBackend {
    /// Run `step` for the task described by `ctx`
    ///
    /// `extra_args` is only non-empty for [`BuildStep::Configure`].
    fn run_step(&self, step: BuildStep, ctx: &BuildContext, extra_args: &[String])
        -> ExternalOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_never_reports_change() {
        let outcome = ExternalOutcome::failure("boom");
        assert!(!outcome.succeeded);
        assert!(!outcome.changed);
        assert_eq!(outcome.output, "boom");
    }

    #[test]
    fn test_build_step_display() {
        assert_eq!(BuildStep::Configure.to_string(), "configure");
        assert_eq!(BuildStep::Compile.to_string(), "compile");
        assert_eq!(BuildStep::Install.to_string(), "install");
    }
}
