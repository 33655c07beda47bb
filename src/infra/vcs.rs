//! Version control operations
//!
//! Drives the `git` and `svn` command-line clients. Whether an update brought
//! new content is read from the client's output.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::backend::{ExternalOutcome, VcsBackend};
use crate::core::source::VcsKind;
use crate::infra::process::ProcessRunner;

/// `git pull` when nothing was fetched ("Already up to date." or the older "Already up-to-date.")
fn git_current() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^Already up[ -]to[ -]date").expect("valid regex"))
}

/// `svn update` when the working copy was already at HEAD
fn svn_current() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^At revision \d+\.").expect("valid regex"))
}

/// `svn update` when new revisions arrived
fn svn_updated() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^Updated to revision \d+\.").expect("valid regex"))
}

/// Whether update output from `kind` reports new content
pub fn update_brought_changes(kind: VcsKind, output: &str) -> bool {
    match kind {
        VcsKind::Git => !git_current().is_match(output),
        VcsKind::Svn => svn_updated().is_match(output) || !svn_current().is_match(output),
    }
}

/// Command-line VCS client
#[derive(Debug, Clone, Copy, Default)]
pub struct VcsClient {
    runner: ProcessRunner,
}

impl VcsClient {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }

    fn materialize_args(kind: VcsKind, location: &str, target: &Path) -> Vec<String> {
        let verb = match kind {
            VcsKind::Git => "clone",
            VcsKind::Svn => "checkout",
        };
        vec![
            verb.to_string(),
            location.to_string(),
            target.display().to_string(),
        ]
    }

    fn refresh_args(kind: VcsKind) -> Vec<String> {
        match kind {
            VcsKind::Git => vec!["pull".to_string()],
            VcsKind::Svn => vec!["update".to_string()],
        }
    }
}

impl VcsBackend for VcsClient {
    fn materialize(&self, kind: VcsKind, location: &str, target: &Path) -> ExternalOutcome {
        tracing::info!("Fetching {location} into {}", target.display());
        let args = Self::materialize_args(kind, location, target);
        // The target exists (created empty by the caller); run from its parent
        let cwd = target.parent().unwrap_or(target);
        let outcome = self.runner.run(kind.command(), &args, cwd);
        ExternalOutcome {
            changed: true,
            ..outcome
        }
    }

    fn refresh(&self, kind: VcsKind, location: &str, target: &Path) -> ExternalOutcome {
        tracing::info!("Updating {location} in {}", target.display());
        let outcome = self.runner.run(kind.command(), &Self::refresh_args(kind), target);
        if !outcome.succeeded {
            return outcome;
        }
        let changed = update_brought_changes(kind, &outcome.output);
        ExternalOutcome { changed, ..outcome }
    }
}
