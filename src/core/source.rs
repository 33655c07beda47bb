//! Source providers
//!
//! A [`SourceProvider`] names one version-controlled location. It is immutable
//! once declared and delegates the actual checkout work to a [`VcsBackend`].

use std::fmt;
use std::path::Path;

use crate::core::backend::{ExternalOutcome, VcsBackend};

/// Version control flavor of a source location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    /// Git: clone, then pull
    Git,
    /// Subversion: checkout, then update
    Svn,
}

impl VcsKind {
    /// Name of the command-line tool
    pub fn command(&self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A fetchable source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProvider {
    location: String,
    kind: VcsKind,
}

impl SourceProvider {
    /// Create a provider for `location`
    pub fn new(kind: VcsKind, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }

    /// Git provider
    pub fn git(location: impl Into<String>) -> Self {
        Self::new(VcsKind::Git, location)
    }

    /// Subversion provider
    pub fn svn(location: impl Into<String>) -> Self {
        Self::new(VcsKind::Svn, location)
    }

    /// Repository endpoint
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Version control flavor
    pub fn kind(&self) -> VcsKind {
        self.kind
    }

    /// Fetch into the freshly created, empty `target`
    ///
    /// A fresh checkout always counts as new content, so `changed` is forced
    /// to true whatever the backend reports.
    pub fn materialize(&self, vcs: &dyn VcsBackend, target: &Path) -> ExternalOutcome {
        tracing::debug!("Materializing {} ({}) into {}", self.location, self.kind, target.display());
        let outcome = vcs.materialize(self.kind, &self.location, target);
        ExternalOutcome {
            changed: true,
            ..outcome
        }
    }

    /// Update the existing checkout at `target`
    ///
    /// A failed update reports no change.
    pub fn refresh(&self, vcs: &dyn VcsBackend, target: &Path) -> ExternalOutcome {
        tracing::debug!("Refreshing {} ({}) in {}", self.location, self.kind, target.display());
        let outcome = vcs.refresh(self.kind, &self.location, target);
        if outcome.succeeded {
            outcome
        } else {
            ExternalOutcome {
                changed: false,
                ..outcome
            }
        }
    }
}

impl fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.kind, self.location)
    }
}
