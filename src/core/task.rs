//! Task declarations and per-run task state

use std::path::{Path, PathBuf};

use crate::core::source::SourceProvider;

/// A named build unit
///
/// A task without a source is a meta-task: it only groups dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    source: Option<TaskSource>,
    dependencies: Vec<String>,
    configure_args: Vec<String>,
}

/// Where a task's source lives and how to fetch it
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskSource {
    /// Path relative to the source root
    path: PathBuf,
    /// Repository the checkout comes from
    provider: SourceProvider,
}

impl Task {
    /// Declare a meta-task
    pub fn meta(name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            dependencies,
            configure_args: Vec::new(),
        }
    }

    /// Declare a task built from a source checkout at `path` under the source root
    pub fn with_source(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        provider: SourceProvider,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: Some(TaskSource {
                path: path.into(),
                provider,
            }),
            dependencies,
            configure_args: Vec::new(),
        }
    }

    /// Set default configure arguments
    #[must_use]
    pub fn with_configure_args(mut self, args: Vec<String>) -> Self {
        self.configure_args = args;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source path relative to the source root
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }

    pub fn provider(&self) -> Option<&SourceProvider> {
        self.source.as_ref().map(|s| &s.provider)
    }

    /// Dependency names in declaration order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn configure_args(&self) -> &[String] {
        &self.configure_args
    }

    /// Whether this task only groups dependencies
    pub fn is_meta(&self) -> bool {
        self.source.is_none()
    }
}

/// Progress of one task through a run
///
/// Phases only move forward within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TaskPhase {
    #[default]
    Unvisited,
    DependenciesResolved,
    SourceSynced,
    BuildDecided,
    Done,
}

/// Mutable per-run state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskState {
    /// Current phase
    pub phase: TaskPhase,
    /// Whether the last sync brought new content; assumed until a sync says otherwise
    pub source_changed: bool,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            phase: TaskPhase::Unvisited,
            source_changed: true,
        }
    }
}

impl TaskState {
    /// Whether the task's own work has completed this run
    pub fn executed(&self) -> bool {
        self.phase == TaskPhase::Done
    }

    /// Move to `phase`, never backwards
    pub fn advance(&mut self, phase: TaskPhase) {
        if phase > self.phase {
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_task_has_no_source() {
        let task = Task::meta("all", vec!["a".to_string()]);
        assert!(task.is_meta());
        assert!(task.source_path().is_none());
        assert!(task.provider().is_none());
        assert_eq!(task.dependencies(), ["a".to_string()]);
    }

    #[test]
    fn test_source_task_accessors() {
        let task = Task::with_source(
            "zlib",
            "libs/zlib",
            SourceProvider::git("https://example.com/zlib.git"),
            vec![],
        )
        .with_configure_args(vec!["-DZLIB_COMPAT=ON".to_string()]);

        assert!(!task.is_meta());
        assert_eq!(task.source_path(), Some(Path::new("libs/zlib")));
        assert_eq!(task.provider().unwrap().location(), "https://example.com/zlib.git");
        assert_eq!(task.configure_args(), ["-DZLIB_COMPAT=ON".to_string()]);
    }

    #[test]
    fn test_default_state_assumes_change() {
        let state = TaskState::default();
        assert_eq!(state.phase, TaskPhase::Unvisited);
        assert!(state.source_changed);
        assert!(!state.executed());
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut state = TaskState::default();
        state.advance(TaskPhase::SourceSynced);
        state.advance(TaskPhase::DependenciesResolved);
        assert_eq!(state.phase, TaskPhase::SourceSynced);

        state.advance(TaskPhase::Done);
        assert!(state.executed());
    }
}
