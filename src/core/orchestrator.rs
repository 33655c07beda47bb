//! Task execution
//!
//! The [`Orchestrator`] owns the validated [`TaskGraph`] and the per-run
//! state of every task. Dispatching a task runs its dependency closure
//! depth-first, each task at most once per run, then the task itself:
//! source sync, the skip decision, and configure/compile/install.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::cli::output::status;
use crate::config::defaults;
use crate::core::backend::{BuildBackend, BuildContext, BuildStep, ExternalOutcome, VcsBackend};
use crate::core::graph::TaskGraph;
use crate::core::overlay::ConfigOverlay;
use crate::core::task::{Task, TaskPhase, TaskState};
use crate::error::OrchestratorError;
use crate::infra::filesystem;

/// What to do when an external step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and continue; a failed refresh counts as "no change"
    #[default]
    Lenient,
    /// Abort the run on the first failed step
    Strict,
}

/// Run-wide switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip source sync entirely
    pub build_only: bool,
    /// Run only the requested tasks, not their dependencies
    pub no_deps: bool,
    /// Discard build output and configure again
    pub reconfigure: bool,
    /// Suppress status lines
    pub quiet: bool,
    /// Failure handling for external steps
    pub policy: FailurePolicy,
    /// Compile parallelism
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            build_only: false,
            no_deps: false,
            reconfigure: false,
            quiet: false,
            policy: FailurePolicy::default(),
            jobs: num_cpus::get(),
        }
    }
}

/// What happened to a task during the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Build phase ran; `configured` tells whether configure was part of it
    Built { configured: bool },
    /// Build phase skipped because the source did not change
    Skipped,
    /// Meta-task, nothing of its own to do
    Meta,
}

/// Record of one executed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: String,
    pub action: TaskAction,
}

/// Result of dispatching one requested name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Task and (unless suppressed) its dependencies ran or were already done
    Dispatched(String),
    /// No task with that name is declared
    UnknownTask(String),
}

/// One line of the task listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub name: String,
    pub dependencies: Vec<String>,
    /// Source location, `None` for meta-tasks
    pub source: Option<String>,
}

impl fmt::Display for TaskListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deps = if self.dependencies.is_empty() {
            "no dependencies".to_string()
        } else {
            self.dependencies.join(", ")
        };
        let source = self.source.as_deref().unwrap_or("meta task");
        write!(f, "{}: {deps} ({source})", self.name)
    }
}

/// Listing of every task in `graph`, in declaration order
pub fn list_tasks(graph: &TaskGraph) -> Vec<TaskListing> {
    graph
        .iter()
        .map(|task| TaskListing {
            name: task.name().to_string(),
            dependencies: task.dependencies().to_vec(),
            source: task.provider().map(ToString::to_string),
        })
        .collect()
}

/// Executes tasks from a [`TaskGraph`]
pub struct Orchestrator<'a> {
    graph: TaskGraph,
    vcs: &'a dyn VcsBackend,
    builder: &'a dyn BuildBackend,
    overlay: ConfigOverlay,
    options: RunOptions,
    source_root: PathBuf,
    prefix: PathBuf,
    default_task: String,
    states: HashMap<String, TaskState>,
    reports: Vec<TaskReport>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with default options, no overlay and relative directories
    pub fn new(graph: TaskGraph, vcs: &'a dyn VcsBackend, builder: &'a dyn BuildBackend) -> Self {
        Self {
            graph,
            vcs,
            builder,
            overlay: ConfigOverlay::default(),
            options: RunOptions::default(),
            source_root: PathBuf::from(defaults::DEFAULT_SOURCE_ROOT),
            prefix: PathBuf::from(defaults::DEFAULT_INSTALL_PREFIX),
            default_task: defaults::DEFAULT_TASK.to_string(),
            states: HashMap::new(),
            reports: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: ConfigOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    #[must_use]
    pub fn with_source_root(mut self, source_root: PathBuf) -> Self {
        self.source_root = source_root;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: PathBuf) -> Self {
        self.prefix = prefix;
        self
    }

    #[must_use]
    pub fn with_default_task(mut self, name: impl Into<String>) -> Self {
        self.default_task = name.into();
        self
    }

    /// Executed tasks in completion order
    pub fn reports(&self) -> &[TaskReport] {
        &self.reports
    }

    /// Current state of `name`; unknown or untouched tasks report the initial state
    pub fn task_state(&self, name: &str) -> TaskState {
        self.states.get(name).copied().unwrap_or_default()
    }

    /// Every task in declaration order
    pub fn list_tasks(&self) -> Vec<TaskListing> {
        list_tasks(&self.graph)
    }

    /// Dispatch each requested name in order, or the default task when none is given
    ///
    /// All dispatches share one execution guard, so overlapping requests run
    /// each task once.
    pub fn dispatch_requested(
        &mut self,
        names: &[String],
    ) -> Result<Vec<DispatchOutcome>, OrchestratorError> {
        if names.is_empty() {
            let default_task = self.default_task.clone();
            return Ok(vec![self.dispatch(&default_task)?]);
        }

        names.iter().map(|name| self.dispatch(name)).collect()
    }

    /// Dispatch a single task by name
    pub fn dispatch(&mut self, name: &str) -> Result<DispatchOutcome, OrchestratorError> {
        if !self.graph.contains(name) {
            tracing::warn!("Unknown task requested: {name}");
            return Ok(DispatchOutcome::UnknownTask(name.to_string()));
        }

        if self.options.build_only {
            tracing::info!("Dispatching {name} (build only)");
            self.build_requested(name)?;
        } else {
            tracing::info!("Dispatching {name}");
            self.run_task(name)?;
        }
        Ok(DispatchOutcome::Dispatched(name.to_string()))
    }

    /// Build phase of `name` alone: no sync, no dependency walk
    fn build_requested(&mut self, name: &str) -> Result<(), OrchestratorError> {
        if self.task_state(name).executed() {
            tracing::debug!("{name} already executed this run");
            return Ok(());
        }

        let Some(task) = self.graph.get(name).cloned() else {
            return Ok(());
        };
        self.build_and_install(&task)
    }

    fn run_task(&mut self, name: &str) -> Result<(), OrchestratorError> {
        if self.task_state(name).executed() {
            tracing::debug!("{name} already executed this run");
            return Ok(());
        }

        let Some(task) = self.graph.get(name).cloned() else {
            return Ok(());
        };

        self.ensure_dependencies(&task)?;

        if task.is_meta() {
            self.finish(&task, TaskAction::Meta);
            return Ok(());
        }

        self.sync_source(&task)?;
        self.build_and_install(&task)
    }

    fn ensure_dependencies(&mut self, task: &Task) -> Result<(), OrchestratorError> {
        if !self.options.no_deps {
            for dep in task.dependencies() {
                self.run_task(dep)?;
            }
        }
        self.state_mut(task.name())
            .advance(TaskPhase::DependenciesResolved);
        Ok(())
    }

    fn sync_source(&mut self, task: &Task) -> Result<(), OrchestratorError> {
        let (Some(path), Some(provider)) = (task.source_path(), task.provider()) else {
            return Ok(());
        };
        let target = self.source_root.join(path);

        let (step, outcome) = if target.exists() {
            ("refresh", provider.refresh(self.vcs, &target))
        } else {
            filesystem::create_dir_all(&target).map_err(|source| {
                OrchestratorError::Filesystem {
                    task: task.name().to_string(),
                    source,
                }
            })?;
            ("materialize", provider.materialize(self.vcs, &target))
        };
        self.check_outcome(task.name(), step, &outcome)?;

        tracing::info!(
            "{}: {step} {}",
            task.name(),
            if outcome.changed { "brought new content" } else { "found nothing new" }
        );

        let state = self.state_mut(task.name());
        state.source_changed = outcome.changed;
        state.advance(TaskPhase::SourceSynced);
        Ok(())
    }

    fn build_and_install(&mut self, task: &Task) -> Result<(), OrchestratorError> {
        let Some(path) = task.source_path() else {
            self.finish(task, TaskAction::Meta);
            return Ok(());
        };

        let source_changed = self.task_state(task.name()).source_changed;
        if !self.options.build_only && !self.options.reconfigure && !source_changed {
            self.notify(&format!(
                "{} Skipping {}: source unchanged",
                status::INFO,
                task.name()
            ));
            self.state_mut(task.name()).advance(TaskPhase::BuildDecided);
            self.finish(task, TaskAction::Skipped);
            return Ok(());
        }
        self.state_mut(task.name()).advance(TaskPhase::BuildDecided);

        let source_dir = self.source_root.join(path);
        let build_dir = source_dir.join(defaults::BUILD_SUBDIR);
        let fs_error = |source| OrchestratorError::Filesystem {
            task: task.name().to_string(),
            source,
        };

        if self.options.reconfigure {
            tracing::debug!("Removing {}", build_dir.display());
            filesystem::remove_dir_all(&build_dir).map_err(fs_error)?;
        }

        let needs_configure = !build_dir.exists();
        if needs_configure {
            filesystem::create_dir_all(&build_dir).map_err(fs_error)?;
        }

        self.notify(&format!("{} Building {}", status::BUILD, task.name()));
        let ctx = BuildContext {
            task: task.name().to_string(),
            source_dir,
            build_dir,
            prefix: self.prefix.clone(),
            jobs: self.options.jobs,
        };

        if needs_configure {
            let mut args = task.configure_args().to_vec();
            args.extend(self.overlay.configure_args(task.name()));
            self.run_step(BuildStep::Configure, &ctx, &args)?;
        }
        self.run_step(BuildStep::Compile, &ctx, &[])?;
        self.run_step(BuildStep::Install, &ctx, &[])?;

        self.finish(
            task,
            TaskAction::Built {
                configured: needs_configure,
            },
        );
        Ok(())
    }

    fn run_step(
        &self,
        step: BuildStep,
        ctx: &BuildContext,
        extra_args: &[String],
    ) -> Result<(), OrchestratorError> {
        tracing::info!("{}: {step} in {}", ctx.task, ctx.build_dir.display());
        let outcome = self.builder.run_step(step, ctx, extra_args);
        self.check_outcome(&ctx.task, &step.to_string(), &outcome)
    }

    fn check_outcome(
        &self,
        task: &str,
        step: &str,
        outcome: &ExternalOutcome,
    ) -> Result<(), OrchestratorError> {
        if outcome.succeeded {
            return Ok(());
        }

        match self.options.policy {
            FailurePolicy::Strict => Err(OrchestratorError::StepFailed {
                task: task.to_string(),
                step: step.to_string(),
                output: outcome.output.clone(),
            }),
            FailurePolicy::Lenient => {
                tracing::warn!("{task}: {step} failed, continuing");
                tracing::debug!("{task}: {step} output:\n{}", outcome.output);
                self.notify(&format!("{} {task}: {step} failed", status::WARNING));
                Ok(())
            }
        }
    }

    fn finish(&mut self, task: &Task, action: TaskAction) {
        self.state_mut(task.name()).advance(TaskPhase::Done);
        self.reports.push(TaskReport {
            name: task.name().to_string(),
            action,
        });
    }

    fn state_mut(&mut self, name: &str) -> &mut TaskState {
        self.states.entry(name.to_string()).or_default()
    }

    fn notify(&self, message: &str) {
        if !self.options.quiet {
            println!("{message}");
        }
    }
}
