//! Task manifest (buildstack.toml) parsing and validation
//!
//! The manifest is the static declaration of the task graph together with
//! the directories and toolchain commands the build uses.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::defaults;
use crate::core::graph::TaskGraph;
use crate::core::source::SourceProvider;
use crate::core::task::Task;
use crate::error::{BuildstackError, ManifestError};
use crate::infra::dirs::expand_home;
use crate::infra::filesystem;

/// Parsed manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Directory and default task settings
    #[serde(default)]
    pub settings: Settings,

    /// Commands for the build phase
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Task declarations, in declaration order
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskDecl>,
}

/// `[settings]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Root directory holding every task's checkout
    pub source_root: Option<String>,

    /// Install prefix passed to the toolchain
    pub install_prefix: Option<String>,

    /// Task dispatched when none is named
    pub default_task: Option<String>,
}

/// `[toolchain]` section
///
/// Arguments may contain `{source}`, `{build}`, `{prefix}`, `{jobs}` and `{task}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainConfig {
    #[serde(default = "default_configure")]
    pub configure: Vec<String>,

    #[serde(default = "default_compile")]
    pub compile: Vec<String>,

    #[serde(default = "default_install")]
    pub install: Vec<String>,
}

fn to_owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

fn default_configure() -> Vec<String> {
    to_owned_args(defaults::CONFIGURE_COMMAND)
}

fn default_compile() -> Vec<String> {
    to_owned_args(defaults::COMPILE_COMMAND)
}

fn default_install() -> Vec<String> {
    to_owned_args(defaults::INSTALL_COMMAND)
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            configure: default_configure(),
            compile: default_compile(),
            install: default_install(),
        }
    }
}

impl ToolchainConfig {
    /// Reject steps with no command
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (step, command) in [
            ("configure", &self.configure),
            ("compile", &self.compile),
            ("install", &self.install),
        ] {
            if command.is_empty() {
                return Err(ManifestError::EmptyToolchainCommand {
                    step: step.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// One `[[task]]` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDecl {
    /// Unique task name
    pub name: String,

    /// Checkout path relative to the source root; absent for meta-tasks
    pub path: Option<String>,

    /// Git repository URL
    pub git: Option<String>,

    /// Subversion repository URL
    pub svn: Option<String>,

    /// Names of tasks that must run first
    #[serde(default)]
    pub depends: Vec<String>,

    /// Default configure arguments for this task
    #[serde(default)]
    pub configure_args: Vec<String>,
}

impl TaskDecl {
    /// Convert the declaration into a task
    pub fn to_task(&self) -> Result<Task, ManifestError> {
        let provider = match (&self.git, &self.svn) {
            (Some(_), Some(_)) => {
                return Err(ManifestError::MultipleRepositories {
                    task: self.name.clone(),
                })
            }
            (Some(url), None) => Some(SourceProvider::git(url.clone())),
            (None, Some(url)) => Some(SourceProvider::svn(url.clone())),
            (None, None) => None,
        };

        let task = match (&self.path, provider) {
            (Some(path), Some(provider)) => {
                Task::with_source(&self.name, path, provider, self.depends.clone())
            }
            (Some(_), None) => {
                return Err(ManifestError::MissingRepository {
                    task: self.name.clone(),
                })
            }
            (None, Some(_)) => {
                return Err(ManifestError::MissingPath {
                    task: self.name.clone(),
                })
            }
            (None, None) => Task::meta(&self.name, self.depends.clone()),
        };

        Ok(task.with_configure_args(self.configure_args.clone()))
    }
}

impl Manifest {
    /// Parse a manifest from TOML content
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = filesystem::read_file(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let manifest = Self::from_toml(&content).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        manifest.toolchain.validate()?;
        Ok(manifest)
    }

    /// Name of the aggregate task dispatched when none is named
    pub fn default_task(&self) -> &str {
        self.settings
            .default_task
            .as_deref()
            .unwrap_or(defaults::DEFAULT_TASK)
    }

    /// Source root, resolved against `base_dir` when relative
    pub fn source_root(&self, base_dir: &Path) -> PathBuf {
        resolve_dir(
            base_dir,
            self.settings
                .source_root
                .as_deref()
                .unwrap_or(defaults::DEFAULT_SOURCE_ROOT),
        )
    }

    /// Install prefix, resolved against `base_dir` when relative
    pub fn install_prefix(&self, base_dir: &Path) -> PathBuf {
        resolve_dir(
            base_dir,
            self.settings
                .install_prefix
                .as_deref()
                .unwrap_or(defaults::DEFAULT_INSTALL_PREFIX),
        )
    }

    /// Build and validate the task graph
    ///
    /// When the default task is not declared, a meta-task of that name
    /// depending on every declared task is appended.
    pub fn task_graph(&self) -> Result<TaskGraph, BuildstackError> {
        let mut tasks = self
            .tasks
            .iter()
            .map(TaskDecl::to_task)
            .collect::<Result<Vec<_>, _>>()?;

        let default_task = self.default_task();
        if !tasks.iter().any(|t| t.name() == default_task) {
            let everything = tasks.iter().map(|t| t.name().to_string()).collect();
            tasks.push(Task::meta(default_task, everything));
        }

        Ok(TaskGraph::new(tasks)?)
    }
}

fn resolve_dir(base_dir: &Path, value: &str) -> PathBuf {
    let path = expand_home(value);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
