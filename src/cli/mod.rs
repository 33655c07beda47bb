//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults;

/// Buildstack - fetch, configure, build and install a stack of source components
///
/// Runs the named tasks (or the default aggregate task) after all of their
/// dependencies, skipping the build of any task whose source did not change.
#[derive(Parser, Debug)]
#[command(name = "buildstack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tasks to run (defaults to the manifest's default task)
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Skip source sync and only build
    #[arg(short, long)]
    pub build_only: bool,

    /// Run only the named tasks, not their dependencies
    #[arg(short = 'n', long)]
    pub no_deps: bool,

    /// Remove existing build output and configure again
    #[arg(short, long)]
    pub reconfigure: bool,

    /// Stream external tool output (-v), also enable debug logs (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// List the declared tasks and exit
    #[arg(short, long)]
    pub list: bool,

    /// Stop at the first failed external step
    #[arg(long)]
    pub strict: bool,

    /// Task manifest
    #[arg(short, long, env = defaults::ENV_MANIFEST, default_value = defaults::MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Directory holding the source checkouts
    #[arg(short, long, env = defaults::ENV_SOURCE_ROOT)]
    pub source_root: Option<PathBuf>,

    /// Install prefix
    #[arg(long, env = defaults::ENV_PREFIX)]
    pub prefix: Option<PathBuf>,

    /// Compile parallelism (defaults to the number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Configuration overlay (JSON, per-task configure overrides)
    #[arg(short, long, env = defaults::ENV_OVERLAY)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let workspace = commands::Workspace::load(&self)?;

        if self.list {
            commands::list::execute(&workspace);
            return Ok(());
        }

        // The run is a chain of blocking child processes
        tokio::task::spawn_blocking(move || commands::build::execute(&self, workspace)).await?
    }
}
