//! CLI command implementations
//!
//! Both commands start from a [`Workspace`]: the manifest, its validated task
//! graph and the configuration overlay, all loaded before any task runs.

pub mod build;
pub mod list;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::core::graph::TaskGraph;
use crate::core::manifest::Manifest;
use crate::core::overlay::ConfigOverlay;
use crate::error::BuildstackError;
use crate::infra::dirs::BuildstackDirs;

/// Everything loaded at startup
#[derive(Debug)]
pub struct Workspace {
    pub manifest: Manifest,
    pub graph: TaskGraph,
    pub overlay: ConfigOverlay,
    /// Absolute source root
    pub source_root: PathBuf,
    /// Absolute install prefix
    pub prefix: PathBuf,
}

impl Workspace {
    /// Load manifest, task graph and overlay
    ///
    /// Any failure here is fatal: nothing has run yet. Directories are made
    /// absolute since build steps run from inside each build directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let manifest = Manifest::load(&cli.manifest).map_err(BuildstackError::from)?;
        let graph = manifest.task_graph()?;
        tracing::info!(
            "Loaded {} tasks from {}",
            graph.iter().count(),
            cli.manifest.display()
        );

        let overlay_path = cli
            .config
            .clone()
            .unwrap_or_else(|| BuildstackDirs::new().overlay_path());
        let overlay = ConfigOverlay::load_from_path(&overlay_path).map_err(BuildstackError::from)?;

        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let base_dir = match cli.manifest.parent() {
            Some(parent) => cwd.join(parent),
            None => cwd.clone(),
        };

        // Command-line paths are relative to where we were invoked, manifest
        // paths to the manifest
        let source_root = match &cli.source_root {
            Some(path) => cwd.join(path),
            None => manifest.source_root(&base_dir),
        };
        let prefix = match &cli.prefix {
            Some(path) => cwd.join(path),
            None => manifest.install_prefix(&base_dir),
        };

        Ok(Self {
            manifest,
            graph,
            overlay,
            source_root,
            prefix,
        })
    }
}
