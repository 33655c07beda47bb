//! User configuration overlay
//!
//! An optional JSON file mapping task names to per-task overrides:
//!
//! ```json
//! { "app": { "configure": "-DCMAKE_BUILD_TYPE=Debug -DWITH_DOCS=OFF" } }
//! ```
//!
//! A missing file means no overrides. A malformed file is fatal.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::OverlayError;
use crate::infra::filesystem;

/// Overrides for one task
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskOverride {
    /// Extra configure arguments, whitespace separated
    #[serde(default)]
    pub configure: Option<String>,
}

/// Per-task overrides keyed by task name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ConfigOverlay {
    tasks: HashMap<String, TaskOverride>,
}

impl ConfigOverlay {
    /// Load the overlay, returning an empty one if the file does not exist
    pub fn load_from_path(path: &Path) -> Result<Self, OverlayError> {
        if !path.exists() {
            tracing::debug!("No configuration overlay at {}", path.display());
            return Ok(Self::default());
        }

        let content = filesystem::read_file(path).map_err(|e| OverlayError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let overlay = Self::from_json(&content).map_err(|e| OverlayError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        tracing::info!(
            "Loaded configuration overlay from {} ({} tasks)",
            path.display(),
            overlay.tasks.len()
        );
        Ok(overlay)
    }

    /// Parse overlay JSON
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Extra configure arguments for `task`, split on whitespace
    pub fn configure_args(&self, task: &str) -> Vec<String> {
        self.tasks
            .get(task)
            .and_then(|o| o.configure.as_deref())
            .map(|s| s.split_whitespace().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}
