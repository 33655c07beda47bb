//! Platform-specific directory management
//!
//! Locates the per-user config directory holding the configuration overlay.
//! Follows XDG Base Directory Specification on Linux and standard locations on macOS.
//!
//! `BUILDSTACK_CONFIG_DIR` overrides the platform default.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::OVERLAY_FILE;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "BUILDSTACK_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "buildstack";

/// Platform-specific directory provider for buildstack
#[derive(Debug, Clone)]
pub struct BuildstackDirs {
    config_dir: PathBuf,
}

impl BuildstackDirs {
    /// Create a new `BuildstackDirs` instance
    ///
    /// Checks the environment variable first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/buildstack` or `~/.config/buildstack`
    /// - macOS: `~/Library/Application Support/buildstack`
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the default configuration overlay
    #[must_use]
    pub fn overlay_path(&self) -> PathBuf {
        self.config_dir.join(OVERLAY_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for BuildstackDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a leading `~/` to the user's home directory
///
/// Paths without the prefix, or when no home directory is known, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
