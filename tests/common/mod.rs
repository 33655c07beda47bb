//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory holding a manifest, a source root and an
/// isolated user configuration directory.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.create_dir("config");
        project
    }

    /// Create a project with `manifest` as its buildstack.toml
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::new();
        project.create_file("buildstack.toml", manifest);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the user overlay into the isolated configuration directory
    pub fn write_overlay(&self, content: &str) {
        self.create_file("config/overrides.json", content);
    }

    /// Install an executable shell script under `bin/`, which [`Self::run`]
    /// puts first on PATH
    #[cfg(unix)]
    pub fn install_tool(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("bin").join(name);
        self.create_file(&format!("bin/{name}"), script);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make tool executable");
    }

    /// Install a fake `git` client
    ///
    /// `clone` creates the target directory. `pull` reports new content once
    /// for every `.upstream-changed` marker left in the checkout.
    #[cfg(unix)]
    pub fn install_fake_git(&self) {
        self.install_tool("git", FAKE_GIT);
    }

    /// Mark the checkout at `path` (relative to the project) as having new upstream content
    pub fn push_upstream(&self, path: &str) {
        self.create_file(&format!("{path}/.upstream-changed"), "");
    }

    /// Run buildstack in the project directory with the configuration
    /// directory isolated from the real user's
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_buildstack"));
        cmd.current_dir(self.path())
            .env("BUILDSTACK_CONFIG_DIR", self.path().join("config"))
            .env_remove("BUILDSTACK_MANIFEST")
            .env_remove("BUILDSTACK_SOURCE_ROOT")
            .env_remove("BUILDSTACK_PREFIX")
            .env_remove("BUILDSTACK_OVERLAY")
            .env_remove("RUST_LOG")
            .env("PATH", search_path(&self.path().join("bin")));
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute buildstack")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

fn search_path(first: &Path) -> std::ffi::OsString {
    let mut dirs = vec![first.to_path_buf()];
    if let Some(path) = std::env::var_os("PATH") {
        dirs.extend(std::env::split_paths(&path));
    }
    std::env::join_paths(dirs).expect("Failed to build PATH")
}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const FAKE_GIT: &str = r#"#!/bin/sh
case "$1" in
  clone)
    mkdir -p "$3"
    echo "Cloning into '$3'..."
    ;;
  pull)
    if [ -f .upstream-changed ]; then
      rm .upstream-changed
      echo "Updating 1a2b3c4..5d6e7f8"
      echo "Fast-forward"
    else
      echo "Already up to date."
    fi
    ;;
  *)
    echo "unexpected git invocation: $*" >&2
    exit 1
    ;;
esac
"#;

/// Toolchain that records each step instead of building anything
///
/// Configure writes its arguments to `configure-args` in the build directory,
/// compile appends to `compile-log` there, and install appends the task name
/// to `<prefix>/installed`.
pub const RECORDING_TOOLCHAIN: &str = r#"
[toolchain]
configure = ["sh", "-c", 'echo "$@" > configure-args', "configure"]
compile = ["sh", "-c", "echo compiled >> compile-log"]
install = ["sh", "-c", 'mkdir -p "$1" && echo "$2" >> "$1/installed"', "install", "{prefix}", "{task}"]
"#;

/// Two git tasks, `app` depending on `zlib`, with the recording toolchain
pub fn two_task_manifest() -> String {
    format!(
        r#"
[settings]
source_root = "src"
install_prefix = "install"
{RECORDING_TOOLCHAIN}
[[task]]
name = "zlib"
path = "zlib"
git = "https://example.com/zlib.git"
configure_args = ["-DZLIB_COMPAT=ON"]

[[task]]
name = "app"
path = "app"
git = "https://example.com/app.git"
depends = ["zlib"]
"#
    )
}
