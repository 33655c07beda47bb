//! Error types for buildstack
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Task manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest not found at '{path}'. Create one or pass --manifest <PATH>")]
    NotFound { path: PathBuf },

    /// Failed to read manifest
    #[error("Failed to read manifest '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse manifest
    #[error("Failed to parse manifest '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Task declares a path but no repository
    #[error("Task '{task}' has a source path but no repository (git or svn required)")]
    MissingRepository { task: String },

    /// Task declares more than one repository
    #[error("Task '{task}' specifies multiple repositories (only one of git or svn allowed)")]
    MultipleRepositories { task: String },

    /// Task declares a repository but no path
    #[error("Task '{task}' has a repository but no source path")]
    MissingPath { task: String },

    /// Toolchain command is empty
    #[error("Toolchain step '{step}' has an empty command")]
    EmptyToolchainCommand { step: String },
}

/// Configuration overlay errors
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Failed to read overlay file
    #[error("Failed to read configuration overlay '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse overlay file
    #[error(
        "Malformed configuration overlay '{path}': {error}. \
         Fix the JSON syntax (keys are task names, values are objects such as \
         {{\"configure\": \"-DFOO=ON\"}}) or move the file aside"
    )]
    ParseError { path: PathBuf, error: String },
}

/// Task graph construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two tasks share a name
    #[error("Task '{name}' is declared more than once")]
    DuplicateTask { name: String },

    /// Dependency does not resolve to a declared task
    #[error("Missing dependency: '{dependency}' required by '{task}'")]
    MissingDependency { task: String, dependency: String },

    /// Circular dependency detected
    #[error("Dependency cycle detected: {}", cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Errors raised while executing tasks
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Filesystem failure while preparing a task
    #[error("Failed to prepare directories for task '{task}'")]
    Filesystem {
        task: String,
        #[source]
        source: FilesystemError,
    },

    /// External step failed under the strict failure policy
    #[error("Task '{task}': {step} failed\n{output}")]
    StepFailed {
        task: String,
        step: String,
        output: String,
    },
}

/// Top-level buildstack error type
#[derive(Error, Debug)]
pub enum BuildstackError {
    /// Manifest error
    #[error("Manifest error")]
    Manifest(#[from] ManifestError),

    /// Overlay error
    #[error("Configuration error")]
    Overlay(#[from] OverlayError),

    /// Graph error
    #[error("Task graph error")]
    Graph(#[from] GraphError),

    /// Execution error
    #[error("Execution error")]
    Orchestrator(#[from] OrchestratorError),
}
