//! Core business logic module
//!
//! Task declarations, the task graph and its execution. External tools are
//! reached only through the traits in [`backend`].
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (buildstack.toml) parsing and validation
//! - [`overlay`] - User configuration overlay (per-task configure overrides)
//! - [`source`] - Source providers (Git and Subversion locations)
//! - [`task`] - Task declarations and per-run state
//! - [`graph`] - Validated task graph
//! - [`backend`] - Seams to the VCS and build tools
//! - [`orchestrator`] - Dependency traversal, skip decision and build phase

pub mod backend;
pub mod graph;
pub mod manifest;
pub mod orchestrator;
pub mod overlay;
pub mod source;
pub mod task;
