//! Buildstack - local source build orchestrator
//!
//! Fetches or updates a component's source from version control, then
//! configures, compiles and installs it, after doing the same for every
//! component it depends on.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Task graph, manifest and orchestration logic
//! - [`infra`] - Infrastructure layer (filesystem, processes, VCS, toolchain)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
