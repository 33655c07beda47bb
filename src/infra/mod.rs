//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, platform directories and external processes.
//! This module is the only place where child processes are spawned.

pub mod dirs;
pub mod filesystem;
pub mod process;
pub mod toolchain;
pub mod vcs;
