//! `--list`: print the declared tasks

use crate::cli::commands::Workspace;
use crate::cli::output::print_task_listing;
use crate::core::orchestrator::list_tasks;

/// Print every task in declaration order
pub fn execute(workspace: &Workspace) {
    print_task_listing(&list_tasks(&workspace.graph));
}
