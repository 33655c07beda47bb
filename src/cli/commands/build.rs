//! Default command: dispatch the requested tasks

use anyhow::Result;

use crate::cli::commands::Workspace;
use crate::cli::output::{format_summary, print_task_listing, status};
use crate::cli::Cli;
use crate::core::orchestrator::{DispatchOutcome, FailurePolicy, Orchestrator, RunOptions};
use crate::error::BuildstackError;
use crate::infra::process::ProcessRunner;
use crate::infra::toolchain::Toolchain;
use crate::infra::vcs::VcsClient;

/// Run options derived from the command-line flags
pub fn run_options(cli: &Cli) -> RunOptions {
    RunOptions {
        build_only: cli.build_only,
        no_deps: cli.no_deps,
        reconfigure: cli.reconfigure,
        quiet: cli.quiet,
        policy: if cli.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        },
        jobs: cli.jobs.unwrap_or_else(num_cpus::get).max(1),
    }
}

/// Execute the requested tasks (or the default task)
pub fn execute(cli: &Cli, workspace: Workspace) -> Result<()> {
    let runner = ProcessRunner::new(cli.verbose > 0, !cli.quiet && cli.verbose == 0);
    let vcs = VcsClient::new(runner);
    let toolchain = Toolchain::new(workspace.manifest.toolchain.clone(), runner);

    let source_root = workspace.source_root;
    let prefix = workspace.prefix;
    let default_task = workspace.manifest.default_task().to_string();
    tracing::debug!(
        "Source root {}, prefix {}",
        source_root.display(),
        prefix.display()
    );

    let mut orchestrator = Orchestrator::new(workspace.graph, &vcs, &toolchain)
        .with_options(run_options(cli))
        .with_overlay(workspace.overlay)
        .with_source_root(source_root)
        .with_prefix(prefix)
        .with_default_task(default_task);

    let outcomes = orchestrator
        .dispatch_requested(&cli.tasks)
        .map_err(BuildstackError::from)?;

    for outcome in &outcomes {
        if let DispatchOutcome::UnknownTask(name) = outcome {
            eprintln!("{} Unknown task '{name}'", status::ERROR);
            print_task_listing(&orchestrator.list_tasks());
        }
    }

    if !cli.quiet {
        println!("{}", format_summary(orchestrator.reports()));
    }

    Ok(())
}
