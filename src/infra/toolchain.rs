//! Toolchain invocation
//!
//! Runs the configure, compile and install commands declared in the
//! manifest's `[toolchain]` section, inside the task's build directory.

use crate::core::backend::{BuildBackend, BuildContext, BuildStep, ExternalOutcome};
use crate::core::manifest::ToolchainConfig;
use crate::infra::process::ProcessRunner;

/// Toolchain runner
#[derive(Debug, Clone)]
pub struct Toolchain {
    config: ToolchainConfig,
    runner: ProcessRunner,
}

impl Toolchain {
    pub fn new(config: ToolchainConfig, runner: ProcessRunner) -> Self {
        Self { config, runner }
    }

    fn template(&self, step: BuildStep) -> &[String] {
        match step {
            BuildStep::Configure => &self.config.configure,
            BuildStep::Compile => &self.config.compile,
            BuildStep::Install => &self.config.install,
        }
    }

    /// Full command line for `step`, placeholders substituted
    ///
    /// `extra_args` are appended after the declared arguments.
    pub fn command_line(
        &self,
        step: BuildStep,
        ctx: &BuildContext,
        extra_args: &[String],
    ) -> Vec<String> {
        self.template(step)
            .iter()
            .map(|arg| substitute(arg, ctx))
            .chain(extra_args.iter().cloned())
            .collect()
    }
}

fn substitute(arg: &str, ctx: &BuildContext) -> String {
    arg.replace("{source}", &ctx.source_dir.display().to_string())
        .replace("{build}", &ctx.build_dir.display().to_string())
        .replace("{prefix}", &ctx.prefix.display().to_string())
        .replace("{jobs}", &ctx.jobs.to_string())
        .replace("{task}", &ctx.task)
}

impl BuildBackend for Toolchain {
    fn run_step(
        &self,
        step: BuildStep,
        ctx: &BuildContext,
        extra_args: &[String],
    ) -> ExternalOutcome {
        let command = self.command_line(step, ctx, extra_args);
        let Some((program, args)) = command.split_first() else {
            return ExternalOutcome::failure(format!("No {step} command configured"));
        };
        self.runner.run(program, args, &ctx.build_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn context() -> BuildContext {
        BuildContext {
            task: "zlib".to_string(),
            source_dir: PathBuf::from("/src/zlib"),
            build_dir: PathBuf::from("/src/zlib/build"),
            prefix: PathBuf::from("/opt/stack"),
            jobs: 8,
        }
    }

    #[test]
    fn test_default_configure_line() {
        let toolchain = Toolchain::new(ToolchainConfig::default(), ProcessRunner::default());
        let line = toolchain.command_line(
            BuildStep::Configure,
            &context(),
            &["-DZLIB_COMPAT=ON".to_string()],
        );
        assert_eq!(
            line,
            [
                "cmake",
                "-DCMAKE_INSTALL_PREFIX=/opt/stack",
                "/src/zlib",
                "-DZLIB_COMPAT=ON"
            ]
        );
    }

    #[test]
    fn test_default_compile_uses_jobs() {
        let toolchain = Toolchain::new(ToolchainConfig::default(), ProcessRunner::default());
        let line = toolchain.command_line(BuildStep::Compile, &context(), &[]);
        assert_eq!(line, ["make", "-j8"]);
    }

    #[test]
    fn test_custom_toolchain_placeholders() {
        let config = ToolchainConfig {
            configure: vec!["meson".into(), "setup".into(), "{build}".into(), "{source}".into()],
            compile: vec!["ninja".into(), "-C".into(), "{build}".into()],
            install: vec!["echo".into(), "{task}".into()],
        };
        let toolchain = Toolchain::new(config, ProcessRunner::default());
        let ctx = context();

        assert_eq!(
            toolchain.command_line(BuildStep::Configure, &ctx, &[]),
            ["meson", "setup", "/src/zlib/build", "/src/zlib"]
        );
        assert_eq!(
            toolchain.command_line(BuildStep::Install, &ctx, &[]),
            ["echo", "zlib"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_step_runs_in_build_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = ToolchainConfig {
            configure: vec!["sh".into(), "-c".into(), "pwd > configured".into()],
            ..ToolchainConfig::default()
        };
        let toolchain = Toolchain::new(config, ProcessRunner::new(false, false));
        let ctx = BuildContext {
            build_dir: temp.path().to_path_buf(),
            ..context()
        };

        let outcome = toolchain.run_step(BuildStep::Configure, &ctx, &[]);
        assert!(outcome.succeeded, "configure failed: {}", outcome.output);
        assert!(temp.path().join("configured").exists());
    }
}
