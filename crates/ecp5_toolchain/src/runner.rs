//! Running a build plan with the installed tools.

use crate::error::ToolchainError;
use crate::plan::BuildPlan;
use crate::stages::{CommandStage, StageKind};
use ecp5_config::ToolchainPaths;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// Locates the `yosys`, `nextpnr-ecp5` and `ecppack` executables and runs
/// build stages with them.
///
/// A tool is looked up in this order: the explicit path from the
/// `[toolchain]` section, the tool's environment variable (`YOSYS`,
/// `NEXTPNR_ECP5`, `ECPPACK`), then `PATH`.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    paths: ToolchainPaths,
}

impl Toolchain {
    /// Creates a toolchain with the given explicit tool paths.
    pub fn new(paths: ToolchainPaths) -> Self {
        Self { paths }
    }

    fn configured(&self, kind: StageKind) -> Option<&Path> {
        match kind {
            StageKind::Synthesize => self.paths.yosys.as_deref(),
            StageKind::PlaceAndRoute => self.paths.nextpnr_ecp5.as_deref(),
            StageKind::Pack => self.paths.ecppack.as_deref(),
        }
    }

    /// Locates the executable for `kind`, reading environment variables
    /// through `env`.
    pub fn locate_with<F>(&self, kind: StageKind, env: F) -> Result<PathBuf, ToolchainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let candidate: PathBuf = match self.configured(kind) {
            Some(path) => path.to_path_buf(),
            None => match env(kind.env_var()).filter(|v| !v.is_empty()) {
                Some(value) => PathBuf::from(value),
                None => PathBuf::from(kind.tool()),
            },
        };
        which::which(&candidate).map_err(|e| ToolchainError::ToolNotFound {
            tool: kind.tool().to_string(),
            reason: format!("{}: {e}", candidate.display()),
        })
    }

    /// Locates the executable for `kind` using the process environment.
    pub fn locate(&self, kind: StageKind) -> Result<PathBuf, ToolchainError> {
        self.locate_with(kind, |name| std::env::var(name).ok())
    }

    /// Builds the command for `stage`, to be run in `build_dir`.
    pub fn command(&self, stage: &CommandStage, build_dir: &Path) -> Result<Command, ToolchainError> {
        let program = self.locate(stage.kind)?;
        let mut cmd = Command::new(program);
        cmd.args(&stage.args).current_dir(build_dir);
        Ok(cmd)
    }

    /// Writes the plan's files and runs its stages in order.
    ///
    /// The first stage that fails stops the build; later stages are not run
    /// and nothing is retried.
    pub fn run(&self, plan: &BuildPlan, build_dir: &Path) -> Result<(), ToolchainError> {
        write_artifacts(plan, build_dir)?;
        for stage in &plan.stages {
            let mut cmd = self.command(stage, build_dir)?;
            tracing::info!(stage = %stage.kind, command = %stage.command_line(), "starting stage");
            let start = Instant::now();
            let status = cmd.status().map_err(|source| ToolchainError::Spawn {
                tool: stage.kind.tool().to_string(),
                source,
            })?;
            if !status.success() {
                tracing::warn!(stage = %stage.kind, %status, "stage failed");
                return Err(ToolchainError::StageFailed {
                    stage: stage.kind,
                    status,
                });
            }
            tracing::info!(
                stage = %stage.kind,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "finished stage"
            );
        }
        Ok(())
    }
}

/// Writes every generated file of `plan` into `build_dir`, creating it if
/// needed, and returns the written paths.
pub fn write_artifacts(plan: &BuildPlan, build_dir: &Path) -> Result<Vec<PathBuf>, ToolchainError> {
    std::fs::create_dir_all(build_dir).map_err(|source| ToolchainError::Write {
        path: build_dir.display().to_string(),
        source,
    })?;
    let mut written = Vec::with_capacity(plan.files.len());
    for (name, contents) in &plan.files {
        let path = build_dir.join(name);
        std::fs::write(&path, contents).map_err(|source| ToolchainError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}
