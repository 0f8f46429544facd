//! `ecp5 build`: generate the I/O wrapper, constraints and scripts for a
//! target, then run yosys, nextpnr-ecp5 and ecppack.

use std::path::{Path, PathBuf};

use ecp5_config::{ProjectConfig, ResolvedTarget};
use ecp5_io::StandardFeatureCheck;
use ecp5_toolchain::{prepare, write_artifacts, BuildRequest, Platform, Toolchain, ToolchainError};

use crate::pipeline::load_project;
use crate::{BuildArgs, GlobalArgs};

/// Runs the `ecp5 build` command. Returns exit code 0 on success, 1 if a
/// tool stage failed.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (project_dir, mut config) = load_project(global)?;
    let project_dir = project_dir.canonicalize()?;
    ecp5_config::apply_process_env(&mut config.overrides)?;
    if global.verbose {
        config.overrides.verbose = true;
    }

    if !global.quiet {
        eprintln!("   Building {}", config.project.name);
    }

    let resolved = resolve_build_target(&config, args.target.as_deref())?;
    if !global.quiet {
        eprintln!(
            "    Target {} ({} {} speed {})",
            resolved.name, resolved.device, resolved.package, resolved.speed
        );
    }

    let request = BuildRequest::from_config(&config, &resolved, &project_dir);
    let plan = prepare(&request, &Platform::from_target(&resolved), &StandardFeatureCheck)?;
    let build_dir = determine_build_dir(&project_dir, &resolved.name, args.output_dir.as_deref());
    tracing::debug!(build_target = %resolved.name, build_dir = %build_dir.display(), "prepared build plan");

    if !global.quiet {
        eprintln!(
            "   Emitted {} resources, {} cells",
            plan.reports.len(),
            plan.design.cell_count()
        );
    }

    if args.emit_only {
        let written = write_artifacts(&plan, &build_dir)?;
        if !global.quiet {
            eprintln!("     Wrote {} files to {}", written.len(), build_dir.display());
        }
        return Ok(0);
    }

    let toolchain = Toolchain::new(resolved.toolchain.clone());
    match toolchain.run(&plan, &build_dir) {
        Ok(()) => {
            if !global.quiet {
                eprintln!(
                    "  Finished {}",
                    build_dir.join(format!("{}.bit", plan.name)).display()
                );
            }
            Ok(0)
        }
        Err(e @ ToolchainError::StageFailed { .. }) => {
            eprintln!("error: {e}");
            eprintln!(
                "  logs: {} and {}",
                build_dir.join(format!("{}.rpt", plan.name)).display(),
                build_dir.join(format!("{}.tim", plan.name)).display()
            );
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves the build target from the CLI flag or config.
///
/// If `--target` is specified, uses that. If only one target is defined in
/// the config, uses it automatically. Otherwise returns an error.
pub fn resolve_build_target(
    config: &ProjectConfig,
    cli_target: Option<&str>,
) -> Result<ResolvedTarget, Box<dyn std::error::Error>> {
    match cli_target {
        Some(name) => Ok(ecp5_config::resolve_target(config, name)?),
        None => {
            let target_names: Vec<_> = config.targets.keys().collect();
            match target_names.len() {
                0 => Err("no targets defined in ecp5.toml; add a [targets.<name>] section".into()),
                1 => Ok(ecp5_config::resolve_target(config, target_names[0])?),
                _ => Err(format!(
                    "multiple targets defined ({}); use --target to select one",
                    target_names
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
                .into()),
            }
        }
    }
}

/// Returns the directory generated files go to: `--output-dir` if given,
/// otherwise `build/<target>` under the project root.
pub fn determine_build_dir(
    project_dir: &Path,
    target_name: &str,
    cli_output_dir: Option<&str>,
) -> PathBuf {
    match cli_output_dir {
        Some(dir) => PathBuf::from(dir),
        None => project_dir.join("build").join(target_name),
    }
}
