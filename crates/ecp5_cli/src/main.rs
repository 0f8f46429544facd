//! `ecp5`: build Lattice ECP5 bitstreams with yosys, nextpnr-ecp5 and ecppack.
//!
//! Provides `ecp5 build` to generate the I/O wrapper, constraints and scripts
//! for a target and run the toolchain, and `ecp5 devices` to list the
//! supported parts and packages.

#![warn(missing_docs)]

mod build;
mod devices;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// ECP5 platform build tool.
#[derive(Parser, Debug)]
#[command(name = "ecp5", version, about = "Lattice ECP5 build flow")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output and verbose tool runs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an `ecp5.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate build files for a target and run the toolchain.
    Build(BuildArgs),
    /// List supported devices and packages.
    Devices(DevicesArgs),
}

/// Arguments for the `ecp5 build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Target name to select from `ecp5.toml`.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Directory for generated files (default: `build/<target>`).
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Write the generated files without running any tool.
    #[arg(long)]
    pub emit_only: bool,
}

/// Arguments for the `ecp5 devices` subcommand.
#[derive(Parser, Debug)]
pub struct DevicesArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Listing output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn init_logging(global: &GlobalArgs) {
    let default_level = if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global),
        Command::Devices(ref args) => devices::run(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_build_default() {
        let cli = Cli::parse_from(["ecp5", "build"]);
        match cli.command {
            Command::Build(ref args) => {
                assert!(args.target.is_none());
                assert!(args.output_dir.is_none());
                assert!(!args.emit_only);
            }
            _ => panic!("expected Build command"),
        }
        assert!(!cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_build_with_args() {
        let cli = Cli::parse_from([
            "ecp5",
            "build",
            "--target",
            "ulx3s",
            "--output-dir",
            "out",
            "--emit-only",
            "--verbose",
        ]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.target.as_deref(), Some("ulx3s"));
                assert_eq!(args.output_dir.as_deref(), Some("out"));
                assert!(args.emit_only);
            }
            _ => panic!("expected Build command"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn parse_devices_json() {
        let cli = Cli::parse_from(["ecp5", "--config", "board/ecp5.toml", "devices", "-f", "json"]);
        match cli.command {
            Command::Devices(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected Devices command"),
        }
        assert_eq!(cli.config.as_deref(), Some("board/ecp5.toml"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["ecp5", "devices", "--format", "xml"]).is_err());
    }
}
