//! Yosys and shell script generation.

use crate::stages::{shell_quote, CommandStage};
use ecp5_config::BuildOverrides;
use ecp5_netlist::verilog::AUTOGENERATED;
use std::fmt::Write;

/// How Yosys should read a source file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.v`
    Verilog,
    /// `.sv`
    SystemVerilog,
    /// `.il`
    Rtlil,
}

impl SourceKind {
    /// Classifies `path`; `None` for files Yosys is not asked to read.
    pub fn of(path: &str) -> Option<Self> {
        let ext = path.rsplit_once('.').map(|(_, ext)| ext)?;
        match ext {
            "v" => Some(SourceKind::Verilog),
            "sv" => Some(SourceKind::SystemVerilog),
            "il" => Some(SourceKind::Rtlil),
            _ => None,
        }
    }
}

/// Renders `<name>.ys`.
///
/// `sources` are read first, then the generated `wrapper`. Override
/// snippets appear only when set.
pub fn yosys_script(
    name: &str,
    sources: &[String],
    wrapper: &str,
    overrides: &BuildOverrides,
) -> String {
    let mut out = String::new();
    let _ = write_yosys_script(name, sources, wrapper, overrides, &mut out);
    out
}

fn write_yosys_script(
    name: &str,
    sources: &[String],
    wrapper: &str,
    overrides: &BuildOverrides,
    out: &mut String,
) -> std::fmt::Result {
    let read_opts: String = overrides
        .read_verilog_opts
        .iter()
        .map(|opt| format!(" {opt}"))
        .collect();

    writeln!(out, "# {AUTOGENERATED}")?;
    for source in sources.iter().map(String::as_str).chain([wrapper]) {
        match SourceKind::of(source) {
            Some(SourceKind::Verilog) => writeln!(out, "read_verilog{read_opts} {source}")?,
            Some(SourceKind::SystemVerilog) => {
                writeln!(out, "read_verilog -sv{read_opts} {source}")?
            }
            Some(SourceKind::Rtlil) => writeln!(out, "read_ilang {source}")?,
            None => tracing::warn!(source, "not a Verilog or RTLIL file, not passed to yosys"),
        }
    }
    if let Some(script) = non_empty(&overrides.script_after_read) {
        writeln!(out, "{script}")?;
    }
    write!(out, "synth_ecp5")?;
    for opt in &overrides.synth_opts {
        write!(out, " {opt}")?;
    }
    writeln!(out, " -top {name}")?;
    if let Some(script) = non_empty(&overrides.script_after_synth) {
        writeln!(out, "{script}")?;
    }
    writeln!(out, "write_json {name}.json")
}

fn non_empty(snippet: &Option<String>) -> Option<&str> {
    snippet
        .as_deref()
        .map(str::trim_end)
        .filter(|s| !s.trim().is_empty())
}

/// Renders `build_<name>.sh`, which runs the stages from the build directory.
///
/// Each tool can be redirected through its environment variable (`YOSYS`,
/// `NEXTPNR_ECP5`, `ECPPACK`).
pub fn render_shell_script(stages: &[CommandStage]) -> String {
    let mut out = String::new();
    out.push_str("#!/bin/sh\n");
    out.push_str(&format!("# {AUTOGENERATED}\n"));
    out.push_str("set -e\n");
    for stage in stages {
        let var = stage.kind.env_var();
        out.push_str(&format!("[ -n \"${{{var}}}\" ] || {var}={}\n", stage.kind.tool()));
    }
    for stage in stages {
        let mut line = format!("\"${}\"", stage.kind.env_var());
        for arg in &stage.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}
