//! The three command stages of an ECP5 build.

use ecp5_arch::NextpnrOptions;
use ecp5_config::BuildOverrides;
use serde::Serialize;
use std::fmt;

/// A build stage. Stages always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageKind {
    /// Yosys synthesis to a JSON netlist.
    Synthesize,
    /// nextpnr placement and routing to a textual configuration.
    PlaceAndRoute,
    /// ecppack bitstream packing.
    Pack,
}

impl StageKind {
    /// All stages in execution order.
    pub const ALL: [StageKind; 3] = [StageKind::Synthesize, StageKind::PlaceAndRoute, StageKind::Pack];

    /// Returns the executable name.
    pub fn tool(self) -> &'static str {
        match self {
            StageKind::Synthesize => "yosys",
            StageKind::PlaceAndRoute => "nextpnr-ecp5",
            StageKind::Pack => "ecppack",
        }
    }

    /// Returns the environment variable that may point at the executable.
    pub fn env_var(self) -> &'static str {
        match self {
            StageKind::Synthesize => "YOSYS",
            StageKind::PlaceAndRoute => "NEXTPNR_ECP5",
            StageKind::Pack => "ECPPACK",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Synthesize => "synthesis",
            StageKind::PlaceAndRoute => "place and route",
            StageKind::Pack => "bitstream packing",
        };
        write!(f, "{name} ({})", self.tool())
    }
}

/// One tool invocation. `args` excludes the program itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandStage {
    /// Which stage this is.
    pub kind: StageKind,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CommandStage {
    /// Renders the invocation as a shell command line using the default
    /// tool name.
    pub fn command_line(&self) -> String {
        std::iter::once(self.kind.tool().to_string())
            .chain(self.args.iter().map(|arg| shell_quote(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds the stage list for the build called `name`.
///
/// Quiet flags are passed unless `overrides.verbose` is set; `ecppack` gets
/// `--verbose` instead when it is. Caller options are inserted right after
/// the quiet/verbose flag and nothing is inserted when they are empty.
pub fn assemble_stages(
    name: &str,
    nextpnr: &NextpnrOptions,
    overrides: &BuildOverrides,
) -> Vec<CommandStage> {
    let verbose = overrides.verbose;
    let mut synth = Vec::new();
    if !verbose {
        synth.push("-q".to_string());
    }
    synth.extend(overrides.yosys_opts.iter().cloned());
    synth.extend([
        "-l".to_string(),
        format!("{name}.rpt"),
        format!("{name}.ys"),
    ]);

    let mut pnr = Vec::new();
    if !verbose {
        pnr.push("--quiet".to_string());
    }
    pnr.extend(overrides.nextpnr_opts.iter().cloned());
    pnr.extend([
        "--log".to_string(),
        format!("{name}.tim"),
        nextpnr.device_flag.clone(),
        "--package".to_string(),
        nextpnr.package_flag.clone(),
        "--speed".to_string(),
        nextpnr.speed_flag.clone(),
        "--json".to_string(),
        format!("{name}.json"),
        "--lpf".to_string(),
        format!("{name}.lpf"),
        "--textcfg".to_string(),
        format!("{name}.config"),
    ]);

    let mut pack = Vec::new();
    if verbose {
        pack.push("--verbose".to_string());
    }
    pack.extend(overrides.ecppack_opts.iter().cloned());
    pack.extend([
        "--input".to_string(),
        format!("{name}.config"),
        "--bit".to_string(),
        format!("{name}.bit"),
        "--svf".to_string(),
        format!("{name}.svf"),
    ]);

    vec![
        CommandStage {
            kind: StageKind::Synthesize,
            args: synth,
        },
        CommandStage {
            kind: StageKind::PlaceAndRoute,
            args: pnr,
        },
        CommandStage {
            kind: StageKind::Pack,
            args: pack,
        },
    ]
}

/// Quotes `arg` for a POSIX shell if it contains anything but safe characters.
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> NextpnrOptions {
        NextpnrOptions {
            device_flag: "--25k".to_string(),
            package_flag: "CABGA381".to_string(),
            speed_flag: "6".to_string(),
        }
    }

    #[test]
    fn default_command_lines() {
        let stages = assemble_stages("top", &options(), &BuildOverrides::default());
        let lines: Vec<_> = stages.iter().map(CommandStage::command_line).collect();
        assert_eq!(
            lines,
            vec![
                "yosys -q -l top.rpt top.ys",
                "nextpnr-ecp5 --quiet --log top.tim --25k --package CABGA381 --speed 6 \
                 --json top.json --lpf top.lpf --textcfg top.config",
                "ecppack --input top.config --bit top.bit --svf top.svf",
            ]
        );
    }

    #[test]
    fn verbose_swaps_quiet_for_verbose() {
        let overrides = BuildOverrides {
            verbose: true,
            ..Default::default()
        };
        let stages = assemble_stages("top", &options(), &overrides);
        assert_eq!(stages[0].args[0], "-l");
        assert_eq!(stages[1].args[0], "--log");
        assert_eq!(stages[2].args[0], "--verbose");
    }

    #[test]
    fn overrides_are_inserted_verbatim() {
        let overrides = BuildOverrides {
            yosys_opts: vec!["-m".into(), "ghdl".into()],
            nextpnr_opts: vec!["--seed".into(), "3".into()],
            ecppack_opts: vec!["--compress".into()],
            ..Default::default()
        };
        let stages = assemble_stages("top", &options(), &overrides);
        assert_eq!(stages[0].args[..3], ["-q", "-m", "ghdl"]);
        assert_eq!(stages[1].args[..3], ["--quiet", "--seed", "3"]);
        assert_eq!(stages[2].args[0], "--compress");
    }

    #[test]
    fn stage_order_is_fixed() {
        let kinds: Vec<_> = assemble_stages("x", &options(), &BuildOverrides::default())
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, StageKind::ALL.to_vec());
    }

    #[test]
    fn quoting() {
        assert_eq!(shell_quote("top.ys"), "top.ys");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn stage_display() {
        assert_eq!(StageKind::PlaceAndRoute.to_string(), "place and route (nextpnr-ecp5)");
        assert_eq!(StageKind::Pack.env_var(), "ECPPACK");
    }

    #[test]
    fn stages_serialize_for_reports() {
        let stages = assemble_stages("blinky", &options(), &BuildOverrides::default());
        let json = serde_json::to_value(&stages).unwrap();
        assert_eq!(json[0]["kind"], "Synthesize");
        assert_eq!(json[2]["kind"], "Pack");
        assert_eq!(json[2]["args"][0], "--input");
    }
}
