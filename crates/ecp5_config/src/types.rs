//! Strongly-typed representation of `ecp5.toml`.

use ecp5_arch::Attrs;
use ecp5_common::Frequency;
use ecp5_io::PinDir;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// The root of an `ecp5.toml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata.
    pub project: ProjectMeta,
    /// Board resources shared by all targets, in file order.
    #[serde(default)]
    pub resources: IndexMap<String, ResourceConfig>,
    /// Clock constraints, in file order.
    #[serde(default)]
    pub clocks: IndexMap<String, ClockConfig>,
    /// Named device targets.
    #[serde(default)]
    pub targets: IndexMap<String, TargetConfig>,
    /// Options forwarded to the toolchain.
    #[serde(default)]
    pub overrides: BuildOverrides,
    /// Explicit tool locations.
    #[serde(default)]
    pub toolchain: ToolchainPaths,
}

/// The `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    /// Build name; every artifact is called `<name>.<ext>`.
    pub name: String,
    /// Name of the user's core module, instantiated by the generated top.
    pub top: String,
    /// HDL sources, relative to the project root.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub sources: Vec<String>,
}

/// One board resource: a named group of package pins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceConfig {
    /// Direction as seen from the core.
    pub dir: PinDir,
    /// Single-ended sites, one per bit (`"B2 C2"` or `["B2", "C2"]`).
    #[serde(default, deserialize_with = "deserialize_sites")]
    pub pins: Option<Vec<String>>,
    /// Differential sites.
    #[serde(default)]
    pub diff: Option<DiffPins>,
    /// Data rate: 0 combinational, 1 registered, 2 DDR.
    #[serde(default)]
    pub xdr: u8,
    /// Invert the data legs between pad and core.
    #[serde(default)]
    pub invert: bool,
    /// `IOBUF` attributes, in file order.
    #[serde(default, deserialize_with = "deserialize_attrs")]
    pub attrs: Attrs,
}

impl ResourceConfig {
    /// Returns the number of bits (sites) of this resource.
    pub fn width(&self) -> usize {
        match (&self.pins, &self.diff) {
            (Some(pins), _) => pins.len(),
            (None, Some(diff)) => diff.p.len(),
            (None, None) => 0,
        }
    }

    /// Returns `true` if the resource is a differential pair.
    pub fn is_differential(&self) -> bool {
        self.pins.is_none() && self.diff.is_some()
    }
}

/// Positive and negative sites of a differential resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiffPins {
    /// Positive sites, one per bit.
    #[serde(deserialize_with = "deserialize_split_or_vec")]
    pub p: Vec<String>,
    /// Negative sites, one per bit.
    #[serde(deserialize_with = "deserialize_split_or_vec")]
    pub n: Vec<String>,
}

/// A clock constraint on a resource or an internal net.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockConfig {
    /// Constrain the input data of this resource.
    #[serde(default)]
    pub resource: Option<String>,
    /// Constrain a net by name.
    #[serde(default)]
    pub net: Option<String>,
    /// Frequency in Hz.
    pub frequency: Frequency,
}

/// One device target.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Lattice part identifier, e.g. `LFE5U-85F`.
    pub device: String,
    /// Package identifier, e.g. `BG381`.
    pub package: String,
    /// Speed grade, forwarded verbatim to nextpnr.
    #[serde(deserialize_with = "deserialize_speed")]
    pub speed: String,
    /// Resources added or replaced for this target only.
    #[serde(default)]
    pub resources: IndexMap<String, ResourceConfig>,
}

/// Caller overrides for the generated scripts and commands.
///
/// Option lists may be written as a list or as one whitespace-separated
/// string. Absent fields insert nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildOverrides {
    /// Run the tools without their quiet flags.
    #[serde(default)]
    pub verbose: bool,
    /// Extra `read_verilog` options.
    #[serde(default, deserialize_with = "deserialize_split_or_vec")]
    pub read_verilog_opts: Vec<String>,
    /// Extra `synth_ecp5` options.
    #[serde(default, deserialize_with = "deserialize_split_or_vec")]
    pub synth_opts: Vec<String>,
    /// Yosys commands inserted after the sources are read.
    #[serde(default)]
    pub script_after_read: Option<String>,
    /// Yosys commands inserted after synthesis.
    #[serde(default)]
    pub script_after_synth: Option<String>,
    /// Extra `yosys` command-line options.
    #[serde(default, deserialize_with = "deserialize_split_or_vec")]
    pub yosys_opts: Vec<String>,
    /// Extra `nextpnr-ecp5` command-line options.
    #[serde(default, deserialize_with = "deserialize_split_or_vec")]
    pub nextpnr_opts: Vec<String>,
    /// Extra `ecppack` command-line options.
    #[serde(default, deserialize_with = "deserialize_split_or_vec")]
    pub ecppack_opts: Vec<String>,
}

/// Explicit tool paths from the `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolchainPaths {
    /// Path to `yosys`.
    #[serde(default)]
    pub yosys: Option<PathBuf>,
    /// Path to `nextpnr-ecp5`.
    #[serde(default, rename = "nextpnr-ecp5", alias = "nextpnr_ecp5")]
    pub nextpnr_ecp5: Option<PathBuf>,
    /// Path to `ecppack`.
    #[serde(default)]
    pub ecppack: Option<PathBuf>,
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `sources = "core.v"` as well as `sources = ["a.v", "b.v"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Like [`deserialize_string_or_vec`], but a single string is split on
/// whitespace into separate items.
fn deserialize_split_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = deserialize_string_or_vec(deserializer)?;
    Ok(match items.as_slice() {
        [single] => single.split_whitespace().map(str::to_string).collect(),
        _ => items,
    })
}

fn deserialize_sites<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_split_or_vec(deserializer).map(Some)
}

/// Accepts `speed = 6` as well as `speed = "8"`.
fn deserialize_speed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct Speed;

    impl Visitor<'_> for Speed {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a speed grade as an integer or string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(Speed)
}

/// A scalar attribute value as it may appear in TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl AttrValue {
    fn into_text(self) -> String {
        match self {
            AttrValue::Str(s) => s,
            AttrValue::Int(v) => v.to_string(),
            AttrValue::Float(v) => v.to_string(),
            AttrValue::Bool(v) => if v { "ON" } else { "OFF" }.to_string(),
        }
    }
}

/// Reads an attribute table whose values may be strings, numbers or
/// booleans; order is kept and every value becomes its text form.
fn deserialize_attrs<'de, D>(deserializer: D) -> Result<Attrs, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, AttrValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.into_text()))
        .collect::<IndexMap<_, _>>()
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_with_site_string() {
        let r: ResourceConfig = toml::from_str(
            r#"
dir = "o"
pins = "B2 C2  D2"
"#,
        )
        .unwrap();
        assert_eq!(r.dir, PinDir::O);
        assert_eq!(
            r.pins,
            Some(vec!["B2".to_string(), "C2".to_string(), "D2".to_string()])
        );
        assert_eq!(r.width(), 3);
        assert_eq!(r.xdr, 0);
        assert!(!r.invert);
        assert!(r.attrs.is_empty());
    }

    #[test]
    fn differential_resource() {
        let r: ResourceConfig = toml::from_str(
            r#"
dir = "i"
diff = { p = ["A4", "B4"], n = "A5 B5" }
xdr = 2
"#,
        )
        .unwrap();
        assert!(r.is_differential());
        assert_eq!(r.width(), 2);
        assert_eq!(r.diff.unwrap().n, vec!["A5", "B5"]);
    }

    #[test]
    fn attrs_keep_order_and_stringify() {
        let r: ResourceConfig = toml::from_str(
            r#"
dir = "io"
pins = "J1"
attrs = { PULLMODE = "UP", IO_TYPE = "LVCMOS33", DRIVE = 4, OPENDRAIN = true }
"#,
        )
        .unwrap();
        let pairs: Vec<_> = r.attrs.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("PULLMODE", "UP"),
                ("IO_TYPE", "LVCMOS33"),
                ("DRIVE", "4"),
                ("OPENDRAIN", "ON"),
            ]
        );
    }

    #[test]
    fn bad_direction_is_rejected() {
        let err = toml::from_str::<ResourceConfig>("dir = \"inout\"\npins = \"A1\"").unwrap_err();
        assert!(err.to_string().contains("inout"));
    }

    #[test]
    fn speed_as_integer_or_string() {
        let t: TargetConfig =
            toml::from_str("device = \"LFE5U-25F\"\npackage = \"BG381\"\nspeed = 6").unwrap();
        assert_eq!(t.speed, "6");
        let t: TargetConfig =
            toml::from_str("device = \"LFE5U-25F\"\npackage = \"BG381\"\nspeed = \"8\"").unwrap();
        assert_eq!(t.speed, "8");
    }

    #[test]
    fn overrides_accept_strings_and_lists() {
        let o: BuildOverrides = toml::from_str(
            r#"
nextpnr_opts = "--seed 3 --timing-allow-fail"
synth_opts = ["-abc9"]
script_after_synth = "stat"
"#,
        )
        .unwrap();
        assert_eq!(o.nextpnr_opts, vec!["--seed", "3", "--timing-allow-fail"]);
        assert_eq!(o.synth_opts, vec!["-abc9"]);
        assert_eq!(o.script_after_synth.as_deref(), Some("stat"));
        assert!(o.script_after_read.is_none());
        assert!(o.yosys_opts.is_empty());
        assert!(!o.verbose);
    }

    #[test]
    fn toolchain_paths() {
        let t: ToolchainPaths =
            toml::from_str("yosys = \"/opt/yosys\"\n\"nextpnr-ecp5\" = \"/opt/np\"").unwrap();
        assert_eq!(t.yosys, Some(PathBuf::from("/opt/yosys")));
        assert_eq!(t.nextpnr_ecp5, Some(PathBuf::from("/opt/np")));
        assert_eq!(t.ecppack, None);
    }

    #[test]
    fn clock_frequency_literal() {
        let c: ClockConfig = toml::from_str("resource = \"clk\"\nfrequency = 25000000").unwrap();
        assert_eq!(c.frequency.literal(), "25000000");
        let c: ClockConfig = toml::from_str("net = \"pll_out\"\nfrequency = \"48.5\"").unwrap();
        assert_eq!(c.frequency.literal(), "48.5");
    }
}
