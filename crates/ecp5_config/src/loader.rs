//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{ProjectConfig, ResourceConfig};
use ecp5_netlist::is_identifier;
use indexmap::IndexMap;
use std::path::Path;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "ecp5.toml";

/// Loads and validates an `ecp5.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `ecp5.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.top.is_empty() {
        return Err(ConfigError::MissingField("project.top".to_string()));
    }
    for (field, value) in [("name", &config.project.name), ("top", &config.project.top)] {
        if !is_identifier(value) {
            return Err(ConfigError::ValidationError(format!(
                "project.{field} '{value}' is not a valid Verilog identifier"
            )));
        }
    }
    for (name, resource) in &config.resources {
        validate_resource(name, resource)?;
    }
    for (target_name, target) in &config.targets {
        if target.device.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "targets.{target_name}.device"
            )));
        }
        if target.package.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "targets.{target_name}.package"
            )));
        }
        for (name, resource) in &target.resources {
            validate_resource(name, resource)?;
        }
    }
    validate_clocks(config, &config.resources)?;
    Ok(())
}

fn validate_resource(name: &str, resource: &ResourceConfig) -> Result<(), ConfigError> {
    let invalid = |msg: String| ConfigError::ValidationError(format!("resource '{name}' {msg}"));
    // The name is spliced into port, wire and instance names of the wrapper.
    if !is_identifier(name) {
        return Err(invalid("is not a valid Verilog identifier".to_string()));
    }
    match (&resource.pins, &resource.diff) {
        (Some(_), Some(_)) => return Err(invalid("has both 'pins' and 'diff'".to_string())),
        (None, None) => return Err(ConfigError::MissingField(format!("resources.{name}.pins"))),
        (None, Some(diff)) if diff.p.len() != diff.n.len() => {
            return Err(invalid(format!(
                "has {} positive and {} negative sites",
                diff.p.len(),
                diff.n.len()
            )));
        }
        _ => {}
    }
    if resource.width() == 0 {
        return Err(invalid("has no sites".to_string()));
    }
    Ok(())
}

/// Clocks must name exactly one of `resource` or `net`. A resource clock
/// must refer to a global resource with an input leg.
fn validate_clocks(
    config: &ProjectConfig,
    resources: &IndexMap<String, ResourceConfig>,
) -> Result<(), ConfigError> {
    for (name, clock) in &config.clocks {
        match (&clock.resource, &clock.net) {
            (Some(resource), None) => {
                let found = resources.get(resource).or_else(|| {
                    config
                        .targets
                        .values()
                        .find_map(|t| t.resources.get(resource))
                });
                match found {
                    None => {
                        return Err(ConfigError::UnknownClockResource {
                            clock: name.clone(),
                            resource: resource.clone(),
                        })
                    }
                    Some(r) if !r.dir.has_input() => {
                        return Err(ConfigError::ValidationError(format!(
                            "clock '{name}' refers to resource '{resource}' which is not an input"
                        )))
                    }
                    Some(_) => {}
                }
            }
            (None, Some(_)) => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "clock '{name}' must set exactly one of 'resource' or 'net'"
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecp5_io::PinDir;

    const BLINKY: &str = r#"
[project]
name = "blinky"
top = "blinky_core"
sources = ["src/core.v", "src/counter.sv"]

[resources.led]
dir = "o"
pins = "B2 C2"
attrs = { IO_TYPE = "LVCMOS33", DRIVE = "4" }

[resources.clk]
dir = "i"
pins = "G2"

[resources.lvds]
dir = "i"
diff = { p = "A4", n = "A5" }
xdr = 2
invert = true
attrs = { IO_TYPE = "LVDS" }

[clocks.clk]
resource = "clk"
frequency = 25000000

[targets.ulx3s]
device = "LFE5U-85F"
package = "BG381"
speed = 6

[overrides]
nextpnr_opts = "--seed 3"
"#;

    #[test]
    fn parse_full_config() {
        let config = load_config_from_str(BLINKY).unwrap();
        assert_eq!(config.project.name, "blinky");
        assert_eq!(config.project.sources.len(), 2);
        let names: Vec<_> = config.resources.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["led", "clk", "lvds"]);
        assert_eq!(config.resources["lvds"].xdr, 2);
        assert_eq!(config.resources["clk"].dir, PinDir::I);
        assert_eq!(config.targets["ulx3s"].speed, "6");
        assert_eq!(config.overrides.nextpnr_opts, vec!["--seed", "3"]);
    }

    #[test]
    fn float_frequency_keeps_its_literal() {
        let toml = BLINKY.replace("frequency = 25000000\n", "frequency = 25000000.0\n");
        let config = load_config_from_str(&toml).unwrap();
        let clk = &config.clocks["clk"];
        assert_eq!(clk.frequency.literal(), "25000000.0");
        assert_eq!(clk.frequency.hz(), 25_000_000.0);
    }

    #[test]
    fn resource_name_must_be_identifier() {
        let toml = r#"
[project]
name = "blinky"
top = "core"
[resources."led-0"]
dir = "o"
pins = "B2"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: resource 'led-0' is not a valid Verilog identifier"
        );
    }

    #[test]
    fn target_resource_name_must_be_identifier() {
        let toml = r#"
[project]
name = "blinky"
top = "core"
[targets.board]
device = "LFE5U-25F"
package = "BG256"
speed = 6
[targets.board.resources."2led"]
dir = "o"
pins = "B2"
"#;
        assert!(matches!(
            load_config_from_str(toml).unwrap_err(),
            ConfigError::ValidationError(ref msg) if msg.contains("'2led'")
        ));
    }

    #[test]
    fn project_names_must_be_identifiers() {
        let err = load_config_from_str("[project]\nname = \"my blinky\"\ntop = \"core\"\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: project.name 'my blinky' is not a valid Verilog identifier"
        );
        let err = load_config_from_str("[project]\nname = \"blinky\"\ntop = \"lib.core\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("project.top 'lib.core'"));
    }

    #[test]
    fn single_source_string() {
        let config = load_config_from_str(
            "[project]\nname = \"a\"\ntop = \"core\"\nsources = \"core.v\"\n",
        )
        .unwrap();
        assert_eq!(config.project.sources, vec!["core.v"]);
        assert!(config.resources.is_empty());
        assert!(config.targets.is_empty());
    }

    #[test]
    fn missing_name_errors() {
        let err = load_config_from_str("[project]\nname = \"\"\ntop = \"core\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.name"));
    }

    #[test]
    fn missing_top_errors() {
        let err = load_config_from_str("[project]\nname = \"a\"\ntop = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.top"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn resource_without_sites_errors() {
        let toml = "[project]\nname = \"a\"\ntop = \"c\"\n[resources.led]\ndir = \"o\"\n";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "resources.led.pins"));

        let toml = "[project]\nname = \"a\"\ntop = \"c\"\n[resources.led]\ndir = \"o\"\npins = \"\"\n";
        let err = load_config_from_str(toml).unwrap_err();
        assert_eq!(err.to_string(), "validation error: resource 'led' has no sites");
    }

    #[test]
    fn resource_with_both_site_kinds_errors() {
        let toml = r#"
[project]
name = "a"
top = "c"
[resources.x]
dir = "i"
pins = "A1"
diff = { p = "A2", n = "A3" }
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("both 'pins' and 'diff'"));
    }

    #[test]
    fn unbalanced_pair_errors() {
        let toml = r#"
[project]
name = "a"
top = "c"
[resources.x]
dir = "i"
diff = { p = "A2 B2", n = "A3" }
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: resource 'x' has 2 positive and 1 negative sites"
        );
    }

    #[test]
    fn clock_on_unknown_resource_errors() {
        let toml = r#"
[project]
name = "a"
top = "c"
[clocks.sys]
resource = "clk"
frequency = 1000
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("unknown resource 'clk'"));
    }

    #[test]
    fn clock_on_output_resource_errors() {
        let toml = r#"
[project]
name = "a"
top = "c"
[resources.led]
dir = "o"
pins = "A1"
[clocks.sys]
resource = "led"
frequency = 1000
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("not an input"));
    }

    #[test]
    fn clock_needs_exactly_one_reference() {
        let toml = r#"
[project]
name = "a"
top = "c"
[clocks.sys]
frequency = 1000
"#;
        assert!(matches!(
            load_config_from_str(toml).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn net_clock_is_accepted() {
        let toml = r#"
[project]
name = "a"
top = "c"
[clocks.pll]
net = "pll_clk"
frequency = "100000000"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.clocks["pll"].net.as_deref(), Some("pll_clk"));
    }

    #[test]
    fn load_from_directory_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/ecp5/project")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
