//! `ECP5_*` environment overrides.
//!
//! Every field of [`BuildOverrides`] can also be set from the environment as
//! `ECP5_<FIELD>` (upper case). A variable that is set replaces the file
//! value; an unset variable leaves it alone.

use crate::error::ConfigError;
use crate::types::BuildOverrides;

const PREFIX: &str = "ECP5_";

/// Applies overrides read through `lookup`, which maps a variable name to
/// its value.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvOverride`] if `ECP5_VERBOSE` is not a
/// recognizable boolean.
pub fn apply_env_overrides<F>(overrides: &mut BuildOverrides, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |field: &str| lookup(&format!("{PREFIX}{}", field.to_uppercase()));
    let args = |value: String| -> Vec<String> {
        value.split_whitespace().map(str::to_string).collect()
    };

    if let Some(value) = var("verbose") {
        overrides.verbose = parse_flag(&value)?;
    }
    if let Some(value) = var("read_verilog_opts") {
        overrides.read_verilog_opts = args(value);
    }
    if let Some(value) = var("synth_opts") {
        overrides.synth_opts = args(value);
    }
    if let Some(value) = var("script_after_read") {
        overrides.script_after_read = Some(value);
    }
    if let Some(value) = var("script_after_synth") {
        overrides.script_after_synth = Some(value);
    }
    if let Some(value) = var("yosys_opts") {
        overrides.yosys_opts = args(value);
    }
    if let Some(value) = var("nextpnr_opts") {
        overrides.nextpnr_opts = args(value);
    }
    if let Some(value) = var("ecppack_opts") {
        overrides.ecppack_opts = args(value);
    }
    Ok(())
}

/// Applies overrides from the process environment.
pub fn apply_process_env(overrides: &mut BuildOverrides) -> Result<(), ConfigError> {
    apply_env_overrides(overrides, |name| std::env::var(name).ok())
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvOverride {
            var: format!("{PREFIX}VERBOSE"),
            value: value.to_string(),
        }),
    }
}
