//! Target resolution: merging global and target-specific configurations.

use crate::error::ConfigError;
use crate::types::{BuildOverrides, ClockConfig, ProjectConfig, ResourceConfig, ToolchainPaths};
use indexmap::IndexMap;

/// A fully resolved target configuration with global and target-specific settings merged.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The target name.
    pub name: String,
    /// Lattice part identifier.
    pub device: String,
    /// Package identifier.
    pub package: String,
    /// Speed grade.
    pub speed: String,
    /// Merged resources: global entries in file order, then target-only
    /// entries. A target entry with the same name replaces the global one
    /// in place.
    pub resources: IndexMap<String, ResourceConfig>,
    /// Clock constraints.
    pub clocks: IndexMap<String, ClockConfig>,
    /// Toolchain overrides.
    pub overrides: BuildOverrides,
    /// Explicit tool locations.
    pub toolchain: ToolchainPaths,
}

/// Resolves a named target by merging global settings with target-specific overrides.
pub fn resolve_target(
    config: &ProjectConfig,
    target_name: &str,
) -> Result<ResolvedTarget, ConfigError> {
    let target = config
        .targets
        .get(target_name)
        .ok_or_else(|| ConfigError::UnknownTarget(target_name.to_string()))?;

    let mut resources = config.resources.clone();
    for (name, resource) in &target.resources {
        resources.insert(name.clone(), resource.clone());
    }

    for (clock_name, clock) in &config.clocks {
        if let Some(resource) = &clock.resource {
            if !resources.contains_key(resource) {
                return Err(ConfigError::ValidationError(format!(
                    "clock '{clock_name}' refers to resource '{resource}' which target '{target_name}' does not have"
                )));
            }
        }
    }

    Ok(ResolvedTarget {
        name: target_name.to_string(),
        device: target.device.clone(),
        package: target.package.clone(),
        speed: target.speed.clone(),
        resources,
        clocks: config.clocks.clone(),
        overrides: config.overrides.clone(),
        toolchain: config.toolchain.clone(),
    })
}
