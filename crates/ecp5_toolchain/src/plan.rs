//! Build planning: from a request to a wrapper netlist, scripts and stages.
//!
//! [`prepare`] is pure apart from logging. It resolves the device first, so
//! an unknown part never produces any artifact or stage, then implements
//! every resource in request order. The first failing resource aborts the
//! whole plan.

use crate::constraints::{emit_lpf, ClockConstraint, PortConstraints, Sites};
use crate::error::ToolchainError;
use crate::script::{render_shell_script, yosys_script};
use crate::stages::{assemble_stages, CommandStage};
use ecp5_arch::{resolve, Attrs, NextpnrOptions, PortComponent};
use ecp5_common::Frequency;
use ecp5_config::{BuildOverrides, ProjectConfig, ResolvedTarget, ResourceConfig};
use ecp5_io::{EmitReport, FeatureCheck, IoBufferEmitter, Pin, PinDir, Port};
use ecp5_netlist::{is_identifier, write_verilog, Design, Instance};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;

/// The device a build is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Lattice part identifier.
    pub device: String,
    /// Package identifier.
    pub package: String,
    /// Speed grade.
    pub speed: String,
}

impl Platform {
    /// Takes the device descriptor of a resolved target.
    pub fn from_target(target: &ResolvedTarget) -> Self {
        Self {
            device: target.device.clone(),
            package: target.package.clone(),
            speed: target.speed.clone(),
        }
    }
}

/// One resource to implement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// Resource name, used for the pin, its ports and the core's port names.
    pub name: String,
    /// Direction as seen from the core.
    pub dir: PinDir,
    /// Data rate.
    pub xdr: u8,
    /// Invert the data legs.
    pub invert: bool,
    /// Package sites; the width is the number of sites.
    pub sites: Sites,
    /// `IOBUF` attributes.
    pub attrs: Attrs,
}

impl ResourceRequest {
    /// Converts a configured resource.
    pub fn from_config(name: &str, resource: &ResourceConfig) -> Self {
        let sites = match (&resource.pins, &resource.diff) {
            (Some(pins), _) => Sites::Single(pins.clone()),
            (None, Some(diff)) => Sites::Differential {
                p: diff.p.clone(),
                n: diff.n.clone(),
            },
            (None, None) => Sites::Single(Vec::new()),
        };
        Self {
            name: name.to_string(),
            dir: resource.dir,
            xdr: resource.xdr,
            invert: resource.invert,
            sites,
            attrs: resource.attrs.clone(),
        }
    }
}

/// What a clock constraint applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTarget {
    /// The top-level port of a resource.
    Resource(String),
    /// A net, by name.
    Net(String),
}

/// One clock constraint to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockRequest {
    /// The constrained port or net.
    pub target: ClockTarget,
    /// Frequency in Hz.
    pub frequency: Frequency,
}

/// Everything needed to plan one build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Build name; names the top module and every artifact.
    pub name: String,
    /// Module name of the user's core.
    pub core: String,
    /// HDL sources, as they should appear in the Yosys script.
    pub sources: Vec<String>,
    /// Resources in port order.
    pub resources: Vec<ResourceRequest>,
    /// Clock constraints.
    pub clocks: Vec<ClockRequest>,
    /// Caller overrides.
    pub overrides: BuildOverrides,
}

impl BuildRequest {
    /// Builds a request from the project configuration and a resolved target.
    ///
    /// Relative source paths are joined onto `project_root` so that the
    /// script works from any build directory.
    pub fn from_config(config: &ProjectConfig, target: &ResolvedTarget, project_root: &Path) -> Self {
        let sources = config
            .project
            .sources
            .iter()
            .map(|source| project_root.join(source).to_string_lossy().into_owned())
            .collect();
        let resources = target
            .resources
            .iter()
            .map(|(name, resource)| ResourceRequest::from_config(name, resource))
            .collect();
        let clocks = target
            .clocks
            .values()
            .filter_map(|clock| {
                let target = match (&clock.resource, &clock.net) {
                    (Some(resource), _) => ClockTarget::Resource(resource.clone()),
                    (None, Some(net)) => ClockTarget::Net(net.clone()),
                    (None, None) => return None,
                };
                Some(ClockRequest {
                    target,
                    frequency: clock.frequency.clone(),
                })
            })
            .collect();
        Self {
            name: config.project.name.clone(),
            core: config.project.top.clone(),
            sources,
            resources,
            clocks,
            overrides: target.overrides.clone(),
        }
    }
}

/// The result of [`prepare`]: generated files and the commands to run.
#[derive(Debug)]
pub struct BuildPlan {
    /// Build name.
    pub name: String,
    /// Resolved nextpnr options.
    pub nextpnr: NextpnrOptions,
    /// The generated top-level wrapper.
    pub design: Design,
    /// What was emitted for each resource, in request order.
    pub reports: Vec<(String, EmitReport)>,
    /// Files to write into the build directory, by file name.
    pub files: IndexMap<String, String>,
    /// Stages in execution order.
    pub stages: Vec<CommandStage>,
}

impl BuildPlan {
    /// Returns the contents of a generated file.
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Returns the name of the generated wrapper file.
    pub fn wrapper_file(&self) -> String {
        wrapper_file(&self.name)
    }

    /// Returns the name of the generated shell script.
    pub fn script_file(&self) -> String {
        format!("build_{}.sh", self.name)
    }
}

fn wrapper_file(name: &str) -> String {
    format!("{name}_top.v")
}

/// Plans a build of `request` for `platform`.
///
/// # Errors
///
/// - [`ToolchainError::Arch`] for an unknown device or package; nothing
///   else is done in that case.
/// - [`ToolchainError::InvalidRequest`] for duplicate or empty resources and
///   clocks on unknown resources.
/// - [`ToolchainError::Io`] for the first resource that cannot be implemented.
pub fn prepare(
    request: &BuildRequest,
    platform: &Platform,
    checker: &dyn FeatureCheck,
) -> Result<BuildPlan, ToolchainError> {
    let nextpnr = resolve(&platform.device, &platform.package, &platform.speed)?;
    validate_request(request)?;

    let mut design = Design::new(&request.name);
    let emitter = IoBufferEmitter::new(checker);
    let mut core = Instance::new(&request.core);
    let mut ports = Vec::with_capacity(request.resources.len());
    let mut reports = Vec::with_capacity(request.resources.len());

    for resource in &request.resources {
        let width = u32::try_from(resource.sites.width()).map_err(|_| {
            ToolchainError::InvalidRequest(format!("resource '{}' is too wide", resource.name))
        })?;
        let pin = Pin::new(&mut design, &resource.name, width, resource.dir, resource.xdr)?;
        let port = match resource.sites {
            Sites::Single(_) => Port::new_single(&mut design, &resource.name, width, resource.dir),
            Sites::Differential { .. } => {
                Port::new_differential(&mut design, &resource.name, width, resource.dir)
            }
        };
        let report = emitter
            .emit(&mut design, &pin, &port, &resource.attrs, resource.invert)
            .map_err(|source| ToolchainError::Io {
                resource: resource.name.clone(),
                source,
            })?;

        for (slot, signal) in pin.slots() {
            let core_port = format!("{}__{slot}", resource.name);
            core = match slot {
                "i" | "i0" | "i1" => core.input(core_port, signal),
                _ => core.output(core_port, signal),
            };
        }

        reports.push((resource.name.clone(), report));
        ports.push(PortConstraints {
            resource: resource.name.clone(),
            sites: resource.sites.clone(),
            attrs: resource.attrs.clone(),
        });
    }
    design.instantiate("core", core);

    let clocks = request
        .clocks
        .iter()
        .map(|clock| clock_constraint(request, clock))
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = IndexMap::new();
    let wrapper = wrapper_file(&request.name);
    files.insert(
        format!("{}.ys", request.name),
        yosys_script(&request.name, &request.sources, &wrapper, &request.overrides),
    );
    files.insert(wrapper, write_verilog(&design));
    files.insert(format!("{}.lpf", request.name), emit_lpf(&ports, &clocks));
    let stages = assemble_stages(&request.name, &nextpnr, &request.overrides);
    files.insert(format!("build_{}.sh", request.name), render_shell_script(&stages));

    tracing::info!(
        name = %request.name,
        device = %platform.device,
        resources = request.resources.len(),
        cells = design.cell_count(),
        "prepared build plan"
    );

    Ok(BuildPlan {
        name: request.name.clone(),
        nextpnr,
        design,
        reports,
        files,
        stages,
    })
}

fn validate_request(request: &BuildRequest) -> Result<(), ToolchainError> {
    for (what, name) in [("build name", &request.name), ("core module", &request.core)] {
        if !is_identifier(name) {
            return Err(ToolchainError::InvalidRequest(format!(
                "{what} '{name}' is not a valid Verilog identifier"
            )));
        }
    }
    let mut seen = HashSet::new();
    for resource in &request.resources {
        if !is_identifier(&resource.name) {
            return Err(ToolchainError::InvalidRequest(format!(
                "resource '{}' is not a valid Verilog identifier",
                resource.name
            )));
        }
        if !seen.insert(resource.name.as_str()) {
            return Err(ToolchainError::InvalidRequest(format!(
                "resource '{}' is listed twice",
                resource.name
            )));
        }
        if resource.sites.width() == 0 {
            return Err(ToolchainError::InvalidRequest(format!(
                "resource '{}' has no sites",
                resource.name
            )));
        }
        if let Sites::Differential { p, n } = &resource.sites {
            if p.len() != n.len() {
                return Err(ToolchainError::InvalidRequest(format!(
                    "resource '{}' has {} positive and {} negative sites",
                    resource.name,
                    p.len(),
                    n.len()
                )));
            }
        }
    }
    Ok(())
}

/// A resource clock constrains the port carrying the clock into the
/// device: `<resource>__io`, or `<resource>__p` for a pair.
fn clock_constraint(
    request: &BuildRequest,
    clock: &ClockRequest,
) -> Result<ClockConstraint, ToolchainError> {
    let signal = match &clock.target {
        ClockTarget::Net(net) => net.clone(),
        ClockTarget::Resource(name) => {
            let resource = request
                .resources
                .iter()
                .find(|r| &r.name == name)
                .ok_or_else(|| {
                    ToolchainError::InvalidRequest(format!(
                        "clock on unknown resource '{name}'"
                    ))
                })?;
            let component = match resource.sites {
                Sites::Single(_) => PortComponent::Io,
                Sites::Differential { .. } => PortComponent::P,
            };
            format!("{name}__{}", component.suffix())
        }
    };
    Ok(ClockConstraint {
        signal,
        frequency: clock.frequency.clone(),
    })
}
