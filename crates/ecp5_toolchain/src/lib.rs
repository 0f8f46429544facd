//! The ECP5 build flow: constraints, scripts and the three tool stages.
//!
//! [`prepare`] turns a [`BuildRequest`] into a [`BuildPlan`]: it resolves
//! the device, generates the top-level wrapper with every I/O primitive,
//! and renders the Yosys script, the LPF constraints and the shell script.
//! [`Toolchain::run`] writes those files and runs
//! `yosys`, `nextpnr-ecp5` and `ecppack` in order.

#![warn(missing_docs)]

pub mod constraints;
pub mod error;
pub mod plan;
pub mod runner;
pub mod script;
pub mod stages;

pub use constraints::{
    emit_lpf, iter_port_constraint_bits, ClockConstraint, PortConstraintBit, PortConstraints,
    Sites,
};
pub use error::ToolchainError;
pub use plan::{
    prepare, BuildPlan, BuildRequest, ClockRequest, ClockTarget, Platform, ResourceRequest,
};
pub use runner::{write_artifacts, Toolchain};
pub use script::{render_shell_script, yosys_script, SourceKind};
pub use stages::{assemble_stages, shell_quote, CommandStage, StageKind};
