//! Minimal netlist model for the ECP5 platform backend.
//!
//! A [`Design`] holds named multi-bit signals, top-level ports and cells. Cells
//! are black-box instantiations (vendor primitives or the user's core module)
//! with parameter and port bindings. The design is append-only: nothing is
//! ever removed or rewired once added, so per-pin code can only contribute new
//! structure. [`verilog::write_verilog`] renders the result as a structural
//! Verilog module for Yosys.

#![warn(missing_docs)]

pub mod arena;
pub mod cell;
pub mod design;
pub mod ids;
pub mod signal;
pub mod verilog;

pub use arena::{Arena, ArenaId};
pub use cell::{Cell, Connection, Instance, ParamValue, PortDirection};
pub use design::Design;
pub use ids::{CellId, SignalId};
pub use signal::{Signal, SignalKind, SignalRef};
pub use verilog::{is_identifier, write_verilog};
