//! Cells: black-box instantiations with parameter and port bindings.

use crate::ids::CellId;
use crate::signal::SignalRef;
use ecp5_common::Ident;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a cell or module port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Driven into the cell.
    Input,
    /// Driven by the cell.
    Output,
    /// Bidirectional pad connection.
    InOut,
}

impl PortDirection {
    /// Returns the Verilog keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::InOut => "inout",
        }
    }
}

/// A parameter value attached to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    /// A plain integer.
    Int(i64),
    /// A sized bit vector, e.g. a LUT truth table.
    Bits {
        /// The value (low `width` bits are significant).
        value: u64,
        /// The width in bits.
        width: u32,
    },
    /// A string parameter.
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bits { value, width } => {
                let digits = (*width as usize).div_ceil(4).max(1);
                write!(f, "{width}'h{value:0digits$X}")
            }
            ParamValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// One port binding of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The cell port name.
    pub port: Ident,
    /// The port direction as seen from the cell.
    pub direction: PortDirection,
    /// The net or constant bound to the port.
    pub signal: SignalRef,
}

/// An instantiated cell in a design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// The unique ID of this cell.
    pub id: CellId,
    /// The instance name, unique within the design.
    pub name: Ident,
    /// The primitive or module type name (e.g. `IFS1P3DX`).
    pub cell_type: Ident,
    /// Parameter bindings in the order they were supplied.
    pub params: Vec<(Ident, ParamValue)>,
    /// Port bindings in the order they were supplied.
    pub connections: Vec<Connection>,
}

impl Cell {
    /// Returns the binding of the named port, if any.
    pub fn connection(&self, port: Ident) -> Option<&Connection> {
        self.connections.iter().find(|c| c.port == port)
    }

    /// Returns the value of the named parameter, if bound.
    pub fn param(&self, name: Ident) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }
}

/// An instantiation request, built up before it is added to a design.
///
/// Mirrors the host-framework interface
/// `instantiate(type, parameters, inputs, outputs)`: parameters and ports are
/// recorded in the order they are given.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// The primitive or module type name.
    pub cell_type: String,
    /// Parameter bindings.
    pub params: Vec<(String, ParamValue)>,
    /// Port bindings with their directions.
    pub ports: Vec<(String, PortDirection, SignalRef)>,
}

impl Instance {
    /// Starts an instantiation of `cell_type`.
    pub fn new(cell_type: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            params: Vec::new(),
            ports: Vec::new(),
        }
    }

    /// Binds a parameter.
    pub fn param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.push((name.into(), value));
        self
    }

    /// Binds an input port.
    pub fn input(mut self, port: impl Into<String>, signal: impl Into<SignalRef>) -> Self {
        self.ports
            .push((port.into(), PortDirection::Input, signal.into()));
        self
    }

    /// Binds an output port.
    pub fn output(mut self, port: impl Into<String>, signal: impl Into<SignalRef>) -> Self {
        self.ports
            .push((port.into(), PortDirection::Output, signal.into()));
        self
    }

    /// Binds a bidirectional port.
    pub fn inout(mut self, port: impl Into<String>, signal: impl Into<SignalRef>) -> Self {
        self.ports
            .push((port.into(), PortDirection::InOut, signal.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SignalId;

    #[test]
    fn param_display() {
        assert_eq!(
            ParamValue::Bits {
                value: 0x5555,
                width: 16
            }
            .to_string(),
            "16'h5555"
        );
        assert_eq!(
            ParamValue::Bits { value: 1, width: 1 }.to_string(),
            "1'h1"
        );
        assert_eq!(ParamValue::Int(-3).to_string(), "-3");
        assert_eq!(ParamValue::Str("LVDS".into()).to_string(), "\"LVDS\"");
    }

    #[test]
    fn instance_builder_keeps_order() {
        let s = SignalId::from_raw(0);
        let inst = Instance::new("IB")
            .input("I", SignalRef::bit(s, 0))
            .output("O", s);
        assert_eq!(inst.cell_type, "IB");
        assert_eq!(inst.ports[0].0, "I");
        assert_eq!(inst.ports[0].1, PortDirection::Input);
        assert_eq!(inst.ports[1].1, PortDirection::Output);
    }

    #[test]
    fn direction_keywords() {
        assert_eq!(PortDirection::Input.keyword(), "input");
        assert_eq!(PortDirection::InOut.keyword(), "inout");
    }
}
