//! Physical ports: the package-side nets a pin is bound to.

use crate::pin::PinDir;
use ecp5_arch::PortComponent;
use ecp5_netlist::{Design, PortDirection, SignalId};

/// The top-level net(s) of one resource.
///
/// For a differential port only `p` is ever connected to a primitive. `n`
/// exists so that constraints can place the negative leg when the selected
/// standard is single-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// One net per bit.
    Single {
        /// The pad net.
        io: SignalId,
    },
    /// A positive and a negative net per bit.
    Differential {
        /// The positive leg.
        p: SignalId,
        /// The negative leg.
        n: SignalId,
    },
}

fn port_direction(dir: PinDir) -> PortDirection {
    match dir {
        PinDir::I => PortDirection::Input,
        PinDir::O | PinDir::Oe => PortDirection::Output,
        PinDir::Io => PortDirection::InOut,
    }
}

impl Port {
    /// Adds a single-ended top-level port named `<resource>__io`.
    pub fn new_single(design: &mut Design, resource: &str, width: u32, dir: PinDir) -> Self {
        let io = design.add_port(
            &format!("{resource}__{}", PortComponent::Io.suffix()),
            width,
            port_direction(dir),
        );
        Port::Single { io }
    }

    /// Adds differential top-level ports named `<resource>__p` and `<resource>__n`.
    pub fn new_differential(design: &mut Design, resource: &str, width: u32, dir: PinDir) -> Self {
        let direction = port_direction(dir);
        let p = design.add_port(
            &format!("{resource}__{}", PortComponent::P.suffix()),
            width,
            direction,
        );
        let n = design.add_port(
            &format!("{resource}__{}", PortComponent::N.suffix()),
            width,
            direction,
        );
        Port::Differential { p, n }
    }

    /// Returns the net that primitives are bound to (`io` or `p`).
    pub fn bound(&self) -> SignalId {
        match *self {
            Port::Single { io } => io,
            Port::Differential { p, .. } => p,
        }
    }

    /// Returns `true` for differential ports.
    pub fn is_differential(&self) -> bool {
        matches!(self, Port::Differential { .. })
    }

    /// Returns the width of the bound net.
    pub fn width(&self, design: &Design) -> u32 {
        design.signal_width(self.bound())
    }

    /// Returns each component with its net, in `io`, `p`, `n` order.
    pub fn components(&self) -> Vec<(PortComponent, SignalId)> {
        match *self {
            Port::Single { io } => vec![(PortComponent::Io, io)],
            Port::Differential { p, n } => vec![(PortComponent::P, p), (PortComponent::N, n)],
        }
    }
}
