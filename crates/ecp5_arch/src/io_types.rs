//! ECP5 I/O standards and the negative-net suppression rule.

use crate::attrs::Attrs;
use serde::{Deserialize, Serialize};
use std::fmt;

/// I/O standard assumed when a port carries no `IO_TYPE` attribute.
pub const DEFAULT_IO_TYPE: &str = "LVCMOS25";

const SINGLE_ENDED_IO_TYPES: &[&str] = &[
    "HSUL12",
    "LVCMOS12",
    "LVCMOS15",
    "LVCMOS18",
    "LVCMOS25",
    "LVCMOS33",
    "LVTTL33",
    "SSTL135_I",
    "SSTL135_II",
    "SSTL15_I",
    "SSTL15_II",
    "SSTL18_I",
    "SSTL18_II",
];

const DIFFERENTIAL_IO_TYPES: &[&str] = &[
    "BLVDS25",
    "BLVDS25E",
    "HSUL12D",
    "LVCMOS18D",
    "LVCMOS25D",
    "LVCMOS33D",
    "LVDS",
    "LVDS25E",
    "LVPECL33",
    "LVPECL33E",
    "LVTTL33D",
    "MLVDS",
    "MLVDS25E",
    "SLVS",
    "SSTL135D_II",
    "SSTL15D_II",
    "SSTL18D_II",
    "SUBLVDS",
];

/// Which half of the I/O standard partition a standard belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoStandardKind {
    /// A standard driven on one pin.
    SingleEnded,
    /// A standard using a complementary pin pair.
    Differential,
}

impl IoStandardKind {
    /// Classifies an `IO_TYPE` value, or returns `None` if it is unknown.
    pub fn of(io_type: &str) -> Option<Self> {
        if SINGLE_ENDED_IO_TYPES.contains(&io_type) {
            Some(IoStandardKind::SingleEnded)
        } else if DIFFERENTIAL_IO_TYPES.contains(&io_type) {
            Some(IoStandardKind::Differential)
        } else {
            None
        }
    }

    /// Returns every known standard of this kind.
    pub fn standards(self) -> &'static [&'static str] {
        match self {
            IoStandardKind::SingleEnded => SINGLE_ENDED_IO_TYPES,
            IoStandardKind::Differential => DIFFERENTIAL_IO_TYPES,
        }
    }
}

/// One component of a physical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortComponent {
    /// The only net of a single-ended port.
    Io,
    /// The non-inverting net of a differential pair.
    P,
    /// The inverting net of a differential pair.
    N,
}

impl PortComponent {
    /// Returns the suffix used in port names (`io`, `p`, `n`).
    pub fn suffix(self) -> &'static str {
        match self {
            PortComponent::Io => "io",
            PortComponent::P => "p",
            PortComponent::N => "n",
        }
    }
}

impl fmt::Display for PortComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Returns `true` if `component` of a port with `attrs` must be skipped.
///
/// A differential ECP5 I/O is placed by instantiating a buffer only at the
/// PIOA/PIOC site, which is always the non-inverting pin. With a
/// differential `IO_TYPE` the `n` component therefore gets neither a
/// primitive nor a constraint.
pub fn should_skip_port_component(attrs: &Attrs, component: PortComponent) -> bool {
    component == PortComponent::N && attrs.io_standard_kind() == Some(IoStandardKind::Differential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_sizes() {
        assert_eq!(IoStandardKind::SingleEnded.standards().len(), 13);
        assert_eq!(IoStandardKind::Differential.standards().len(), 18);
    }

    #[test]
    fn partition_is_disjoint() {
        for s in IoStandardKind::SingleEnded.standards() {
            assert!(!IoStandardKind::Differential.standards().contains(s));
        }
    }

    #[test]
    fn classify() {
        assert_eq!(IoStandardKind::of("LVCMOS33"), Some(IoStandardKind::SingleEnded));
        assert_eq!(IoStandardKind::of("LVDS"), Some(IoStandardKind::Differential));
        assert_eq!(IoStandardKind::of("LVCMOS33D"), Some(IoStandardKind::Differential));
        assert_eq!(IoStandardKind::of("lvds"), None);
        assert_eq!(IoStandardKind::of(DEFAULT_IO_TYPE), Some(IoStandardKind::SingleEnded));
    }

    #[test]
    fn skip_n_only_for_differential_standards() {
        let diff = Attrs::from_pairs([("IO_TYPE", "LVDS")]);
        assert!(should_skip_port_component(&diff, PortComponent::N));
        assert!(!should_skip_port_component(&diff, PortComponent::P));

        let single = Attrs::from_pairs([("IO_TYPE", "LVCMOS33")]);
        assert!(!should_skip_port_component(&single, PortComponent::N));

        // No IO_TYPE means LVCMOS25, which is single-ended.
        assert!(!should_skip_port_component(&Attrs::new(), PortComponent::N));
    }

    #[test]
    fn component_suffixes() {
        assert_eq!(PortComponent::Io.to_string(), "io");
        assert_eq!(PortComponent::P.suffix(), "p");
        assert_eq!(PortComponent::N.suffix(), "n");
    }
}
