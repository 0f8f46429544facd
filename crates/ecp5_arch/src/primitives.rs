//! The ECP5 primitive catalog.
//!
//! Each primitive used for I/O buffering is listed once with its role and its
//! fixed port signature. Code that instantiates primitives binds ports only by
//! the names given here, so a misspelled or misdirected port is caught before
//! it reaches the netlist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// LUT4 truth table for `Z = A`.
pub const LUT4_IDENTITY: u64 = 0xAAAA;

/// LUT4 truth table for `Z = !A`.
pub const LUT4_INVERT: u64 = 0x5555;

/// What a primitive is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveRole {
    /// Single-rate input capture register.
    InputRegister,
    /// Single-rate output (or tristate enable) register.
    OutputRegister,
    /// Double-data-rate input deserializer.
    DdrInput,
    /// Double-data-rate output serializer.
    DdrOutput,
    /// Look-up table used as inverter or identity.
    Inverter,
    /// Boundary buffer attached to a package pin.
    Buffer,
}

/// Direction of one primitive port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// Configuration parameter.
    Param,
    /// Input port.
    Input,
    /// Output port.
    Output,
    /// Bidirectional pad port.
    InOut,
}

/// The fixed parameter and port names of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSignature {
    /// Parameter names.
    pub params: &'static [&'static str],
    /// Input port names.
    pub inputs: &'static [&'static str],
    /// Output port names.
    pub outputs: &'static [&'static str],
    /// Bidirectional port names.
    pub inouts: &'static [&'static str],
}

impl PortSignature {
    /// Returns the role of `name` in this signature, if it exists.
    pub fn role_of(&self, name: &str) -> Option<PortRole> {
        if self.params.contains(&name) {
            Some(PortRole::Param)
        } else if self.inputs.contains(&name) {
            Some(PortRole::Input)
        } else if self.outputs.contains(&name) {
            Some(PortRole::Output)
        } else if self.inouts.contains(&name) {
            Some(PortRole::InOut)
        } else {
            None
        }
    }
}

/// The vendor primitives the I/O path is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// Positive-edge input flip-flop with preset enable and clear.
    Ifs1p3dx,
    /// Positive-edge output flip-flop with preset enable and clear.
    Ofs1p3dx,
    /// 1:2 input gearbox.
    Iddrx1f,
    /// 2:1 output gearbox.
    Oddrx1f,
    /// 4-input look-up table.
    Lut4,
    /// Input buffer.
    Ib,
    /// Output buffer.
    Ob,
    /// Tristate output buffer.
    Obz,
    /// Bidirectional buffer.
    Bb,
}

const REGISTER_SIGNATURE: PortSignature = PortSignature {
    params: &[],
    inputs: &["SCLK", "SP", "CD", "D"],
    outputs: &["Q"],
    inouts: &[],
};

impl Primitive {
    /// Every primitive in the catalog.
    pub const ALL: [Primitive; 9] = [
        Primitive::Ifs1p3dx,
        Primitive::Ofs1p3dx,
        Primitive::Iddrx1f,
        Primitive::Oddrx1f,
        Primitive::Lut4,
        Primitive::Ib,
        Primitive::Ob,
        Primitive::Obz,
        Primitive::Bb,
    ];

    /// Returns the vendor name used for instantiation.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Ifs1p3dx => "IFS1P3DX",
            Primitive::Ofs1p3dx => "OFS1P3DX",
            Primitive::Iddrx1f => "IDDRX1F",
            Primitive::Oddrx1f => "ODDRX1F",
            Primitive::Lut4 => "LUT4",
            Primitive::Ib => "IB",
            Primitive::Ob => "OB",
            Primitive::Obz => "OBZ",
            Primitive::Bb => "BB",
        }
    }

    /// Looks up a primitive by its exact vendor name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Returns the role this primitive plays in the I/O path.
    pub fn role(self) -> PrimitiveRole {
        match self {
            Primitive::Ifs1p3dx => PrimitiveRole::InputRegister,
            Primitive::Ofs1p3dx => PrimitiveRole::OutputRegister,
            Primitive::Iddrx1f => PrimitiveRole::DdrInput,
            Primitive::Oddrx1f => PrimitiveRole::DdrOutput,
            Primitive::Lut4 => PrimitiveRole::Inverter,
            Primitive::Ib | Primitive::Ob | Primitive::Obz | Primitive::Bb => {
                PrimitiveRole::Buffer
            }
        }
    }

    /// Returns the fixed parameter and port names.
    pub fn signature(self) -> PortSignature {
        match self {
            Primitive::Ifs1p3dx | Primitive::Ofs1p3dx => REGISTER_SIGNATURE,
            Primitive::Iddrx1f => PortSignature {
                params: &[],
                inputs: &["SCLK", "RST", "D"],
                outputs: &["Q0", "Q1"],
                inouts: &[],
            },
            Primitive::Oddrx1f => PortSignature {
                params: &[],
                inputs: &["SCLK", "RST", "D0", "D1"],
                outputs: &["Q"],
                inouts: &[],
            },
            Primitive::Lut4 => PortSignature {
                params: &["INIT"],
                inputs: &["A", "B", "C", "D"],
                outputs: &["Z"],
                inouts: &[],
            },
            Primitive::Ib | Primitive::Ob => PortSignature {
                params: &[],
                inputs: &["I"],
                outputs: &["O"],
                inouts: &[],
            },
            Primitive::Obz => PortSignature {
                params: &[],
                inputs: &["I", "T"],
                outputs: &["O"],
                inouts: &[],
            },
            Primitive::Bb => PortSignature {
                params: &[],
                inputs: &["I", "T"],
                outputs: &["O"],
                inouts: &["B"],
            },
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_lookup() {
        for p in Primitive::ALL {
            assert_eq!(Primitive::from_name(p.name()), Some(p));
        }
        assert_eq!(Primitive::from_name("ifs1p3dx"), None);
        assert_eq!(Primitive::from_name("FD1S3AX"), None);
    }

    #[test]
    fn roles() {
        assert_eq!(Primitive::Ifs1p3dx.role(), PrimitiveRole::InputRegister);
        assert_eq!(Primitive::Ofs1p3dx.role(), PrimitiveRole::OutputRegister);
        assert_eq!(Primitive::Iddrx1f.role(), PrimitiveRole::DdrInput);
        assert_eq!(Primitive::Oddrx1f.role(), PrimitiveRole::DdrOutput);
        assert_eq!(Primitive::Lut4.role(), PrimitiveRole::Inverter);
        assert_eq!(Primitive::Bb.role(), PrimitiveRole::Buffer);
    }

    #[test]
    fn register_signature() {
        let sig = Primitive::Ifs1p3dx.signature();
        assert_eq!(sig.role_of("SCLK"), Some(PortRole::Input));
        assert_eq!(sig.role_of("Q"), Some(PortRole::Output));
        assert_eq!(sig.role_of("RST"), None);
        assert_eq!(sig, Primitive::Ofs1p3dx.signature());
    }

    #[test]
    fn bidirectional_buffer_has_pad_port() {
        let sig = Primitive::Bb.signature();
        assert_eq!(sig.role_of("B"), Some(PortRole::InOut));
        assert_eq!(sig.role_of("T"), Some(PortRole::Input));
        assert_eq!(Primitive::Obz.signature().role_of("B"), None);
    }

    #[test]
    fn lut_truth_tables() {
        assert_eq!(Primitive::Lut4.signature().role_of("INIT"), Some(PortRole::Param));
        // Bit i of INIT is the output for input index i; A is the LSB.
        for i in 0..16u64 {
            let a = i & 1;
            assert_eq!((LUT4_IDENTITY >> i) & 1, a);
            assert_eq!((LUT4_INVERT >> i) & 1, 1 - a);
        }
    }

    #[test]
    fn display_is_vendor_name() {
        assert_eq!(Primitive::Oddrx1f.to_string(), "ODDRX1F");
    }
}
