//! Abstract pins: the core-side view of one I/O resource.

use ecp5_common::{Ecp5Result, InternalError};
use ecp5_netlist::{Design, SignalId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a pin as seen from the user's core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDir {
    /// Input only.
    I,
    /// Output only.
    O,
    /// Output with an output-enable (tristate).
    Oe,
    /// Bidirectional with an output-enable.
    Io,
}

impl PinDir {
    /// Returns `true` if the pin carries data into the core.
    pub fn has_input(self) -> bool {
        matches!(self, PinDir::I | PinDir::Io)
    }

    /// Returns `true` if the pin carries data out of the core.
    pub fn has_output(self) -> bool {
        matches!(self, PinDir::O | PinDir::Oe | PinDir::Io)
    }

    /// Returns `true` if the pin has an `oe` slot.
    pub fn has_tristate(self) -> bool {
        matches!(self, PinDir::Oe | PinDir::Io)
    }

    /// Returns the short name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            PinDir::I => "i",
            PinDir::O => "o",
            PinDir::Oe => "oe",
            PinDir::Io => "io",
        }
    }
}

impl fmt::Display for PinDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PinDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "i" => Ok(PinDir::I),
            "o" => Ok(PinDir::O),
            "oe" => Ok(PinDir::Oe),
            "io" => Ok(PinDir::Io),
            other => Err(format!(
                "invalid pin direction '{other}': expected one of i, o, oe, io"
            )),
        }
    }
}

/// An abstract pin with its core-facing signal slots.
///
/// The slots present are exactly those implied by `dir` and `xdr`; they are
/// allocated in the design when the pin is created and named
/// `<name>__<slot>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    name: String,
    width: u32,
    dir: PinDir,
    xdr: u8,
    i: Option<SignalId>,
    i0: Option<SignalId>,
    i1: Option<SignalId>,
    i_clk: Option<SignalId>,
    o: Option<SignalId>,
    o0: Option<SignalId>,
    o1: Option<SignalId>,
    o_clk: Option<SignalId>,
    oe: Option<SignalId>,
}

impl Pin {
    /// Creates a pin and allocates its signal slots in `design`.
    ///
    /// Any `xdr` is accepted here; whether it can be implemented is decided
    /// later by the capability check.
    ///
    /// # Errors
    ///
    /// Returns [`InternalError`] if `width` is zero. Nothing is added to
    /// `design` in that case.
    pub fn new(
        design: &mut Design,
        name: &str,
        width: u32,
        dir: PinDir,
        xdr: u8,
    ) -> Ecp5Result<Self> {
        if width == 0 {
            return Err(InternalError::new(format!("pin '{name}' has zero width")));
        }
        let mut slot =
            |suffix: &str, w: u32| Some(design.add_signal(&format!("{name}__{suffix}"), w));

        let mut pin = Pin {
            name: name.to_string(),
            width,
            dir,
            xdr,
            i: None,
            i0: None,
            i1: None,
            i_clk: None,
            o: None,
            o0: None,
            o1: None,
            o_clk: None,
            oe: None,
        };

        if dir.has_input() {
            if xdr < 2 {
                pin.i = slot("i", width);
            } else {
                pin.i0 = slot("i0", width);
                pin.i1 = slot("i1", width);
            }
            if xdr >= 1 {
                pin.i_clk = slot("i_clk", 1);
            }
        }
        if dir.has_output() {
            if xdr < 2 {
                pin.o = slot("o", width);
            } else {
                pin.o0 = slot("o0", width);
                pin.o1 = slot("o1", width);
            }
            if xdr >= 1 {
                pin.o_clk = slot("o_clk", 1);
            }
        }
        if dir.has_tristate() {
            pin.oe = slot("oe", 1);
        }
        Ok(pin)
    }

    /// Returns the pin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the direction.
    pub fn dir(&self) -> PinDir {
        self.dir
    }

    /// Returns the data-rate multiplier (0 = combinational).
    pub fn xdr(&self) -> u8 {
        self.xdr
    }

    /// Single-rate input data.
    pub fn i(&self) -> Option<SignalId> {
        self.i
    }

    /// First-phase DDR input data.
    pub fn i0(&self) -> Option<SignalId> {
        self.i0
    }

    /// Second-phase DDR input data.
    pub fn i1(&self) -> Option<SignalId> {
        self.i1
    }

    /// Input capture clock.
    pub fn i_clk(&self) -> Option<SignalId> {
        self.i_clk
    }

    /// Single-rate output data.
    pub fn o(&self) -> Option<SignalId> {
        self.o
    }

    /// First-phase DDR output data.
    pub fn o0(&self) -> Option<SignalId> {
        self.o0
    }

    /// Second-phase DDR output data.
    pub fn o1(&self) -> Option<SignalId> {
        self.o1
    }

    /// Output launch clock.
    pub fn o_clk(&self) -> Option<SignalId> {
        self.o_clk
    }

    /// Output enable.
    pub fn oe(&self) -> Option<SignalId> {
        self.oe
    }

    /// Iterates over the allocated slots as `(slot name, signal)` pairs.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, SignalId)> + '_ {
        [
            ("i", self.i),
            ("i0", self.i0),
            ("i1", self.i1),
            ("i_clk", self.i_clk),
            ("o", self.o),
            ("o0", self.o0),
            ("o1", self.o1),
            ("o_clk", self.o_clk),
            ("oe", self.oe),
        ]
        .into_iter()
        .filter_map(|(slot, id)| id.map(|id| (slot, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_names(pin: &Pin) -> Vec<&'static str> {
        pin.slots().map(|(slot, _)| slot).collect()
    }

    #[test]
    fn combinational_input() {
        let mut design = Design::new("top");
        let pin = Pin::new(&mut design, "btn", 2, PinDir::I, 0).unwrap();
        assert_eq!(slot_names(&pin), vec!["i"]);
        let i = pin.i().unwrap();
        assert_eq!(design.signal_name(i), "btn__i");
        assert_eq!(design.signal_width(i), 2);
    }

    #[test]
    fn registered_bidirectional() {
        let mut design = Design::new("top");
        let pin = Pin::new(&mut design, "sda", 1, PinDir::Io, 1).unwrap();
        assert_eq!(slot_names(&pin), vec!["i", "i_clk", "o", "o_clk", "oe"]);
    }

    #[test]
    fn ddr_output_enable() {
        let mut design = Design::new("top");
        let pin = Pin::new(&mut design, "dq", 8, PinDir::Oe, 2).unwrap();
        assert_eq!(slot_names(&pin), vec!["o0", "o1", "o_clk", "oe"]);
        assert_eq!(design.signal_width(pin.o1().unwrap()), 8);
        assert_eq!(design.signal_width(pin.oe().unwrap()), 1);
        assert_eq!(design.signal_width(pin.o_clk().unwrap()), 1);
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut design = Design::new("top");
        let err = Pin::new(&mut design, "gpio", 0, PinDir::Io, 1).unwrap_err();
        assert_eq!(err.message, "pin 'gpio' has zero width");
        assert_eq!(design.signals().count(), 0);
    }

    #[test]
    fn unsupported_xdr_still_constructs() {
        let mut design = Design::new("top");
        let pin = Pin::new(&mut design, "x", 1, PinDir::O, 4).unwrap();
        assert_eq!(pin.xdr(), 4);
        assert_eq!(slot_names(&pin), vec!["o0", "o1", "o_clk"]);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("oe".parse::<PinDir>(), Ok(PinDir::Oe));
        assert!("inout".parse::<PinDir>().is_err());
        assert_eq!(PinDir::Io.to_string(), "io");
        assert!(PinDir::Io.has_input() && PinDir::Io.has_output() && PinDir::Io.has_tristate());
        assert!(!PinDir::O.has_tristate());
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let dir: PinDir = serde_json::from_str("\"io\"").unwrap();
        assert_eq!(dir, PinDir::Io);
    }
}
