//! The IO buffer emitter.
//!
//! One entry point covers every pin shape: the shape is derived from the
//! pin direction and whether the port is differential, then the capability
//! check, the XDR synthesizer and the boundary buffers run in that order.

use crate::error::IoError;
use crate::feature::{known_io_type, FeatureCheck, VALID_XDRS};
use crate::pin::{Pin, PinDir};
use crate::port::Port;
use crate::primitive::instantiate;
use crate::xdr::{synthesize, XdrSignals};
use ecp5_arch::{Attrs, Primitive};
use ecp5_common::InternalError;
use ecp5_netlist::{Design, Instance, SignalId, SignalRef};
use serde::Serialize;
use std::fmt;

/// Electrical signaling of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signaling {
    /// One net per bit.
    SingleEnded,
    /// A `p`/`n` pair per bit.
    Differential,
}

/// The combination of signaling and direction that selects a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PinShape {
    /// Single-ended or differential.
    pub signaling: Signaling,
    /// The pin direction.
    pub dir: PinDir,
}

impl PinShape {
    /// Derives the shape of `pin` bound to `port`.
    pub fn of(pin: &Pin, port: &Port) -> Self {
        let signaling = if port.is_differential() {
            Signaling::Differential
        } else {
            Signaling::SingleEnded
        };
        Self {
            signaling,
            dir: pin.dir(),
        }
    }

    /// Returns the feature name used in capability errors.
    pub fn feature_name(&self) -> String {
        let signaling = match self.signaling {
            Signaling::SingleEnded => "single-ended",
            Signaling::Differential => "differential",
        };
        let dir = match self.dir {
            PinDir::I => "input",
            PinDir::O => "output",
            PinDir::Oe => "tristate",
            PinDir::Io => "input/output",
        };
        format!("{signaling} {dir}")
    }

    /// Returns the boundary buffer for this shape.
    pub fn buffer(&self) -> Primitive {
        match self.dir {
            PinDir::I => Primitive::Ib,
            PinDir::O => Primitive::Ob,
            PinDir::Oe => Primitive::Obz,
            PinDir::Io => Primitive::Bb,
        }
    }
}

impl fmt::Display for PinShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.feature_name())
    }
}

/// What [`IoBufferEmitter::emit`] placed for one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmitReport {
    /// The shape that was implemented.
    pub shape: PinShape,
    /// The boundary buffer type.
    pub buffer: Primitive,
    /// Number of boundary buffers (one per port bit).
    pub buffers: u32,
    /// Number of cells added in total, including registers and inverters.
    pub cells: usize,
}

/// Emits the I/O primitives for pins.
pub struct IoBufferEmitter<'a> {
    checker: &'a dyn FeatureCheck,
}

impl<'a> IoBufferEmitter<'a> {
    /// Creates an emitter that consults `checker` before placing anything.
    pub fn new(checker: &'a dyn FeatureCheck) -> Self {
        Self { checker }
    }

    /// Implements `pin` on `port`.
    ///
    /// `invert` applies to whichever of the input and output legs the shape
    /// has; the tristate enable is never affected by it.
    ///
    /// # Errors
    ///
    /// - [`IoError::UnsupportedFeature`] if the capability check rejects the
    ///   pin. Nothing is added to `design` in that case.
    /// - [`IoError::WidthMismatch`] if the port is not as wide as the pin.
    /// - [`IoError::Internal`] on a violated invariant.
    pub fn emit(
        &self,
        design: &mut Design,
        pin: &Pin,
        port: &Port,
        attrs: &Attrs,
        invert: bool,
    ) -> Result<EmitReport, IoError> {
        let shape = PinShape::of(pin, port);
        self.checker.check_feature(
            &shape.feature_name(),
            pin,
            attrs,
            &VALID_XDRS,
            &known_io_type,
        )?;

        let port_width = port.width(design);
        if port_width != pin.width() {
            return Err(IoError::WidthMismatch {
                pin: pin.name().to_string(),
                pin_width: pin.width(),
                port_width,
            });
        }

        let cells_before = design.cell_count();
        let xdr = synthesize(
            design,
            pin,
            invert && shape.dir.has_input(),
            invert && shape.dir.has_output(),
        )?;

        let pad = port.bound();
        let buffer = shape.buffer();
        for bit in 0..port_width {
            let instance = buffer_instance(pin, buffer, &xdr, pad, bit)?;
            instantiate(design, &format!("{}_{bit}", pin.name()), buffer, instance)?;
        }

        let report = EmitReport {
            shape,
            buffer,
            buffers: port_width,
            cells: design.cell_count() - cells_before,
        };
        tracing::debug!(
            pin = pin.name(),
            shape = %shape,
            xdr = pin.xdr(),
            invert,
            cells = report.cells,
            "emitted I/O buffers"
        );
        Ok(report)
    }
}

fn required(pin: &Pin, signal: Option<SignalId>, what: &str) -> Result<SignalId, InternalError> {
    signal.ok_or_else(|| {
        InternalError::new(format!(
            "XDR synthesis for pin '{}' produced no {what} net",
            pin.name()
        ))
    })
}

fn buffer_instance(
    pin: &Pin,
    buffer: Primitive,
    xdr: &XdrSignals,
    pad: SignalId,
    bit: u32,
) -> Result<Instance, InternalError> {
    let instance = Instance::new(buffer.name());
    Ok(match buffer {
        Primitive::Ib => instance
            .input("I", SignalRef::bit(pad, bit))
            .output("O", SignalRef::bit(required(pin, xdr.i, "input")?, bit)),
        Primitive::Ob => instance
            .input("I", SignalRef::bit(required(pin, xdr.o, "output")?, bit))
            .output("O", SignalRef::bit(pad, bit)),
        Primitive::Obz => instance
            .input("T", SignalRef::bit(required(pin, xdr.t, "tristate")?, 0))
            .input("I", SignalRef::bit(required(pin, xdr.o, "output")?, bit))
            .output("O", SignalRef::bit(pad, bit)),
        Primitive::Bb => instance
            .input("T", SignalRef::bit(required(pin, xdr.t, "tristate")?, 0))
            .input("I", SignalRef::bit(required(pin, xdr.o, "output")?, bit))
            .output("O", SignalRef::bit(required(pin, xdr.i, "input")?, bit))
            .inout("B", SignalRef::bit(pad, bit)),
        other => {
            return Err(InternalError::new(format!(
                "{other} is not a boundary buffer"
            )))
        }
    })
}
