//! The XDR buffer synthesizer.
//!
//! Turns the core-facing slots of a [`Pin`] into the nets a boundary buffer
//! connects to, placing the registers, DDR gearboxes and inverters the
//! pin's data rate and polarity call for:
//!
//! | xdr | input side              | output side             | tristate enable      |
//! |-----|-------------------------|-------------------------|----------------------|
//! | 0   | wire                    | wire                    | `LUT4` inverter      |
//! | 1   | `IFS1P3DX` per bit      | `OFS1P3DX` per bit      | inverter + `OFS1P3DX`|
//! | 2   | `IDDRX1F` per bit       | `ODDRX1F` per bit       | inverter + `OFS1P3DX`|
//!
//! Inversion, when requested, is a `LUT4` (INIT `0x5555`) per bit that
//! precedes the register: between pad and capture register on the input
//! side, between core and launch register on the output side. The enable
//! stays single-rate for DDR pins.

use crate::pin::Pin;
use crate::primitive::instantiate;
use ecp5_arch::{Primitive, LUT4_INVERT};
use ecp5_common::{Ecp5Result, InternalError};
use ecp5_netlist::{Design, Instance, ParamValue, SignalId, SignalRef};

/// The buffer-facing nets produced for one pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XdrSignals {
    /// Normalized input (pad to core), W bits.
    pub i: Option<SignalId>,
    /// Normalized output (core to pad), W bits.
    pub o: Option<SignalId>,
    /// Active-low tristate enable, 1 bit.
    pub t: Option<SignalId>,
}

/// Places the clocking and inversion primitives for `pin`.
///
/// Which of `i`, `o` and `t` are returned follows the pin direction. With
/// `xdr = 0` and no inversion the returned nets are the pin's own slots.
///
/// # Errors
///
/// Returns [`InternalError`] if `pin.xdr()` is not 0, 1 or 2, or if a slot
/// implied by the pin direction is missing. Nothing is added to `design`
/// when the XDR level is rejected.
pub fn synthesize(
    design: &mut Design,
    pin: &Pin,
    invert_input: bool,
    invert_output: bool,
) -> Ecp5Result<XdrSignals> {
    if pin.xdr() > 2 {
        return Err(InternalError::new(format!(
            "pin '{}' reached the XDR buffer synthesizer with xdr {}",
            pin.name(),
            pin.xdr()
        )));
    }

    let mut signals = XdrSignals::default();
    if pin.dir().has_input() {
        signals.i = Some(input_path(design, pin, invert_input)?);
    }
    if pin.dir().has_output() {
        signals.o = Some(output_path(design, pin, invert_output)?);
    }
    if pin.dir().has_tristate() {
        signals.t = Some(tristate_path(design, pin)?);
    }
    Ok(signals)
}

fn slot(pin: &Pin, signal: Option<SignalId>, slot: &str) -> Ecp5Result<SignalId> {
    signal.ok_or_else(|| {
        InternalError::new(format!("pin '{}' has no '{slot}' signal", pin.name()))
    })
}

fn input_path(design: &mut Design, pin: &Pin, invert: bool) -> Ecp5Result<SignalId> {
    let name = pin.name();
    let width = pin.width();
    match pin.xdr() {
        0 => {
            let i = slot(pin, pin.i(), "i")?;
            if !invert {
                return Ok(i);
            }
            let pad = design.add_signal(&format!("{name}_xdr_i"), width);
            invert_bits(design, &format!("{name}_i_inv"), pad, i)?;
            Ok(pad)
        }
        1 => {
            let i = slot(pin, pin.i(), "i")?;
            let clk = slot(pin, pin.i_clk(), "i_clk")?;
            let pad = design.add_signal(&format!("{name}_xdr_i"), width);
            let d = maybe_invert(design, pin, pad, invert, "i_n")?;
            for bit in 0..width {
                instantiate(
                    design,
                    &format!("{name}_i_ff_{bit}"),
                    Primitive::Ifs1p3dx,
                    Instance::new(Primitive::Ifs1p3dx.name())
                        .input("SCLK", clk)
                        .input("SP", SignalRef::one())
                        .input("CD", SignalRef::zero())
                        .input("D", SignalRef::bit(d, bit))
                        .output("Q", SignalRef::bit(i, bit)),
                )?;
            }
            Ok(pad)
        }
        2 => {
            let i0 = slot(pin, pin.i0(), "i0")?;
            let i1 = slot(pin, pin.i1(), "i1")?;
            let clk = slot(pin, pin.i_clk(), "i_clk")?;
            let pad = design.add_signal(&format!("{name}_xdr_i"), width);
            let d = maybe_invert(design, pin, pad, invert, "i_n")?;
            for bit in 0..width {
                instantiate(
                    design,
                    &format!("{name}_iddr_{bit}"),
                    Primitive::Iddrx1f,
                    Instance::new(Primitive::Iddrx1f.name())
                        .input("SCLK", clk)
                        .input("RST", SignalRef::zero())
                        .input("D", SignalRef::bit(d, bit))
                        .output("Q0", SignalRef::bit(i0, bit))
                        .output("Q1", SignalRef::bit(i1, bit)),
                )?;
            }
            Ok(pad)
        }
        xdr => Err(InternalError::new(format!("unsupported xdr {xdr}"))),
    }
}

fn output_path(design: &mut Design, pin: &Pin, invert: bool) -> Ecp5Result<SignalId> {
    let name = pin.name();
    let width = pin.width();
    match pin.xdr() {
        0 => {
            let o = slot(pin, pin.o(), "o")?;
            maybe_invert(design, pin, o, invert, "o_n")
        }
        1 => {
            let o = slot(pin, pin.o(), "o")?;
            let clk = slot(pin, pin.o_clk(), "o_clk")?;
            let d = maybe_invert(design, pin, o, invert, "o_n")?;
            let pad = design.add_signal(&format!("{name}_xdr_o"), width);
            for bit in 0..width {
                instantiate(
                    design,
                    &format!("{name}_o_ff_{bit}"),
                    Primitive::Ofs1p3dx,
                    Instance::new(Primitive::Ofs1p3dx.name())
                        .input("SCLK", clk)
                        .input("SP", SignalRef::one())
                        .input("CD", SignalRef::zero())
                        .input("D", SignalRef::bit(d, bit))
                        .output("Q", SignalRef::bit(pad, bit)),
                )?;
            }
            Ok(pad)
        }
        2 => {
            let o0 = slot(pin, pin.o0(), "o0")?;
            let o1 = slot(pin, pin.o1(), "o1")?;
            let clk = slot(pin, pin.o_clk(), "o_clk")?;
            let d0 = maybe_invert(design, pin, o0, invert, "o0_n")?;
            let d1 = maybe_invert(design, pin, o1, invert, "o1_n")?;
            let pad = design.add_signal(&format!("{name}_xdr_o"), width);
            for bit in 0..width {
                instantiate(
                    design,
                    &format!("{name}_oddr_{bit}"),
                    Primitive::Oddrx1f,
                    Instance::new(Primitive::Oddrx1f.name())
                        .input("SCLK", clk)
                        .input("RST", SignalRef::zero())
                        .input("D0", SignalRef::bit(d0, bit))
                        .input("D1", SignalRef::bit(d1, bit))
                        .output("Q", SignalRef::bit(pad, bit)),
                )?;
            }
            Ok(pad)
        }
        xdr => Err(InternalError::new(format!("unsupported xdr {xdr}"))),
    }
}

fn tristate_path(design: &mut Design, pin: &Pin) -> Ecp5Result<SignalId> {
    let name = pin.name();
    let oe = slot(pin, pin.oe(), "oe")?;
    let oe_n = maybe_invert(design, pin, oe, true, "oe_n")?;
    if pin.xdr() == 0 {
        return Ok(oe_n);
    }
    let clk = slot(pin, pin.o_clk(), "o_clk")?;
    let t = design.add_signal(&format!("{name}_xdr_t"), 1);
    instantiate(
        design,
        &format!("{name}_t_ff"),
        Primitive::Ofs1p3dx,
        Instance::new(Primitive::Ofs1p3dx.name())
            .input("SCLK", clk)
            .input("SP", SignalRef::one())
            .input("CD", SignalRef::zero())
            .input("D", SignalRef::bit(oe_n, 0))
            .output("Q", SignalRef::bit(t, 0)),
    )?;
    Ok(t)
}

/// Returns `src` unchanged, or a new `<pin>_<suffix>` net driven by one
/// inverter per bit of `src`.
fn maybe_invert(
    design: &mut Design,
    pin: &Pin,
    src: SignalId,
    invert: bool,
    suffix: &str,
) -> Ecp5Result<SignalId> {
    if !invert {
        return Ok(src);
    }
    let width = design.signal_width(src);
    let dst = design.add_signal(&format!("{}_{suffix}", pin.name()), width);
    invert_bits(design, &format!("{}_{suffix}_inv", pin.name()), src, dst)?;
    Ok(dst)
}

fn invert_bits(design: &mut Design, name: &str, src: SignalId, dst: SignalId) -> Ecp5Result<()> {
    for bit in 0..design.signal_width(src) {
        instantiate(
            design,
            &format!("{name}_{bit}"),
            Primitive::Lut4,
            Instance::new(Primitive::Lut4.name())
                .param(
                    "INIT",
                    ParamValue::Bits {
                        value: LUT4_INVERT,
                        width: 16,
                    },
                )
                .input("A", SignalRef::bit(src, bit))
                .output("Z", SignalRef::bit(dst, bit)),
        )?;
    }
    Ok(())
}
