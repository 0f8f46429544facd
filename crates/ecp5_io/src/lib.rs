//! I/O primitive selection for the Lattice ECP5 family.
//!
//! Given an abstract [`Pin`] and the physical [`Port`] it is bound to, this
//! crate decides which vendor primitives implement it and appends them to a
//! [`Design`](ecp5_netlist::Design):
//!
//! 1. [`xdr::synthesize`] places the clocking and inversion primitives
//!    (`IFS1P3DX`/`OFS1P3DX` registers, `IDDRX1F`/`ODDRX1F` gearboxes and
//!    `LUT4` inverters) and returns the buffer-facing nets.
//! 2. [`IoBufferEmitter::emit`] runs the capability check, calls the
//!    synthesizer and attaches one boundary buffer (`IB`, `OB`, `OBZ` or `BB`)
//!    per port bit. Differential ports only ever bind the `p` net.

#![warn(missing_docs)]

pub mod buffer;
pub mod error;
pub mod feature;
pub mod pin;
pub mod port;
mod primitive;
pub mod xdr;

pub use buffer::{EmitReport, IoBufferEmitter, PinShape, Signaling};
pub use error::IoError;
pub use feature::{known_io_type, FeatureCheck, StandardFeatureCheck, VALID_XDRS};
pub use pin::{Pin, PinDir};
pub use port::Port;
pub use xdr::{synthesize, XdrSignals};
