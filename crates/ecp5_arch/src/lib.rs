//! Lattice ECP5 architecture knowledge for the platform backend.
//!
//! This crate holds the process-wide static tables the rest of the backend
//! consults:
//!
//! - the [`Primitive`] catalog with fixed port signatures,
//! - the single-ended and differential I/O standards and the port
//!   [`Attrs`] that select them,
//! - the nextpnr device and package option tables behind [`resolve`].
//!
//! ```
//! use ecp5_arch::resolve;
//!
//! let opts = resolve("LFE5U-25F", "BG381", "6").unwrap();
//! assert_eq!(opts.device_flag, "--25k");
//! assert_eq!(opts.package_flag, "CABGA381");
//! ```

#![warn(missing_docs)]

pub mod attrs;
pub mod device;
pub mod error;
pub mod io_types;
pub mod primitives;

pub use attrs::Attrs;
pub use device::{devices, packages, resolve, DeviceOption, NextpnrOptions, PackageOption};
pub use error::ArchError;
pub use io_types::{should_skip_port_component, IoStandardKind, PortComponent, DEFAULT_IO_TYPE};
pub use primitives::{
    PortRole, PortSignature, Primitive, PrimitiveRole, LUT4_IDENTITY, LUT4_INVERT,
};
