//! Error types for I/O primitive selection.

use ecp5_common::InternalError;

/// Errors raised while implementing one pin.
///
/// An error affects only the pin it was raised for, but the enclosing build
/// is expected to abort rather than continue with a partial I/O ring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IoError {
    /// The pin shape, XDR level or attribute combination has no primitive mapping.
    #[error("{feature} is not supported: {reason}")]
    UnsupportedFeature {
        /// The pin shape, e.g. "differential tristate".
        feature: String,
        /// The violated constraint.
        reason: String,
    },

    /// The physical port does not have one bit per pin bit.
    #[error("pin '{pin}' is {pin_width} bits wide but its port has {port_width} bits")]
    WidthMismatch {
        /// The pin name.
        pin: String,
        /// The pin width.
        pin_width: u32,
        /// The port width.
        port_width: u32,
    },

    /// An internal invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}
