//! Capability checks run before any primitive is placed.
//!
//! Each pin shape declares the XDR levels it supports and a predicate over
//! the port attributes. The check is behind a trait so that callers (and
//! tests) can substitute their own policy.

use crate::error::IoError;
use crate::pin::Pin;
use ecp5_arch::{Attrs, IoStandardKind};

/// XDR levels the ECP5 I/O path can implement.
pub const VALID_XDRS: [u8; 3] = [0, 1, 2];

/// Predicate over port attributes. `Err` carries the violated constraint.
pub type AttrPredicate<'a> = &'a dyn Fn(&Attrs) -> Result<(), String>;

/// Decides whether a pin shape can be implemented.
pub trait FeatureCheck {
    /// Checks `pin` and `attrs` against the constraints of `feature`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFeature`] naming `feature` and the
    /// violated constraint.
    fn check_feature(
        &self,
        feature: &str,
        pin: &Pin,
        attrs: &Attrs,
        valid_xdrs: &[u8],
        valid_attrs: AttrPredicate<'_>,
    ) -> Result<(), IoError>;
}

/// The default check: the XDR must be listed and the predicate must hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFeatureCheck;

impl FeatureCheck for StandardFeatureCheck {
    fn check_feature(
        &self,
        feature: &str,
        pin: &Pin,
        attrs: &Attrs,
        valid_xdrs: &[u8],
        valid_attrs: AttrPredicate<'_>,
    ) -> Result<(), IoError> {
        if !valid_xdrs.contains(&pin.xdr()) {
            let supported: Vec<String> = valid_xdrs.iter().map(u8::to_string).collect();
            return Err(IoError::UnsupportedFeature {
                feature: feature.to_string(),
                reason: format!(
                    "XDR {} on pin '{}' (supported: {})",
                    pin.xdr(),
                    pin.name(),
                    supported.join(", ")
                ),
            });
        }
        valid_attrs(attrs).map_err(|reason| IoError::UnsupportedFeature {
            feature: feature.to_string(),
            reason,
        })
    }
}

/// Attribute predicate used for every ECP5 pin shape.
///
/// `IO_TYPE` may be absent (the default standard applies); if present it
/// must name a known single-ended or differential standard.
pub fn known_io_type(attrs: &Attrs) -> Result<(), String> {
    match attrs.get("IO_TYPE") {
        Some(io_type) if IoStandardKind::of(io_type).is_none() => {
            Err(format!("unknown IO_TYPE '{io_type}'"))
        }
        _ => Ok(()),
    }
}
