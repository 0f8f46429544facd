//! Signal definitions and references.

use crate::cell::PortDirection;
use crate::ids::SignalId;
use ecp5_common::Ident;
use serde::{Deserialize, Serialize};

/// Whether a signal is internal or backs a top-level port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// An internal net.
    Wire,
    /// A top-level module port with the given direction.
    Port(PortDirection),
}

/// A named multi-bit net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// The unique ID of this signal.
    pub id: SignalId,
    /// The signal name, unique within the design.
    pub name: Ident,
    /// Width in bits (always at least 1).
    pub width: u32,
    /// Internal net or top-level port.
    pub kind: SignalKind,
}

/// A reference to a whole signal, one bit of a signal, or a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalRef {
    /// The full signal.
    Signal(SignalId),
    /// A single bit of a signal.
    Bit {
        /// The signal being indexed.
        signal: SignalId,
        /// The bit index.
        index: u32,
    },
    /// A constant driver.
    Const {
        /// The constant value (low `width` bits are significant).
        value: u64,
        /// The width in bits.
        width: u32,
    },
}

impl SignalRef {
    /// Returns a reference to bit `index` of `signal`.
    pub fn bit(signal: SignalId, index: u32) -> Self {
        SignalRef::Bit { signal, index }
    }

    /// Returns the single-bit constant `0`.
    pub fn zero() -> Self {
        SignalRef::Const { value: 0, width: 1 }
    }

    /// Returns the single-bit constant `1`.
    pub fn one() -> Self {
        SignalRef::Const { value: 1, width: 1 }
    }

    /// Returns the referenced signal, or `None` for constants.
    pub fn signal_id(&self) -> Option<SignalId> {
        match *self {
            SignalRef::Signal(id) | SignalRef::Bit { signal: id, .. } => Some(id),
            SignalRef::Const { .. } => None,
        }
    }

    /// Returns `true` if this reference touches `signal` in any way.
    pub fn refers_to(&self, signal: SignalId) -> bool {
        self.signal_id() == Some(signal)
    }
}

impl From<SignalId> for SignalRef {
    fn from(id: SignalId) -> Self {
        SignalRef::Signal(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_refers_to_its_signal() {
        let s = SignalId::from_raw(4);
        let r = SignalRef::bit(s, 2);
        assert!(r.refers_to(s));
        assert!(!r.refers_to(SignalId::from_raw(5)));
        assert_eq!(r.signal_id(), Some(s));
    }

    #[test]
    fn constants_refer_to_nothing() {
        assert_eq!(SignalRef::one().signal_id(), None);
        assert_eq!(SignalRef::zero(), SignalRef::Const { value: 0, width: 1 });
    }

    #[test]
    fn from_signal_id() {
        let s = SignalId::from_raw(1);
        assert_eq!(SignalRef::from(s), SignalRef::Signal(s));
    }
}
