//! Shared foundational types used across the ECP5 platform backend.
//!
//! This crate provides interned identifiers for netlist names, clock
//! frequencies that keep their source literal, and the internal error type
//! used for invariant violations.

#![warn(missing_docs)]

pub mod frequency;
pub mod ident;
pub mod result;

pub use frequency::{Frequency, ParseFrequencyError};
pub use ident::{Ident, Interner};
pub use result::{Ecp5Result, InternalError};
