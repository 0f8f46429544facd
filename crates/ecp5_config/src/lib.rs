//! Parsing and validation of `ecp5.toml` project configuration files.
//!
//! The configuration names the user's core module and sources, the board
//! resources (pins, directions, attributes), clock constraints, one or more
//! device targets and the toolchain overrides. [`resolve_target`] merges
//! the global settings with one target into a [`ResolvedTarget`], and
//! [`apply_env_overrides`] layers `ECP5_*` environment variables on top.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod overrides;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use overrides::{apply_env_overrides, apply_process_env};
pub use resolve::{resolve_target, ResolvedTarget};
pub use types::*;
