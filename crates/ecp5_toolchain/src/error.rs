//! Error types for build planning and execution.

use crate::stages::StageKind;
use ecp5_arch::ArchError;
use ecp5_common::InternalError;
use ecp5_io::IoError;
use std::process::ExitStatus;

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The device or package is not supported.
    #[error(transparent)]
    Arch(#[from] ArchError),

    /// A resource could not be implemented.
    #[error("resource '{resource}': {source}")]
    Io {
        /// The resource name.
        resource: String,
        /// The underlying pin error.
        #[source]
        source: IoError,
    },

    /// The build request is inconsistent.
    #[error("invalid build request: {0}")]
    InvalidRequest(String),

    /// An internal invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Build artifacts could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file or directory.
        path: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A tool executable could not be located.
    #[error("cannot find {tool}: {reason}")]
    ToolNotFound {
        /// The tool name.
        tool: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// A tool could not be started.
    #[error("failed to start {tool}: {source}")]
    Spawn {
        /// The tool name.
        tool: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stage exited unsuccessfully; later stages were not run.
    #[error("{stage} failed with {status}")]
    StageFailed {
        /// The failed stage.
        stage: StageKind,
        /// Its exit status.
        status: ExitStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_arch_is_transparent() {
        let err: ToolchainError = ArchError::UnknownDevice("LFE5U-99F".to_string()).into();
        assert_eq!(err.to_string(), "unknown ECP5 device 'LFE5U-99F'");
    }

    #[test]
    fn display_io_names_resource() {
        let err = ToolchainError::Io {
            resource: "led".to_string(),
            source: IoError::WidthMismatch {
                pin: "led".to_string(),
                pin_width: 2,
                port_width: 1,
            },
        };
        assert_eq!(
            err.to_string(),
            "resource 'led': pin 'led' is 2 bits wide but its port has 1 bits"
        );
    }

    #[test]
    fn display_tool_not_found() {
        let err = ToolchainError::ToolNotFound {
            tool: "ecppack".to_string(),
            reason: "not in PATH".to_string(),
        };
        assert_eq!(err.to_string(), "cannot find ecppack: not in PATH");
    }
}
