//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating an `ecp5.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A referenced target name does not exist in the configuration.
    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A clock names a resource that no section of the file defines.
    #[error("clock '{clock}' refers to unknown resource '{resource}'")]
    UnknownClockResource {
        /// Clock table key.
        clock: String,
        /// The missing resource.
        resource: String,
    },

    /// An `ECP5_*` environment variable holds a value that cannot be used.
    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidEnvOverride {
        /// Variable name.
        var: String,
        /// The rejected value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_target() {
        let err = ConfigError::UnknownTarget("ulx3s".to_string());
        assert_eq!(format!("{err}"), "unknown target 'ulx3s'");
    }

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("project.top".to_string());
        assert_eq!(format!("{err}"), "missing required field: project.top");
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("resource 'led' has no pins".to_string());
        assert_eq!(
            format!("{err}"),
            "validation error: resource 'led' has no pins"
        );
    }

    #[test]
    fn display_unknown_clock_resource() {
        let err = ConfigError::UnknownClockResource {
            clock: "sys".to_string(),
            resource: "clk25".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "clock 'sys' refers to unknown resource 'clk25'"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::IoError(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
