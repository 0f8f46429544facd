//! Error types for device and package resolution.

/// Errors raised while resolving a device descriptor.
///
/// Both variants are fatal for a build: every toolchain flag downstream
/// depends on the resolved options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArchError {
    /// The device identifier is not in the ECP5 device table.
    #[error("unknown ECP5 device '{0}'")]
    UnknownDevice(String),

    /// The package identifier is not in the ECP5 package table.
    #[error("unknown ECP5 package '{0}'")]
    UnknownPackage(String),
}
