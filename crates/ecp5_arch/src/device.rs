//! Device and package resolution for `nextpnr-ecp5`.
//!
//! The ECP5 family is selected on the nextpnr command line by a device flag
//! (one per die size and variant) and a package option. Both are looked up in
//! fixed tables by exact identifier. There is no fuzzy matching and no
//! fallback device: an unknown identifier is an error.

use crate::error::ArchError;
use serde::Serialize;

/// One entry of the device table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceOption {
    /// Lattice part identifier (e.g. "LFE5UM5G-85F").
    pub device: &'static str,
    /// Matching `nextpnr-ecp5` flag (e.g. "--um5g-85k").
    pub nextpnr_flag: &'static str,
}

/// One entry of the package table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageOption {
    /// Short package identifier used in part numbers (e.g. "BG381").
    pub package: &'static str,
    /// Package name as spelled by Lattice (e.g. "caBGA381").
    ///
    /// nextpnr matches the upper-cased form of this name.
    pub nextpnr_name: &'static str,
}

/// Known ECP5 devices.
///
/// The 12F parts share the 25k die, so they map to the 25k flags.
const DEVICE_OPTIONS: &[DeviceOption] = &[
    DeviceOption {
        device: "LFE5U-12F",
        nextpnr_flag: "--25k",
    },
    DeviceOption {
        device: "LFE5U-25F",
        nextpnr_flag: "--25k",
    },
    DeviceOption {
        device: "LFE5U-45F",
        nextpnr_flag: "--45k",
    },
    DeviceOption {
        device: "LFE5U-85F",
        nextpnr_flag: "--85k",
    },
    DeviceOption {
        device: "LFE5UM-12F",
        nextpnr_flag: "--um-25k",
    },
    DeviceOption {
        device: "LFE5UM-25F",
        nextpnr_flag: "--um-25k",
    },
    DeviceOption {
        device: "LFE5UM-45F",
        nextpnr_flag: "--um-45k",
    },
    DeviceOption {
        device: "LFE5UM-85F",
        nextpnr_flag: "--um-85k",
    },
    DeviceOption {
        device: "LFE5UM5G-12F",
        nextpnr_flag: "--um5g-25k",
    },
    DeviceOption {
        device: "LFE5UM5G-25F",
        nextpnr_flag: "--um5g-25k",
    },
    DeviceOption {
        device: "LFE5UM5G-45F",
        nextpnr_flag: "--um5g-45k",
    },
    DeviceOption {
        device: "LFE5UM5G-85F",
        nextpnr_flag: "--um5g-85k",
    },
];

/// Known ECP5 packages.
const PACKAGE_OPTIONS: &[PackageOption] = &[
    PackageOption {
        package: "BG256",
        nextpnr_name: "caBGA256",
    },
    PackageOption {
        package: "MG285",
        nextpnr_name: "csfBGA285",
    },
    PackageOption {
        package: "BG381",
        nextpnr_name: "caBGA381",
    },
    PackageOption {
        package: "BG554",
        nextpnr_name: "caBGA554",
    },
    PackageOption {
        package: "BG756",
        nextpnr_name: "caBGA756",
    },
];

/// Resolved `nextpnr-ecp5` options for one device descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextpnrOptions {
    /// Device flag, e.g. `--25k`.
    pub device_flag: String,
    /// Value for `--package`, upper-cased, e.g. `CABGA381`.
    pub package_flag: String,
    /// Value for `--speed`, forwarded verbatim.
    pub speed_flag: String,
}

/// Resolves a device descriptor into `nextpnr-ecp5` options.
///
/// `speed` is not checked against any table; nextpnr validates it for the
/// selected device.
///
/// # Errors
///
/// Returns [`ArchError::UnknownDevice`] or [`ArchError::UnknownPackage`] if
/// either identifier is missing from its table. The device is checked first.
pub fn resolve(device: &str, package: &str, speed: &str) -> Result<NextpnrOptions, ArchError> {
    let device_option = DEVICE_OPTIONS
        .iter()
        .find(|d| d.device == device)
        .ok_or_else(|| ArchError::UnknownDevice(device.to_string()))?;
    let package_option = PACKAGE_OPTIONS
        .iter()
        .find(|p| p.package == package)
        .ok_or_else(|| ArchError::UnknownPackage(package.to_string()))?;

    tracing::debug!(
        device,
        package,
        speed,
        flag = device_option.nextpnr_flag,
        "resolved ECP5 device"
    );

    Ok(NextpnrOptions {
        device_flag: device_option.nextpnr_flag.to_string(),
        package_flag: package_option.nextpnr_name.to_uppercase(),
        speed_flag: speed.to_string(),
    })
}

/// Returns the device table in catalog order.
pub fn devices() -> &'static [DeviceOption] {
    DEVICE_OPTIONS
}

/// Returns the package table in catalog order.
pub fn packages() -> &'static [PackageOption] {
    PACKAGE_OPTIONS
}
