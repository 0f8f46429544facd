//! `ecp5 devices`: list the supported parts and packages.

use ecp5_arch::{devices, packages, DeviceOption, PackageOption};
use serde::Serialize;

use crate::{DevicesArgs, ReportFormat};

#[derive(Serialize)]
struct Catalog {
    devices: &'static [DeviceOption],
    packages: &'static [PackageOption],
}

/// Runs the `ecp5 devices` command.
pub fn run(args: &DevicesArgs) -> Result<i32, Box<dyn std::error::Error>> {
    println!("{}", render(args.format)?);
    Ok(0)
}

fn render(format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(&Catalog {
            devices: devices(),
            packages: packages(),
        }),
        ReportFormat::Text => Ok(render_text()),
    }
}

fn render_text() -> String {
    let mut out = String::from("Devices:\n");
    for d in devices() {
        out.push_str(&format!("  {:<14} {}\n", d.device, d.nextpnr_flag));
    }
    out.push_str("Packages:\n");
    for p in packages() {
        out.push_str(&format!("  {:<14} {}\n", p.package, p.nextpnr_name));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_every_entry() {
        let text = render(ReportFormat::Text).unwrap();
        assert!(text.starts_with("Devices:\n  LFE5U-12F      --25k\n"));
        assert!(text.contains("  LFE5UM5G-85F   --um5g-85k\n"));
        assert!(text.ends_with("  BG756          caBGA756"));
        assert_eq!(text.lines().count(), 2 + 12 + 5);
    }

    #[test]
    fn json_round_trips_through_serde() {
        let json = render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["devices"].as_array().unwrap().len(), 12);
        assert_eq!(value["packages"][1]["package"], "MG285");
        assert_eq!(value["packages"][1]["nextpnr_name"], "csfBGA285");
    }
}
