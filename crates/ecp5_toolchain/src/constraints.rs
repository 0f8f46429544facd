//! LPF constraint file generation.
//!
//! Every bit of every port component gets a `LOCATE` and an `IOBUF`
//! directive. The negative leg of a pair is skipped when the port uses a
//! differential standard, since the buffer at the positive site drives both.

use ecp5_arch::{should_skip_port_component, Attrs, PortComponent};
use ecp5_common::Frequency;
use ecp5_netlist::verilog::AUTOGENERATED;
use serde::Serialize;
use std::fmt::Write;

/// Package sites of a resource, one per bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Sites {
    /// Single-ended sites.
    Single(Vec<String>),
    /// Positive and negative sites of a differential pair.
    Differential {
        /// Positive sites.
        p: Vec<String>,
        /// Negative sites.
        n: Vec<String>,
    },
}

impl Sites {
    /// Returns the number of bits.
    pub fn width(&self) -> usize {
        match self {
            Sites::Single(sites) => sites.len(),
            Sites::Differential { p, .. } => p.len(),
        }
    }

    /// Returns the components with their sites, in `io`, `p`, `n` order.
    pub fn components(&self) -> Vec<(PortComponent, &[String])> {
        match self {
            Sites::Single(sites) => vec![(PortComponent::Io, sites.as_slice())],
            Sites::Differential { p, n } => vec![
                (PortComponent::P, p.as_slice()),
                (PortComponent::N, n.as_slice()),
            ],
        }
    }
}

/// Placement and attributes of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortConstraints {
    /// Resource name; ports are called `<resource>__<component>`.
    pub resource: String,
    /// Package sites.
    pub sites: Sites,
    /// `IOBUF` attributes.
    pub attrs: Attrs,
}

/// One constrained port bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConstraintBit<'a> {
    /// Resource the bit belongs to.
    pub resource: &'a str,
    /// Port component.
    pub component: PortComponent,
    /// Bit index within the component.
    pub bit: usize,
    /// Package site.
    pub site: &'a str,
    /// `IOBUF` attributes.
    pub attrs: &'a Attrs,
    width: usize,
}

impl PortConstraintBit<'_> {
    /// Returns the port name as it appears in the netlist: `<resource>__io`
    /// for one-bit ports, `<resource>__io[<bit>]` otherwise.
    pub fn port_name(&self) -> String {
        let base = format!("{}__{}", self.resource, self.component.suffix());
        if self.width > 1 {
            format!("{base}[{}]", self.bit)
        } else {
            base
        }
    }
}

/// A frequency constraint on a top-level port or a net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockConstraint {
    /// Port or net name.
    pub signal: String,
    /// Frequency, emitted exactly as written.
    pub frequency: Frequency,
}

/// Lists every constrained port bit in resource, component and bit order.
pub fn iter_port_constraint_bits(
    ports: &[PortConstraints],
) -> impl Iterator<Item = PortConstraintBit<'_>> {
    ports.iter().flat_map(|port| {
        let width = port.sites.width();
        port.sites
            .components()
            .into_iter()
            .filter(move |(component, _)| !should_skip_port_component(&port.attrs, *component))
            .flat_map(move |(component, sites)| {
                sites.iter().enumerate().map(move |(bit, site)| PortConstraintBit {
                    resource: &port.resource,
                    component,
                    bit,
                    site,
                    attrs: &port.attrs,
                    width,
                })
            })
    })
}

/// Renders the LPF file.
pub fn emit_lpf(ports: &[PortConstraints], clocks: &[ClockConstraint]) -> String {
    let mut out = String::new();
    let _ = write_lpf(ports, clocks, &mut out);
    out
}

fn write_lpf(
    ports: &[PortConstraints],
    clocks: &[ClockConstraint],
    out: &mut String,
) -> std::fmt::Result {
    writeln!(out, "# {AUTOGENERATED}")?;
    writeln!(out, "BLOCK ASYNCPATHS;")?;
    writeln!(out, "BLOCK RESETPATHS;")?;
    for bit in iter_port_constraint_bits(ports) {
        let port = bit.port_name();
        writeln!(out, "LOCATE COMP \"{port}\" SITE \"{}\";", bit.site)?;
        write!(out, "IOBUF PORT \"{port}\"")?;
        for (key, value) in bit.attrs.iter() {
            write!(out, " {key}={value}")?;
        }
        writeln!(out, ";")?;
    }
    for clock in clocks {
        writeln!(
            out,
            "FREQUENCY PORT \"{}\" {} HZ;",
            clock.signal, clock.frequency
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_bit_port_has_no_index() {
        let ports = [PortConstraints {
            resource: "clk".to_string(),
            sites: Sites::Single(sites(&["G2"])),
            attrs: Attrs::from_pairs([("IO_TYPE", "LVCMOS33")]),
        }];
        let lpf = emit_lpf(&ports, &[]);
        assert!(lpf.contains("LOCATE COMP \"clk__io\" SITE \"G2\";\n"));
        assert!(lpf.contains("IOBUF PORT \"clk__io\" IO_TYPE=LVCMOS33;\n"));
    }

    #[test]
    fn multi_bit_port_is_indexed_and_attrs_keep_order() {
        let ports = [PortConstraints {
            resource: "led".to_string(),
            sites: Sites::Single(sites(&["B2", "C2"])),
            attrs: Attrs::from_pairs([("DRIVE", "4"), ("IO_TYPE", "LVCMOS33")]),
        }];
        let lpf = emit_lpf(&ports, &[]);
        let expected = "\
# Automatically generated by ecp5. Do not edit.
BLOCK ASYNCPATHS;
BLOCK RESETPATHS;
LOCATE COMP \"led__io[0]\" SITE \"B2\";
IOBUF PORT \"led__io[0]\" DRIVE=4 IO_TYPE=LVCMOS33;
LOCATE COMP \"led__io[1]\" SITE \"C2\";
IOBUF PORT \"led__io[1]\" DRIVE=4 IO_TYPE=LVCMOS33;
";
        assert_eq!(lpf, expected);
    }

    #[test]
    fn differential_standard_skips_negative_leg() {
        let ports = [PortConstraints {
            resource: "clk".to_string(),
            sites: Sites::Differential {
                p: sites(&["A4"]),
                n: sites(&["A5"]),
            },
            attrs: Attrs::from_pairs([("IO_TYPE", "LVDS")]),
        }];
        let names: Vec<_> = iter_port_constraint_bits(&ports)
            .map(|b| b.port_name())
            .collect();
        assert_eq!(names, vec!["clk__p"]);
    }

    #[test]
    fn single_ended_standard_on_pair_constrains_both_legs() {
        let ports = [PortConstraints {
            resource: "pair".to_string(),
            sites: Sites::Differential {
                p: sites(&["A4", "B4"]),
                n: sites(&["A5", "B5"]),
            },
            attrs: Attrs::new(),
        }];
        let bits: Vec<_> = iter_port_constraint_bits(&ports)
            .map(|b| (b.port_name(), b.site.to_string()))
            .collect();
        assert_eq!(
            bits,
            vec![
                ("pair__p[0]".to_string(), "A4".to_string()),
                ("pair__p[1]".to_string(), "B4".to_string()),
                ("pair__n[0]".to_string(), "A5".to_string()),
                ("pair__n[1]".to_string(), "B5".to_string()),
            ]
        );
    }

    #[test]
    fn port_without_attrs_has_bare_iobuf() {
        let ports = [PortConstraints {
            resource: "btn".to_string(),
            sites: Sites::Single(sites(&["R1"])),
            attrs: Attrs::new(),
        }];
        assert!(emit_lpf(&ports, &[]).contains("IOBUF PORT \"btn__io\";\n"));
    }

    #[test]
    fn frequency_literal_is_verbatim() {
        let clocks = [ClockConstraint {
            signal: "clk__io".to_string(),
            frequency: "25000000.0".parse().unwrap(),
        }];
        let lpf = emit_lpf(&[], &clocks);
        assert!(lpf.ends_with("FREQUENCY PORT \"clk__io\" 25000000.0 HZ;\n"));
    }
}
