//! Structural Verilog output.
//!
//! The design is written as one flat module. Only declarations and instances
//! are produced; there are no behavioral statements, so the output reads back
//! into Yosys with `read_verilog` unchanged.

use crate::design::Design;
use crate::signal::{Signal, SignalKind, SignalRef};
use std::fmt::Write;

/// Header line placed at the top of every generated file.
pub const AUTOGENERATED: &str = "Automatically generated by ecp5. Do not edit.";

/// Renders `design` as a structural Verilog module.
pub fn write_verilog(design: &Design) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_module(design, &mut out);
    out
}

fn write_module(design: &Design, out: &mut String) -> std::fmt::Result {
    writeln!(out, "// {AUTOGENERATED}")?;
    let port_names: Vec<&str> = design.ports().map(|p| design.resolve(p.name)).collect();
    if port_names.is_empty() {
        writeln!(out, "module {};", design.name())?;
    } else {
        writeln!(out, "module {} (", design.name())?;
        for (i, name) in port_names.iter().enumerate() {
            let sep = if i + 1 == port_names.len() { "" } else { "," };
            writeln!(out, "    {name}{sep}")?;
        }
        writeln!(out, ");")?;
    }

    for port in design.ports() {
        if let SignalKind::Port(direction) = port.kind {
            writeln!(
                out,
                "    {}{} {};",
                direction.keyword(),
                range(port),
                design.resolve(port.name)
            )?;
        }
    }
    for signal in design.signals() {
        if signal.kind == SignalKind::Wire {
            writeln!(out, "    wire{} {};", range(signal), design.resolve(signal.name))?;
        }
    }

    for cell in design.cells() {
        writeln!(out)?;
        write!(out, "    {}", design.resolve(cell.cell_type))?;
        if !cell.params.is_empty() {
            writeln!(out, " #(")?;
            for (i, (name, value)) in cell.params.iter().enumerate() {
                let sep = if i + 1 == cell.params.len() { "" } else { "," };
                writeln!(out, "        .{}({value}){sep}", design.resolve(*name))?;
            }
            write!(out, "    )")?;
        }
        writeln!(out, " {} (", design.resolve(cell.name))?;
        for (i, conn) in cell.connections.iter().enumerate() {
            let sep = if i + 1 == cell.connections.len() { "" } else { "," };
            writeln!(
                out,
                "        .{}({}){sep}",
                design.resolve(conn.port),
                signal_ref(design, &conn.signal)
            )?;
        }
        writeln!(out, "    );")?;
    }

    writeln!(out, "endmodule")
}

fn range(signal: &Signal) -> String {
    if signal.width > 1 {
        format!(" [{}:0]", signal.width - 1)
    } else {
        String::new()
    }
}

fn signal_ref(design: &Design, r: &SignalRef) -> String {
    match *r {
        SignalRef::Signal(id) => design.signal_name(id).to_string(),
        SignalRef::Bit { signal, index } => {
            if design.signal_width(signal) > 1 {
                format!("{}[{index}]", design.signal_name(signal))
            } else {
                design.signal_name(signal).to_string()
            }
        }
        SignalRef::Const { value, width } => {
            if width == 1 {
                format!("1'b{}", value & 1)
            } else {
                format!("{width}'h{value:X}")
            }
        }
    }
}

/// Returns `true` if `name` is a plain Verilog identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Instance, ParamValue, PortDirection};

    #[test]
    fn writes_ports_wires_and_instances() {
        let mut design = Design::new("top");
        let pad = design.add_port("led__io", 2, PortDirection::Output);
        let o = design.add_signal("led__o", 2);
        design.instantiate(
            "led_0",
            Instance::new("OB")
                .input("I", SignalRef::bit(o, 0))
                .output("O", SignalRef::bit(pad, 0)),
        );
        let text = write_verilog(&design);
        assert!(text.starts_with("// Automatically generated"));
        assert!(text.contains("module top (\n    led__io\n);"));
        assert!(text.contains("    output [1:0] led__io;"));
        assert!(text.contains("    wire [1:0] led__o;"));
        assert!(text.contains("    OB led_0 (\n        .I(led__o[0]),\n        .O(led__io[0])\n    );"));
        assert!(text.trim_end().ends_with("endmodule"));
    }

    #[test]
    fn writes_params_and_constants() {
        let mut design = Design::new("top");
        let a = design.add_signal("a", 1);
        let q = design.add_signal("q", 1);
        design.instantiate(
            "ff",
            Instance::new("IFS1P3DX")
                .input("SP", SignalRef::one())
                .input("CD", SignalRef::zero())
                .input("D", SignalRef::bit(a, 0))
                .output("Q", SignalRef::bit(q, 0)),
        );
        design.instantiate(
            "inv",
            Instance::new("LUT4")
                .param("INIT", ParamValue::Bits { value: 0x5555, width: 16 })
                .input("A", a)
                .output("Z", q),
        );
        let text = write_verilog(&design);
        assert!(text.contains(".SP(1'b1)"));
        assert!(text.contains(".CD(1'b0)"));
        assert!(text.contains(".D(a)"));
        assert!(text.contains("    LUT4 #(\n        .INIT(16'h5555)\n    ) inv ("));
        assert!(text.contains("module top;"));
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("led__io"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1led"));
        assert!(!is_identifier("led-io"));
        assert!(!is_identifier(""));
    }
}
