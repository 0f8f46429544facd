//! Catalog-checked instantiation.

use ecp5_arch::{PortRole, Primitive};
use ecp5_common::{Ecp5Result, InternalError};
use ecp5_netlist::{CellId, Design, Instance, PortDirection};

/// Appends `instance` as a cell of `primitive`, after checking every
/// parameter and port binding against the catalog signature.
pub(crate) fn instantiate(
    design: &mut Design,
    name: &str,
    primitive: Primitive,
    instance: Instance,
) -> Ecp5Result<CellId> {
    if instance.cell_type != primitive.name() {
        return Err(InternalError::new(format!(
            "instance of {} declared as {}",
            instance.cell_type, primitive
        )));
    }
    let signature = primitive.signature();
    for (param, _) in &instance.params {
        if signature.role_of(param) != Some(PortRole::Param) {
            return Err(InternalError::new(format!(
                "{primitive} has no parameter {param}"
            )));
        }
    }
    for (port, direction, _) in &instance.ports {
        let expected = match direction {
            PortDirection::Input => PortRole::Input,
            PortDirection::Output => PortRole::Output,
            PortDirection::InOut => PortRole::InOut,
        };
        if signature.role_of(port) != Some(expected) {
            return Err(InternalError::new(format!(
                "{primitive} has no {} port {port}",
                direction.keyword()
            )));
        }
    }
    Ok(design.instantiate(name, instance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecp5_netlist::{ParamValue, SignalRef};

    #[test]
    fn accepts_catalog_bindings() {
        let mut design = Design::new("top");
        let a = design.add_signal("a", 1);
        let z = design.add_signal("z", 1);
        let id = instantiate(
            &mut design,
            "inv",
            Primitive::Lut4,
            Instance::new("LUT4")
                .param("INIT", ParamValue::Bits { value: 0x5555, width: 16 })
                .input("A", SignalRef::bit(a, 0))
                .output("Z", SignalRef::bit(z, 0)),
        )
        .unwrap();
        assert_eq!(design.cell_type_name(design.cell(id)), "LUT4");
    }

    #[test]
    fn rejects_unknown_port() {
        let mut design = Design::new("top");
        let a = design.add_signal("a", 1);
        let err = instantiate(
            &mut design,
            "ib",
            Primitive::Ib,
            Instance::new("IB").input("PAD", a),
        )
        .unwrap_err();
        assert_eq!(err.message, "IB has no input port PAD");
        assert_eq!(design.cell_count(), 0);
    }

    #[test]
    fn rejects_wrong_direction() {
        let mut design = Design::new("top");
        let a = design.add_signal("a", 1);
        let err = instantiate(
            &mut design,
            "ff",
            Primitive::Ofs1p3dx,
            Instance::new("OFS1P3DX").output("D", a),
        )
        .unwrap_err();
        assert_eq!(err.message, "OFS1P3DX has no output port D");
    }

    #[test]
    fn rejects_mismatched_type() {
        let mut design = Design::new("top");
        assert!(instantiate(&mut design, "x", Primitive::Ob, Instance::new("OBZ")).is_err());
        assert!(instantiate(&mut design, "x", Primitive::Ib, Instance::new("IB").param("INIT", ParamValue::Int(0))).is_err());
    }
}
