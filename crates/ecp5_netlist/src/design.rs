//! The append-only design that primitive selection writes into.

use crate::arena::Arena;
use crate::cell::{Cell, Connection, Instance, PortDirection};
use crate::ids::{CellId, SignalId};
use crate::signal::{Signal, SignalKind};
use ecp5_common::{Ident, Interner};
use std::collections::HashSet;

/// A single flat module: top-level ports, internal nets and cells.
///
/// Names of signals and cells share one namespace (as they do in Verilog).
/// Requesting a name that is already taken yields a fresh `<name>_<n>`
/// instead, so independent callers never collide.
#[derive(Debug)]
pub struct Design {
    name: String,
    interner: Interner,
    signals: Arena<SignalId, Signal>,
    cells: Arena<CellId, Cell>,
    ports: Vec<SignalId>,
    used_names: HashSet<Ident>,
}

impl Design {
    /// Creates an empty design whose module will be called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interner: Interner::new(),
            signals: Arena::new(),
            cells: Arena::new(),
            ports: Vec::new(),
            used_names: HashSet::new(),
        }
    }

    /// Returns the module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the interner that owns every name in this design.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Resolves an interned name.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Adds an internal net of `width` bits. A width of zero is stored as one.
    pub fn add_signal(&mut self, name: &str, width: u32) -> SignalId {
        self.alloc_signal(name, width, SignalKind::Wire)
    }

    /// Adds a top-level port of `width` bits, clamped to at least one.
    pub fn add_port(&mut self, name: &str, width: u32, direction: PortDirection) -> SignalId {
        let id = self.alloc_signal(name, width, SignalKind::Port(direction));
        self.ports.push(id);
        id
    }

    fn alloc_signal(&mut self, name: &str, width: u32, kind: SignalKind) -> SignalId {
        let name = self.unique_name(name);
        let id = self.signals.next_id();
        self.signals.alloc(Signal {
            id,
            name,
            width: width.max(1),
            kind,
        })
    }

    /// Appends a cell built from `instance` and returns its ID.
    ///
    /// `name` is a hint for the instance name; it is made unique if needed.
    pub fn instantiate(&mut self, name: &str, instance: Instance) -> CellId {
        let name = self.unique_name(name);
        let cell_type = self.interner.get_or_intern(&instance.cell_type);
        let params = instance
            .params
            .into_iter()
            .map(|(param, value)| (self.interner.get_or_intern(&param), value))
            .collect();
        let connections = instance
            .ports
            .into_iter()
            .map(|(port, direction, signal)| Connection {
                port: self.interner.get_or_intern(&port),
                direction,
                signal,
            })
            .collect();
        let id = self.cells.next_id();
        self.cells.alloc(Cell {
            id,
            name,
            cell_type,
            params,
            connections,
        })
    }

    fn unique_name(&mut self, base: &str) -> Ident {
        let mut ident = self.interner.get_or_intern(base);
        let mut n = 0u32;
        while self.used_names.contains(&ident) {
            ident = self.interner.get_or_intern(&format!("{base}_{n}"));
            n += 1;
        }
        self.used_names.insert(ident);
        ident
    }

    /// Returns the signal with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this design.
    pub fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[id]
    }

    /// Returns the name of a signal.
    pub fn signal_name(&self, id: SignalId) -> &str {
        self.resolve(self.signals[id].name)
    }

    /// Returns the width of a signal in bits.
    pub fn signal_width(&self, id: SignalId) -> u32 {
        self.signals[id].width
    }

    /// Iterates over all signals in creation order.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    /// Iterates over the top-level ports in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = &Signal> {
        self.ports.iter().map(|&id| &self.signals[id])
    }

    /// Returns the cell with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this design.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    /// Iterates over all cells in instantiation order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterates over the cells whose type is `cell_type`.
    pub fn cells_of_type<'a>(&'a self, cell_type: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let wanted = self.interner.get(cell_type);
        self.cells
            .values()
            .filter(move |cell| Some(cell.cell_type) == wanted)
    }

    /// Returns the type name of a cell.
    pub fn cell_type_name(&self, cell: &Cell) -> &str {
        self.resolve(cell.cell_type)
    }

    /// Returns the binding of `port` on `cell`, looked up by name.
    pub fn connection<'a>(&self, cell: &'a Cell, port: &str) -> Option<&'a Connection> {
        let port = self.interner.get(port)?;
        cell.connection(port)
    }
}
