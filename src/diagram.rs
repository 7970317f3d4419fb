//! An arena of units and the links between their ports.
//!
//! Units are owned by the [`Diagram`] and addressed by [`UnitId`]; ports are addressed by
//! [`PortId`]. A link is recorded in the connection sets of both of its ports, and every method
//! here that touches links keeps the two halves in step.
use crate::catalog::UnitType;
use crate::error::Result;
use crate::port::{Port, PortCategory, PortId};
use crate::unit::{create_unit, create_unit_named, MathUnit, UnitId};

use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Owns units and their links.
///
/// Units and ports are only handed out by shared reference. Links and enabled flags change
/// through the methods below, so the two halves of a link cannot drift apart:
///
/// ```compile_fail
/// # use hypercomplex_wiring::prelude::*;
/// let mut d = Diagram::new();
/// let a = d.add_unit(UnitType::R);
/// let _ = d.unit_mut(a);
/// ```
///
/// ```compile_fail
/// # use hypercomplex_wiring::prelude::*;
/// let mut unit = create_unit(UnitType::R);
/// let _ = unit.port_mut(PortCategory::Input, 0);
/// ```
///
/// ```compile_fail
/// # use hypercomplex_wiring::prelude::*;
/// let mut d = Diagram::new();
/// let a = d.add_unit(UnitType::R);
/// let copy: Port = d.port(PortId::input(a, 0)).unwrap().clone();
/// ```
#[derive(Debug, Default)]
pub struct Diagram {
    units: BTreeMap<UnitId, MathUnit>,
}

impl Diagram {
    /// The empty diagram.
    pub fn new() -> Self {
        Diagram {
            units: BTreeMap::new(),
        }
    }

    /// Take ownership of `unit`.
    pub fn insert(&mut self, unit: MathUnit) -> UnitId {
        let id = unit.id();
        debug!(unit = %id, unit_type = %unit.unit_type(), "inserted unit");
        self.units.insert(id, unit);
        id
    }

    pub fn add_unit(&mut self, unit_type: UnitType) -> UnitId {
        self.insert(create_unit(unit_type))
    }

    /// Add a unit by tag, failing for tags the catalog does not know.
    pub fn add_unit_named(&mut self, tag: &str) -> Result<UnitId> {
        Ok(self.insert(create_unit_named(tag)?))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&MathUnit> {
        self.units.get(&id)
    }

    /// Units in id order.
    pub fn units(&self) -> impl Iterator<Item = &MathUnit> {
        self.units.values()
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.units.get(&id.unit)?.port(id.category, id.index)
    }

    fn port_mut(&mut self, id: PortId) -> Option<&mut Port> {
        self.units.get_mut(&id.unit)?.port_mut(id.category, id.index)
    }

    /// Whether `port` has any link. Unknown ports are unconnected.
    pub fn is_connected(&self, port: PortId) -> bool {
        self.port(port).map(Port::is_connected).unwrap_or(false)
    }

    /// [`Port::can_connect_to`] on handles; unknown ports can't connect.
    pub fn can_connect(&self, a: PortId, b: PortId) -> bool {
        match (self.port(a), self.port(b)) {
            (Some(p), Some(q)) => p.can_connect_to(q),
            _ => false,
        }
    }

    /// Link `a` and `b` if [`Diagram::can_connect`] allows it.
    ///
    /// Linking an already linked pair succeeds without adding a second link.
    pub fn connect(&mut self, a: PortId, b: PortId) -> bool {
        if !self.can_connect(a, b) {
            trace!(%a, %b, "rejected connection");
            return false;
        }

        // Both ports exist: can_connect checked them.
        let mut added = false;
        if let Some(p) = self.port_mut(a) {
            added |= p.attach(b);
        }
        if let Some(q) = self.port_mut(b) {
            added |= q.attach(a);
        }
        if added {
            debug!(%a, %b, "connected");
        }
        true
    }

    /// Remove the link between `a` and `b`. Returns false if they were not linked.
    pub fn disconnect(&mut self, a: PortId, b: PortId) -> bool {
        let linked = self
            .port(a)
            .map(|p| p.is_connected_to(b))
            .unwrap_or(false);
        if !linked {
            return false;
        }

        if let Some(p) = self.port_mut(a) {
            p.detach(b);
        }
        if let Some(q) = self.port_mut(b) {
            q.detach(a);
        }
        debug!(%a, %b, "disconnected");
        true
    }

    /// Link an output to an input, replacing whatever currently feeds the input.
    ///
    /// The ports may be given in either order. Nothing is severed when the new link is invalid.
    pub fn connect_exclusive(&mut self, a: PortId, b: PortId) -> bool {
        if !self.can_connect(a, b) {
            trace!(%a, %b, "rejected exclusive connection");
            return false;
        }

        let input = if a.category == PortCategory::Input { a } else { b };
        let source = if input == a { b } else { a };

        let stale: Vec<PortId> = self
            .port(input)
            .map(|p| p.connections().filter(|&peer| peer != source).collect())
            .unwrap_or_default();
        for peer in stale {
            self.disconnect(input, peer);
        }

        self.connect(source, input)
    }

    /// Link every output of `src` to the input of `dst` at the same index, for indices both
    /// units have. Incompatible pairs are skipped. Returns the number of links made.
    pub fn connect_units(&mut self, src: UnitId, dst: UnitId) -> usize {
        let dimension = match (self.unit(src), self.unit(dst)) {
            (Some(s), Some(d)) => s.dimension().min(d.dimension()),
            _ => return 0,
        };

        let made = (0..dimension)
            .filter(|&i| self.connect_exclusive(PortId::output(src, i), PortId::input(dst, i)))
            .count();
        debug!(%src, %dst, made, "connected units");
        made
    }

    /// Set [`Port::enabled`]. Returns false if the port does not exist.
    pub fn set_enabled(&mut self, port: PortId, enabled: bool) -> bool {
        match self.port_mut(port) {
            Some(p) => {
                p.enabled = enabled;
                debug!(%port, enabled, "set port enabled");
                true
            }
            None => false,
        }
    }

    /// Flip [`Port::enabled`], returning the new value.
    pub fn toggle_enabled(&mut self, port: PortId) -> Option<bool> {
        let p = self.port_mut(port)?;
        p.enabled = !p.enabled;
        let enabled = p.enabled;
        debug!(%port, enabled, "toggled port");
        Some(enabled)
    }

    /// Sever every link of every port of `id`, returning how many links were removed.
    pub fn disconnect_all(&mut self, id: UnitId) -> usize {
        let Some(unit) = self.units.get_mut(&id) else {
            return 0;
        };

        let mut severed = Vec::new();
        for port in unit.ports_mut() {
            let own = port.id();
            severed.extend(port.detach_all().into_iter().map(|peer| (own, peer)));
        }

        for &(own, peer) in &severed {
            if let Some(p) = self.port_mut(peer) {
                p.detach(own);
            }
        }
        debug!(unit = %id, links = severed.len(), "disconnected unit");
        severed.len()
    }

    /// Sever all of a unit's links, then take it out of the diagram.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<MathUnit> {
        if !self.contains(id) {
            return None;
        }
        self.disconnect_all(id);
        debug!(unit = %id, "removed unit");
        self.units.remove(&id)
    }

    /// Every link exactly once, as `(output, input)`.
    pub fn connections(&self) -> impl Iterator<Item = (PortId, PortId)> + '_ {
        self.units.values().flat_map(|unit| {
            unit.output_ports()
                .iter()
                .flat_map(|p| p.connections().map(move |peer| (p.id(), peer)))
        })
    }
}
