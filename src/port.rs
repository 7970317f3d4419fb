//! Typed connection endpoints.
//!
//! A [`Port`] never holds a reference to its peers or to its owning unit: both are addressed by
//! value through [`PortId`] handles, and the symmetric link relation is maintained by
//! [`crate::diagram::Diagram`], which is the only place two ports are mutated together.
use crate::unit::UnitId;
use std::collections::BTreeSet;

/// Which side of a unit a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortCategory {
    Input,
    Output,
}

impl PortCategory {
    /// The category a link from this side must end on.
    pub fn opposite(self) -> Self {
        match self {
            PortCategory::Input => PortCategory::Output,
            PortCategory::Output => PortCategory::Input,
        }
    }
}

/// The component axis carried by a wire.
///
/// Biquaternion units address their eight components positionally, so their ports carry an axis
/// index in `0..8` instead of a named axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortType {
    Real,
    ComplexI,
    QuaternionI,
    QuaternionJ,
    QuaternionK,
    Biquaternion(u8),
}

/// Handle naming a port by its owning unit, side and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortId {
    pub unit: UnitId,
    pub category: PortCategory,
    pub index: usize,
}

impl PortId {
    pub fn input(unit: UnitId, index: usize) -> Self {
        PortId {
            unit,
            category: PortCategory::Input,
            index,
        }
    }

    pub fn output(unit: UnitId, index: usize) -> Self {
        PortId {
            unit,
            category: PortCategory::Output,
            index,
        }
    }
}

impl core::fmt::Display for PortId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let side = match self.category {
            PortCategory::Input => "in",
            PortCategory::Output => "out",
        };
        write!(f, "{}.{}[{}]", self.unit, side, self.index)
    }
}

/// A typed endpoint belonging to a [`crate::unit::MathUnit`].
///
/// Not `Clone`: a copy would carry the original's links without its peers knowing.
#[derive(Debug, PartialEq, Eq)]
pub struct Port {
    id: PortId,
    port_type: PortType,

    /// Whether the port currently carries values. The presentation layer toggles this through
    /// [`crate::diagram::Diagram::set_enabled`] to mute a wire without removing it.
    pub enabled: bool,

    // Peers linked to this port. Never contains `id` or any port of `id.unit`.
    connections: BTreeSet<PortId>,
}

impl Port {
    pub(crate) fn new(id: PortId, port_type: PortType) -> Self {
        Port {
            id,
            port_type,
            enabled: true,
            connections: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn unit(&self) -> UnitId {
        self.id.unit
    }

    pub fn category(&self) -> PortCategory {
        self.id.category
    }

    pub fn index(&self) -> usize {
        self.id.index
    }

    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// Ports currently linked to this one, in handle order.
    pub fn connections(&self) -> impl ExactSizeIterator<Item = PortId> + '_ {
        self.connections.iter().copied()
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    pub fn is_connected_to(&self, other: PortId) -> bool {
        self.connections.contains(&other)
    }

    /// Whether a link between `self` and `other` would be valid.
    ///
    /// Both ports must be enabled, live on different units, sit on opposite sides and carry the
    /// same [`PortType`]. The check is symmetric and has no side effects.
    pub fn can_connect_to(&self, other: &Port) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }

        // Covers the port itself as well.
        if self.id.unit == other.id.unit {
            return false;
        }

        if self.id.category == other.id.category {
            return false;
        }

        self.port_type == other.port_type
    }

    // Half of a link. Returns false if `peer` was already present.
    pub(crate) fn attach(&mut self, peer: PortId) -> bool {
        self.connections.insert(peer)
    }

    // Half of an unlink. Returns false if `peer` was not present.
    pub(crate) fn detach(&mut self, peer: PortId) -> bool {
        self.connections.remove(&peer)
    }

    // Drop every peer, returning them so the caller can sever the other halves.
    pub(crate) fn detach_all(&mut self) -> BTreeSet<PortId> {
        std::mem::take(&mut self.connections)
    }
}
