//! Unit nodes: a wiring table with a row of input ports and a row of output ports.
use crate::catalog::{MathUnitConfig, UnitType};
use crate::error::Result;
use crate::port::{Port, PortCategory, PortId};
use crate::wiring::WiringTable;

use num_traits::Zero;
use std::ops::Neg;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity of a [`MathUnit`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub usize);

static NEXT_UNIT_ID: AtomicUsize = AtomicUsize::new(0);

impl UnitId {
    fn fresh() -> Self {
        UnitId(NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed instance of a basis unit.
///
/// Ports are created with the unit and never resized. The wiring table is the catalog's, shared
/// with every other unit of the same type. Units are not `Clone`: a copy would share the
/// id of the unit it was copied from.
#[derive(Debug, PartialEq)]
pub struct MathUnit {
    id: UnitId,
    unit_type: UnitType,
    title: &'static str,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    wiring: WiringTable,
}

impl MathUnit {
    /// Build a unit from a catalog entry with a fresh [`UnitId`].
    pub fn new(config: &MathUnitConfig) -> Self {
        let id = UnitId::fresh();
        let make = |category: PortCategory| {
            config
                .ports
                .iter()
                .enumerate()
                .map(|(index, &port_type)| {
                    Port::new(
                        PortId {
                            unit: id,
                            category,
                            index,
                        },
                        port_type,
                    )
                })
                .collect::<Vec<_>>()
        };

        MathUnit {
            id,
            unit_type: config.unit_type,
            title: config.title,
            inputs: make(PortCategory::Input),
            outputs: make(PortCategory::Output),
            wiring: config.wiring.clone(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Number of ports on each side.
    pub fn dimension(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_ports(&self) -> &[Port] {
        &self.inputs
    }

    pub fn output_ports(&self) -> &[Port] {
        &self.outputs
    }

    /// The port addressed by `category` and `index`, if any.
    pub fn port(&self, category: PortCategory, index: usize) -> Option<&Port> {
        match category {
            PortCategory::Input => self.inputs.get(index),
            PortCategory::Output => self.outputs.get(index),
        }
    }

    // Ports are mutated only through `Diagram`, which keeps both halves of a link in step.
    pub(crate) fn port_mut(&mut self, category: PortCategory, index: usize) -> Option<&mut Port> {
        match category {
            PortCategory::Input => self.inputs.get_mut(index),
            PortCategory::Output => self.outputs.get_mut(index),
        }
    }

    pub(crate) fn ports_mut(&mut self) -> impl Iterator<Item = &mut Port> {
        self.inputs.iter_mut().chain(self.outputs.iter_mut())
    }

    /// Whether input `index` has at least one link. Out-of-range indices are inactive.
    pub fn is_input_port_active(&self, index: usize) -> bool {
        self.inputs
            .get(index)
            .map(Port::is_connected)
            .unwrap_or(false)
    }

    /// The unit's wiring, for drawing its internal connections.
    pub fn get_wiring_connections(&self) -> &WiringTable {
        &self.wiring
    }

    /// Multiply `input_values` by this unit.
    ///
    /// Missing inputs count as zero and never cause an error; see [`WiringTable::apply`], which
    /// also covers negating an integer's minimum value.
    pub fn get_output_values<T>(&self, input_values: &[T]) -> Vec<T>
    where
        T: Copy + Zero + Neg<Output = T>,
    {
        self.wiring.apply(input_values)
    }
}

/// Create a unit of the given type.
pub fn create_unit(unit_type: UnitType) -> MathUnit {
    MathUnit::new(unit_type.config())
}

/// Create a unit from its tag, failing with
/// [`Error::UnsupportedUnitType`](crate::error::Error::UnsupportedUnitType) for unknown tags.
pub fn create_unit_named(tag: &str) -> Result<MathUnit> {
    let unit_type: UnitType = tag.parse()?;
    Ok(create_unit(unit_type))
}
