//! Propagate values through a [`Diagram`].
//!
//! Units are ordered by a Kahn-style layering of the relation "some output of `u` feeds some
//! input of `v`", then evaluated layer by layer: each unit's input vector is the sum of the values
//! arriving on its links, and its outputs are [`MathUnit::get_output_values`] of that vector.
//!
//! Only links whose two ports are both enabled carry values, so a disabled port also removes its
//! links from the ordering.
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::port::PortId;
use crate::unit::{MathUnit, UnitId};

use num_traits::Zero;
use std::collections::BTreeMap;
use std::ops::Neg;
use tracing::{debug, trace};

// A link carries values only while both of its ports are enabled.
fn carries(diagram: &Diagram, output: PortId, input: PortId) -> bool {
    let enabled = |p: PortId| diagram.port(p).map(|p| p.enabled).unwrap_or(false);
    enabled(output) && enabled(input)
}

/// Compute a layering of the units of `diagram`: every unit in layer `n` is fed only by units in
/// layers `< n`.
///
/// Returns the layers and the number of units which could not be placed. That number is nonzero
/// exactly when the carrying links contain a cycle.
pub fn layer(diagram: &Diagram) -> (Vec<Vec<UnitId>>, usize) {
    let mut indegree: BTreeMap<UnitId, usize> = diagram.units().map(|u| (u.id(), 0)).collect();
    let mut successors: BTreeMap<UnitId, Vec<UnitId>> = BTreeMap::new();

    for (output, input) in diagram.connections() {
        if !carries(diagram, output, input) {
            continue;
        }
        successors.entry(output.unit).or_default().push(input.unit);
        *indegree.entry(input.unit).or_default() += 1;
    }

    // the set of units on the frontier, initialized to those with zero indegree.
    let mut frontier: Vec<UnitId> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(&u, _)| u)
        .collect();

    let mut layers = Vec::new();
    let mut visited = 0;
    while !frontier.is_empty() {
        visited += frontier.len();
        let mut next = Vec::new();
        for u in &frontier {
            for v in successors.get(u).into_iter().flatten() {
                if let Some(d) = indegree.get_mut(v) {
                    *d -= 1;
                    if *d == 0 {
                        next.push(*v);
                    }
                }
            }
        }
        next.sort();
        layers.push(std::mem::replace(&mut frontier, next));
    }

    (layers, indegree.len() - visited)
}

// Sum of the values arriving at each input of `unit`, on top of its explicit source values.
fn gather<T>(
    diagram: &Diagram,
    unit: &MathUnit,
    source: Option<&Vec<T>>,
    outputs: &BTreeMap<UnitId, Vec<T>>,
) -> Vec<T>
where
    T: Copy + Zero,
{
    let mut values = source.cloned().unwrap_or_default();
    if values.len() < unit.dimension() {
        values.resize(unit.dimension(), T::zero());
    }

    for port in unit.input_ports() {
        for peer in port.connections() {
            if !carries(diagram, peer, port.id()) {
                continue;
            }
            if let Some(&v) = outputs.get(&peer.unit).and_then(|o| o.get(peer.index)) {
                // integer overflow behaves as `T::add`; see `evaluate`
                values[port.index()] = values[port.index()] + v;
            }
        }
    }
    values
}

/// Evaluate every unit of an acyclic `diagram`.
///
/// `sources` supplies extra input values per unit, added to whatever arrives over links. Missing
/// entries count as zero. Returns the output vector of every unit.
///
/// Fails with [`Error::UnknownUnit`] if `sources` names a unit not in the diagram, and with
/// [`Error::CyclicDiagram`] if the units cannot be ordered.
///
/// # Panics
///
/// Fan-in sums and sign flips use `T`'s own `+` and `-`. For integer scalars every partial sum
/// must stay within the type's range: out-of-range sums panic when overflow checks are enabled
/// and wrap otherwise. Float scalars saturate to infinity instead.
pub fn evaluate<T>(
    diagram: &Diagram,
    sources: &BTreeMap<UnitId, Vec<T>>,
) -> Result<BTreeMap<UnitId, Vec<T>>>
where
    T: Copy + Zero + Neg<Output = T>,
{
    if let Some(&id) = sources.keys().find(|&&id| !diagram.contains(id)) {
        return Err(Error::UnknownUnit(id));
    }

    let (layers, unvisited) = layer(diagram);
    if unvisited > 0 {
        return Err(Error::CyclicDiagram { unvisited });
    }

    let mut outputs = BTreeMap::new();
    for ids in &layers {
        for &id in ids {
            let unit = diagram.unit(id).ok_or(Error::UnknownUnit(id))?;
            let inputs = gather(diagram, unit, sources.get(&id), &outputs);
            outputs.insert(id, unit.get_output_values(&inputs));
            trace!(unit = %id, "evaluated unit");
        }
    }

    debug!(
        layers = layers.len(),
        units = outputs.len(),
        "evaluated diagram"
    );
    Ok(outputs)
}
