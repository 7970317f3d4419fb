//! Signed permutations encoding multiplication by a basis unit.
//!
//! A [`WiringTable`] is a list of [`Wire`]s `(input, output, flip)`. Read left to right, each
//! wire routes component `input` of a vector to component `output`, negating it when `flip` is
//! set. For a basis unit of unit norm the wires form a bijection on `{0..n}`:
//!
//! ```text
//!   quaternion i          w ──────╮╭────── -x
//!                         x ──────╯╰────── w
//!   (w, x, y, z)          y ──────╮╭────── -z
//!     ↦ (-x, w, -z, y)    z ──────╯╰────── y
//! ```
use num_traits::Zero;
use std::borrow::Cow;
use std::ops::Neg;

/// One routed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wire {
    pub input: usize,
    pub output: usize,
    /// Negate the value on its way through.
    pub flip: bool,
}

impl Wire {
    pub const fn new(input: usize, output: usize, flip: bool) -> Self {
        Wire {
            input,
            output,
            flip,
        }
    }
}

impl From<(usize, usize, bool)> for Wire {
    fn from((input, output, flip): (usize, usize, bool)) -> Self {
        Wire::new(input, output, flip)
    }
}

/// An immutable list of [`Wire`]s.
///
/// Catalog tables borrow `'static` data and are shared by every unit of the same type; tables
/// built at runtime own their wires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WiringTable {
    wires: Cow<'static, [Wire]>,
}

impl WiringTable {
    /// Construct a table, returning `None` unless the wires form a signed bijection on `{0..n}`
    /// where `n` is the number of wires.
    pub fn new(wires: Vec<Wire>) -> Option<Self> {
        let table = Self::new_unchecked(wires);
        if table.is_bijection() {
            Some(table)
        } else {
            None
        }
    }

    /// Construct a table without checking any index.
    ///
    /// Out-of-range or repeated indices are tolerated by [`WiringTable::apply`], which sizes its
    /// output from the largest output index present.
    pub fn new_unchecked(wires: Vec<Wire>) -> Self {
        WiringTable {
            wires: Cow::Owned(wires),
        }
    }

    /// Wrap constant data without copying it.
    pub const fn from_static(wires: &'static [Wire]) -> Self {
        WiringTable {
            wires: Cow::Borrowed(wires),
        }
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Wire> {
        self.wires.iter()
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// Length of the vector produced by [`WiringTable::apply`]: one past the largest output
    /// index, or zero for an empty table.
    pub fn output_len(&self) -> usize {
        self.wires.iter().map(|w| w.output + 1).max().unwrap_or(0)
    }

    /// True when every index in `{0..n}` appears exactly once as an input and exactly once as an
    /// output, `n` being the number of wires.
    pub fn is_bijection(&self) -> bool {
        let n = self.wires.len();
        let mut seen_input = vec![false; n];
        let mut seen_output = vec![false; n];
        for w in self.wires.iter() {
            if w.input >= n || w.output >= n || seen_input[w.input] || seen_output[w.output] {
                return false;
            }
            seen_input[w.input] = true;
            seen_output[w.output] = true;
        }
        true
    }

    /// Route `input` through the table.
    ///
    /// The result has [`WiringTable::output_len`] entries, all starting at zero. Wires whose input
    /// index is past the end of `input` are skipped, so a short vector behaves as if padded with
    /// zeros. When two wires share an output index the later one wins.
    ///
    /// # Panics
    ///
    /// Negation follows `T`'s own overflow rules: for a signed integer type, a flipped wire
    /// carrying `T::MIN` panics when overflow checks are enabled and wraps otherwise. Floats never
    /// panic.
    pub fn apply<T>(&self, input: &[T]) -> Vec<T>
    where
        T: Copy + Zero + Neg<Output = T>,
    {
        let mut output = vec![T::zero(); self.output_len()];
        for w in self.wires.iter() {
            if let Some(&value) = input.get(w.input) {
                output[w.output] = if w.flip { -value } else { value };
            }
        }
        output
    }

    /// The table which applies `self` and then `other`.
    ///
    /// Returns `None` unless both tables are bijections of the same size.
    pub fn compose(&self, other: &WiringTable) -> Option<WiringTable> {
        if self.len() != other.len() || !self.is_bijection() || !other.is_bijection() {
            return None;
        }

        // other's wire keyed by its input index
        let mut by_input = vec![Wire::new(0, 0, false); other.len()];
        for w in other.iter() {
            by_input[w.input] = *w;
        }

        let wires = self
            .iter()
            .map(|w| {
                let next = by_input[w.output];
                Wire::new(w.input, next.output, w.flip ^ next.flip)
            })
            .collect();
        Some(WiringTable::new_unchecked(wires))
    }

    /// The same table with its wires sorted by input index.
    ///
    /// Two tables describing the same signed permutation are equal after normalisation.
    pub fn normalized(&self) -> WiringTable {
        let mut wires = self.wires.to_vec();
        wires.sort_by_key(|w| (w.input, w.output, w.flip));
        WiringTable::new_unchecked(wires)
    }

    /// Flip the sign of every wire: the table of `-e` given the table of `e`.
    pub fn negated(&self) -> WiringTable {
        let wires = self
            .iter()
            .map(|w| Wire::new(w.input, w.output, !w.flip))
            .collect();
        WiringTable::new_unchecked(wires)
    }
}

impl FromIterator<Wire> for WiringTable {
    fn from_iter<I: IntoIterator<Item = Wire>>(iter: I) -> Self {
        WiringTable::new_unchecked(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WiringTable {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.wires.iter()
    }
}
