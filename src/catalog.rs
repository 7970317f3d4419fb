//! The fixed registry of basis units.
//!
//! Every [`UnitType`] maps to one [`MathUnitConfig`] held in a constant table, so lookups never
//! allocate and the catalog can be read from any thread without synchronisation.
//!
//! Each wiring table encodes left multiplication `e · q` by the unit `e`. Component order is
//! `(1)` for reals, `(1, i)` for complex numbers, `(1, i, j, k)` for quaternions and
//! `(1, i, I, iI, J, iJ, K, iK)` for biquaternions, where `i` is the commuting complex unit and
//! `I, J, K` are the quaternion units.
use crate::error::{Error, Result};
use crate::port::PortType;
use crate::wiring::{Wire, WiringTable};

use core::fmt;
use core::str::FromStr;

/// Tag naming a basis unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitType {
    R,
    C1,
    CI,
    Q1,
    QI,
    QJ,
    QK,
    B1,
    Bi,
    BI,
    BiI,
    BJ,
    BiJ,
    BK,
    BiK,
}

impl UnitType {
    /// Every unit, in catalog order.
    pub const ALL: [UnitType; 15] = [
        UnitType::R,
        UnitType::C1,
        UnitType::CI,
        UnitType::Q1,
        UnitType::QI,
        UnitType::QJ,
        UnitType::QK,
        UnitType::B1,
        UnitType::Bi,
        UnitType::BI,
        UnitType::BiI,
        UnitType::BJ,
        UnitType::BiJ,
        UnitType::BK,
        UnitType::BiK,
    ];

    /// The catalog entry for this unit.
    pub fn config(self) -> &'static MathUnitConfig {
        &CONFIGS[self as usize]
    }

    /// Stable tag, accepted back by [`UnitType::from_str`].
    pub fn tag(self) -> &'static str {
        use UnitType::*;
        match self {
            R => "real",
            C1 => "complex 1",
            CI => "complex i",
            Q1 => "quaternion 1",
            QI => "quaternion i",
            QJ => "quaternion j",
            QK => "quaternion k",
            B1 => "biquaternion 1",
            Bi => "biquaternion i",
            BI => "biquaternion I",
            BiI => "biquaternion iI",
            BJ => "biquaternion J",
            BiJ => "biquaternion iJ",
            BK => "biquaternion K",
            BiK => "biquaternion iK",
        }
    }

    /// Label shown in the "add unit" context menu.
    pub fn menu_label(self) -> &'static str {
        use UnitType::*;
        match self {
            R => "Real Unit 1",
            C1 => "Complex Unit 1",
            CI => "Complex Unit i",
            Q1 => "Quaternion Unit 1",
            QI => "Quaternion Unit i",
            QJ => "Quaternion Unit j",
            QK => "Quaternion Unit k",
            B1 => "Biquaternion Unit 1",
            Bi => "Biquaternion Unit i",
            BI => "Biquaternion Unit I",
            BiI => "Biquaternion Unit iI",
            BJ => "Biquaternion Unit J",
            BiJ => "Biquaternion Unit iJ",
            BK => "Biquaternion Unit K",
            BiK => "Biquaternion Unit iK",
        }
    }

    pub fn dimension(self) -> usize {
        self.config().dimension()
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for UnitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UnitType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::UnsupportedUnitType(s.to_string()))
    }
}

/// Everything needed to build a [`crate::unit::MathUnit`] of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MathUnitConfig {
    pub unit_type: UnitType,
    /// One entry per component; its length is the unit's dimension.
    pub ports: &'static [PortType],
    pub title: &'static str,
    pub wiring: WiringTable,
}

impl MathUnitConfig {
    pub fn dimension(&self) -> usize {
        self.ports.len()
    }
}

/// Look up a unit by its tag.
pub fn lookup(tag: &str) -> Result<&'static MathUnitConfig> {
    tag.parse::<UnitType>().map(UnitType::config)
}

/// Every catalog entry, in [`UnitType::ALL`] order.
pub fn configs() -> &'static [MathUnitConfig] {
    &CONFIGS
}

////////////////////////////////////////////////////////////////////////////////
// Constant tables

const fn w(input: usize, output: usize, flip: bool) -> Wire {
    Wire::new(input, output, flip)
}

const REAL_PORTS: [PortType; 1] = [PortType::Real];
const COMPLEX_PORTS: [PortType; 2] = [PortType::Real, PortType::ComplexI];
const QUATERNION_PORTS: [PortType; 4] = [
    PortType::Real,
    PortType::QuaternionI,
    PortType::QuaternionJ,
    PortType::QuaternionK,
];
const BIQUATERNION_PORTS: [PortType; 8] = [
    PortType::Biquaternion(0),
    PortType::Biquaternion(1),
    PortType::Biquaternion(2),
    PortType::Biquaternion(3),
    PortType::Biquaternion(4),
    PortType::Biquaternion(5),
    PortType::Biquaternion(6),
    PortType::Biquaternion(7),
];

const R_ONE: [Wire; 1] = [w(0, 0, false)];

const C_ONE: [Wire; 2] = [w(0, 0, false), w(1, 1, false)];
const C_I: [Wire; 2] = [w(0, 1, false), w(1, 0, true)];

const Q_ONE: [Wire; 4] = [w(0, 0, false), w(1, 1, false), w(2, 2, false), w(3, 3, false)];
const Q_I: [Wire; 4] = [w(0, 1, false), w(1, 0, true), w(2, 3, false), w(3, 2, true)];
const Q_J: [Wire; 4] = [w(0, 2, false), w(1, 3, true), w(2, 0, true), w(3, 1, false)];
const Q_K: [Wire; 4] = [w(0, 3, false), w(1, 2, false), w(2, 1, true), w(3, 0, true)];

#[rustfmt::skip]
const B_ONE: [Wire; 8] = [
    w(0, 0, false), w(1, 1, false), w(2, 2, false), w(3, 3, false),
    w(4, 4, false), w(5, 5, false), w(6, 6, false), w(7, 7, false),
];
#[rustfmt::skip]
const B_I: [Wire; 8] = [
    w(0, 1, false), w(1, 0, true), w(2, 3, false), w(3, 2, true),
    w(4, 5, false), w(5, 4, true), w(6, 7, false), w(7, 6, true),
];
#[rustfmt::skip]
const B_QI: [Wire; 8] = [
    w(0, 2, false), w(1, 3, false), w(2, 0, true), w(3, 1, true),
    w(4, 6, false), w(5, 7, false), w(6, 4, true), w(7, 5, true),
];
#[rustfmt::skip]
const B_IQI: [Wire; 8] = [
    w(0, 3, false), w(1, 2, true), w(2, 1, true), w(3, 0, false),
    w(4, 7, false), w(5, 6, true), w(6, 5, true), w(7, 4, false),
];
#[rustfmt::skip]
const B_QJ: [Wire; 8] = [
    w(0, 4, false), w(1, 5, false), w(2, 6, true), w(3, 7, true),
    w(4, 0, true), w(5, 1, true), w(6, 2, false), w(7, 3, false),
];
#[rustfmt::skip]
const B_IQJ: [Wire; 8] = [
    w(0, 5, false), w(1, 4, true), w(2, 7, true), w(3, 6, false),
    w(4, 1, true), w(5, 0, false), w(6, 3, false), w(7, 2, true),
];
#[rustfmt::skip]
const B_QK: [Wire; 8] = [
    w(0, 6, false), w(1, 7, false), w(2, 4, false), w(3, 5, false),
    w(4, 2, true), w(5, 3, true), w(6, 0, true), w(7, 1, true),
];
#[rustfmt::skip]
const B_IQK: [Wire; 8] = [
    w(0, 7, false), w(1, 6, true), w(2, 5, false), w(3, 4, true),
    w(4, 3, true), w(5, 2, false), w(6, 1, true), w(7, 0, false),
];

const fn entry(
    unit_type: UnitType,
    ports: &'static [PortType],
    title: &'static str,
    wires: &'static [Wire],
) -> MathUnitConfig {
    MathUnitConfig {
        unit_type,
        ports,
        title,
        wiring: WiringTable::from_static(wires),
    }
}

// Indexed by `UnitType as usize`.
static CONFIGS: [MathUnitConfig; 15] = [
    entry(UnitType::R, &REAL_PORTS, "1", &R_ONE),
    entry(UnitType::C1, &COMPLEX_PORTS, "1", &C_ONE),
    entry(UnitType::CI, &COMPLEX_PORTS, "i", &C_I),
    entry(UnitType::Q1, &QUATERNION_PORTS, "1", &Q_ONE),
    entry(UnitType::QI, &QUATERNION_PORTS, "i", &Q_I),
    entry(UnitType::QJ, &QUATERNION_PORTS, "j", &Q_J),
    entry(UnitType::QK, &QUATERNION_PORTS, "k", &Q_K),
    entry(UnitType::B1, &BIQUATERNION_PORTS, "1", &B_ONE),
    entry(UnitType::Bi, &BIQUATERNION_PORTS, "i", &B_I),
    entry(UnitType::BI, &BIQUATERNION_PORTS, "I", &B_QI),
    entry(UnitType::BiI, &BIQUATERNION_PORTS, "iI", &B_IQI),
    entry(UnitType::BJ, &BIQUATERNION_PORTS, "J", &B_QJ),
    entry(UnitType::BiJ, &BIQUATERNION_PORTS, "iJ", &B_IQJ),
    entry(UnitType::BK, &BIQUATERNION_PORTS, "K", &B_QK),
    entry(UnitType::BiK, &BIQUATERNION_PORTS, "iK", &B_IQK),
];
