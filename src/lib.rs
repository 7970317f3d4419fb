//! # Hypercomplex Wiring
//!
//! Multiplication by a basis unit of the real numbers, complex numbers, quaternions or
//! biquaternions (dimensions 1, 2, 4 and 8) permutes the components of a vector and flips some of
//! their signs. This crate represents each such action as a [`WiringTable`](crate::wiring::WiringTable)
//! and puts it inside a [`MathUnit`](crate::unit::MathUnit): a box with one typed input port and
//! one typed output port per component.
//!
//! ```text
//!            ┌──── i ────┐
//!   w ───────┤           ├─────── -x
//!   x ───────┤           ├─────── w
//!   y ───────┤           ├─────── -z
//!   z ───────┤           ├─────── y
//!            └───────────┘
//! ```
//!
//! Units are placed in a [`Diagram`](crate::diagram::Diagram), which links output ports to input
//! ports of other units, so that chains of units compose multiplications:
//!
//! ```rust
//! use hypercomplex_wiring::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut diagram = Diagram::new();
//! let i = diagram.add_unit(UnitType::QI);
//! let j = diagram.add_unit(UnitType::QJ);
//!
//! // feed every component of `i` into `j`
//! assert_eq!(diagram.connect_units(i, j), 4);
//!
//! // j · i = -k
//! let sources = BTreeMap::from([(i, vec![1.0, 0.0, 0.0, 0.0])]);
//! let outputs = evaluate(&diagram, &sources).unwrap();
//! assert_eq!(outputs[&j], vec![0.0, 0.0, 0.0, -1.0]);
//! ```
//!
//! # Catalog
//!
//! The set of units is closed: [`UnitType`](crate::catalog::UnitType) enumerates them and
//! [`catalog`] holds their constant tables. Unknown tags are rejected with
//! [`Error::UnsupportedUnitType`](crate::error::Error::UnsupportedUnitType).
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for tags, port types and wiring tables.
pub mod catalog;
pub mod diagram;
pub mod error;
pub mod eval;
pub mod port;
pub mod unit;
pub mod wiring;

pub mod prelude {
    //! The types needed to build and evaluate diagrams.
    pub use crate::catalog::{MathUnitConfig, UnitType};
    pub use crate::diagram::Diagram;
    pub use crate::error::{Error, Result};
    pub use crate::eval::evaluate;
    pub use crate::port::{Port, PortCategory, PortId, PortType};
    pub use crate::unit::{create_unit, create_unit_named, MathUnit, UnitId};
    pub use crate::wiring::{Wire, WiringTable};
}
