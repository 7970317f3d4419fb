//! Errors raised by unit lookup and diagram evaluation.
//!
//! Connection attempts never produce an [`Error`]: rejections are ordinary `false` results.
use crate::unit::UnitId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The tag does not name any unit registered in the catalog.
    #[error("unsupported unit type: {0:?}")]
    UnsupportedUnitType(String),

    /// No unit with this id lives in the diagram.
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    /// Units could not be ordered because output→input links form a cycle.
    #[error("diagram contains a cycle ({unvisited} units could not be layered)")]
    CyclicDiagram { unvisited: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
