//! Error types for wiring and netlist ordering

use thiserror::Error;

use crate::types::GateId;

/// Result type for chip wiring operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building wires or ordering a netlist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A connection refers to a gate the layout does not know
    #[error("unknown gate id: {gate}")]
    UnknownGate { gate: GateId },

    /// Direction vector is not a single Manhattan step
    #[error("direction ({dx}, {dy}, {dz}) is not a unit step along one axis")]
    NonUnitDirection { dx: i32, dy: i32, dz: i32 },

    /// Tried to remove a unit from a wire that has none
    #[error("cannot pop from an empty wire")]
    EmptyWire,

    /// Strategy name did not match any ordering heuristic
    #[error("unknown order strategy: {name}")]
    UnknownStrategy { name: String },
}
