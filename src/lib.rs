//! Chip wiring core: netlist ordering heuristics and the unit-step wire model.
//!
//! A router asks [`ordering`] for the order in which to attempt connections,
//! then grows one [`Wire`] per connection step by step until it reaches its
//! target gate. Python bindings are available behind the `python` feature.

pub mod chip;
pub mod error;
pub mod ordering;
pub mod types;
pub mod wire;

#[cfg(feature = "python")]
mod python;

pub use chip::ChipLayout;
pub use error::{Error, Result};
pub use ordering::{change_netlist_order, quadrant_index, reorder, reorder_with_rng, OrderStrategy};
pub use types::{Connection, Direction, GateId, Location, WireUnit};
pub use wire::{Endpoint, Wire};
