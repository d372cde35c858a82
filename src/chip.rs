//! Read-only chip data consulted by the ordering heuristics.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::types::{GateId, Location};

/// Gate placement and grid bounds for one chip
#[derive(Clone, Debug, Default)]
pub struct ChipLayout {
    /// Gate id -> grid location
    gates: FxHashMap<GateId, Location>,
    width: i32,
    height: i32,
    depth: i32,
}

impl ChipLayout {
    pub fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            gates: FxHashMap::default(),
            width,
            height,
            depth,
        }
    }

    /// Add a gate, replacing any earlier placement under the same id
    pub fn add_gate(&mut self, gate: GateId, location: Location) {
        self.gates.insert(gate, location);
    }

    pub fn with_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = (GateId, Location)>,
    {
        self.gates.extend(gates);
        self
    }

    #[inline]
    pub fn location(&self, gate: GateId) -> Option<Location> {
        self.gates.get(&gate).copied()
    }

    /// Location lookup for a gate a connection depends on
    #[inline]
    pub(crate) fn require(&self, gate: GateId) -> Result<Location> {
        self.location(gate).ok_or(Error::UnknownGate { gate })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Grid center in the x/y plane (width / 2, height / 2)
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    #[inline]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}
