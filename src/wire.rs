//! Wire between two gates, built one grid step at a time.

use crate::error::{Error, Result};
use crate::types::{Direction, GateId, Location, WireUnit};

/// Gate endpoint of a wire: the gate id and where it sits on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Endpoint {
    pub gate: GateId,
    pub location: Location,
}

impl Endpoint {
    #[inline]
    pub fn new(gate: GateId, location: Location) -> Self {
        Self { gate, location }
    }
}

/// Ordered chain of unit segments from `gate_a` towards `gate_b`.
///
/// Each unit starts where the previous one ended and the first unit starts at
/// `gate_a`. The pathfinder owns the choice of direction; the wire only tracks
/// the chain and reports when it has reached `gate_b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    gate_a: Endpoint,
    gate_b: Endpoint,
    units: Vec<WireUnit>,
}

impl Wire {
    pub fn new(gate_a: Endpoint, gate_b: Endpoint) -> Self {
        Self {
            gate_a,
            gate_b,
            units: Vec::new(),
        }
    }

    #[inline]
    pub fn gate_a(&self) -> Endpoint {
        self.gate_a
    }

    #[inline]
    pub fn gate_b(&self) -> Endpoint {
        self.gate_b
    }

    /// Where the next unit would originate
    #[inline]
    pub fn start_point(&self) -> Location {
        match self.units.last() {
            Some(unit) => unit.to_location,
            None => self.gate_a.location,
        }
    }

    /// Where the next unit would end if it went in `direction`
    #[inline]
    pub fn end_point(&self, direction: Direction) -> Location {
        self.start_point().offset(direction)
    }

    /// Extend the wire by one step and return the new unit.
    pub fn append(&mut self, direction: Direction) -> WireUnit {
        let from = self.start_point();
        let unit = WireUnit::new(from, from.offset(direction));
        tracing::trace!(
            gate_a = self.gate_a.gate,
            gate_b = self.gate_b.gate,
            to = %unit.to_location,
            "wire append"
        );
        self.units.push(unit);
        unit
    }

    /// Remove the most recent unit, `None` when the wire is empty.
    pub fn pop(&mut self) -> Option<WireUnit> {
        let unit = self.units.pop();
        if let Some(unit) = unit {
            tracing::trace!(
                gate_a = self.gate_a.gate,
                gate_b = self.gate_b.gate,
                to = %unit.to_location,
                "wire pop"
            );
        }
        unit
    }

    /// Like [`Wire::pop`] but treats an empty wire as an error.
    pub fn try_pop(&mut self) -> Result<WireUnit> {
        self.pop().ok_or(Error::EmptyWire)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// True once the last unit ends on `gate_b`. An empty wire is never
    /// connected, even when both gates share a location.
    pub fn is_connected(&self) -> bool {
        self.units
            .last()
            .is_some_and(|unit| unit.to_location == self.gate_b.location)
    }

    #[inline]
    pub fn units(&self) -> &[WireUnit] {
        &self.units
    }

    /// Every grid point the wire touches, starting at `gate_a`
    pub fn locations(&self) -> Vec<Location> {
        let mut points = Vec::with_capacity(self.units.len() + 1);
        points.push(self.gate_a.location);
        points.extend(self.units.iter().map(|unit| unit.to_location));
        points
    }

    /// Drop every unit, keeping the endpoints
    pub fn clear(&mut self) {
        self.units.clear();
    }
}
