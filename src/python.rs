//! PyO3 bindings so a Python router can drive ordering and wires directly.

use pyo3::exceptions::{PyIndexError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::chip::ChipLayout;
use crate::error::Error;
use crate::ordering::{self, OrderStrategy};
use crate::types::{Connection, Direction, GateId, Location, WireUnit};
use crate::wire::{Endpoint, Wire};

type Point = (i32, i32, i32);

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        let message = err.to_string();
        match err {
            Error::UnknownGate { .. } => PyKeyError::new_err(message),
            Error::EmptyWire => PyIndexError::new_err(message),
            Error::NonUnitDirection { .. } | Error::UnknownStrategy { .. } => {
                PyValueError::new_err(message)
            }
        }
    }
}

#[inline]
fn unit_tuple(unit: WireUnit) -> (Point, Point) {
    (unit.from_location.as_tuple(), unit.to_location.as_tuple())
}

/// Gate placement and grid bounds
#[pyclass(name = "ChipLayout")]
struct PyChipLayout {
    inner: ChipLayout,
}

#[pymethods]
impl PyChipLayout {
    #[new]
    fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            inner: ChipLayout::new(width, height, depth),
        }
    }

    /// Place a gate at (x, y, z)
    fn add_gate(&mut self, gate: GateId, location: Point) {
        self.inner.add_gate(gate, Location::from(location));
    }

    /// Location of a gate, KeyError if it was never placed
    fn location(&self, gate: GateId) -> PyResult<Point> {
        self.inner
            .location(gate)
            .map(|location| location.as_tuple())
            .ok_or_else(|| Error::UnknownGate { gate }.into())
    }

    fn center(&self) -> (f64, f64) {
        self.inner.center()
    }

    fn __len__(&self) -> usize {
        self.inner.gate_count()
    }
}

/// Wire between two gates, extended one unit step at a time
#[pyclass(name = "Wire")]
struct PyWire {
    inner: Wire,
}

#[pymethods]
impl PyWire {
    #[new]
    fn new(gate_a: GateId, location_a: Point, gate_b: GateId, location_b: Point) -> Self {
        Self {
            inner: Wire::new(
                Endpoint::new(gate_a, Location::from(location_a)),
                Endpoint::new(gate_b, Location::from(location_b)),
            ),
        }
    }

    /// Append a unit in `direction`, returning (from, to).
    /// Raises ValueError unless exactly one component is +/-1.
    fn append(&mut self, direction: Point) -> PyResult<(Point, Point)> {
        let direction = Direction::try_from(direction)?;
        Ok(unit_tuple(self.inner.append(direction)))
    }

    /// Remove the last unit, IndexError when empty
    fn pop(&mut self) -> PyResult<(Point, Point)> {
        Ok(unit_tuple(self.inner.try_pop()?))
    }

    fn start_point(&self) -> Point {
        self.inner.start_point().as_tuple()
    }

    fn end_point(&self, direction: Point) -> PyResult<Point> {
        let direction = Direction::try_from(direction)?;
        Ok(self.inner.end_point(direction).as_tuple())
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn locations(&self) -> Vec<Point> {
        self.inner.locations().iter().map(Location::as_tuple).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Reorder the netlist with a named heuristic; unknown names keep the input order.
#[pyfunction]
fn change_netlist_order(
    connections: Vec<Connection>,
    order_choice: &str,
    layout: &PyChipLayout,
) -> PyResult<Vec<Connection>> {
    Ok(ordering::change_netlist_order(&connections, order_choice, &layout.inner)?)
}

/// Names accepted by change_netlist_order
#[pyfunction]
fn order_strategies() -> Vec<&'static str> {
    OrderStrategy::ALL.iter().map(OrderStrategy::name).collect()
}

/// Python module
#[pymodule]
fn chip_wiring(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyChipLayout>()?;
    m.add_class::<PyWire>()?;
    m.add_function(wrap_pyfunction!(change_netlist_order, m)?)?;
    m.add_function(wrap_pyfunction!(order_strategies, m)?)?;
    Ok(())
}
