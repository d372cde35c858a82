//! Core geometry types shared by the wire model and the ordering heuristics.

use std::fmt;

use crate::error::{Error, Result};

/// Gate identifier as numbered by the chip loader
pub type GateId = u32;

/// Required connection between two gates (unordered in meaning, kept as given)
pub type Connection = (GateId, GateId);

/// Integer grid coordinate: (x, y, layer height z)
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Location one step away along `direction`.
    ///
    /// Grid coordinates are expected to stay well inside the `i32` range; use
    /// [`Location::checked_offset`] when a step may leave it.
    #[inline]
    pub fn offset(&self, direction: Direction) -> Location {
        Location::new(
            self.x + direction.dx,
            self.y + direction.dy,
            self.z + direction.dz,
        )
    }

    /// Like [`Location::offset`], `None` if any coordinate would overflow
    #[inline]
    pub fn checked_offset(&self, direction: Direction) -> Option<Location> {
        Some(Location::new(
            self.x.checked_add(direction.dx)?,
            self.y.checked_add(direction.dy)?,
            self.z.checked_add(direction.dz)?,
        ))
    }

    /// Euclidean distance in the x/y plane; z is ignored.
    #[inline]
    pub fn distance_2d(&self, other: &Location) -> f64 {
        self.distance_to_point(other.x as f64, other.y as f64)
    }

    /// Euclidean x/y distance to a (possibly fractional) point such as the grid center.
    #[inline]
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = self.x as f64 - x;
        let dy = self.y as f64 - y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn as_tuple(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Location {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Location::new(x, y, z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Unit Manhattan step: exactly one component is +/-1, the others are 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Direction {
    dx: i32,
    dy: i32,
    dz: i32,
}

impl Direction {
    pub const EAST: Direction = Direction { dx: 1, dy: 0, dz: 0 };
    pub const WEST: Direction = Direction { dx: -1, dy: 0, dz: 0 };
    pub const NORTH: Direction = Direction { dx: 0, dy: 1, dz: 0 };
    pub const SOUTH: Direction = Direction { dx: 0, dy: -1, dz: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: 0, dz: 1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 0, dz: -1 };

    /// 6 directions for orthogonal routing through the layer stack
    pub const ALL: [Direction; 6] = [
        Direction::EAST,
        Direction::WEST,
        Direction::NORTH,
        Direction::SOUTH,
        Direction::UP,
        Direction::DOWN,
    ];

    /// Validate a raw vector supplied by a pathfinder.
    pub fn new(dx: i32, dy: i32, dz: i32) -> Result<Self> {
        let unit = dx.abs() + dy.abs() + dz.abs() == 1;
        if !unit {
            return Err(Error::NonUnitDirection { dx, dy, dz });
        }
        Ok(Self { dx, dy, dz })
    }

    #[inline]
    pub fn dx(&self) -> i32 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> i32 {
        self.dy
    }

    #[inline]
    pub fn dz(&self) -> i32 {
        self.dz
    }

    #[inline]
    pub fn as_tuple(&self) -> (i32, i32, i32) {
        (self.dx, self.dy, self.dz)
    }
}

impl TryFrom<(i32, i32, i32)> for Direction {
    type Error = Error;

    fn try_from((dx, dy, dz): (i32, i32, i32)) -> Result<Self> {
        Direction::new(dx, dy, dz)
    }
}

/// One unit-length directed segment of a wire.
///
/// `PartialEq` compares both ends. Use [`WireUnit::terminates_same_as`] to ask
/// whether two units occupy the same grid point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct WireUnit {
    pub from_location: Location,
    pub to_location: Location,
}

impl WireUnit {
    #[inline]
    pub fn new(from_location: Location, to_location: Location) -> Self {
        Self {
            from_location,
            to_location,
        }
    }

    /// True when both units end at the same location, wherever they start.
    #[inline]
    pub fn terminates_same_as(&self, other: &WireUnit) -> bool {
        self.to_location == other.to_location
    }
}
