//! Per-face domain settings with named fields.
//!
//! Provides a strongly-typed structure for values attached to the six faces
//! of a box-shaped domain, eliminating the need to remember array index
//! conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;

/// Low or high end of a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Face at the minimum coordinate
    Low,
    /// Face at the maximum coordinate
    High,
}

impl Side {
    /// Both sides, low first.
    pub const BOTH: [Side; 2] = [Side::Low, Side::High];
}

/// Values attached to each of the six faces of the domain.
///
/// # Example
///
/// ```
/// use vof_rs::types::{Direction, DomainFaces, Side};
///
/// let faces = DomainFaces::new(1, 2, 3, 4, 5, 6);
/// assert_eq!(*faces.get(Direction::Y, Side::High), 4);
/// assert_eq!(faces.pair(Direction::Z), (&5, &6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFaces<T> {
    /// Face at x = x_min
    pub x_lo: T,
    /// Face at x = x_max
    pub x_hi: T,
    /// Face at y = y_min
    pub y_lo: T,
    /// Face at y = y_max
    pub y_hi: T,
    /// Face at z = z_min
    pub z_lo: T,
    /// Face at z = z_max
    pub z_hi: T,
}

impl<T> DomainFaces<T> {
    /// Create face values with explicit named order: x_lo, x_hi, y_lo, y_hi, z_lo, z_hi.
    pub fn new(x_lo: T, x_hi: T, y_lo: T, y_hi: T, z_lo: T, z_hi: T) -> Self {
        Self {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
            z_lo,
            z_hi,
        }
    }

    /// Create with the same value on all faces.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            x_lo: value.clone(),
            x_hi: value.clone(),
            y_lo: value.clone(),
            y_hi: value.clone(),
            z_lo: value.clone(),
            z_hi: value,
        }
    }

    /// Return a copy with one face replaced.
    pub fn with(mut self, dir: Direction, side: Side, value: T) -> Self {
        *self.get_mut(dir, side) = value;
        self
    }

    /// Get the value on one face.
    pub fn get(&self, dir: Direction, side: Side) -> &T {
        match (dir, side) {
            (Direction::X, Side::Low) => &self.x_lo,
            (Direction::X, Side::High) => &self.x_hi,
            (Direction::Y, Side::Low) => &self.y_lo,
            (Direction::Y, Side::High) => &self.y_hi,
            (Direction::Z, Side::Low) => &self.z_lo,
            (Direction::Z, Side::High) => &self.z_hi,
        }
    }

    /// Get a mutable reference to the value on one face.
    pub fn get_mut(&mut self, dir: Direction, side: Side) -> &mut T {
        match (dir, side) {
            (Direction::X, Side::Low) => &mut self.x_lo,
            (Direction::X, Side::High) => &mut self.x_hi,
            (Direction::Y, Side::Low) => &mut self.y_lo,
            (Direction::Y, Side::High) => &mut self.y_hi,
            (Direction::Z, Side::Low) => &mut self.z_lo,
            (Direction::Z, Side::High) => &mut self.z_hi,
        }
    }

    /// Low and high face values of one direction.
    pub fn pair(&self, dir: Direction) -> (&T, &T) {
        (self.get(dir, Side::Low), self.get(dir, Side::High))
    }

    /// Map a function over all faces.
    pub fn map<U, F>(self, mut f: F) -> DomainFaces<U>
    where
        F: FnMut(T) -> U,
    {
        DomainFaces {
            x_lo: f(self.x_lo),
            x_hi: f(self.x_hi),
            y_lo: f(self.y_lo),
            y_hi: f(self.y_hi),
            z_lo: f(self.z_lo),
            z_hi: f(self.z_hi),
        }
    }

    /// Iterate over `(direction, side, value)` in x_lo, x_hi, y_lo, ... order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Side, &T)> {
        Direction::ALL
            .into_iter()
            .flat_map(|dir| Side::BOTH.into_iter().map(move |side| (dir, side)))
            .map(move |(dir, side)| (dir, side, self.get(dir, side)))
    }

    /// Convert to array [x_lo, x_hi, y_lo, y_hi, z_lo, z_hi].
    pub fn to_array(self) -> [T; 6] {
        [self.x_lo, self.x_hi, self.y_lo, self.y_hi, self.z_lo, self.z_hi]
    }
}

impl<T: Default> Default for DomainFaces<T> {
    fn default() -> Self {
        Self {
            x_lo: T::default(),
            x_hi: T::default(),
            y_lo: T::default(),
            y_hi: T::default(),
            z_lo: T::default(),
            z_hi: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for DomainFaces<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:[{}, {}] y:[{}, {}] z:[{}, {}]",
            self.x_lo, self.x_hi, self.y_lo, self.y_hi, self.z_lo, self.z_hi
        )
    }
}

impl<T> From<[T; 6]> for DomainFaces<T> {
    fn from([x_lo, x_hi, y_lo, y_hi, z_lo, z_hi]: [T; 6]) -> Self {
        Self::new(x_lo, x_hi, y_lo, y_hi, z_lo, z_hi)
    }
}
