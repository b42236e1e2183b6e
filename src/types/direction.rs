//! Spatial sweep directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three grid axes.
///
/// The numeric value doubles as the component index into `[T; 3]` arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// x axis
    X = 0,
    /// y axis
    Y = 1,
    /// z axis
    Z = 2,
}

impl Direction {
    /// All directions in axis order.
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    /// Component index (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a component index, wrapping modulo 3.
    #[inline]
    pub const fn from_index(index: usize) -> Direction {
        match index % 3 {
            0 => Direction::X,
            1 => Direction::Y,
            _ => Direction::Z,
        }
    }

    /// Next direction in the cyclic order X → Y → Z → X.
    #[inline]
    pub const fn next(self) -> Direction {
        Direction::from_index(self.index() + 1)
    }

    /// Integer offset of one cell along this direction.
    #[inline]
    pub const fn unit(self) -> [i64; 3] {
        match self {
            Direction::X => [1, 0, 0],
            Direction::Y => [0, 1, 0],
            Direction::Z => [0, 0, 1],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::X => "x",
            Direction::Y => "y",
            Direction::Z => "z",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_index(dir.index()), dir);
        }
        assert_eq!(Direction::from_index(4), Direction::Y);
    }

    #[test]
    fn test_cyclic_next() {
        assert_eq!(Direction::X.next(), Direction::Y);
        assert_eq!(Direction::Y.next(), Direction::Z);
        assert_eq!(Direction::Z.next(), Direction::X);
    }

    #[test]
    fn test_unit_offsets() {
        assert_eq!(Direction::Y.unit(), [0, 1, 0]);
        let sum: i64 = Direction::ALL.iter().map(|d| d.unit().iter().sum::<i64>()).sum();
        assert_eq!(sum, 3);
    }
}
