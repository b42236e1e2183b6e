//! Integer index boxes.
//!
//! An [`IndexBox`] is an inclusive range of integer cell (or node) indices in
//! three dimensions. Blocks, ghost regions and level domains are all
//! described by boxes, and halo exchange is expressed as box intersections.

use std::fmt;

use crate::types::Direction;

/// Inclusive 3D range of integer indices `lo..=hi`.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::IndexBox;
///
/// let bx = IndexBox::new([0, 0, 0], [7, 3, 1]);
/// assert_eq!(bx.size(), [8, 4, 2]);
/// assert_eq!(bx.num_cells(), 64);
/// assert!(bx.grow(1).contains([-1, 4, 2]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox {
    /// Lowest index in each direction
    pub lo: [i64; 3],
    /// Highest index in each direction (inclusive)
    pub hi: [i64; 3],
}

impl IndexBox {
    /// Create a box from inclusive corners.
    ///
    /// # Panics
    ///
    /// Panics if `hi < lo` in any direction.
    pub fn new(lo: [i64; 3], hi: [i64; 3]) -> Self {
        for d in 0..3 {
            assert!(
                hi[d] >= lo[d],
                "empty box: hi[{}] = {} < lo[{}] = {}",
                d,
                hi[d],
                d,
                lo[d]
            );
        }
        Self { lo, hi }
    }

    /// Box `[0, n)` in every direction.
    pub fn from_shape(n: [usize; 3]) -> Self {
        Self::new([0, 0, 0], [n[0] as i64 - 1, n[1] as i64 - 1, n[2] as i64 - 1])
    }

    /// Number of indices along each direction.
    #[inline]
    pub fn size(&self) -> [usize; 3] {
        [
            (self.hi[0] - self.lo[0] + 1) as usize,
            (self.hi[1] - self.lo[1] + 1) as usize,
            (self.hi[2] - self.lo[2] + 1) as usize,
        ]
    }

    /// Total number of indices in the box.
    #[inline]
    pub fn num_cells(&self) -> usize {
        let [nx, ny, nz] = self.size();
        nx * ny * nz
    }

    /// Check whether an index lies inside the box.
    #[inline]
    pub fn contains(&self, p: [i64; 3]) -> bool {
        (0..3).all(|d| p[d] >= self.lo[d] && p[d] <= self.hi[d])
    }

    /// Check whether another box lies entirely inside this one.
    pub fn contains_box(&self, other: &IndexBox) -> bool {
        self.contains(other.lo) && self.contains(other.hi)
    }

    /// Overlap of two boxes, if any.
    pub fn intersection(&self, other: &IndexBox) -> Option<IndexBox> {
        let mut lo = [0; 3];
        let mut hi = [0; 3];
        for d in 0..3 {
            lo[d] = self.lo[d].max(other.lo[d]);
            hi[d] = self.hi[d].min(other.hi[d]);
            if hi[d] < lo[d] {
                return None;
            }
        }
        Some(IndexBox { lo, hi })
    }

    /// Check whether two boxes overlap.
    pub fn intersects(&self, other: &IndexBox) -> bool {
        self.intersection(other).is_some()
    }

    /// Grow (or shrink, for negative `n`) the box by `n` in every direction.
    pub fn grow(&self, n: i64) -> IndexBox {
        IndexBox::new(
            [self.lo[0] - n, self.lo[1] - n, self.lo[2] - n],
            [self.hi[0] + n, self.hi[1] + n, self.hi[2] + n],
        )
    }

    /// Grow the box by `n` along one direction only.
    pub fn grow_dir(&self, dir: Direction, n: i64) -> IndexBox {
        let mut out = *self;
        out.lo[dir.index()] -= n;
        out.hi[dir.index()] += n;
        out
    }

    /// Translate the box by an offset.
    pub fn shift(&self, offset: [i64; 3]) -> IndexBox {
        IndexBox {
            lo: [
                self.lo[0] + offset[0],
                self.lo[1] + offset[1],
                self.lo[2] + offset[2],
            ],
            hi: [
                self.hi[0] + offset[0],
                self.hi[1] + offset[1],
                self.hi[2] + offset[2],
            ],
        }
    }

    /// Node box of the faces normal to `dir`: one extra index on the high side.
    pub fn surrounding_nodes(&self, dir: Direction) -> IndexBox {
        let mut out = *self;
        out.hi[dir.index()] += 1;
        out
    }

    /// Refine every cell into `ratio` cells per direction.
    pub fn refine(&self, ratio: i64) -> IndexBox {
        IndexBox {
            lo: [self.lo[0] * ratio, self.lo[1] * ratio, self.lo[2] * ratio],
            hi: [
                (self.hi[0] + 1) * ratio - 1,
                (self.hi[1] + 1) * ratio - 1,
                (self.hi[2] + 1) * ratio - 1,
            ],
        }
    }

    /// Coarsen by `ratio`, rounding outward.
    pub fn coarsen(&self, ratio: i64) -> IndexBox {
        IndexBox {
            lo: [
                self.lo[0].div_euclid(ratio),
                self.lo[1].div_euclid(ratio),
                self.lo[2].div_euclid(ratio),
            ],
            hi: [
                self.hi[0].div_euclid(ratio),
                self.hi[1].div_euclid(ratio),
                self.hi[2].div_euclid(ratio),
            ],
        }
    }

    /// Check whether the box maps exactly onto whole coarse cells.
    pub fn is_coarsenable(&self, ratio: i64) -> bool {
        (0..3).all(|d| self.lo[d].rem_euclid(ratio) == 0 && (self.hi[d] + 1).rem_euclid(ratio) == 0)
    }

    /// Clamp an index into the box.
    #[inline]
    pub fn clamp(&self, p: [i64; 3]) -> [i64; 3] {
        [
            p[0].clamp(self.lo[0], self.hi[0]),
            p[1].clamp(self.lo[1], self.hi[1]),
            p[2].clamp(self.lo[2], self.hi[2]),
        ]
    }

    /// Iterate over all indices with x varying fastest.
    pub fn iter(&self) -> impl Iterator<Item = [i64; 3]> + use<> {
        let (lo, hi) = (self.lo, self.hi);
        (lo[2]..=hi[2]).flat_map(move |k| {
            (lo[1]..=hi[1]).flat_map(move |j| (lo[0]..=hi[0]).map(move |i| [i, j, k]))
        })
    }

    /// Split the box into blocks no larger than `max_size` cells per direction.
    ///
    /// Blocks are returned in x-fastest order.
    pub fn chop(&self, max_size: usize) -> Vec<IndexBox> {
        assert!(max_size > 0, "max_size must be positive");
        let max_size = max_size as i64;
        let ranges: Vec<Vec<(i64, i64)>> = (0..3)
            .map(|d| {
                let mut out = Vec::new();
                let mut start = self.lo[d];
                while start <= self.hi[d] {
                    let end = (start + max_size - 1).min(self.hi[d]);
                    out.push((start, end));
                    start = end + 1;
                }
                out
            })
            .collect();

        let mut blocks = Vec::new();
        for &(zlo, zhi) in &ranges[2] {
            for &(ylo, yhi) in &ranges[1] {
                for &(xlo, xhi) in &ranges[0] {
                    blocks.push(IndexBox::new([xlo, ylo, zlo], [xhi, yhi, zhi]));
                }
            }
        }
        blocks
    }
}

impl fmt::Display for IndexBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{})..({},{},{})",
            self.lo[0], self.lo[1], self.lo[2], self.hi[0], self.hi[1], self.hi[2]
        )
    }
}
