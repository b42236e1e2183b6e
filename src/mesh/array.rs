//! Per-block field storage with ghost layers.
//!
//! A [`BlockArray`] stores one value per cell (or per face) of a block plus a
//! ring of ghost entries around it. Values are addressed by global integer
//! indices, so neighbouring blocks agree on the index of a shared point.

use std::ops::{Index, IndexMut};

use super::IndexBox;
use crate::types::Direction;

/// Number of ghost layers carried by volume-fraction and velocity arrays.
///
/// Fluxes are computed on the block grown by one cell, and the interface
/// normal of such a cell reads one further layer.
pub const GHOST_WIDTH: usize = 2;

/// Where values of an array live on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Staggering {
    /// Cell centers
    Cell,
    /// Faces normal to the given direction (face `p` is the low face of cell `p`)
    Face(Direction),
}

impl Staggering {
    /// Index box of the values owned by a block (or domain) of cells.
    pub fn owned_box(self, cells: IndexBox) -> IndexBox {
        match self {
            Staggering::Cell => cells,
            Staggering::Face(dir) => cells.surrounding_nodes(dir),
        }
    }
}

/// Dense 3D array over a block's valid region plus ghost layers.
///
/// Storage is x-fastest. Indexing with a point outside the array box
/// panics in debug builds.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::{BlockArray, IndexBox};
///
/// let block = IndexBox::from_shape([4, 4, 4]);
/// let mut c = BlockArray::cells(block, 2, 0.0);
/// c[[-2, 0, 0]] = 1.0;
/// assert_eq!(c[[-2, 0, 0]], 1.0);
/// assert_eq!(c.array_box().size(), [8, 8, 8]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BlockArray<T = f64> {
    staggering: Staggering,
    valid_box: IndexBox,
    array_box: IndexBox,
    len: [usize; 3],
    data: Vec<T>,
}

impl<T: Copy> BlockArray<T> {
    /// Allocate an array for `block` with `ghost` layers, filled with `value`.
    pub fn new(staggering: Staggering, block: IndexBox, ghost: usize, value: T) -> Self {
        let valid_box = staggering.owned_box(block);
        let array_box = valid_box.grow(ghost as i64);
        let len = array_box.size();
        Self {
            staggering,
            valid_box,
            array_box,
            len,
            data: vec![value; array_box.num_cells()],
        }
    }

    /// Cell-centered array.
    pub fn cells(block: IndexBox, ghost: usize, value: T) -> Self {
        Self::new(Staggering::Cell, block, ghost, value)
    }

    /// Face-centered array for faces normal to `dir`.
    pub fn faces(block: IndexBox, dir: Direction, ghost: usize, value: T) -> Self {
        Self::new(Staggering::Face(dir), block, ghost, value)
    }

    /// Location of the stored values.
    #[inline]
    pub fn staggering(&self) -> Staggering {
        self.staggering
    }

    /// Indices owned by the block.
    #[inline]
    pub fn valid_box(&self) -> IndexBox {
        self.valid_box
    }

    /// Indices stored, ghosts included.
    #[inline]
    pub fn array_box(&self) -> IndexBox {
        self.array_box
    }

    /// Linear storage offset of a point.
    #[inline]
    pub fn offset(&self, p: [i64; 3]) -> usize {
        debug_assert!(
            self.array_box.contains(p),
            "index ({}, {}, {}) outside array box {}",
            p[0],
            p[1],
            p[2],
            self.array_box
        );
        let lo = self.array_box.lo;
        let i = (p[0] - lo[0]) as usize;
        let j = (p[1] - lo[1]) as usize;
        let k = (p[2] - lo[2]) as usize;
        i + self.len[0] * (j + self.len[1] * k)
    }

    /// Value at a point.
    #[inline]
    pub fn get(&self, p: [i64; 3]) -> T {
        self.data[self.offset(p)]
    }

    /// Value at a point, or `None` outside the array box.
    #[inline]
    pub fn get_checked(&self, p: [i64; 3]) -> Option<T> {
        self.array_box.contains(p).then(|| self.get(p))
    }

    /// Overwrite the value at a point.
    #[inline]
    pub fn set(&mut self, p: [i64; 3], value: T) {
        let offset = self.offset(p);
        self.data[offset] = value;
    }

    /// Set every entry, ghosts included.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Set every entry inside `region` (clipped to the array box).
    pub fn fill_box(&mut self, region: IndexBox, value: T) {
        if let Some(region) = region.intersection(&self.array_box) {
            for p in region.iter() {
                self.set(p, value);
            }
        }
    }

    /// Raw storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw mutable storage.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy> Index<[i64; 3]> for BlockArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, p: [i64; 3]) -> &T {
        &self.data[self.offset(p)]
    }
}

impl<T: Copy> IndexMut<[i64; 3]> for BlockArray<T> {
    #[inline]
    fn index_mut(&mut self, p: [i64; 3]) -> &mut T {
        let offset = self.offset(p);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_array_extent() {
        let block = IndexBox::new([4, 0, 0], [7, 3, 1]);
        let u = BlockArray::faces(block, Direction::X, 1, 0.0_f64);
        assert_eq!(u.valid_box(), IndexBox::new([4, 0, 0], [8, 3, 1]));
        assert_eq!(u.array_box(), IndexBox::new([3, -1, -1], [9, 4, 2]));
        assert_eq!(u.as_slice().len(), 7 * 6 * 4);
    }

    #[test]
    fn test_offsets_are_unique() {
        let a = BlockArray::cells(IndexBox::from_shape([3, 2, 2]), 1, 0_u8);
        let mut seen = vec![false; a.as_slice().len()];
        for p in a.array_box().iter() {
            let off = a.offset(p);
            assert!(!seen[off], "offset {} visited twice", off);
            seen[off] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_get_checked() {
        let a = BlockArray::cells(IndexBox::from_shape([2, 2, 2]), 0, 1.5);
        assert_eq!(a.get_checked([1, 1, 1]), Some(1.5));
        assert_eq!(a.get_checked([2, 0, 0]), None);
    }

    #[test]
    fn test_fill_box_clips() {
        let mut a = BlockArray::cells(IndexBox::from_shape([2, 2, 2]), 1, 0.0);
        a.fill_box(IndexBox::new([1, -5, -5], [9, 5, 5]), 2.0);
        assert_eq!(a[[2, -1, 2]], 2.0);
        assert_eq!(a[[0, 0, 0]], 0.0);
    }
}
