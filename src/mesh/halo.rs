//! Ghost-layer exchange between blocks of one level.
//!
//! Ghost entries that overlap another block's owned region (directly or
//! through a periodic image) receive that block's values. Copies are first
//! gathered from an immutable view of all blocks and then applied, so the
//! result does not depend on block order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{BlockArray, Geometry, IndexBox};
use crate::types::Direction;

/// Pending ghost writes for one destination block: `(offset, value)`.
type GhostWrites<T> = Vec<(usize, T)>;

/// Fill ghost entries of every array from the owned values of its neighbours.
///
/// Ghosts outside the domain along non-periodic directions, and ghosts not
/// covered by any block, are left untouched.
pub fn exchange_halos<T>(arrays: &mut [BlockArray<T>], geometry: &Geometry)
where
    T: Copy + Send + Sync,
{
    let shifts = geometry.periodic_shifts();
    let writes = gather_all(arrays, &shifts);
    for (array, writes) in arrays.iter_mut().zip(writes) {
        let data = array.as_mut_slice();
        for (offset, value) in writes {
            data[offset] = value;
        }
    }
}

#[cfg(feature = "parallel")]
fn gather_all<T>(arrays: &[BlockArray<T>], shifts: &[[i64; 3]]) -> Vec<GhostWrites<T>>
where
    T: Copy + Send + Sync,
{
    (0..arrays.len())
        .into_par_iter()
        .map(|dest| gather_ghosts(dest, arrays, shifts))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn gather_all<T>(arrays: &[BlockArray<T>], shifts: &[[i64; 3]]) -> Vec<GhostWrites<T>>
where
    T: Copy + Send + Sync,
{
    (0..arrays.len())
        .map(|dest| gather_ghosts(dest, arrays, shifts))
        .collect()
}

fn gather_ghosts<T: Copy>(
    dest_index: usize,
    arrays: &[BlockArray<T>],
    shifts: &[[i64; 3]],
) -> GhostWrites<T> {
    let dest = &arrays[dest_index];
    let dest_valid = dest.valid_box();
    let mut writes = Vec::new();

    for &shift in shifts {
        for (src_index, src) in arrays.iter().enumerate() {
            if src_index == dest_index && shift == [0, 0, 0] {
                continue;
            }
            let image = src.valid_box().shift(shift);
            let Some(region) = dest.array_box().intersection(&image) else {
                continue;
            };
            for p in region.iter() {
                if dest_valid.contains(p) {
                    continue;
                }
                let q = [p[0] - shift[0], p[1] - shift[1], p[2] - shift[2]];
                writes.push((dest.offset(p), src.get(q)));
            }
        }
    }
    writes
}

/// Copy the nearest in-domain value into entries outside the domain.
///
/// Applies along non-periodic directions only, giving a zero-gradient
/// extension. `domain` is the owned box of the whole level for the array's
/// staggering.
pub fn extrapolate_outside_domain<T: Copy>(array: &mut BlockArray<T>, domain: IndexBox, periodic: [bool; 3]) {
    let mut clamp_box = array.array_box();
    for dir in Direction::ALL {
        let d = dir.index();
        if !periodic[d] {
            clamp_box.lo[d] = domain.lo[d];
            clamp_box.hi[d] = domain.hi[d];
        }
    }
    for p in array.array_box().iter() {
        if clamp_box.contains(p) {
            continue;
        }
        let q = clamp_box.clamp(p);
        let value = array.get(q);
        array.set(p, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{GHOST_WIDTH, Staggering};

    fn index_field(blocks: &[IndexBox]) -> Vec<BlockArray> {
        blocks
            .iter()
            .map(|&b| {
                let mut a = BlockArray::cells(b, GHOST_WIDTH, -1.0);
                for p in b.iter() {
                    a[p] = (p[0] + 10 * p[1] + 100 * p[2]) as f64;
                }
                a
            })
            .collect()
    }

    #[test]
    fn test_exchange_between_neighbours() {
        let geom = Geometry::unit_cube([8, 4, 1], [false; 3]);
        let blocks = geom.domain().chop(4);
        let mut arrays = index_field(&blocks);
        exchange_halos(&mut arrays, &geom);

        // Left block ghost at i = 4, 5 comes from the right block.
        assert_eq!(arrays[0][[4, 2, 0]], 24.0);
        assert_eq!(arrays[0][[5, 3, 0]], 35.0);
        // Right block ghost at i = 2, 3.
        assert_eq!(arrays[1][[3, 0, 0]], 3.0);
        // Domain boundary ghosts untouched.
        assert_eq!(arrays[0][[-1, 0, 0]], -1.0);
    }

    #[test]
    fn test_periodic_self_image() {
        let geom = Geometry::unit_cube([4, 4, 4], [true, true, true]);
        let mut arrays = index_field(&[geom.domain()]);
        exchange_halos(&mut arrays, &geom);

        assert_eq!(arrays[0][[-1, 0, 0]], 3.0);
        assert_eq!(arrays[0][[4, 5, 0]], 10.0);
        assert_eq!(arrays[0][[-2, -2, -2]], (2 + 20 + 200) as f64);
    }

    #[test]
    fn test_face_arrays_keep_owned_values() {
        let geom = Geometry::unit_cube([8, 2, 2], [true, false, false]);
        let blocks = geom.domain().chop(4);
        let mut arrays: Vec<BlockArray> = blocks
            .iter()
            .map(|&b| {
                let mut a = BlockArray::faces(b, Direction::X, GHOST_WIDTH, 0.0);
                for p in a.valid_box().iter() {
                    a[p] = p[0] as f64;
                }
                a
            })
            .collect();
        exchange_halos(&mut arrays, &geom);

        assert_eq!(arrays[0].staggering(), Staggering::Face(Direction::X));
        // Shared face i = 4 stays as owned by each block.
        assert_eq!(arrays[0][[4, 0, 0]], 4.0);
        assert_eq!(arrays[1][[4, 0, 0]], 4.0);
        assert_eq!(arrays[0][[5, 0, 0]], 5.0);
        // Periodic wrap: face -1 is face 7.
        assert_eq!(arrays[0][[-1, 1, 1]], 7.0);
    }

    #[test]
    fn test_extrapolate_outside_domain() {
        let geom = Geometry::unit_cube([2, 2, 2], [false, true, false]);
        let mut arrays = index_field(&[geom.domain()]);
        exchange_halos(&mut arrays, &geom);
        extrapolate_outside_domain(&mut arrays[0], geom.domain(), geom.periodic());

        assert_eq!(arrays[0][[-2, 0, 0]], 0.0);
        assert_eq!(arrays[0][[3, 1, 0]], 11.0);
        // Periodic y ghost filled by exchange, then x clamped.
        assert_eq!(arrays[0][[-1, -1, 0]], 10.0);
        assert_eq!(arrays[0][[0, 0, 3]], 100.0);
    }
}
