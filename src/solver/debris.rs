//! Removal of isolated near-empty fragments.

use crate::mesh::{BlockArray, IndexBox};
use crate::types::Direction;

/// Cells removed by one debris pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebrisStats {
    /// Cells set to zero
    pub cells: usize,
    /// Volume removed, in cell units
    pub volume: f64,
}

impl DebrisStats {
    /// Combine statistics of two blocks.
    pub fn merge(self, other: DebrisStats) -> DebrisStats {
        DebrisStats {
            cells: self.cells + other.cells,
            volume: self.volume + other.volume,
        }
    }
}

/// Zero every valid cell with `0 < c < threshold` whose six face neighbours
/// are all below `1 - tolerance`.
///
/// Neighbour values are read from the halo, which must be current. Zeroing a
/// cell never turns a neighbour into a full cell, so the result does not
/// depend on visiting order.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::{BlockArray, IndexBox};
/// use vof_rs::solver::remove_debris;
///
/// let block = IndexBox::from_shape([3, 3, 3]);
/// let mut c = BlockArray::cells(block, 1, 0.0);
/// c[[1, 1, 1]] = 0.01;
/// let stats = remove_debris(block, &mut c, 0.02, 1e-12);
/// assert_eq!(stats.cells, 1);
/// assert_eq!(c[[1, 1, 1]], 0.0);
/// ```
pub fn remove_debris(
    block: IndexBox,
    volume_fraction: &mut BlockArray,
    threshold: f64,
    tolerance: f64,
) -> DebrisStats {
    let full = 1.0 - tolerance;
    let mut stats = DebrisStats::default();

    for p in block.iter() {
        let c = volume_fraction.get(p);
        if c <= 0.0 || c >= threshold {
            continue;
        }
        let has_full_neighbour = Direction::ALL.iter().any(|dir| {
            let e = dir.unit();
            let lo = [p[0] - e[0], p[1] - e[1], p[2] - e[2]];
            let hi = [p[0] + e[0], p[1] + e[1], p[2] + e[2]];
            volume_fraction.get(lo) >= full || volume_fraction.get(hi) >= full
        });
        if !has_full_neighbour {
            volume_fraction.set(p, 0.0);
            stats.cells += 1;
            stats.volume += c;
        }
    }
    stats
}
