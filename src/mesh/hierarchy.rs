//! Stack of refinement levels with a fixed refinement ratio.

use super::{GridError, Level};
use crate::types::LevelIndex;

/// Levels ordered coarse to fine.
///
/// Level `l + 1` covers the domain of level `l` refined by `ratio`, and its
/// blocks are aligned to whole coarse cells and nested inside level `l`.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::{Geometry, Hierarchy, IndexBox, Level};
///
/// let coarse = Level::single_block(Geometry::unit_cube([8, 8, 8], [true; 3]));
/// let fine_geom = coarse.geometry().refine(2);
/// let fine = Level::new(fine_geom, vec![IndexBox::new([4, 4, 4], [11, 11, 11])]).unwrap();
/// let hierarchy = Hierarchy::new(vec![coarse, fine], 2).unwrap();
/// assert_eq!(hierarchy.num_levels(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Hierarchy {
    levels: Vec<Level>,
    ratio: i64,
}

impl Hierarchy {
    /// Assemble a hierarchy, checking domain, alignment and nesting.
    pub fn new(levels: Vec<Level>, ratio: i64) -> Result<Self, GridError> {
        if levels.is_empty() {
            return Err(GridError::NoLevels);
        }
        if levels.len() > 1 && ratio < 2 {
            return Err(GridError::InvalidRatio(ratio));
        }

        for lev in 1..levels.len() {
            let coarse = &levels[lev - 1];
            let fine = &levels[lev];
            let expected = coarse.geometry().domain().refine(ratio);
            let found = fine.geometry().domain();
            if expected != found {
                return Err(GridError::DomainMismatch {
                    level: lev,
                    expected,
                    found,
                });
            }
            for block in fine.boxes() {
                if !block.is_coarsenable(ratio) {
                    return Err(GridError::UnalignedBlock {
                        level: lev,
                        block: *block,
                        ratio,
                    });
                }
                let nested = block
                    .coarsen(ratio)
                    .iter()
                    .all(|cp| coarse.boxes().iter().any(|b| b.contains(cp)));
                if !nested {
                    return Err(GridError::NotNested {
                        level: lev,
                        coarser: lev - 1,
                        block: *block,
                    });
                }
            }
        }

        Ok(Self { levels, ratio })
    }

    /// Hierarchy with a single level.
    pub fn single_level(level: Level) -> Self {
        Self {
            levels: vec![level],
            ratio: 2,
        }
    }

    /// Number of levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Refinement ratio between consecutive levels.
    #[inline]
    pub fn ratio(&self) -> i64 {
        self.ratio
    }

    /// Borrow a level.
    pub fn level(&self, lev: LevelIndex) -> &Level {
        &self.levels[lev]
    }

    /// Mutably borrow a level.
    pub fn level_mut(&mut self, lev: LevelIndex) -> &mut Level {
        &mut self.levels[lev]
    }

    /// All levels, coarse first.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Fill fine ghosts not owned by any fine block from the next coarser
    /// level by piecewise-constant injection. No-op on level 0.
    pub fn fill_from_coarse(&mut self, lev: LevelIndex) {
        let Some(coarser) = lev.coarser() else {
            return;
        };
        let ratio = self.ratio;
        let (coarse, fine) = self.levels.split_at_mut(lev.get());
        fine[0].fill_coarse_fine_ghosts(&coarse[coarser.get()], ratio);
    }

    /// Overwrite coarse cells under level `fine` with the average of their
    /// fine children. No-op on level 0.
    pub fn average_down(&mut self, fine: LevelIndex) {
        let Some(coarser) = fine.coarser() else {
            return;
        };
        let ratio = self.ratio;
        let (coarse, rest) = self.levels.split_at_mut(fine.get());
        rest[0].average_down_onto(&mut coarse[coarser.get()], ratio);
    }

    /// Average down every level onto its parent, finest first.
    pub fn average_down_all(&mut self) {
        for lev in (1..self.levels.len()).rev() {
            self.average_down(LevelIndex::new(lev));
        }
    }
}
