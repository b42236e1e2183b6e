//! Per-time-step driver for the split advection scheme.
//!
//! Each level runs through a fixed sequence of stages:
//!
//! | Stage | Work |
//! |---|---|
//! | `Classify` | refresh ghosts, prepare block scratch, check the Courant number |
//! | `Sweep1` | classify, then sweep the first axis on every block |
//! | `Sync1` | refresh ghosts |
//! | `Sweep2` | sweep the second axis on every block |
//! | `Sync2` | refresh ghosts |
//! | `Sweep3Debris` | sweep the third axis, then remove debris |
//! | `Done` | level ready for the next physics stage |
//!
//! Every stage finishes on all blocks of the level before the next one
//! starts. Levels are advanced one after another, coarsest first.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::boundary::BoundaryConditions;
use crate::config::VofConfig;
use crate::error::VofError;
use crate::mesh::{BlockArray, BlockStructuredMesh, GridError, LevelBlocks};
use crate::solver::{
    BlockPhaseReport, BlockScratch, ClassCounts, DebrisStats, StepParams, SweepOrder, SweepPhase,
    SweepStats, max_courant, split_advection_step,
};
use crate::types::LevelIndex;

use super::SweepCounter;

/// Stage of the per-level state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdvectionStage {
    /// Ghost refresh and per-block preparation
    Classify,
    /// First sweep (with classification)
    Sweep1,
    /// Ghost refresh after the first sweep
    Sync1,
    /// Second sweep
    Sweep2,
    /// Ghost refresh after the second sweep
    Sync2,
    /// Third sweep and debris removal
    Sweep3Debris,
    /// Level finished
    Done,
}

impl AdvectionStage {
    /// The stage that follows this one. `Done` is terminal.
    pub fn next(self) -> AdvectionStage {
        match self {
            AdvectionStage::Classify => AdvectionStage::Sweep1,
            AdvectionStage::Sweep1 => AdvectionStage::Sync1,
            AdvectionStage::Sync1 => AdvectionStage::Sweep2,
            AdvectionStage::Sweep2 => AdvectionStage::Sync2,
            AdvectionStage::Sync2 => AdvectionStage::Sweep3Debris,
            AdvectionStage::Sweep3Debris | AdvectionStage::Done => AdvectionStage::Done,
        }
    }

    /// Sweep phase run in this stage, if any.
    pub fn sweep_phase(self) -> Option<SweepPhase> {
        match self {
            AdvectionStage::Sweep1 => Some(SweepPhase::First),
            AdvectionStage::Sweep2 => Some(SweepPhase::Second),
            AdvectionStage::Sweep3Debris => Some(SweepPhase::Third),
            _ => None,
        }
    }
}

/// Summary of one level over one time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelReport {
    /// Level index
    pub level: LevelIndex,
    /// Cell classes at the start of the step
    pub classes: ClassCounts,
    /// Clipping over all three sweeps
    pub sweep: SweepStats,
    /// Debris removed after the third sweep
    pub debris: DebrisStats,
    /// Largest face Courant number at the start of the step
    pub max_courant: f64,
    /// Cell volume of the level
    pub cell_volume: f64,
}

impl LevelReport {
    /// Volume added by clipping minus volume removed as debris, in
    /// physical units.
    ///
    /// On a closed or periodic level the change in total liquid volume over
    /// the step equals this value up to round-off.
    pub fn volume_correction(&self) -> f64 {
        (self.sweep.clip_volume - self.debris.volume) * self.cell_volume
    }
}

/// Summary of one time step.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvectionReport {
    /// Sweep counter value of the step
    pub counter: u8,
    /// Sweep order of the step
    pub order: SweepOrder,
    /// Per-level results, coarse first
    pub levels: Vec<LevelReport>,
}

impl AdvectionReport {
    /// Cells clipped on any level.
    pub fn clipped_cells(&self) -> usize {
        self.levels.iter().map(|l| l.sweep.clipped_cells).sum()
    }

    /// Debris cells removed on any level.
    pub fn debris_cells(&self) -> usize {
        self.levels.iter().map(|l| l.debris.cells).sum()
    }

    /// Largest Courant number seen on any level.
    pub fn max_courant(&self) -> f64 {
        self.levels.iter().map(|l| l.max_courant).fold(0.0, f64::max)
    }
}

/// Driver that advances the volume fraction of a block-structured mesh.
///
/// The orchestrator owns the sweep counter, so successive calls to
/// [`advance`](Self::advance) rotate the sweep order. Block scratch is kept
/// between steps and rebuilt whenever a level's block layout changes.
///
/// # Example
///
/// ```
/// use vof_rs::boundary::BoundaryConditions;
/// use vof_rs::mesh::{Geometry, Level};
/// use vof_rs::time::AdvectionOrchestrator;
/// use vof_rs::VofConfig;
///
/// let geom = Geometry::unit_cube([16, 16, 16], [true; 3]);
/// let mut level = Level::decomposed(geom, 8);
/// level.set_volume_fraction(|p| if p[0] < 8 { 1.0 } else { 0.0 });
/// level.set_face_velocity(|_, _| 1.0);
///
/// let mut advection =
///     AdvectionOrchestrator::new(VofConfig::default(), BoundaryConditions::periodic(), &level)?;
/// let report = advection.advance(&mut level, 1.0 / 32.0);
/// assert_eq!(report.order.to_string(), "xyz");
/// assert_eq!(report.clipped_cells(), 0);
/// # Ok::<(), vof_rs::VofError>(())
/// ```
#[derive(Clone, Debug)]
pub struct AdvectionOrchestrator {
    config: VofConfig,
    bcs: BoundaryConditions,
    counter: SweepCounter,
    scratch: Vec<Vec<BlockScratch>>,
}

impl AdvectionOrchestrator {
    /// Create a driver for `mesh`.
    ///
    /// Validates the configuration and checks the boundary conditions
    /// against the periodicity of the coarsest level.
    pub fn new<M: BlockStructuredMesh>(
        config: VofConfig,
        bcs: BoundaryConditions,
        mesh: &M,
    ) -> Result<Self, VofError> {
        if mesh.num_active_levels() == 0 {
            return Err(GridError::NoLevels.into());
        }
        config.validate()?;
        bcs.validate(mesh.geometry(LevelIndex::new(0)))?;

        log::info!(
            "VOF advection: {} scheme, debris removal {}, {} level(s), boundaries {}",
            config.scheme(),
            if config.remove_debris { "on" } else { "off" },
            mesh.num_active_levels(),
            bcs
        );

        Ok(Self {
            config,
            bcs,
            counter: SweepCounter::new(),
            scratch: Vec::new(),
        })
    }

    /// Continue from a saved sweep counter.
    pub fn with_counter(mut self, counter: SweepCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &VofConfig {
        &self.config
    }

    /// Boundary conditions.
    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.bcs
    }

    /// Sweep counter.
    pub fn counter(&self) -> SweepCounter {
        self.counter
    }

    /// Advance the volume fraction on every active level by `dt`.
    ///
    /// The velocity must be set on all blocks, including ghost faces, before
    /// the call. Ghost cells of the volume fraction are refreshed here.
    pub fn advance<M: BlockStructuredMesh>(&mut self, mesh: &mut M, dt: f64) -> AdvectionReport {
        let order = self.counter.advance();
        log::debug!(
            "advection step: counter {}, sweep order {}, dt {:.4e}",
            self.counter.value(),
            order,
            dt
        );

        let params = StepParams::new(&self.config, order, dt);
        let n_levels = mesh.num_active_levels();
        if self.scratch.len() < n_levels {
            self.scratch.resize_with(n_levels, Vec::new);
        }

        let levels = LevelIndex::iter(n_levels)
            .map(|lev| self.advance_level(mesh, lev, &params))
            .collect();

        AdvectionReport {
            counter: self.counter.value(),
            order,
            levels,
        }
    }

    fn advance_level<M: BlockStructuredMesh>(
        &mut self,
        mesh: &mut M,
        lev: LevelIndex,
        params: &StepParams,
    ) -> LevelReport {
        let mut report = LevelReport {
            level: lev,
            classes: ClassCounts::default(),
            sweep: SweepStats::default(),
            debris: DebrisStats::default(),
            max_courant: 0.0,
            cell_volume: mesh.geometry(lev).cell_volume(),
        };

        let mut stage = AdvectionStage::Classify;
        while stage != AdvectionStage::Done {
            log::trace!("{}: {:?}", lev, stage);
            match stage.sweep_phase() {
                Some(phase) => {
                    let blocks = mesh.level_blocks(lev);
                    let phase_report = run_phase(phase, params, blocks, &mut self.scratch[lev]);
                    report.classes = report.classes.merge(phase_report.classes);
                    report.sweep = report.sweep.merge(phase_report.sweep);
                    report.debris = report.debris.merge(phase_report.debris);
                }
                None => {
                    mesh.fill_boundary(lev, &self.bcs);
                    if stage == AdvectionStage::Classify {
                        let blocks = mesh.level_blocks(lev);
                        report.max_courant = self.prepare_level(lev, &blocks, params.dt);
                    }
                }
            }
            stage = stage.next();
        }

        if report.sweep.clipped_cells > 0 {
            log::debug!(
                "{}: clipped {} cells (max overshoot {:.3e}), removed {} debris cells",
                lev,
                report.sweep.clipped_cells,
                report.sweep.max_overshoot,
                report.debris.cells
            );
        }
        report
    }

    /// Rebuild scratch if the block layout changed and return the largest
    /// Courant number of the level.
    fn prepare_level(&mut self, lev: LevelIndex, blocks: &LevelBlocks<'_>, dt: f64) -> f64 {
        let scratch = &mut self.scratch[lev];
        let same_layout = scratch.len() == blocks.n_blocks()
            && scratch.iter().zip(blocks.boxes).all(|(s, b)| s.block() == *b);
        if !same_layout {
            log::trace!("{}: allocating scratch for {} blocks", lev, blocks.n_blocks());
            *scratch = blocks
                .boxes
                .iter()
                .map(|&b| BlockScratch::new(b, blocks.geometry, &self.bcs))
                .collect();
        }

        let courant = max_courant(blocks, dt);
        if courant > self.config.max_courant {
            log::warn!(
                "{}: Courant number {:.3} exceeds {:.3}; the step will rely on clipping",
                lev,
                courant,
                self.config.max_courant
            );
        }
        courant
    }
}

/// Run one sweep phase on every block of a level.
fn run_phase(
    phase: SweepPhase,
    params: &StepParams,
    blocks: LevelBlocks<'_>,
    scratch: &mut [BlockScratch],
) -> BlockPhaseReport {
    let geometry = blocks.geometry;
    let velocity = blocks.velocity;
    let step = |(b, (vof, scratch)): (usize, (&mut BlockArray, &mut BlockScratch))| {
        let block_velocity = [&velocity[0][b], &velocity[1][b], &velocity[2][b]];
        split_advection_step(phase, params, geometry, block_velocity, vof, scratch)
    };

    #[cfg(feature = "parallel")]
    let report = blocks
        .volume_fraction
        .par_iter_mut()
        .zip(scratch.par_iter_mut())
        .enumerate()
        .map(step)
        .reduce(BlockPhaseReport::default, BlockPhaseReport::merge);

    #[cfg(not(feature = "parallel"))]
    let report = blocks
        .volume_fraction
        .iter_mut()
        .zip(scratch.iter_mut())
        .enumerate()
        .map(step)
        .fold(BlockPhaseReport::default(), BlockPhaseReport::merge);

    report
}
