//! One phase of a directionally split step on one block.
//!
//! A time step consists of three sweeps, one per axis, in a rotating order.
//! [`split_advection_step`] performs the sweep for one phase of that order on
//! one block, running the classifier before the first sweep and the debris
//! pass after the third. Halo synchronisation between phases is left to the
//! caller, since it needs every block of the level.

use std::fmt;

use crate::boundary::{BlockBoundary, BoundaryConditions};
use crate::config::VofConfig;
use crate::flux::AdvectionScheme;
use crate::mesh::{BlockArray, Geometry, IndexBox};
use crate::types::Direction;

use super::classify::{CellTag, ClassCounts, classify_block};
use super::debris::{DebrisStats, remove_debris};
use super::sweep::{FluxBuffers, SweepInput, SweepStats, sweep_block};

/// Position of a sweep within a time step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SweepPhase {
    /// First sweep, preceded by classification
    First,
    /// Second sweep
    Second,
    /// Third sweep, followed by debris removal
    Third,
}

impl SweepPhase {
    /// Phases in execution order.
    pub const ALL: [SweepPhase; 3] = [SweepPhase::First, SweepPhase::Second, SweepPhase::Third];

    /// Zero-based position.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis order of the three sweeps of a time step.
///
/// Orders are cyclic rotations of x → y → z, identified by the first axis.
///
/// # Example
///
/// ```
/// use vof_rs::solver::{SweepOrder, SweepPhase};
/// use vof_rs::types::Direction;
///
/// let order = SweepOrder::from_counter(2);
/// assert_eq!(order.directions(), [Direction::Y, Direction::Z, Direction::X]);
/// assert_eq!(order.direction(SweepPhase::Third), Direction::X);
/// assert_eq!(order.to_string(), "yzx");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SweepOrder {
    first: Direction,
}

impl SweepOrder {
    /// Order starting with `first`.
    pub fn starting_with(first: Direction) -> Self {
        Self { first }
    }

    /// Order for a sweep counter value: 1 → xyz, 2 → yzx, 3 → zxy.
    pub fn from_counter(counter: u8) -> Self {
        Self::starting_with(Direction::from_index((counter as usize + 2) % 3))
    }

    /// Axis swept in a given phase.
    #[inline]
    pub fn direction(&self, phase: SweepPhase) -> Direction {
        Direction::from_index(self.first.index() + phase.index())
    }

    /// Axes of all three phases.
    pub fn directions(&self) -> [Direction; 3] {
        SweepPhase::ALL.map(|phase| self.direction(phase))
    }

    /// First axis.
    pub fn first(&self) -> Direction {
        self.first
    }
}

impl fmt::Display for SweepOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dir in self.directions() {
            write!(f, "{}", dir)?;
        }
        Ok(())
    }
}

/// Per-block working storage that lives for one time step.
#[derive(Clone, Debug)]
pub struct BlockScratch {
    block: IndexBox,
    boundary: BlockBoundary,
    tags: BlockArray<CellTag>,
    fluxes: FluxBuffers,
}

impl BlockScratch {
    /// Allocate scratch for `block`.
    pub fn new(block: IndexBox, geometry: &Geometry, bcs: &BoundaryConditions) -> Self {
        Self {
            block,
            boundary: BlockBoundary::resolve(block, geometry, bcs),
            tags: BlockArray::cells(block.grow(1), 0, CellTag::EMPTY),
            fluxes: FluxBuffers::new(block),
        }
    }

    /// Block the scratch belongs to.
    #[inline]
    pub fn block(&self) -> IndexBox {
        self.block
    }

    /// Resolved domain faces of the block.
    #[inline]
    pub fn boundary(&self) -> &BlockBoundary {
        &self.boundary
    }

    /// Classification of the current step.
    #[inline]
    pub fn tags(&self) -> &BlockArray<CellTag> {
        &self.tags
    }
}

/// Step-wide parameters shared by all blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Sweep order of this step
    pub order: SweepOrder,
    /// Time step
    pub dt: f64,
    /// Remap scheme for interfacial cells
    pub scheme: AdvectionScheme,
    /// Empty/full snapping tolerance
    pub tolerance: f64,
    /// Run the debris pass after the third sweep
    pub remove_debris: bool,
    /// Debris threshold
    pub debris_threshold: f64,
}

impl StepParams {
    /// Parameters for one step under `config`.
    pub fn new(config: &VofConfig, order: SweepOrder, dt: f64) -> Self {
        Self {
            order,
            dt,
            scheme: config.scheme(),
            tolerance: config.fraction_tolerance,
            remove_debris: config.remove_debris,
            debris_threshold: config.debris_threshold,
        }
    }
}

/// What one phase did on one block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockPhaseReport {
    /// Classification counts (first phase only)
    pub classes: ClassCounts,
    /// Sweep clipping statistics
    pub sweep: SweepStats,
    /// Debris removed (third phase only)
    pub debris: DebrisStats,
}

impl BlockPhaseReport {
    /// Combine reports of two blocks or phases.
    pub fn merge(self, other: BlockPhaseReport) -> BlockPhaseReport {
        BlockPhaseReport {
            classes: self.classes.merge(other.classes),
            sweep: self.sweep.merge(other.sweep),
            debris: self.debris.merge(other.debris),
        }
    }
}

/// Run one phase of the split step on one block.
///
/// # Arguments
/// * `phase` - Which of the three sweeps to run
/// * `params` - Step-wide parameters, including the sweep order
/// * `geometry` - Level geometry (cell sizes)
/// * `velocity` - Face velocities of the block, one array per direction
/// * `volume_fraction` - Block volume fraction with current ghosts, updated in place
/// * `scratch` - Block scratch; the classification written in the first
///   phase is reused by the later phases
pub fn split_advection_step(
    phase: SweepPhase,
    params: &StepParams,
    geometry: &Geometry,
    velocity: [&BlockArray; 3],
    volume_fraction: &mut BlockArray,
    scratch: &mut BlockScratch,
) -> BlockPhaseReport {
    let dir = params.order.direction(phase);
    let block = scratch.block;
    let mut report = BlockPhaseReport::default();

    if phase == SweepPhase::First {
        report.classes = classify_block(
            block,
            volume_fraction,
            params.scheme,
            params.tolerance,
            &mut scratch.tags,
            &mut scratch.fluxes,
        );
    }

    let input = SweepInput {
        dir,
        velocity: velocity[dir.index()],
        dt_over_dx: params.dt * geometry.inv_cell_size(dir),
        scheme: params.scheme,
        tolerance: params.tolerance,
        boundary: &scratch.boundary,
    };
    report.sweep = sweep_block(
        block,
        &input,
        volume_fraction,
        &scratch.tags,
        &mut scratch.fluxes,
    );

    if phase == SweepPhase::Third && params.remove_debris {
        report.debris = remove_debris(
            block,
            volume_fraction,
            params.debris_threshold,
            params.tolerance,
        );
    }

    report
}
