//! Block-level advection kernels.
//!
//! # Submodules
//!
//! | Module | Stage | Runs |
//! |---|---|---|
//! | `classify` | empty/full/interfacial tagging | before the first sweep |
//! | `sweep` | one-dimensional PLIC donor-acceptor sweep | every phase |
//! | `split_step` | phase dispatcher (classify, sweep, debris) | every phase |
//! | `debris` | isolated-fragment cleanup | after the third sweep |
//! | [`diagnostics`] | volume, bounds and Courant numbers | on demand |
//!
//! Everything here operates on a single block whose ghost layers are
//! already current. Synchronisation across blocks belongs to
//! [`crate::time::AdvectionOrchestrator`].

mod classify;
mod debris;
pub mod diagnostics;
mod split_step;
mod sweep;

pub use classify::{CellClass, CellTag, ClassCounts, classify_block};
pub use debris::{DebrisStats, remove_debris};
pub use diagnostics::{VofDiagnostics, max_courant};
pub use split_step::{
    BlockPhaseReport, BlockScratch, StepParams, SweepOrder, SweepPhase, split_advection_step,
};
pub use sweep::{FluxBuffers, SweepInput, SweepStats, sweep_block};
