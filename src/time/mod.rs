//! Time stepping of the volume-fraction field.
//!
//! [`AdvectionOrchestrator`] advances every level of a
//! [`BlockStructuredMesh`](crate::mesh::BlockStructuredMesh) through one
//! split step. The rotating [`SweepCounter`] it owns decides the sweep order.

mod advection;
mod sweep_counter;

pub use advection::{AdvectionOrchestrator, AdvectionReport, AdvectionStage, LevelReport};
pub use sweep_counter::SweepCounter;
