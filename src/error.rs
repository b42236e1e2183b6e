//! Crate-level error type.

use thiserror::Error;

use crate::boundary::BoundaryError;
use crate::config::ConfigError;
use crate::mesh::GridError;

/// Errors raised while setting up an advection run.
///
/// The time step itself never fails: out-of-range values are clipped and
/// degenerate reconstructions fall back to donor-cell fluxes.
#[derive(Debug, Error)]
pub enum VofError {
    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Boundary conditions inconsistent with the mesh
    #[error("boundary condition error: {0}")]
    Boundary(#[from] BoundaryError),

    /// Malformed block layout or hierarchy
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}
