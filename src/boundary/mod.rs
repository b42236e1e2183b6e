//! Domain boundary conditions for volume-fraction transport.
//!
//! Boundary conditions decide two things at each of the six domain faces:
//! how volume-fraction ghost cells are filled before a sweep, and whether
//! flux may cross the face during the sweep.
//!
//! # Available Boundary Conditions
//!
//! | Kind | Ghost fill | Flux across face |
//! |------|------------|------------------|
//! | `Periodic` | Periodic image (halo exchange) | Both ways |
//! | `NoSlipWall` | Zero gradient | Blocked |
//! | `SlipWall` | Zero gradient | Blocked |
//! | `Symmetry` | Zero gradient | Blocked |
//! | `MassInflow` | Prescribed fraction | Both ways |
//! | `PressureOutflow` | Zero gradient | Outgoing only |
//! | `ZeroGradient` | Zero gradient | Outgoing only |
//!
//! Periodic faces must match the periodicity of the level geometry; see
//! [`BoundaryConditions::validate`].

mod block_boundary;
mod ghost;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::Geometry;
use crate::types::{Direction, DomainFaces, Side};

pub use block_boundary::BlockBoundary;
pub use ghost::fill_physical_ghosts;

/// Errors from boundary-condition validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    /// Periodic faces must come in pairs matching the geometry.
    #[error("direction {dir}: boundary kinds ({low}, {high}) disagree with geometry periodicity {periodic}")]
    PeriodicMismatch {
        dir: Direction,
        low: &'static str,
        high: &'static str,
        periodic: bool,
    },

    /// Inflow volume fraction outside [0, 1].
    #[error("inflow volume fraction {value} on {dir} {side:?} face is outside [0, 1]")]
    InvalidInflowFraction { dir: Direction, side: Side, value: f64 },
}

/// Physical meaning of a domain face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Face wraps to the opposite face
    Periodic,
    /// Solid wall with zero velocity
    NoSlipWall,
    /// Solid wall with free tangential velocity
    SlipWall,
    /// Mirror plane
    Symmetry,
    /// Inflow carrying a prescribed volume fraction
    MassInflow {
        /// Volume fraction of the incoming fluid
        volume_fraction: f64,
    },
    /// Outflow at prescribed pressure
    PressureOutflow,
    /// Generic open face with zero-gradient extrapolation
    ZeroGradient,
}

/// How the sweep treats flux through a domain face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluxPolicy {
    /// Flux crosses in both directions
    Open,
    /// No flux: the face Courant number is zero
    Blocked,
    /// Fluid may leave but nothing enters from the ghost side
    OutflowOnly,
}

impl BoundaryKind {
    /// Short name for logging and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryKind::Periodic => "periodic",
            BoundaryKind::NoSlipWall => "no_slip_wall",
            BoundaryKind::SlipWall => "slip_wall",
            BoundaryKind::Symmetry => "symmetry",
            BoundaryKind::MassInflow { .. } => "mass_inflow",
            BoundaryKind::PressureOutflow => "pressure_outflow",
            BoundaryKind::ZeroGradient => "zero_gradient",
        }
    }

    /// Whether the face wraps periodically.
    pub fn is_periodic(&self) -> bool {
        matches!(self, BoundaryKind::Periodic)
    }

    /// Whether fluid may enter the domain through this face.
    pub fn allows_inflow(&self) -> bool {
        matches!(self, BoundaryKind::Periodic | BoundaryKind::MassInflow { .. })
    }

    /// Whether fluid may leave the domain through this face.
    pub fn allows_outflow(&self) -> bool {
        !matches!(
            self,
            BoundaryKind::NoSlipWall | BoundaryKind::SlipWall | BoundaryKind::Symmetry
        )
    }

    /// Flux treatment during a sweep.
    pub fn flux_policy(&self) -> FluxPolicy {
        match (self.allows_inflow(), self.allows_outflow()) {
            (true, _) => FluxPolicy::Open,
            (false, true) => FluxPolicy::OutflowOnly,
            (false, false) => FluxPolicy::Blocked,
        }
    }

    /// Prescribed ghost value, if the face imposes one.
    pub fn dirichlet_value(&self) -> Option<f64> {
        match self {
            BoundaryKind::MassInflow { volume_fraction } => Some(*volume_fraction),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryKind::MassInflow { volume_fraction } => {
                write!(f, "mass_inflow({})", volume_fraction)
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Boundary kinds on the six domain faces.
///
/// # Example
///
/// ```
/// use vof_rs::boundary::{BoundaryConditions, BoundaryKind, FluxPolicy};
/// use vof_rs::types::{Direction, Side};
///
/// let bcs = BoundaryConditions::all(BoundaryKind::SlipWall)
///     .with(Direction::X, Side::Low, BoundaryKind::MassInflow { volume_fraction: 1.0 })
///     .with(Direction::X, Side::High, BoundaryKind::PressureOutflow);
/// assert_eq!(bcs.kind(Direction::X, Side::High).flux_policy(), FluxPolicy::OutflowOnly);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryConditions {
    faces: DomainFaces<BoundaryKind>,
}

impl BoundaryConditions {
    /// Create from per-face kinds.
    pub fn new(faces: DomainFaces<BoundaryKind>) -> Self {
        Self { faces }
    }

    /// Same kind on every face.
    pub fn all(kind: BoundaryKind) -> Self {
        Self::new(DomainFaces::uniform(kind))
    }

    /// Fully periodic domain.
    pub fn periodic() -> Self {
        Self::all(BoundaryKind::Periodic)
    }

    /// Return a copy with one face replaced.
    pub fn with(self, dir: Direction, side: Side, kind: BoundaryKind) -> Self {
        Self::new(self.faces.with(dir, side, kind))
    }

    /// Kind on one face.
    pub fn kind(&self, dir: Direction, side: Side) -> BoundaryKind {
        *self.faces.get(dir, side)
    }

    /// Kinds on all faces.
    pub fn faces(&self) -> &DomainFaces<BoundaryKind> {
        &self.faces
    }

    /// Check consistency with the level geometry.
    ///
    /// A direction is periodic in the geometry exactly when both of its faces
    /// are `Periodic`. Inflow fractions must lie in [0, 1].
    pub fn validate(&self, geometry: &Geometry) -> Result<(), BoundaryError> {
        for dir in Direction::ALL {
            let (low, high) = self.faces.pair(dir);
            let periodic = geometry.is_periodic(dir);
            if low.is_periodic() != periodic || high.is_periodic() != periodic {
                return Err(BoundaryError::PeriodicMismatch {
                    dir,
                    low: low.name(),
                    high: high.name(),
                    periodic,
                });
            }
        }
        for (dir, side, kind) in self.faces.iter() {
            match kind.dirichlet_value() {
                Some(value) if !(0.0..=1.0).contains(&value) => {
                    return Err(BoundaryError::InvalidInflowFraction { dir, side, value });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.faces)
    }
}
