//! Boundary faces seen by a single block.

use super::{BoundaryConditions, FluxPolicy};
use crate::mesh::{Geometry, IndexBox};
use crate::types::{Direction, DomainFaces, Side};

/// Flux policies of the non-periodic domain faces, resolved for one block.
///
/// Face queries by node index ([`face_policy`](Self::face_policy)) answer for
/// any face, including faces of the block's halo ring, so a block computes
/// the same fluxes in its halo as the neighbour that owns those cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockBoundary {
    block: IndexBox,
    domain: IndexBox,
    policies: DomainFaces<Option<FluxPolicy>>,
}

impl BlockBoundary {
    /// Resolve the domain faces for `block`.
    pub fn resolve(block: IndexBox, geometry: &Geometry, bcs: &BoundaryConditions) -> Self {
        let mut policies = DomainFaces::uniform(None);
        for dir in Direction::ALL {
            if geometry.is_periodic(dir) {
                continue;
            }
            for side in Side::BOTH {
                *policies.get_mut(dir, side) = Some(bcs.kind(dir, side).flux_policy());
            }
        }
        Self {
            block,
            domain: geometry.domain(),
            policies,
        }
    }

    /// Block this boundary was resolved for.
    #[inline]
    pub fn block(&self) -> IndexBox {
        self.block
    }

    /// Policy on one side of the block, if that side lies on a domain face.
    pub fn policy(&self, dir: Direction, side: Side) -> Option<FluxPolicy> {
        let d = dir.index();
        let touches = match side {
            Side::Low => self.block.lo[d] == self.domain.lo[d],
            Side::High => self.block.hi[d] == self.domain.hi[d],
        };
        if touches {
            *self.policies.get(dir, side)
        } else {
            None
        }
    }

    /// Policy of face `face` (node index along `dir`), if it is a
    /// non-periodic domain face.
    #[inline]
    pub fn face_policy(&self, dir: Direction, face: i64) -> Option<FluxPolicy> {
        let d = dir.index();
        if face == self.domain.lo[d] {
            *self.policies.get(dir, Side::Low)
        } else if face == self.domain.hi[d] + 1 {
            *self.policies.get(dir, Side::High)
        } else {
            None
        }
    }

    /// Whether no flux may cross face `face` along `dir`.
    #[inline]
    pub fn is_blocked(&self, dir: Direction, face: i64) -> bool {
        self.face_policy(dir, face) == Some(FluxPolicy::Blocked)
    }

    /// Whether flux entering through face `face` along `dir` is discarded.
    #[inline]
    pub fn is_outflow_only(&self, dir: Direction, face: i64) -> bool {
        self.face_policy(dir, face) == Some(FluxPolicy::OutflowOnly)
    }

    /// Whether the block touches no non-periodic domain face.
    pub fn is_interior(&self) -> bool {
        Direction::ALL
            .iter()
            .all(|&dir| Side::BOTH.iter().all(|&side| self.policy(dir, side).is_none()))
    }
}
