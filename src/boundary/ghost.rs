//! Physical ghost-cell fill for volume fraction.

use crate::mesh::{BlockArray, Geometry};
use crate::types::{Direction, Side};

use super::BoundaryConditions;

/// Fill volume-fraction ghosts that lie outside the domain along
/// non-periodic directions.
///
/// A ghost outside an inflow face takes the inflow fraction. Any other
/// ghost copies the nearest cell inside the domain (zero gradient). For
/// edge and corner ghosts an inflow face on any of the crossed sides wins.
///
/// Must run after the block-to-block exchange: the zero-gradient source
/// may itself be a ghost along a periodic direction.
pub fn fill_physical_ghosts(array: &mut BlockArray, geometry: &Geometry, bcs: &BoundaryConditions) {
    let domain = geometry.domain();
    let mut inside = array.array_box();
    for dir in Direction::ALL {
        if !geometry.is_periodic(dir) {
            let d = dir.index();
            inside.lo[d] = inside.lo[d].max(domain.lo[d]);
            inside.hi[d] = inside.hi[d].min(domain.hi[d]);
        }
    }

    for p in array.array_box().iter() {
        if inside.contains(p) {
            continue;
        }
        let dirichlet = Direction::ALL.iter().find_map(|&dir| {
            if geometry.is_periodic(dir) {
                return None;
            }
            let d = dir.index();
            let side = if p[d] < domain.lo[d] {
                Side::Low
            } else if p[d] > domain.hi[d] {
                Side::High
            } else {
                return None;
            };
            bcs.kind(dir, side).dirichlet_value()
        });
        let value = match dirichlet {
            Some(value) => value,
            None => array.get(inside.clamp(p)),
        };
        array.set(p, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryKind;
    use crate::mesh::{GHOST_WIDTH, IndexBox};

    #[test]
    fn test_zero_gradient_and_inflow() {
        let geom = Geometry::unit_cube([4, 4, 4], [false; 3]);
        let bcs = BoundaryConditions::all(BoundaryKind::NoSlipWall).with(
            Direction::X,
            Side::Low,
            BoundaryKind::MassInflow { volume_fraction: 1.0 },
        );
        let mut c = BlockArray::cells(geom.domain(), GHOST_WIDTH, f64::NAN);
        for p in geom.domain().iter() {
            c[p] = 0.1 * p[1] as f64;
        }
        fill_physical_ghosts(&mut c, &geom, &bcs);

        assert_eq!(c[[-1, 2, 2]], 1.0);
        assert_eq!(c[[-2, -1, 0]], 1.0);
        assert!((c[[4, 3, 1]] - 0.3).abs() < 1e-15);
        assert!((c[[5, 5, 5]] - 0.3).abs() < 1e-15);
        assert!((c[[2, -2, 1]]).abs() < 1e-15);
        assert!(c.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_interior_ghosts_untouched() {
        let geom = Geometry::unit_cube([8, 4, 4], [false; 3]);
        let bcs = BoundaryConditions::all(BoundaryKind::ZeroGradient);
        let block = IndexBox::new([0, 0, 0], [3, 3, 3]);
        let mut c = BlockArray::cells(block, GHOST_WIDTH, 0.5);
        c[[4, 1, 1]] = 0.25;
        fill_physical_ghosts(&mut c, &geom, &bcs);
        assert_eq!(c[[4, 1, 1]], 0.25);
    }
}
