//! Physical geometry of a uniform Cartesian level.

use super::{GridError, IndexBox};
use crate::types::Direction;

/// Mapping between cell indices and physical coordinates for one level.
///
/// Cell `p` occupies `[prob_lo + p * dx, prob_lo + (p + 1) * dx]` in each
/// direction. Periodicity is a property of the domain, shared by all levels.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::{Geometry, IndexBox};
///
/// let geom = Geometry::new(
///     IndexBox::from_shape([10, 20, 1]),
///     [0.0, 0.0, 0.0],
///     [1.0, 1.0, 0.1],
///     [true, false, false],
/// )
/// .unwrap();
/// assert!((geom.cell_size()[0] - 0.1).abs() < 1e-14);
/// assert_eq!(geom.periodic_shifts().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    domain: IndexBox,
    prob_lo: [f64; 3],
    prob_hi: [f64; 3],
    cell_size: [f64; 3],
    periodic: [bool; 3],
}

impl Geometry {
    /// Create a geometry covering `domain` cells over `[prob_lo, prob_hi]`.
    pub fn new(
        domain: IndexBox,
        prob_lo: [f64; 3],
        prob_hi: [f64; 3],
        periodic: [bool; 3],
    ) -> Result<Self, GridError> {
        let n = domain.size();
        let mut cell_size = [0.0; 3];
        for d in 0..3 {
            if !(prob_hi[d] > prob_lo[d]) || !prob_lo[d].is_finite() || !prob_hi[d].is_finite() {
                return Err(GridError::InvalidExtent {
                    dir: d,
                    lo: prob_lo[d],
                    hi: prob_hi[d],
                });
            }
            cell_size[d] = (prob_hi[d] - prob_lo[d]) / n[d] as f64;
        }
        Ok(Self {
            domain,
            prob_lo,
            prob_hi,
            cell_size,
            periodic,
        })
    }

    /// Unit cube `[0, 1]^3` with `n` cells per direction.
    pub fn unit_cube(n: [usize; 3], periodic: [bool; 3]) -> Self {
        let domain = IndexBox::from_shape(n);
        let cell_size = [1.0 / n[0] as f64, 1.0 / n[1] as f64, 1.0 / n[2] as f64];
        Self {
            domain,
            prob_lo: [0.0; 3],
            prob_hi: [1.0; 3],
            cell_size,
            periodic,
        }
    }

    /// Cell index box of the whole domain.
    #[inline]
    pub fn domain(&self) -> IndexBox {
        self.domain
    }

    /// Lower corner of the physical domain.
    #[inline]
    pub fn prob_lo(&self) -> [f64; 3] {
        self.prob_lo
    }

    /// Upper corner of the physical domain.
    #[inline]
    pub fn prob_hi(&self) -> [f64; 3] {
        self.prob_hi
    }

    /// Cell widths.
    #[inline]
    pub fn cell_size(&self) -> [f64; 3] {
        self.cell_size
    }

    /// Inverse cell width along one direction.
    #[inline]
    pub fn inv_cell_size(&self, dir: Direction) -> f64 {
        1.0 / self.cell_size[dir.index()]
    }

    /// Volume of one cell.
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        self.cell_size[0] * self.cell_size[1] * self.cell_size[2]
    }

    /// Periodicity flags.
    #[inline]
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Whether the domain is periodic along `dir`.
    #[inline]
    pub fn is_periodic(&self, dir: Direction) -> bool {
        self.periodic[dir.index()]
    }

    /// Domain length in cells along `dir`.
    #[inline]
    pub fn period(&self, dir: Direction) -> i64 {
        self.domain.size()[dir.index()] as i64
    }

    /// Physical coordinates of a cell center.
    pub fn cell_center(&self, p: [i64; 3]) -> [f64; 3] {
        [
            self.prob_lo[0] + (p[0] as f64 + 0.5) * self.cell_size[0],
            self.prob_lo[1] + (p[1] as f64 + 0.5) * self.cell_size[1],
            self.prob_lo[2] + (p[2] as f64 + 0.5) * self.cell_size[2],
        ]
    }

    /// Physical coordinates of the center of face `p` normal to `dir`.
    ///
    /// Face `p` is the low face of cell `p`.
    pub fn face_center(&self, dir: Direction, p: [i64; 3]) -> [f64; 3] {
        let mut x = self.cell_center(p);
        x[dir.index()] -= 0.5 * self.cell_size[dir.index()];
        x
    }

    /// Lower corner of a cell.
    pub fn cell_lo(&self, p: [i64; 3]) -> [f64; 3] {
        [
            self.prob_lo[0] + p[0] as f64 * self.cell_size[0],
            self.prob_lo[1] + p[1] as f64 * self.cell_size[1],
            self.prob_lo[2] + p[2] as f64 * self.cell_size[2],
        ]
    }

    /// Wrap an index into the domain along periodic directions.
    pub fn wrap_periodic(&self, p: [i64; 3]) -> [i64; 3] {
        let mut out = p;
        for dir in Direction::ALL {
            let d = dir.index();
            if self.periodic[d] {
                let n = self.period(dir);
                out[d] = self.domain.lo[d] + (p[d] - self.domain.lo[d]).rem_euclid(n);
            }
        }
        out
    }

    /// All nonzero periodic image offsets, plus the zero offset first.
    ///
    /// Offsets take every combination of `{-L, 0, L}` along periodic
    /// directions, where `L` is the domain length in cells.
    pub fn periodic_shifts(&self) -> Vec<[i64; 3]> {
        let options: Vec<Vec<i64>> = Direction::ALL
            .iter()
            .map(|&dir| {
                if self.is_periodic(dir) {
                    let n = self.period(dir);
                    vec![0, -n, n]
                } else {
                    vec![0]
                }
            })
            .collect();

        let mut shifts = Vec::with_capacity(options.iter().map(Vec::len).product());
        for &sz in &options[2] {
            for &sy in &options[1] {
                for &sx in &options[0] {
                    shifts.push([sx, sy, sz]);
                }
            }
        }
        shifts
    }

    /// Geometry of the next finer level.
    pub fn refine(&self, ratio: i64) -> Geometry {
        let r = ratio as f64;
        Geometry {
            domain: self.domain.refine(ratio),
            prob_lo: self.prob_lo,
            prob_hi: self.prob_hi,
            cell_size: [
                self.cell_size[0] / r,
                self.cell_size[1] / r,
                self.cell_size[2] / r,
            ],
            periodic: self.periodic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_extent_rejected() {
        let result = Geometry::new(
            IndexBox::from_shape([4, 4, 4]),
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [false; 3],
        );
        assert!(matches!(result, Err(GridError::InvalidExtent { dir: 1, .. })));
    }

    #[test]
    fn test_cell_and_face_centers() {
        let geom = Geometry::unit_cube([4, 4, 4], [false; 3]);
        let c = geom.cell_center([0, 1, 3]);
        assert!((c[0] - 0.125).abs() < 1e-14);
        assert!((c[1] - 0.375).abs() < 1e-14);
        assert!((c[2] - 0.875).abs() < 1e-14);

        let f = geom.face_center(Direction::Y, [0, 1, 3]);
        assert!((f[1] - 0.25).abs() < 1e-14);
        assert!((f[0] - c[0]).abs() < 1e-14);
    }

    #[test]
    fn test_periodic_shifts() {
        let geom = Geometry::unit_cube([4, 6, 8], [true, true, false]);
        let shifts = geom.periodic_shifts();
        assert_eq!(shifts.len(), 9);
        assert_eq!(shifts[0], [0, 0, 0]);
        assert!(shifts.contains(&[-4, 6, 0]));
        assert!(shifts.iter().all(|s| s[2] == 0));
    }

    #[test]
    fn test_wrap_periodic() {
        let geom = Geometry::unit_cube([4, 4, 4], [true, false, true]);
        assert_eq!(geom.wrap_periodic([-1, -1, 5]), [3, -1, 1]);
    }

    #[test]
    fn test_refine() {
        let geom = Geometry::unit_cube([4, 4, 2], [true; 3]);
        let fine = geom.refine(2);
        assert_eq!(fine.domain().size(), [8, 8, 4]);
        assert!((fine.cell_volume() * 8.0 - geom.cell_volume()).abs() < 1e-15);
        assert_eq!(fine.periodic(), [true; 3]);
    }
}
