//! Piecewise-linear interface (PLIC) geometry in a unit cell.
//!
//! The interface in a cell is the plane `m · x = alpha` with `x` in the unit
//! cube `[0, 1]^3`; the reference fluid occupies `m · x <= alpha`. Normals
//! point out of the fluid and are normalised so that `|mx| + |my| + |mz| = 1`.
//!
//! Two inverse problems are solved in closed form (Scardovelli & Zaleski):
//! - [`plane_volume`]: fluid volume below a plane
//! - [`plane_alpha`]: plane constant for a given volume
//!
//! Both work in the frame where all normal components are non-negative and
//! sorted, then map back by shifting `alpha` for every negative component.

use crate::types::Direction;

/// Floor for the `6 m1 m2 m3` denominator.
const TINY: f64 = 1e-50;

/// Accepted error of the closed-form plane constant before falling back to
/// bisection.
const ALPHA_RESIDUAL: f64 = 1e-12;

const BISECTION_STEPS: usize = 60;

/// Planar interface in a unit cell.
///
/// # Example
///
/// ```
/// use vof_rs::flux::InterfacePlane;
/// use vof_rs::types::Direction;
///
/// // Fluid fills x < 0.3 of the cell.
/// let plane = InterfacePlane::from_volume_fraction([1.0, 0.0, 0.0], 0.3);
/// assert!((plane.alpha() - 0.3).abs() < 1e-12);
/// assert!((plane.cut_volume(Direction::X, 0.0, 0.2) - 0.2).abs() < 1e-12);
/// assert!((plane.cut_volume(Direction::X, 0.8, 0.2)).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterfacePlane {
    normal: [f64; 3],
    alpha: f64,
}

impl InterfacePlane {
    /// Plane from a normal (any scaling) and a constant in the same scaling.
    pub fn new(normal: [f64; 3], alpha: f64) -> Self {
        Self { normal, alpha }
    }

    /// Plane with the given normal that encloses `fraction` of the cell.
    ///
    /// The normal is rescaled to unit L1 norm.
    pub fn from_volume_fraction(normal: [f64; 3], fraction: f64) -> Self {
        let norm = l1_norm(normal);
        let normal = if norm > 0.0 {
            normal.map(|m| m / norm)
        } else {
            normal
        };
        Self {
            normal,
            alpha: plane_alpha(normal, fraction),
        }
    }

    /// Outward normal.
    #[inline]
    pub fn normal(&self) -> [f64; 3] {
        self.normal
    }

    /// Plane constant.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fluid volume inside the unit cell.
    pub fn volume(&self) -> f64 {
        plane_volume(self.normal, self.alpha)
    }

    /// Fluid volume inside the slab `x0 <= x_dir <= x0 + len` of the cell.
    ///
    /// The slab spans the full unit range in the other two directions.
    /// Returns zero for `len <= 0`.
    pub fn cut_volume(&self, dir: Direction, x0: f64, len: f64) -> f64 {
        if len <= 0.0 {
            return 0.0;
        }
        let d = dir.index();
        let mut normal = self.normal;
        normal[d] *= len;
        let alpha = self.alpha - self.normal[d] * x0;
        len * plane_volume(normal, alpha)
    }

    /// Plane after the cell is mapped from `[0, 1]` to `[a_lo, 1 + a_hi]`
    /// along `dir` by a linear stretch.
    ///
    /// Used by the Lagrangian remap, where the cell faces move with the
    /// face velocities during the sweep.
    pub fn stretched(&self, dir: Direction, a_lo: f64, a_hi: f64) -> Self {
        let d = dir.index();
        let stretch = 1.0 + a_hi - a_lo;
        let mut normal = self.normal;
        normal[d] /= stretch;
        Self {
            normal,
            alpha: self.alpha + normal[d] * a_lo,
        }
    }
}

/// L1 norm of a normal vector.
#[inline]
pub fn l1_norm(normal: [f64; 3]) -> f64 {
    normal[0].abs() + normal[1].abs() + normal[2].abs()
}

fn sorted(mut v: [f64; 3]) -> [f64; 3] {
    v.sort_by(f64::total_cmp);
    v
}

/// Sum of the negative normal components.
#[inline]
fn negative_shift(normal: [f64; 3]) -> f64 {
    normal.iter().map(|&m| m.min(0.0)).sum()
}

/// Fluid volume below the plane `m · x = alpha` in the unit cube.
///
/// Works for any normal scaling; a zero normal gives 0 or 1 depending on
/// the sign of `alpha`.
pub fn plane_volume(normal: [f64; 3], alpha: f64) -> f64 {
    let sum = l1_norm(normal);
    let al = alpha - negative_shift(normal);
    if al <= 0.0 {
        return 0.0;
    }
    if al >= sum {
        return 1.0;
    }
    let m = sorted(normal.map(|v| v.abs() / sum));
    unit_volume(m, al / sum)
}

/// Plane constant enclosing `fraction` of the unit cube for a given normal.
///
/// The normal must have unit L1 norm. `fraction` is clamped to [0, 1].
pub fn plane_alpha(normal: [f64; 3], fraction: f64) -> f64 {
    let c = fraction.clamp(0.0, 1.0);
    let sum = l1_norm(normal);
    if sum <= 0.0 {
        return 0.0;
    }
    let m = sorted(normal.map(|v| v.abs() / sum));

    let mut alpha = unit_alpha(m, c);
    let residual = (unit_volume(m, alpha) - c).abs();
    if !(residual <= ALPHA_RESIDUAL) {
        alpha = bisect_alpha(m, c);
    }
    alpha * sum + negative_shift(normal)
}

/// Volume for sorted non-negative `m` with unit sum and `al` in [0, 1].
fn unit_volume(m: [f64; 3], al: f64) -> f64 {
    let [b1, b2, b3] = m;
    let al0 = al.min(1.0 - al);
    let b12 = b1 + b2;
    let bm = b12.min(b3);
    let pr = (6.0 * b1 * b2 * b3).max(TINY);

    let v = if al0 < b1 {
        al0 * al0 * al0 / pr
    } else if al0 < b2 {
        0.5 * al0 * (al0 - b1) / (b2 * b3) + b1 * b1 * b1 / pr
    } else if al0 < bm {
        (al0 * al0 * (3.0 * b12 - al0) + b1 * b1 * (b1 - 3.0 * al0) + b2 * b2 * (b2 - 3.0 * al0))
            / pr
    } else if b12 <= b3 {
        (al0 - 0.5 * bm) / b3
    } else {
        (al0 * al0 * (3.0 - 2.0 * al0)
            + b1 * b1 * (b1 - 3.0 * al0)
            + b2 * b2 * (b2 - 3.0 * al0)
            + b3 * b3 * (b3 - 3.0 * al0))
            / pr
    };

    let v = if al <= 0.5 { v } else { 1.0 - v };
    v.clamp(0.0, 1.0)
}

/// Closed-form inverse of [`unit_volume`].
fn unit_alpha(m: [f64; 3], c: f64) -> f64 {
    let [m1, m2, m3] = m;
    let c1 = c.min(1.0 - c);
    let m12 = m1 + m2;
    let pr = (6.0 * m1 * m2 * m3).max(TINY);
    let v1 = m1 * m1 * m1 / pr;
    let v2 = v1 + 0.5 * (m2 - m1) / m3;
    let (mm, v3) = if m3 < m12 {
        let v3 = (m3 * m3 * (3.0 * m12 - m3) + m1 * m1 * (m1 - 3.0 * m3) + m2 * m2 * (m2 - 3.0 * m3))
            / pr;
        (m3, v3)
    } else {
        (m12, 0.5 * m12 / m3)
    };

    let alpha = if c1 <= v1 {
        (pr * c1).cbrt()
    } else if c1 <= v2 {
        0.5 * (m1 + (m1 * m1 + 8.0 * m2 * m3 * (c1 - v1)).sqrt())
    } else if c1 <= v3 {
        let p = 2.0 * m1 * m2;
        let q = 1.5 * m1 * m2 * (m12 - 2.0 * m3 * c1);
        cubic_root(p, q) + m12
    } else if m12 <= m3 {
        m3 * c1 + 0.5 * mm
    } else {
        let p = m1 * (m2 + m3) + m2 * m3 - 0.25;
        let q = 1.5 * m1 * m2 * m3 * (0.5 - c1);
        cubic_root(p, q) + 0.5
    };

    if c > 0.5 { 1.0 - alpha } else { alpha }
}

/// Trigonometric root of the depressed cubic arising in [`unit_alpha`].
fn cubic_root(p: f64, q: f64) -> f64 {
    let p12 = p.sqrt();
    let arg = (q / (p * p12)).clamp(-1.0, 1.0);
    let teta = arg.acos() / 3.0;
    let cs = teta.cos();
    p12 * ((3.0 * (1.0 - cs * cs)).sqrt() - cs)
}

fn bisect_alpha(m: [f64; 3], c: f64) -> f64 {
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if unit_volume(m, mid) < c {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
