//! Interface normal estimation from the volume-fraction field.

use super::plic::l1_norm;
use crate::mesh::BlockArray;

/// Normals with an L1 norm below this are treated as undefined.
pub const NORMAL_TOLERANCE: f64 = 1e-12;

/// 3×3×3 neighbourhood of a cell, indexed `[i + 1][j + 1][k + 1]`.
pub type Stencil = [[[f64; 3]; 3]; 3];

/// Copy the 3×3×3 neighbourhood of `p` out of a block array.
///
/// `p` must be at least one index inside the array box.
#[inline]
pub fn gather_stencil(c: &BlockArray, p: [i64; 3]) -> Stencil {
    let mut s = [[[0.0; 3]; 3]; 3];
    for (di, plane) in s.iter_mut().enumerate() {
        for (dj, row) in plane.iter_mut().enumerate() {
            for (dk, value) in row.iter_mut().enumerate() {
                *value = c.get([
                    p[0] + di as i64 - 1,
                    p[1] + dj as i64 - 1,
                    p[2] + dk as i64 - 1,
                ]);
            }
        }
    }
    s
}

/// Youngs' normal: minus the 27-point weighted gradient of the volume
/// fraction, scaled to unit L1 norm.
///
/// Returns `None` when the gradient vanishes (uniform neighbourhood).
///
/// # Example
///
/// ```
/// use vof_rs::flux::youngs_normal;
///
/// // Fluid on the low-x side.
/// let mut s = [[[0.0; 3]; 3]; 3];
/// s[0] = [[1.0; 3]; 3];
/// s[1] = [[0.5; 3]; 3];
/// let n = youngs_normal(&s).unwrap();
/// assert!((n[0] - 1.0).abs() < 1e-14);
/// ```
pub fn youngs_normal(s: &Stencil) -> Option<[f64; 3]> {
    const W: [f64; 3] = [1.0, 2.0, 1.0];

    let mut m = [0.0; 3];
    for a in 0..3 {
        for b in 0..3 {
            let w = W[a] * W[b];
            m[0] += w * (s[0][a][b] - s[2][a][b]);
            m[1] += w * (s[a][0][b] - s[a][2][b]);
            m[2] += w * (s[a][b][0] - s[a][b][2]);
        }
    }

    let norm = l1_norm(m);
    if norm < NORMAL_TOLERANCE {
        return None;
    }
    Some(m.map(|v| v / norm))
}
