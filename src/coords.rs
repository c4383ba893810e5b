//! Row-wise conversion between Cartesian and spherical coordinates for
//! direction matrices.
//!
//! Spherical rows are `(r, θ, φ)` with colatitude `θ ∈ [0, π]` measured from
//! +z and azimuth `φ ∈ (−π, π]`; the stored gradient tables are always
//! Cartesian, so conversion here is how they reach the spherical-harmonic
//! evaluator.

use ndarray::{Array2, ArrayView2};

/// Colatitude/azimuth of a Cartesian vector (not necessarily unit length).
#[inline]
pub fn cartesian_to_angles(x: f64, y: f64, z: f64) -> (f64, f64) {
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    let theta = (z / r).clamp(-1.0, 1.0).acos();
    let phi = y.atan2(x);
    (theta, phi)
}

/// Convert an `M×3` matrix of Cartesian rows to `(r, θ, φ)` rows.
pub fn cartesian_to_spherical(m: &ArrayView2<f64>) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros(m.raw_dim());
    for (mut dst, src) in out.rows_mut().into_iter().zip(m.rows()) {
        let (x, y, z) = (src[0], src[1], src[2]);
        let r = (x * x + y * y + z * z).sqrt();
        let (theta, phi) = cartesian_to_angles(x, y, z);
        dst[0] = r;
        dst[1] = theta;
        dst[2] = phi;
    }
    out
}

/// Convert an `M×3` matrix of `(r, θ, φ)` rows back to Cartesian rows.
pub fn spherical_to_cartesian(m: &ArrayView2<f64>) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros(m.raw_dim());
    for (mut dst, src) in out.rows_mut().into_iter().zip(m.rows()) {
        let (r, theta, phi) = (src[0], src[1], src[2]);
        let st = theta.sin();
        dst[0] = r * st * phi.cos();
        dst[1] = r * st * phi.sin();
        dst[2] = r * theta.cos();
    }
    out
}
