//! Real spherical-harmonic basis for antipodally symmetric spherical
//! functions.
//!
//! Symmetric signal models only carry even-degree bands, so the basis is
//! indexed by even `l` up to a rank and order `m ∈ [-l, l]`, flattened by the
//! canonical `(l, m) → j` map used throughout the crate. The design matrix
//! for a direction set is the workhorse consumed by basis fitting and by
//! coefficient rotation.

use crate::coords::cartesian_to_angles;
use crate::error::DmriError;
use crate::explegendre::{exp_legendre_coef, exp_legendre_coef_derivative};
use ndarray::{Array1, Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Row threshold above which design-matrix assembly fans out across threads.
const PAR_ROW_THRESHOLD: usize = 512;

/// How the rows of a direction matrix are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionConvention {
    /// Rows are Cartesian unit vectors `(x, y, z)`.
    Cartesian,
    /// Rows are `(r, θ, φ)`.
    Spherical,
}

/// Number of even-band SH coefficients up to `rank`: `(rank+1)(rank+2)/2`.
pub fn rank_to_dim(rank: usize) -> Result<usize, DmriError> {
    if rank % 2 != 0 {
        return Err(DmriError::Validation(format!(
            "SH rank must be even, got {rank}"
        )));
    }
    Ok((rank + 1) * (rank + 2) / 2)
}

/// Inverse of [`rank_to_dim`]; fails for lengths that do not correspond to a
/// complete even-band coefficient vector.
pub fn dim_to_rank(dim: usize) -> Result<usize, DmriError> {
    let mut rank = 0usize;
    loop {
        let d = (rank + 1) * (rank + 2) / 2;
        if d == dim {
            return Ok(rank);
        }
        if d > dim {
            return Err(DmriError::Validation(format!(
                "{dim} is not a valid even-band SH dimension"
            )));
        }
        rank += 2;
    }
}

/// Associated Legendre P_l^m(x) carrying the spherical-harmonic
/// normalization √((2l+1)/(4π) · (l−m)!/(l+m)!).
fn associated_legendre_normalized(l: usize, m: i32, x: f64) -> f64 {
    let m_abs = m.unsigned_abs() as usize;
    if m < 0 {
        let mut factor = if m_abs % 2 == 0 { 1.0 } else { -1.0 };
        for k in (l - m_abs + 1)..=(l + m_abs) {
            factor /= k as f64;
        }
        return factor * associated_legendre_normalized(l, m_abs as i32, x);
    }

    let mut norm = ((2 * l + 1) as f64 / (4.0 * PI)).sqrt();
    if m_abs > 0 {
        let mut factorial_ratio = 1.0;
        for k in (l - m_abs + 1)..=(l + m_abs) {
            factorial_ratio /= k as f64;
        }
        norm *= factorial_ratio.sqrt();
    }

    if l == 0 {
        return norm;
    }

    let sin_theta = (1.0 - x * x).max(0.0).sqrt();

    // Sectoral seed: P_m^m = (-1)^m (2m-1)!! sin^m(θ).
    let mut pmm = 1.0;
    if m_abs > 0 {
        let mut fact = 1.0;
        for _ in 1..=m_abs {
            pmm *= -fact * sin_theta;
            fact += 2.0;
        }
    }
    if l == m_abs {
        return norm * pmm;
    }

    let mut pmmp1 = x * (2 * m_abs + 1) as f64 * pmm;
    if l == m_abs + 1 {
        return norm * pmmp1;
    }

    for n in (m_abs + 2)..=l {
        let tmp = ((2 * n - 1) as f64 * x * pmmp1 - (n + m_abs - 1) as f64 * pmm)
            / (n - m_abs) as f64;
        pmm = pmmp1;
        pmmp1 = tmp;
    }
    norm * pmmp1
}

/// Real spherical harmonic Y_{lm}(θ, φ): the m = 0 harmonic, and √2-scaled
/// cosine/sine combinations for ±m.
pub fn real_sh(l: usize, m: i32, theta: f64, phi: f64) -> f64 {
    let ct = theta.cos();
    if m == 0 {
        associated_legendre_normalized(l, 0, ct)
    } else if m > 0 {
        std::f64::consts::SQRT_2
            * associated_legendre_normalized(l, m, ct)
            * (m as f64 * phi).cos()
    } else {
        std::f64::consts::SQRT_2
            * associated_legendre_normalized(l, -m, ct)
            * (-m as f64 * phi).sin()
    }
}

fn fill_basis_row(row: &mut ndarray::ArrayViewMut1<f64>, rank: usize, theta: f64, phi: f64) {
    for l in (0..=rank).step_by(2) {
        for m in -(l as i32)..=(l as i32) {
            row[sh_index(l, m)] = real_sh(l, m, theta, phi);
        }
    }
}

/// Canonical flat index of `(l, m)` for even `l`: `(l² + l + 2)/2 + m − 1`.
#[inline]
pub fn sh_index(l: usize, m: i32) -> usize {
    (((l * l + l + 2) / 2) as i64 + m as i64 - 1) as usize
}

/// SH design matrix: one row per direction, one column per `(l, m)` pair up
/// to `rank`, in canonical column order.
pub fn sh_basis_matrix(
    rank: usize,
    directions: &ArrayView2<f64>,
    convention: DirectionConvention,
) -> Result<Array2<f64>, DmriError> {
    let dim = rank_to_dim(rank)?;
    if directions.ncols() != 3 {
        return Err(DmriError::Validation(format!(
            "direction matrix must have 3 columns, got {}",
            directions.ncols()
        )));
    }

    let n = directions.nrows();
    let mut angles = Array2::<f64>::zeros((n, 2));
    for (mut dst, src) in angles.rows_mut().into_iter().zip(directions.rows()) {
        let (theta, phi) = match convention {
            DirectionConvention::Cartesian => cartesian_to_angles(src[0], src[1], src[2]),
            DirectionConvention::Spherical => (src[1], src[2]),
        };
        dst[0] = theta;
        dst[1] = phi;
    }

    let mut basis = Array2::<f64>::zeros((n, dim));
    let zipped = Zip::from(basis.rows_mut()).and(angles.rows());
    if n >= PAR_ROW_THRESHOLD {
        zipped.par_for_each(|mut row, ang| {
            fill_basis_row(&mut row, rank, ang[0], ang[1]);
        });
    } else {
        zipped.for_each(|mut row, ang| {
            fill_basis_row(&mut row, rank, ang[0], ang[1]);
        });
    }
    Ok(basis)
}

fn check_tensor_inputs(e1: f64, e2: f64, l_max: usize) -> Result<(), DmriError> {
    if l_max % 2 != 0 {
        return Err(DmriError::Validation(format!(
            "lMax must be even, got {l_max}"
        )));
    }
    if e1 < e2 - 1e-10 {
        return Err(DmriError::Validation(format!(
            "e1 must be at least e2, got e1={e1}, e2={e2}"
        )));
    }
    Ok(())
}

/// Analytic SH expansion coefficients of the symmetric-tensor signal
/// `exp(-b·uᵀDu)` with axial/radial diffusivities `e1 ≥ e2` and principal
/// axis `(θ, φ)`:
///
/// `c_{lm} = 4π/(2l+1) · exp(−b·e2) · A_l((e1−e2)·b) · Y_{lm}(θ, φ)`
///
/// Odd bands are structurally zero.
pub fn symmetric_tensor_sh_coefficients(
    b: f64,
    e1: f64,
    e2: f64,
    l_max: usize,
    theta: f64,
    phi: f64,
) -> Result<Array1<f64>, DmriError> {
    check_tensor_inputs(e1, e2, l_max)?;

    let dim = rank_to_dim(l_max)?;
    let mut coef = Array1::<f64>::zeros(dim);
    let a = (e1 - e2) * b;
    let exp_be2 = (-b * e2).exp();

    for l in (0..=l_max).step_by(2) {
        let band = exp_legendre_coef(a, l as i32)?;
        let weight = 4.0 * PI / (2.0 * l as f64 + 1.0) * exp_be2 * band;
        for m in -(l as i32)..=(l as i32) {
            coef[sh_index(l, m)] = weight * real_sh(l, m, theta, phi);
        }
    }
    Ok(coef)
}

/// Derivative form of [`symmetric_tensor_sh_coefficients`]: the first vector
/// carries the b-direction sensitivity through dA_l/da, the second the
/// combined e1/e2 sensitivity. Formulas are ported from the reference
/// derivation as-is.
pub fn symmetric_tensor_sh_coefficients_derivative(
    b: f64,
    e1: f64,
    e2: f64,
    l_max: usize,
    theta: f64,
    phi: f64,
) -> Result<(Array1<f64>, Array1<f64>), DmriError> {
    check_tensor_inputs(e1, e2, l_max)?;

    let dim = rank_to_dim(l_max)?;
    let mut coef_b = Array1::<f64>::zeros(dim);
    let mut coef_e = Array1::<f64>::zeros(dim);
    let a = (e1 - e2) * b;
    let exp_be2 = (-b * e2).exp();

    for l in (0..=l_max).step_by(2) {
        let band = exp_legendre_coef(a, l as i32)?;
        let band_deriv = exp_legendre_coef_derivative(a, l as i32)?;
        let base = 4.0 * PI / (2.0 * l as f64 + 1.0) * exp_be2;
        for m in -(l as i32)..=(l as i32) {
            let j = sh_index(l, m);
            coef_b[j] = base * b * band_deriv * real_sh(l, m, theta, phi);
            coef_e[j] = base * (-b) * (band + band_deriv);
        }
    }
    Ok((coef_b, coef_e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn dim_and_rank_maps_are_inverse() {
        for rank in [0usize, 2, 4, 6, 8, 10, 12] {
            let dim = rank_to_dim(rank).unwrap();
            assert_eq!(dim, (rank + 1) * (rank + 2) / 2);
            assert_eq!(dim_to_rank(dim).unwrap(), rank);
        }
        assert!(rank_to_dim(3).is_err());
        assert!(dim_to_rank(2).is_err());
    }

    #[test]
    fn sh_index_is_contiguous_per_band() {
        assert_eq!(sh_index(0, 0), 0);
        assert_eq!(sh_index(2, -2), 1);
        assert_eq!(sh_index(2, 2), 5);
        assert_eq!(sh_index(4, -4), 6);
        assert_eq!(sh_index(4, 4), 14);
        // Band l spans [rank_to_dim(l-2), rank_to_dim(l-2) + 2l + 1).
        for l in [2usize, 4, 6, 8] {
            let start = rank_to_dim(l - 2).unwrap();
            assert_eq!(sh_index(l, -(l as i32)), start);
            assert_eq!(sh_index(l, l as i32), start + 2 * l);
        }
    }

    #[test]
    fn y00_is_constant() {
        let expected = 0.5 / PI.sqrt();
        for &(theta, phi) in &[(0.1, 0.3), (1.2, -2.0), (2.9, 3.0)] {
            assert_relative_eq!(real_sh(0, 0, theta, phi), expected, max_relative = 1e-14);
        }
    }

    #[test]
    fn real_sh_is_antipodally_symmetric_for_even_l() {
        // Antipode: θ → π−θ, φ → φ+π.
        for l in [2usize, 4, 6] {
            for m in -(l as i32)..=(l as i32) {
                let (theta, phi) = (0.7, 1.1);
                let a = real_sh(l, m, theta, phi);
                let b = real_sh(l, m, PI - theta, phi + PI);
                assert_abs_diff_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn basis_matrix_shape_and_first_column() {
        let dirs = array![
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.577350269, 0.577350269, 0.577350269],
        ];
        let basis = sh_basis_matrix(4, &dirs.view(), DirectionConvention::Cartesian).unwrap();
        assert_eq!(basis.dim(), (4, 15));
        for i in 0..4 {
            assert_relative_eq!(basis[[i, 0]], 0.5 / PI.sqrt(), max_relative = 1e-14);
        }
    }

    #[test]
    fn isotropic_tensor_has_only_l0_energy() {
        // e1 == e2 collapses every band above zero.
        let coef = symmetric_tensor_sh_coefficients(1000.0, 1.7e-3, 1.7e-3, 6, 0.4, 1.0).unwrap();
        for j in 1..coef.len() {
            assert_abs_diff_eq!(coef[j], 0.0, epsilon = 1e-14);
        }
        // l = 0: 4π · exp(-b·e2) · 1 · Y00.
        let expected = 4.0 * PI * (-1.7_f64).exp() * 0.5 / PI.sqrt();
        assert_relative_eq!(coef[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn tensor_coefficients_reject_bad_inputs() {
        assert!(matches!(
            symmetric_tensor_sh_coefficients(1000.0, 1.7e-3, 0.3e-3, 3, 0.0, 0.0),
            Err(DmriError::Validation(_))
        ));
        assert!(matches!(
            symmetric_tensor_sh_coefficients(1000.0, 1.0, 2.0, 4, 0.0, 0.0),
            Err(DmriError::Validation(_))
        ));
    }
}
