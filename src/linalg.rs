//! Minimal ndarray ↔ faer interop for the dense decompositions this crate
//! needs. Matrices cross module boundaries as `ndarray` types; faer supplies
//! the SVD kernel behind the [`FaerSvd`] trait, and [`pinv`] builds the
//! Moore-Penrose pseudoinverse on top of it.

use dyn_stack::{MemBuffer, MemStack};
use faer::diag::{Diag, DiagRef};
use faer::linalg::svd::{self, ComputeSvdVectors};
use faer::{MatRef, get_global_parallelism};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaerLinalgError {
    #[error("SVD failed to converge")]
    SvdNoConvergence,
}

/// Zero-copy view of an ndarray matrix as a faer `MatRef`.
///
/// Layouts with non-positive strides can alias or reverse memory traversal,
/// which violates assumptions in faer kernels; those are materialized into a
/// compact owned copy instead.
pub struct FaerArrayView<'a> {
    ptr: *const f64,
    rows: usize,
    cols: usize,
    row_stride: isize,
    col_stride: isize,
    owned: Option<Array2<f64>>,
    _marker: PhantomData<&'a f64>,
}

impl<'a> FaerArrayView<'a> {
    pub fn new<S: Data<Elem = f64>>(array: &'a ArrayBase<S, Ix2>) -> Self {
        let (rows, cols) = array.dim();
        let strides = array.strides();
        if strides[0] <= 0 || strides[1] <= 0 {
            let owned = array.to_owned();
            let owned_strides = owned.strides();
            return Self {
                ptr: owned.as_ptr(),
                rows,
                cols,
                row_stride: owned_strides[0],
                col_stride: owned_strides[1],
                owned: Some(owned),
                _marker: PhantomData,
            };
        }

        Self {
            ptr: array.as_ptr(),
            rows,
            cols,
            row_stride: strides[0],
            col_stride: strides[1],
            owned: None,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, f64> {
        let (ptr, rows, cols, row_stride, col_stride) = if let Some(owned) = &self.owned {
            let strides = owned.strides();
            (
                owned.as_ptr(),
                owned.nrows(),
                owned.ncols(),
                strides[0],
                strides[1],
            )
        } else {
            (
                self.ptr,
                self.rows,
                self.cols,
                self.row_stride,
                self.col_stride,
            )
        };
        // SAFETY: pointer/shape/strides either come directly from a live
        // ndarray view with positive strides, or from an owned compact copy
        // stored inside this wrapper, which guarantees validity for the
        // returned view lifetime.
        unsafe { MatRef::from_raw_parts(ptr, rows, cols, row_stride, col_stride) }
    }
}

fn mat_to_array(mat: MatRef<'_, f64>) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((mat.nrows(), mat.ncols()));
    for j in 0..mat.ncols() {
        for i in 0..mat.nrows() {
            out[[i, j]] = mat[(i, j)];
        }
    }
    out
}

fn diag_to_array(diag: DiagRef<'_, f64>) -> Array1<f64> {
    let mat = diag.column_vector().as_mat();
    let mut out = Array1::<f64>::zeros(mat.nrows());
    for i in 0..mat.nrows() {
        out[i] = mat[(i, 0)];
    }
    out
}

pub trait FaerSvd {
    /// Full SVD `A = U Σ Vᵀ`; singular values descending.
    fn svd_full(&self) -> Result<(Array2<f64>, Array1<f64>, Array2<f64>), FaerLinalgError>;
}

impl<S: Data<Elem = f64>> FaerSvd for ArrayBase<S, Ix2> {
    fn svd_full(&self) -> Result<(Array2<f64>, Array1<f64>, Array2<f64>), FaerLinalgError> {
        let faer_view = FaerArrayView::new(self);
        let faer_mat = faer_view.as_ref();
        let (rows, cols) = faer_mat.shape();

        let mut singular = Diag::<f64>::zeros(rows.min(cols));
        let mut u_storage = faer::Mat::<f64>::zeros(rows, rows);
        let mut v_storage = faer::Mat::<f64>::zeros(cols, cols);

        let par = get_global_parallelism();
        let mut mem = MemBuffer::new(svd::svd_scratch::<f64>(
            rows,
            cols,
            ComputeSvdVectors::Full,
            ComputeSvdVectors::Full,
            par,
            Default::default(),
        ));
        let stack = MemStack::new(&mut mem);

        svd::svd(
            faer_mat,
            singular.as_mut(),
            Some(u_storage.as_mut()),
            Some(v_storage.as_mut()),
            par,
            stack,
            Default::default(),
        )
        .map_err(|_| FaerLinalgError::SvdNoConvergence)?;

        let singular_values = diag_to_array(singular.as_ref());
        let u = mat_to_array(u_storage.as_ref());
        // faer returns V; hand back Vᵀ to match the usual A = U Σ Vᵀ layout.
        let v_ref = v_storage.as_ref();
        let mut vt = Array2::<f64>::zeros((v_ref.ncols(), v_ref.nrows()));
        for j in 0..v_ref.nrows() {
            for i in 0..v_ref.ncols() {
                vt[[i, j]] = v_ref[(j, i)];
            }
        }

        Ok((u, singular_values, vt))
    }
}

/// Moore-Penrose pseudoinverse via SVD.
///
/// Singular values below `max(m, n) · ε · σ₁` are treated as zero, the
/// standard cutoff for rank detection in double precision.
pub fn pinv<S: Data<Elem = f64>>(a: &ArrayBase<S, Ix2>) -> Result<Array2<f64>, FaerLinalgError> {
    let (m, n) = a.dim();
    let (u, s, vt) = a.svd_full()?;

    let sigma_max = s.iter().cloned().fold(0.0_f64, f64::max);
    let tol = m.max(n) as f64 * f64::EPSILON * sigma_max;

    // A⁺ = Σ_i (v_i u_iᵀ) / σ_i over the numerically nonzero spectrum.
    let mut out = Array2::<f64>::zeros((n, m));
    for (i, &sigma) in s.iter().enumerate() {
        if sigma <= tol {
            continue;
        }
        let inv = 1.0 / sigma;
        for r in 0..n {
            let v_ri = vt[[i, r]];
            if v_ri == 0.0 {
                continue;
            }
            for c in 0..m {
                out[[r, c]] += inv * v_ri * u[[c, i]];
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn pinv_recovers_inverse_for_square_nonsingular() {
        let a = array![[2.0, 0.0], [1.0, 3.0]];
        let p = pinv(&a).expect("pinv should succeed");
        let identity = a.dot(&p);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(identity[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn pinv_solves_overdetermined_least_squares() {
        // Tall matrix: A⁺ A = I on the column space.
        let a = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, -1.0]];
        let p = pinv(&a).expect("pinv should succeed");
        assert_eq!(p.dim(), (2, 4));
        let gram = p.dot(&a);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(gram[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn pinv_handles_rank_deficiency() {
        // Second column is a multiple of the first; A A⁺ A = A must still hold.
        let a = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let p = pinv(&a).expect("pinv should succeed");
        let back = a.dot(&p).dot(&a);
        for i in 0..3 {
            for j in 0..2 {
                assert_abs_diff_eq!(back[[i, j]], a[[i, j]], epsilon = 1e-10);
            }
        }
    }
}
