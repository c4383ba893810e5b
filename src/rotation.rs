//! Rotation of spherical-harmonic coefficient vectors.
//!
//! A rotated spherical function has the same band energies but mixed
//! coefficients within each band. Rather than Wigner matrices, the reference
//! approach resamples: evaluate the rotated function on a fixed direction
//! set, then re-solve each even band against the un-rotated basis via its
//! pseudoinverse.
//!
//! The resampling set is the order-3 tessellation regardless of the input's
//! rank, so rotation fidelity is bounded by that tessellation's angular
//! resolution rather than the coefficient vector's true bandwidth. This is a
//! deliberate property of the method, kept as-is; round-trips recover the
//! input only up to that bound and the conditioning of the band
//! pseudoinverses.

use crate::error::DmriError;
use crate::gradients::GradientTables;
use crate::linalg::pinv;
use crate::sh::{DirectionConvention, dim_to_rank, rank_to_dim, sh_basis_matrix};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use std::sync::Arc;

/// Tessellation order of the fixed resampling direction set.
pub const REFERENCE_TESS_ORDER: usize = 3;

/// Cached reference basis and per-band pseudoinverses for SH rotation.
///
/// The cache grows monotonically: a request above the current rank rebuilds
/// the basis and pseudoinverses at the higher rank and keeps them; it never
/// shrinks. Build on one thread before any parallel phase; [`ShRotator::rotate`]
/// takes `&mut self` only to allow that growth.
#[derive(Debug)]
pub struct ShRotator {
    reference: Arc<Array2<f64>>,
    rank: usize,
    basis: Array2<f64>,
    /// Pseudoinverse of the band-`l` column block, at index `l/2 − 1`.
    band_pinv: Vec<Array2<f64>>,
}

impl ShRotator {
    /// Starting rank of the cached basis; covers coefficient vectors up to
    /// 66 entries without a rebuild.
    pub const DEFAULT_RANK: usize = 10;

    /// Build a rotator from the canonical order-3 direction set, which must
    /// already be initialized in `tables`.
    pub fn new(tables: &GradientTables) -> Result<Self, DmriError> {
        Self::with_rank(tables, Self::DEFAULT_RANK)
    }

    pub fn with_rank(tables: &GradientTables, rank: usize) -> Result<Self, DmriError> {
        let reference = tables.canonical(REFERENCE_TESS_ORDER)?;
        let (basis, band_pinv) = build_reference(&reference.view(), rank)?;
        Ok(Self {
            reference,
            rank,
            basis,
            band_pinv,
        })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The cached SH design matrix on the reference direction set, at the
    /// current rank.
    pub fn reference_basis(&self) -> &Array2<f64> {
        &self.basis
    }

    /// Re-express `sh` under `rotation`, a 3×3 rotation matrix.
    ///
    /// Band 0 is rotation-invariant and copied unchanged; each higher even
    /// band is resampled at the rotated reference directions and re-solved
    /// against the un-rotated basis.
    pub fn rotate(
        &mut self,
        sh: &ArrayView1<f64>,
        rotation: &ArrayView2<f64>,
    ) -> Result<Array1<f64>, DmriError> {
        if rotation.dim() != (3, 3) {
            return Err(DmriError::Validation(format!(
                "rotation matrix must be 3×3, got {}×{}",
                rotation.nrows(),
                rotation.ncols()
            )));
        }

        let rank_real = dim_to_rank(sh.len())?;
        if rank_real > self.rank {
            log::debug!(
                "growing SH rotation cache from rank {} to {rank_real}",
                self.rank
            );
            let (basis, band_pinv) = build_reference(&self.reference.view(), rank_real)?;
            self.basis = basis;
            self.band_pinv = band_pinv;
            self.rank = rank_real;
        }

        // Rotated sample directions: each reference row v becomes Rᵀv, i.e.
        // the function is evaluated where the rotation pulls the samples from.
        let rotated_dirs = self.reference.dot(rotation);
        let rotated_basis =
            sh_basis_matrix(rank_real, &rotated_dirs.view(), DirectionConvention::Cartesian)?;

        let mut out = sh.to_owned();
        for l in (2..=rank_real).step_by(2) {
            let start = rank_to_dim(l - 2)?;
            let width = 2 * l + 1;
            let band_block = rotated_basis.slice(s![.., start..start + width]);
            let band_coefs = sh.slice(s![start..start + width]);
            let samples = band_block.dot(&band_coefs);
            let solved = self.band_pinv[l / 2 - 1].dot(&samples);
            out.slice_mut(s![start..start + width]).assign(&solved);
        }
        Ok(out)
    }
}

fn build_reference(
    reference: &ArrayView2<f64>,
    rank: usize,
) -> Result<(Array2<f64>, Vec<Array2<f64>>), DmriError> {
    let basis = sh_basis_matrix(rank, reference, DirectionConvention::Cartesian)?;
    let mut band_pinv = Vec::with_capacity(rank / 2);
    for l in (2..=rank).step_by(2) {
        let start = rank_to_dim(l - 2)?;
        let width = 2 * l + 1;
        let block = basis.slice(s![.., start..start + width]);
        band_pinv.push(pinv(&block)?);
    }
    Ok((basis, band_pinv))
}
