//! The contract between the numerical core and concrete diffusion-model
//! estimators.
//!
//! An estimator is a strategy object owning a q-space sampling scheme, a
//! basis matrix, and a regularization weight vector. The surrounding image
//! pipeline drives it per voxel; this module supplies the shared context
//! (gradient tables, exp lookup table) with a single-threaded warm-up
//! barrier, default input verification, and a generic masked per-voxel
//! driver. Voxel-level parallelism belongs to the caller: everything here is
//! read-only after warm-up.

use crate::error::DmriError;
use crate::gradients::GradientTables;
use crate::lookup::NegExpTable;
use crate::sampling::QSpaceSampling;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Typical mean diffusivity (mm²/s) used as the default model scale.
pub const DEFAULT_MD0: f64 = 0.7e-3;

/// Shared numerical caches handed to estimators instead of process-wide
/// globals. Construct once, call [`EstimationContext::warm_up`] on a single
/// thread, then share immutably across the parallel voxel phase.
#[derive(Debug)]
pub struct EstimationContext {
    gradients: GradientTables,
    exp_table: Option<NegExpTable>,
}

impl EstimationContext {
    pub fn new(gradients: GradientTables) -> Self {
        Self {
            gradients,
            exp_table: None,
        }
    }

    /// Perform all initialization reads and table builds. Idempotent.
    pub fn warm_up(&mut self, tess_orders: &[usize]) -> Result<(), DmriError> {
        for &order in tess_orders {
            self.gradients.initialize(order)?;
        }
        if self.exp_table.is_none() {
            self.exp_table = Some(NegExpTable::new());
        }
        log::debug!("estimation context warmed up (orders {tess_orders:?})");
        Ok(())
    }

    pub fn gradients(&self) -> &GradientTables {
        &self.gradients
    }

    /// The exp lookup table; fails if warm-up has not run.
    pub fn exp_table(&self) -> Result<&NegExpTable, DmriError> {
        self.exp_table.as_ref().ok_or(DmriError::NotInitialized {
            what: "exp lookup table",
        })
    }

    /// Fast `exp(x)` through the lookup table when warmed up, exact
    /// otherwise.
    #[inline]
    pub fn fast_exp(&self, x: f64) -> f64 {
        match &self.exp_table {
            Some(table) => table.eval(x),
            None => x.exp(),
        }
    }
}

/// What a concrete diffusion-model estimator must provide.
///
/// `compute_basis_matrix` and `compute_regularization_weight` are the two
/// extension points the pipeline calls before the voxel loop; both default to
/// no-ops for models that build their operators elsewhere.
pub trait ModelEstimator {
    fn sampling_scheme(&self) -> &QSpaceSampling;

    /// The current basis matrix, if one has been computed.
    fn basis_matrix(&self) -> Option<&Array2<f64>>;

    /// The current regularization weight vector, if one has been computed.
    fn regularization_weight(&self) -> Option<&Array1<f64>>;

    /// Typical mean-diffusivity scale of the model.
    fn md0(&self) -> f64 {
        DEFAULT_MD0
    }

    /// Produce or refresh the basis matrix for the current sampling scheme.
    fn compute_basis_matrix(&mut self, _context: &EstimationContext) -> Result<(), DmriError> {
        Ok(())
    }

    /// Produce the regularization weight vector for penalized fitting.
    fn compute_regularization_weight(
        &mut self,
        _context: &EstimationContext,
    ) -> Result<(), DmriError> {
        Ok(())
    }

    /// Check the estimator's configuration before any voxel work.
    fn verify_inputs(&self) -> Result<(), DmriError> {
        let scheme = self.sampling_scheme();
        if scheme.is_empty() {
            return Err(DmriError::Validation(
                "sampling scheme has no measurements".to_string(),
            ));
        }
        if self.md0() <= 0.0 {
            return Err(DmriError::Validation(format!(
                "MD0 must be positive, got {}",
                self.md0()
            )));
        }
        Ok(())
    }

    /// Fit model coefficients for one voxel's signal vector.
    fn fit_voxel(
        &self,
        context: &EstimationContext,
        signal: ArrayView1<f64>,
    ) -> Result<Array1<f64>, DmriError>;
}

/// Drive an estimator over a volume: one signal row per voxel, skipping
/// voxels outside the mask. Returns `None` for skipped voxels.
///
/// The loop is deliberately sequential; callers that parallelize do so
/// across chunks of voxels with a shared immutable context.
pub fn fit_masked<E: ModelEstimator>(
    estimator: &E,
    context: &EstimationContext,
    signals: ArrayView2<f64>,
    mask: &[bool],
) -> Result<Vec<Option<Array1<f64>>>, DmriError> {
    if signals.nrows() != mask.len() {
        return Err(DmriError::Validation(format!(
            "{} signal rows but {} mask entries",
            signals.nrows(),
            mask.len()
        )));
    }
    if signals.ncols() != estimator.sampling_scheme().len() {
        return Err(DmriError::Validation(format!(
            "signal rows have {} measurements but the sampling scheme has {}",
            signals.ncols(),
            estimator.sampling_scheme().len()
        )));
    }

    let mut out = Vec::with_capacity(mask.len());
    for (row, &inside) in signals.rows().into_iter().zip(mask) {
        if inside {
            out.push(Some(estimator.fit_voxel(context, row)?));
        } else {
            out.push(None);
        }
    }
    Ok(out)
}
