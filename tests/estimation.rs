use approx::assert_abs_diff_eq;
use dmrikit::linalg::pinv;
use dmrikit::{
    DirectionConvention, DirectionOptions, DmriError, EstimationContext, GradientTables,
    ModelEstimator, QSpaceSampling, fit_masked, rank_to_dim, sh_basis_matrix, sh_index,
    symmetric_tensor_sh_coefficients,
};
use ndarray::{Array1, Array2, ArrayView1};

fn resource_root() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/directions")
}

/// Linear least-squares SH fit: the simplest concrete estimator exercising
/// the full contract.
struct ShLeastSquares {
    scheme: QSpaceSampling,
    rank: usize,
    basis: Option<Array2<f64>>,
    basis_pinv: Option<Array2<f64>>,
    reg_weight: Option<Array1<f64>>,
}

impl ShLeastSquares {
    fn new(scheme: QSpaceSampling, rank: usize) -> Self {
        Self {
            scheme,
            rank,
            basis: None,
            basis_pinv: None,
            reg_weight: None,
        }
    }
}

impl ModelEstimator for ShLeastSquares {
    fn sampling_scheme(&self) -> &QSpaceSampling {
        &self.scheme
    }

    fn basis_matrix(&self) -> Option<&Array2<f64>> {
        self.basis.as_ref()
    }

    fn regularization_weight(&self) -> Option<&Array1<f64>> {
        self.reg_weight.as_ref()
    }

    fn compute_basis_matrix(&mut self, _context: &EstimationContext) -> Result<(), DmriError> {
        let basis = sh_basis_matrix(
            self.rank,
            &self.scheme.directions().view(),
            DirectionConvention::Cartesian,
        )?;
        self.basis_pinv = Some(pinv(&basis)?);
        self.basis = Some(basis);
        Ok(())
    }

    fn compute_regularization_weight(
        &mut self,
        _context: &EstimationContext,
    ) -> Result<(), DmriError> {
        // Laplace-Beltrami penalty: weight l²(l+1)² on every band-l term.
        let dim = rank_to_dim(self.rank)?;
        let mut weight = Array1::<f64>::zeros(dim);
        for l in (0..=self.rank).step_by(2) {
            let w = (l * l * (l + 1) * (l + 1)) as f64;
            for m in -(l as i32)..=(l as i32) {
                weight[sh_index(l, m)] = w;
            }
        }
        self.reg_weight = Some(weight);
        Ok(())
    }

    fn fit_voxel(
        &self,
        _context: &EstimationContext,
        signal: ArrayView1<f64>,
    ) -> Result<Array1<f64>, DmriError> {
        let pinv = self.basis_pinv.as_ref().ok_or(DmriError::NotInitialized {
            what: "basis matrix",
        })?;
        Ok(pinv.dot(&signal))
    }
}

fn context() -> EstimationContext {
    EstimationContext::new(GradientTables::new(resource_root()))
}

fn scheme_from_tess3(context: &EstimationContext) -> QSpaceSampling {
    let dirs = context
        .gradients()
        .directions(3, &DirectionOptions::duplicated())
        .expect("order 3 is warmed up");
    let n = dirs.nrows();
    QSpaceSampling::new(dirs, Array1::from_elem(n, 1500.0)).expect("valid scheme")
}

#[test]
fn warm_up_then_fit_recovers_generated_coefficients() {
    let mut ctx = context();
    ctx.warm_up(&[3]).expect("warm-up");

    let scheme = scheme_from_tess3(&ctx);
    let mut estimator = ShLeastSquares::new(scheme, 4);
    estimator.verify_inputs().expect("inputs are coherent");
    estimator.compute_basis_matrix(&ctx).expect("basis");
    estimator.compute_regularization_weight(&ctx).expect("weights");

    let basis = estimator.basis_matrix().expect("computed").clone();
    let dim = rank_to_dim(4).unwrap();

    // Three synthetic voxels: two tensors with different orientations plus
    // one outside the mask.
    let truth_a =
        symmetric_tensor_sh_coefficients(1500.0, 1.7e-3, 0.3e-3, 4, 0.0, 0.0).unwrap();
    let truth_b =
        symmetric_tensor_sh_coefficients(1500.0, 1.7e-3, 0.3e-3, 4, 1.2, 0.7).unwrap();

    let mut signals = Array2::<f64>::zeros((3, basis.nrows()));
    signals.row_mut(0).assign(&basis.dot(&truth_a));
    signals.row_mut(2).assign(&basis.dot(&truth_b));

    let mask = [true, false, true];
    let fits = fit_masked(&estimator, &ctx, signals.view(), &mask).expect("driver");

    assert!(fits[1].is_none());
    let fit_a = fits[0].as_ref().expect("inside mask");
    let fit_b = fits[2].as_ref().expect("inside mask");
    assert_eq!(fit_a.len(), dim);
    for j in 0..dim {
        assert_abs_diff_eq!(fit_a[j], truth_a[j], epsilon = 1e-8);
        assert_abs_diff_eq!(fit_b[j], truth_b[j], epsilon = 1e-8);
    }
}

#[test]
fn noisy_signals_are_recovered_to_noise_level() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    let mut ctx = context();
    ctx.warm_up(&[3]).expect("warm-up");
    let mut estimator = ShLeastSquares::new(scheme_from_tess3(&ctx), 4);
    estimator.compute_basis_matrix(&ctx).expect("basis");

    let basis = estimator.basis_matrix().expect("computed").clone();
    let truth = symmetric_tensor_sh_coefficients(1500.0, 1.7e-3, 0.3e-3, 4, 0.9, -0.4).unwrap();

    let mut rng = StdRng::seed_from_u64(20260807);
    let noise = Normal::new(0.0, 0.01).expect("normal params must be valid");
    let clean = basis.dot(&truth);
    let mut signals = Array2::<f64>::zeros((1, clean.len()));
    for (i, v) in clean.iter().enumerate() {
        signals[[0, i]] = v + noise.sample(&mut rng);
    }

    let fits = fit_masked(&estimator, &ctx, signals.view(), &[true]).expect("driver");
    let fit = fits[0].as_ref().expect("inside mask");

    // With 162 samples and σ = 0.01, coefficient error stays at or below
    // the per-sample noise level.
    let rmse = (fit - &truth).mapv(|v| v * v).mean().unwrap_or(f64::INFINITY).sqrt();
    assert!(rmse < 1e-2, "coefficient rmse too large: {rmse:.3e}");
}

#[test]
fn regularization_weight_is_zero_on_band_zero_and_grows_with_band() {
    let mut ctx = context();
    ctx.warm_up(&[3]).expect("warm-up");
    let mut estimator = ShLeastSquares::new(scheme_from_tess3(&ctx), 6);
    estimator.compute_regularization_weight(&ctx).expect("weights");

    let weight = estimator.regularization_weight().expect("computed");
    assert_eq!(weight[0], 0.0);
    assert_eq!(weight[sh_index(2, 0)], 36.0);
    assert_eq!(weight[sh_index(4, 0)], 400.0);
    assert_eq!(weight[sh_index(6, 0)], 1764.0);
}

#[test]
fn warm_up_enables_fast_exp_table() {
    let mut ctx = context();
    ctx.warm_up(&[3]).expect("warm-up");
    let table = ctx.exp_table().expect("built during warm-up");
    assert!(table.table().is_built());
    for x in [-25.0, -3.2, -0.01, 0.0] {
        assert_abs_diff_eq!(ctx.fast_exp(x), x.exp(), epsilon = 1e-9);
    }
    // Warm-up twice is fine.
    ctx.warm_up(&[3]).expect("idempotent");
}

#[test]
fn fit_before_basis_computation_is_a_clean_error() {
    let mut ctx = context();
    ctx.warm_up(&[3]).expect("warm-up");
    let estimator = ShLeastSquares::new(scheme_from_tess3(&ctx), 4);
    let signal = Array1::<f64>::zeros(estimator.sampling_scheme().len());
    assert!(matches!(
        estimator.fit_voxel(&ctx, signal.view()),
        Err(DmriError::NotInitialized { .. })
    ));
}
