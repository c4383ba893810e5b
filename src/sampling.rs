//! Per-subject q-space sampling scheme: the diffusion-gradient directions
//! and b-values at which the MRI signal was measured.

use crate::error::DmriError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

const UNIT_NORM_TOL: f64 = 1e-6;

/// Validated q-space sampling scheme.
///
/// Directions are Cartesian unit vectors, one row per measurement, paired
/// with a nonnegative b-value each. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QSpaceSampling {
    directions: Array2<f64>,
    bvalues: Array1<f64>,
}

impl QSpaceSampling {
    pub fn new(directions: Array2<f64>, bvalues: Array1<f64>) -> Result<Self, DmriError> {
        if directions.ncols() != 3 {
            return Err(DmriError::Validation(format!(
                "direction matrix must have 3 columns, got {}",
                directions.ncols()
            )));
        }
        if directions.nrows() != bvalues.len() {
            return Err(DmriError::Validation(format!(
                "{} directions but {} b-values",
                directions.nrows(),
                bvalues.len()
            )));
        }
        for (i, row) in directions.rows().into_iter().enumerate() {
            let norm = (row[0] * row[0] + row[1] * row[1] + row[2] * row[2]).sqrt();
            if (norm - 1.0).abs() > UNIT_NORM_TOL {
                return Err(DmriError::Validation(format!(
                    "direction {i} has norm {norm}, expected a unit vector"
                )));
            }
        }
        if let Some((i, &b)) = bvalues.iter().enumerate().find(|(_, &b)| b < 0.0) {
            return Err(DmriError::Validation(format!(
                "b-value {i} is negative ({b})"
            )));
        }
        Ok(Self {
            directions,
            bvalues,
        })
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.bvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bvalues.is_empty()
    }

    pub fn directions(&self) -> &Array2<f64> {
        &self.directions
    }

    pub fn bvalues(&self) -> &Array1<f64> {
        &self.bvalues
    }

    /// Largest b-value in the scheme, 0 for an empty scheme.
    pub fn max_bvalue(&self) -> f64 {
        self.bvalues.iter().cloned().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn accepts_valid_scheme() {
        let dirs = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let b = array![0.0, 1000.0];
        let scheme = QSpaceSampling::new(dirs, b).expect("valid scheme");
        assert_eq!(scheme.len(), 2);
        assert_eq!(scheme.max_bvalue(), 1000.0);
    }

    #[test]
    fn rejects_non_unit_directions() {
        let dirs = array![[2.0, 0.0, 0.0]];
        let b = array![1000.0];
        assert!(matches!(
            QSpaceSampling::new(dirs, b),
            Err(DmriError::Validation(_))
        ));
    }

    #[test]
    fn rejects_mismatched_lengths_and_negative_b() {
        let dirs = array![[1.0, 0.0, 0.0]];
        assert!(QSpaceSampling::new(dirs.clone(), Array1::zeros(2)).is_err());
        assert!(QSpaceSampling::new(dirs, array![-5.0]).is_err());
    }
}
