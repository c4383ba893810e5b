//! Lookup-table approximation of expensive scalar functions.
//!
//! A [`FunctorTable`] precomputes a functor at evenly spaced points over a
//! bounded domain and answers queries by linear interpolation, turning a
//! transcendental call in an inner loop (millions of evaluations per volume)
//! into an O(1) indexed read. Queries outside the domain fail explicitly;
//! callers that want a fallback wrap the table (see [`NegExpTable`]) rather
//! than relying on extrapolation.
//!
//! Building is not thread-safe: the surrounding pipeline warms tables up on a
//! single thread before any parallel phase, after which all reads are safe
//! because nothing mutates.

use crate::error::DmriError;

/// Piecewise-linear approximation table for a scalar functor over `[min, max]`.
#[derive(Debug, Clone, Default)]
pub struct FunctorTable {
    min: f64,
    max: f64,
    bin_width: f64,
    /// `num_bins + 1` samples; empty until [`FunctorTable::build`] succeeds.
    values: Vec<f64>,
}

impl FunctorTable {
    /// Create an empty, unbuilt table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `f` at `num_bins + 1` evenly spaced points over `[min, max]`,
    /// replacing any previous table. On error the existing table (if any) is
    /// left untouched.
    pub fn build<F>(&mut self, min: f64, max: f64, num_bins: usize, f: F) -> Result<(), DmriError>
    where
        F: Fn(f64) -> f64,
    {
        if !(min < max) {
            return Err(DmriError::Validation(format!(
                "table domain is invalid: min ({min}) must be less than max ({max})"
            )));
        }
        if num_bins == 0 {
            return Err(DmriError::Validation(
                "table needs at least one bin".to_string(),
            ));
        }

        let bin_width = (max - min) / num_bins as f64;
        let mut values = Vec::with_capacity(num_bins + 1);
        for i in 0..=num_bins {
            values.push(f(min + i as f64 * bin_width));
        }

        self.min = min;
        self.max = max;
        self.bin_width = bin_width;
        self.values = values;
        Ok(())
    }

    /// Whether a table has been built.
    pub fn is_built(&self) -> bool {
        !self.values.is_empty()
    }

    /// Interpolated value at `x`. Fails if `x` lies outside the table domain
    /// or the table was never built.
    pub fn value(&self, x: f64) -> Result<f64, DmriError> {
        if !self.is_built() {
            return Err(DmriError::NotInitialized {
                what: "lookup table",
            });
        }
        if x < self.min || x > self.max {
            return Err(DmriError::Domain {
                value: x,
                domain: format!("[{}, {}]", self.min, self.max),
            });
        }

        // Endpoints return the stored samples exactly.
        if x == self.max {
            return Ok(self.values[self.values.len() - 1]);
        }
        let t = (x - self.min) / self.bin_width;
        let i = (t.floor() as usize).min(self.values.len() - 2);
        let frac = t - i as f64;
        Ok(self.values[i] + frac * (self.values[i + 1] - self.values[i]))
    }

    /// Domain bounds `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Step between consecutive samples.
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Number of stored samples (`num_bins + 1`), 0 if unbuilt.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fast approximation of `exp(x)` over the decaying branch.
///
/// Diffusion signal models evaluate `exp(-b·d)` with `b·d` up to around 30;
/// the table covers `[-30, 0]` with a fine grid, and [`NegExpTable::eval`]
/// falls back to the exact exponential outside that range (above 0, and below
/// -30 where the result is below 1e-13).
#[derive(Debug, Clone)]
pub struct NegExpTable {
    table: FunctorTable,
}

impl NegExpTable {
    pub const DOMAIN_MIN: f64 = -30.0;
    pub const DOMAIN_MAX: f64 = 0.0;
    pub const NUM_BINS: usize = 150_000;

    /// Build the table. Call once, single-threaded, during warm-up.
    pub fn new() -> Self {
        let mut table = FunctorTable::new();
        table
            .build(Self::DOMAIN_MIN, Self::DOMAIN_MAX, Self::NUM_BINS, f64::exp)
            .unwrap_or_else(|_| unreachable!("fixed domain and bin count are valid"));
        Self { table }
    }

    /// Approximate `exp(x)`, exact outside the table domain.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        match self.table.value(x) {
            Ok(v) => v,
            Err(_) => x.exp(),
        }
    }

    pub fn table(&self) -> &FunctorTable {
        &self.table
    }
}

impl Default for NegExpTable {
    fn default() -> Self {
        Self::new()
    }
}
