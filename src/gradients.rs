//! Precomputed unit-sphere gradient direction tables.
//!
//! Canonical direction sets live as plain-text resources (one Cartesian unit
//! vector per row, three columns) under a configurable root: icosahedral
//! tessellation halves for orders 1..7, and electrostatic-repulsion point
//! sets indexed by point count. [`GradientTables`] loads each table exactly
//! once and hands out derived copies; the cached canonical matrices are never
//! mutated in place.
//!
//! This is an explicit cache object rather than a process-wide singleton: the
//! pipeline constructs one, warms it up on a single thread, then shares it
//! read-only across the parallel voxel phase.

use crate::coords::cartesian_to_spherical;
use crate::error::DmriError;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows stored per tessellation order (half of an icosahedral subdivision:
/// one representative per antipodal pair).
pub const TESS_ROW_COUNTS: [usize; 7] = [6, 21, 81, 321, 1281, 5121, 20481];

/// How to hand back a direction set relative to the Cartesian backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateMode {
    /// Keep Cartesian rows.
    CartesianToCartesian,
    /// Convert rows to `(r, θ, φ)`.
    CartesianToSpherical,
    /// Rejected: the backing store is never spherical.
    SphericalToCartesian,
    /// Rejected: the backing store is never spherical.
    SphericalToSpherical,
}

/// Options for deriving a direction set from a cached canonical table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionOptions {
    /// Append the antipodal (negated) vector immediately after each row,
    /// doubling the row count.
    pub duplicate: bool,
    pub mode: CoordinateMode,
    pub flip_x: bool,
    pub flip_y: bool,
    pub flip_z: bool,
}

impl Default for DirectionOptions {
    fn default() -> Self {
        Self {
            duplicate: false,
            mode: CoordinateMode::CartesianToCartesian,
            flip_x: false,
            flip_y: false,
            flip_z: false,
        }
    }
}

impl DirectionOptions {
    pub fn duplicated() -> Self {
        Self {
            duplicate: true,
            ..Self::default()
        }
    }

    pub fn spherical() -> Self {
        Self {
            mode: CoordinateMode::CartesianToSpherical,
            ..Self::default()
        }
    }
}

/// Registry of canonical gradient tables, loaded once per order/count and
/// shared read-only for the process lifetime.
#[derive(Debug)]
pub struct GradientTables {
    root: PathBuf,
    tess: [Option<Arc<Array2<f64>>>; 7],
    elec: HashMap<usize, Arc<Array2<f64>>>,
}

impl GradientTables {
    /// Create an empty registry rooted at `resource_root`. No I/O happens
    /// until [`GradientTables::initialize`].
    pub fn new<P: Into<PathBuf>>(resource_root: P) -> Self {
        Self {
            root: resource_root.into(),
            tess: Default::default(),
            elec: HashMap::new(),
        }
    }

    pub fn resource_root(&self) -> &Path {
        &self.root
    }

    fn check_order(tess_order: usize) -> Result<(), DmriError> {
        if !(1..=7).contains(&tess_order) {
            return Err(DmriError::Validation(format!(
                "tessellation order must be in [1, 7], got {tess_order}"
            )));
        }
        Ok(())
    }

    /// Load the canonical table for `tess_order` from the backing resource.
    /// Idempotent: a second call for an already-loaded order is a no-op.
    pub fn initialize(&mut self, tess_order: usize) -> Result<(), DmriError> {
        Self::check_order(tess_order)?;
        if self.tess[tess_order - 1].is_some() {
            return Ok(());
        }
        let path = self.root.join(format!("tess{tess_order}.txt"));
        let table = load_direction_file(&path)?;
        if table.nrows() != TESS_ROW_COUNTS[tess_order - 1] {
            log::warn!(
                "gradient table {} has {} rows, expected {}",
                path.display(),
                table.nrows(),
                TESS_ROW_COUNTS[tess_order - 1]
            );
        }
        log::debug!(
            "loaded gradient table order {tess_order} ({} directions)",
            table.nrows()
        );
        self.tess[tess_order - 1] = Some(Arc::new(table));
        Ok(())
    }

    pub fn is_initialized(&self, tess_order: usize) -> bool {
        (1..=7).contains(&tess_order) && self.tess[tess_order - 1].is_some()
    }

    /// Shared read-only handle to the canonical Cartesian table.
    pub fn canonical(&self, tess_order: usize) -> Result<Arc<Array2<f64>>, DmriError> {
        Self::check_order(tess_order)?;
        self.tess[tess_order - 1]
            .clone()
            .ok_or(DmriError::NotInitialized {
                what: "gradient table",
            })
    }

    /// A new matrix derived from the canonical table: per-axis sign flips,
    /// optional antipodal duplication (each duplicate immediately follows its
    /// source row), optional conversion to spherical rows. Never returns the
    /// cached matrix itself.
    pub fn directions(
        &self,
        tess_order: usize,
        options: &DirectionOptions,
    ) -> Result<Array2<f64>, DmriError> {
        let canonical = self.canonical(tess_order)?;
        derive_directions(&canonical, options)
    }

    /// [`GradientTables::directions`] re-materialized at single precision for
    /// callers whose pipelines run in `f32`.
    pub fn directions_f32(
        &self,
        tess_order: usize,
        options: &DirectionOptions,
    ) -> Result<Array2<f32>, DmriError> {
        Ok(self.directions(tess_order, options)?.mapv(|v| v as f32))
    }

    /// Load the electrostatic-repulsion point set with `count` directions.
    /// Idempotent, like [`GradientTables::initialize`].
    pub fn load_electric_repulsion(&mut self, count: usize) -> Result<(), DmriError> {
        if self.elec.contains_key(&count) {
            return Ok(());
        }
        let path = self.root.join(format!("elec/Elec{count:03}.txt"));
        let table = load_direction_file(&path)?;
        log::debug!(
            "loaded electric-repulsion set {count} ({} directions)",
            table.nrows()
        );
        self.elec.insert(count, Arc::new(table));
        Ok(())
    }

    /// Derived copy of an electrostatic-repulsion point set.
    pub fn electric_repulsion(
        &self,
        count: usize,
        options: &DirectionOptions,
    ) -> Result<Array2<f64>, DmriError> {
        let canonical = self
            .elec
            .get(&count)
            .cloned()
            .ok_or(DmriError::NotInitialized {
                what: "electric-repulsion table",
            })?;
        derive_directions(&canonical, options)
    }
}

fn derive_directions(
    canonical: &Array2<f64>,
    options: &DirectionOptions,
) -> Result<Array2<f64>, DmriError> {
    match options.mode {
        CoordinateMode::SphericalToCartesian | CoordinateMode::SphericalToSpherical => {
            return Err(DmriError::Validation(
                "stored gradient tables are Cartesian; a spherical source mode is invalid"
                    .to_string(),
            ));
        }
        CoordinateMode::CartesianToCartesian | CoordinateMode::CartesianToSpherical => {}
    }

    let n = canonical.nrows();
    let rows = if options.duplicate { 2 * n } else { n };
    let mut out = Array2::<f64>::zeros((rows, 3));

    let sx = if options.flip_x { -1.0 } else { 1.0 };
    let sy = if options.flip_y { -1.0 } else { 1.0 };
    let sz = if options.flip_z { -1.0 } else { 1.0 };

    let mut j = 0;
    for i in 0..n {
        out[[j, 0]] = sx * canonical[[i, 0]];
        out[[j, 1]] = sy * canonical[[i, 1]];
        out[[j, 2]] = sz * canonical[[i, 2]];
        if options.duplicate {
            j += 1;
            out[[j, 0]] = -out[[j - 1, 0]];
            out[[j, 1]] = -out[[j - 1, 1]];
            out[[j, 2]] = -out[[j - 1, 2]];
        }
        j += 1;
    }

    if options.mode == CoordinateMode::CartesianToSpherical {
        out = cartesian_to_spherical(&out.view());
    }
    Ok(out)
}

/// Parse a 3-column direction file and normalize each row to unit length.
fn load_direction_file(path: &Path) -> Result<Array2<f64>, DmriError> {
    let text = std::fs::read_to_string(path).map_err(|source| DmriError::Resource {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    let mut rows = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(DmriError::malformed_resource(
                path.to_path_buf(),
                format!("line {}: expected 3 columns, found {}", lineno + 1, fields.len()),
            ));
        }
        let mut row = [0.0_f64; 3];
        for (k, field) in fields.iter().enumerate() {
            row[k] = field.parse::<f64>().map_err(|e| {
                DmriError::malformed_resource(
                    path.to_path_buf(),
                    format!("line {}: {e}", lineno + 1),
                )
            })?;
        }
        let norm = (row[0] * row[0] + row[1] * row[1] + row[2] * row[2]).sqrt();
        if norm == 0.0 {
            return Err(DmriError::malformed_resource(
                path.to_path_buf(),
                format!("line {}: zero-length direction", lineno + 1),
            ));
        }
        values.extend(row.iter().map(|v| v / norm));
        rows += 1;
    }

    Array2::from_shape_vec((rows, 3), values).map_err(|e| {
        DmriError::malformed_resource(path.to_path_buf(), format!("bad shape: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy_table() -> Array2<f64> {
        array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
    }

    #[test]
    fn duplicate_interleaves_antipodal_rows() {
        let out = derive_directions(&toy_table(), &DirectionOptions::duplicated()).unwrap();
        assert_eq!(out.nrows(), 6);
        for k in 0..3 {
            for c in 0..3 {
                assert_eq!(out[[2 * k + 1, c]], -out[[2 * k, c]]);
            }
        }
    }

    #[test]
    fn flips_happen_before_duplication() {
        let opts = DirectionOptions {
            duplicate: true,
            flip_x: true,
            ..DirectionOptions::default()
        };
        let out = derive_directions(&toy_table(), &opts).unwrap();
        // Row 0 is the flipped +x direction, row 1 its negation.
        assert_eq!(out[[0, 0]], -1.0);
        assert_eq!(out[[1, 0]], 1.0);
    }

    #[test]
    fn spherical_source_modes_are_rejected() {
        for mode in [
            CoordinateMode::SphericalToCartesian,
            CoordinateMode::SphericalToSpherical,
        ] {
            let opts = DirectionOptions {
                mode,
                ..DirectionOptions::default()
            };
            assert!(matches!(
                derive_directions(&toy_table(), &opts),
                Err(DmriError::Validation(_))
            ));
        }
    }

    #[test]
    fn invalid_orders_are_rejected() {
        let mut tables = GradientTables::new("data/directions");
        assert!(matches!(
            tables.initialize(0),
            Err(DmriError::Validation(_))
        ));
        assert!(matches!(
            tables.initialize(8),
            Err(DmriError::Validation(_))
        ));
    }

    #[test]
    fn query_before_initialize_fails() {
        let tables = GradientTables::new("data/directions");
        assert!(matches!(
            tables.directions(3, &DirectionOptions::default()),
            Err(DmriError::NotInitialized { .. })
        ));
    }

    #[test]
    fn missing_resource_is_fatal() {
        let mut tables = GradientTables::new("/nonexistent/resource/root");
        assert!(matches!(
            tables.initialize(1),
            Err(DmriError::Resource { .. })
        ));
    }
}
