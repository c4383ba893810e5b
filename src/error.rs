use std::path::PathBuf;
use thiserror::Error;

/// A comprehensive error type for all operations within the numerical core.
///
/// Every failure is local, synchronous, and non-recoverable in place: the
/// failing call signals immediately and leaves shared caches untouched, so
/// the surrounding pipeline can decide whether to skip a voxel, abort, or
/// log and continue.
#[derive(Error, Debug)]
pub enum DmriError {
    #[error("Value {value} is outside the valid domain {domain}.")]
    Domain { value: f64, domain: String },

    #[error("Invalid parameter combination: {0}")]
    Validation(String),

    #[error(
        "Order {order} is outside the implemented closed-form set for {context}."
    )]
    UnsupportedOrder { order: i32, context: &'static str },

    #[error("{what} queried before initialization; run warm-up first.")]
    NotInitialized { what: &'static str },

    #[error("Failed to load backing resource {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Linear algebra failure: {0}")]
    Linalg(#[from] crate::linalg::FaerLinalgError),
}

impl DmriError {
    /// Shorthand for a malformed-resource error (parse failures surface as
    /// `InvalidData` I/O errors so the offending file is always named).
    pub(crate) fn malformed_resource(path: PathBuf, detail: String) -> Self {
        DmriError::Resource {
            path,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, detail),
        }
    }
}
