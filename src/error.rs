//! Error types for the C8 benchmark pipeline.
//!
//! The numeric core is total: metric functions return `f64` and let a
//! degenerate input surface as NaN or infinity. Errors are reserved for the
//! edges of the pipeline.
//!
//! ```text
//! C8Error
//! ├── InvalidContextSize  (build_context(0), zero size in config)
//! ├── DigestMismatch      (Artefact::verify)
//! └── Io                  (persist::write_artefact)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenient `Result` alias used across the crate.
pub type C8Result<T> = Result<T, C8Error>;

/// Top-level error type for the C8 benchmark.
#[derive(Debug, Error)]
pub enum C8Error {
    /// A context was requested with zero samples.
    #[error("context size must be a positive integer, got {requested}")]
    InvalidContextSize {
        /// The rejected size.
        requested: usize,
    },

    /// The stored digest does not match the digest of the artefact body.
    #[error("artefact digest mismatch: stored {expected}, recomputed {actual}")]
    DigestMismatch {
        /// Digest carried by the artefact.
        expected: String,
        /// Digest recomputed from the canonical body.
        actual: String,
    },

    /// Writing the artefact to disk failed.
    #[error("failed to write artefact to {path:?}: {source}")]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
