//! Benchmark configuration.
//!
//! The labels and buffer size stamped into every artefact live here as named
//! constants, gathered into [`BenchmarkConfig`] so tests and embedders can
//! override them.

use core::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{C8Error, C8Result};

/// Framework label written into every artefact.
pub const FRAMEWORK_LABEL: &str = "C8 Coherence Benchmark";

/// Anchor label written into every artefact.
pub const ANCHOR_LABEL: &str = "C8";

/// Default number of samples in each context buffer.
pub const DEFAULT_CONTEXT_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(n) => n,
    None => panic!("default context size must be non-zero"),
};

/// Parameters for one benchmark run.
///
/// Missing fields deserialize to their defaults; a zero `context_size` is
/// rejected at deserialization time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Label stored under `framework`.
    pub framework: String,
    /// Label stored under `anchor`.
    pub anchor: String,
    /// Samples per context buffer.
    pub context_size: NonZeroUsize,
}

impl BenchmarkConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the context size, rejecting zero.
    pub fn with_context_size(self, n: usize) -> C8Result<Self> {
        let context_size =
            NonZeroUsize::new(n).ok_or(C8Error::InvalidContextSize { requested: n })?;
        Ok(Self {
            context_size,
            ..self
        })
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            framework: FRAMEWORK_LABEL.to_string(),
            anchor: ANCHOR_LABEL.to_string(),
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }
}
