//! # c8-coherence
//!
//! C8 Coherence Benchmark — deterministic coherence metrics sealed into a
//! SHA-256 verifiable artefact.
//!
//! ---
//!
//! ## One run, one artefact
//!
//! A run samples one full turn `[0, 2π]` into four co-indexed buffers, reduces
//! them to six scalar metrics, and seals the result:
//!
//! - **Σ / PLV**: how tightly the phase angles cluster on the unit circle.
//! - **Energy**: trapezoidal integral of the squared signal.
//! - **ΔS**: change in Shannon entropy between two magnitude distributions.
//! - **Lyapunov proxy**: growth of the Euclidean norm between two buffers.
//! - **MRI**: cosine similarity between two state vectors.
//!
//! The artefact's digest is computed over an explicit canonical JSON encoding
//! with sorted keys, so anyone holding the JSON can recompute and check it.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! BenchmarkConfig → CoherenceContext → MetricResults → ArtefactBody → Artefact → file
//!                      (context)          (metrics)     (canonical)   (sha256)   (persist)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`config`] | [`BenchmarkConfig`] | Labels and buffer size stamped into each artefact |
//! | [`context`] | [`CoherenceContext`] | Time axis, `sin`, wrapped phase and `cos` buffers |
//! | [`metrics`] | [`MetricResults`], [`Metric`] | The six pure metric functions |
//! | [`canonical`] | [`canonical::JsonNode`] | Canonical (sorted) and pretty JSON encoding |
//! | [`artefact`] | [`Artefact`], [`ArtefactBody`] | Run, seal, verify |
//! | [`persist`] | — | `benchmark_output_<UTC>.json` writer |
//! | [`error`] | [`C8Error`] | Error taxonomy |
//!
//! ## Example
//!
//! ```rust
//! use c8_coherence::{run_core, Metric};
//!
//! let artefact = run_core();
//! assert!(artefact.verify().is_ok());
//! assert!(artefact.results().get(Metric::Sigma) < 0.05);
//! ```
//!
//! ## Degenerate input
//!
//! Metric functions never fail. An all-zero buffer fed to
//! [`metrics::delta_entropy`] yields NaN, which is sealed into the artefact
//! as the token `NaN` and reported through [`MetricResults::non_finite`].
//!
//! ## License
//!
//! Business Source License 1.1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod config;
pub mod context;
pub mod metrics;
pub mod canonical;
pub mod artefact;
pub mod persist;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use artefact::{run_core, run_with, Artefact, ArtefactBody};
pub use config::BenchmarkConfig;
pub use context::{build_context, CoherenceContext};
pub use error::{C8Error, C8Result};
pub use metrics::{Metric, MetricResults};
