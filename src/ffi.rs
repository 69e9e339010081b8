//! Python FFI bindings via PyO3.
//!
//! Exposes the metric functions and the sealed benchmark run to Python.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! import c8_coherence as c8
//!
//! ctx = c8.build_context(4096)
//! print(c8.sigma(ctx.phases))            # ~0.000244
//! print(c8.memory_retention(ctx.state, ctx.state))  # 1.0
//!
//! artefact = c8.run_core()
//! print(artefact.results["Energy"])      # ~2047.5
//! assert artefact.verify()
//! open("out.json", "w").write(artefact.to_json())
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::artefact::{self, Artefact};
use crate::config::DEFAULT_CONTEXT_SIZE;
use crate::context::{self, CoherenceContext};
use crate::metrics;

// ── Metric functions ──────────────────────────────────────────────────────────

/// Global phase coherence: |mean(exp(i·phases))|, in [0, 1].
#[pyfunction]
fn sigma(phases: Vec<f64>) -> f64 {
    metrics::sigma(&phases)
}

/// Phase locking value (same as sigma).
#[pyfunction]
fn plv(phases: Vec<f64>) -> f64 {
    metrics::plv(&phases)
}

/// Trapezoidal integral of signal² with unit spacing.
#[pyfunction]
fn energy(signal: Vec<f64>) -> f64 {
    metrics::energy(&signal)
}

/// Shannon entropy delta H(b) − H(a). NaN when a buffer is all zeros.
#[pyfunction]
fn delta_entropy(a: Vec<f64>, b: Vec<f64>) -> f64 {
    metrics::delta_entropy(&a, &b)
}

/// Norm growth ‖nxt‖ − ‖prev‖.
#[pyfunction]
fn lyapunov(prev: Vec<f64>, nxt: Vec<f64>) -> f64 {
    metrics::lyapunov(&prev, &nxt)
}

/// Cosine similarity of two state vectors; 0.0 when either norm is zero.
#[pyfunction]
fn memory_retention(a: Vec<f64>, b: Vec<f64>) -> f64 {
    metrics::memory_retention(&a, &b)
}

// ── CoherenceContext ──────────────────────────────────────────────────────────

/// Read-only input buffers of one run.
///
/// Attributes:
///     time:   n samples over [0, 2π]
///     signal: sin(time)
///     phases: angle of exp(i·time), in (−π, π]
///     state:  cos(time)
#[pyclass(name = "CoherenceContext")]
pub struct PyCoherenceContext {
    inner: CoherenceContext,
}

#[pymethods]
impl PyCoherenceContext {
    /// Time axis as a list of floats.
    #[getter]
    pub fn time(&self) -> Vec<f64> {
        self.inner.time().to_vec()
    }

    /// sin(time) as a list of floats.
    #[getter]
    pub fn signal(&self) -> Vec<f64> {
        self.inner.signal().to_vec()
    }

    /// Wrapped phase angles as a list of floats.
    #[getter]
    pub fn phases(&self) -> Vec<f64> {
        self.inner.phases().to_vec()
    }

    /// cos(time) as a list of floats.
    #[getter]
    pub fn state(&self) -> Vec<f64> {
        self.inner.state().to_vec()
    }

    /// Spacing of the time axis.
    #[getter]
    pub fn time_step(&self) -> f64 {
        self.inner.time_step()
    }

    /// Number of samples.
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("CoherenceContext(n={})", self.inner.len())
    }
}

/// Build the input buffers for `n` samples (n must be positive).
#[pyfunction]
#[pyo3(signature = (n = DEFAULT_CONTEXT_SIZE.get()))]
fn build_context(n: usize) -> PyResult<PyCoherenceContext> {
    context::build_context(n)
        .map(|inner| PyCoherenceContext { inner })
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

// ── Artefact ──────────────────────────────────────────────────────────────────

/// Sealed benchmark artefact.
///
/// Example::
///
///     artefact = run_core()
///     artefact.sha256      # 64 lowercase hex chars
///     artefact.results     # {"Sigma": ..., "PLV": ..., ..., "MRI": ...}
///     artefact.verify()    # True
#[pyclass(name = "Artefact")]
pub struct PyArtefact {
    inner: Artefact,
}

#[pymethods]
impl PyArtefact {
    /// Framework label.
    #[getter]
    pub fn framework(&self) -> &str {
        self.inner.framework()
    }

    /// Anchor label.
    #[getter]
    pub fn anchor(&self) -> &str {
        self.inner.anchor()
    }

    /// ISO-8601 UTC timestamp with trailing Z.
    #[getter]
    pub fn timestamp(&self) -> &str {
        self.inner.timestamp()
    }

    /// Hex SHA-256 of the canonical body.
    #[getter]
    pub fn sha256(&self) -> &str {
        self.inner.sha256()
    }

    /// Metric values keyed by name, in declaration order.
    #[getter]
    pub fn results<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for (metric, value) in self.inner.results().iter() {
            dict.set_item(metric.key(), value)?;
        }
        Ok(dict)
    }

    /// True when the stored digest matches the recomputed one.
    pub fn verify(&self) -> bool {
        self.inner.verify().is_ok()
    }

    /// The canonical text the digest is computed over.
    pub fn canonical_json(&self) -> String {
        self.inner.body().canonical_json()
    }

    /// Pretty-printed JSON including the digest.
    pub fn to_json(&self) -> String {
        self.inner.to_pretty_json()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Artefact(sha256={:?})", self.inner.sha256())
    }
}

/// Run the benchmark with default settings at the current UTC time.
#[pyfunction]
fn run_core() -> PyArtefact {
    PyArtefact {
        inner: artefact::run_core(),
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// C8 Coherence Benchmark Python bindings.
#[pymodule]
pub fn c8_coherence(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCoherenceContext>()?;
    m.add_class::<PyArtefact>()?;
    m.add_function(wrap_pyfunction!(sigma, m)?)?;
    m.add_function(wrap_pyfunction!(plv, m)?)?;
    m.add_function(wrap_pyfunction!(energy, m)?)?;
    m.add_function(wrap_pyfunction!(delta_entropy, m)?)?;
    m.add_function(wrap_pyfunction!(lyapunov, m)?)?;
    m.add_function(wrap_pyfunction!(memory_retention, m)?)?;
    m.add_function(wrap_pyfunction!(build_context, m)?)?;
    m.add_function(wrap_pyfunction!(run_core, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_CONTEXT_SIZE", DEFAULT_CONTEXT_SIZE.get())?;
    Ok(())
}
