/*
 * C8 Coherence Benchmark.
 *
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The six coherence metrics and the result set that carries them.
//!
//! | Metric | Function | Definition |
//! |---|---|---|
//! | Sigma | [`sigma`] | `|mean(exp(i·P))|`, in [0, 1] |
//! | PLV | [`plv`] | same as Sigma |
//! | Energy | [`energy`] | trapezoidal integral of `S[i]²`, unit spacing |
//! | DeltaS | [`delta_entropy`] | `H(b) − H(a)` over normalised magnitudes |
//! | Lyapunov | [`lyapunov`] | `‖nxt‖₂ − ‖prev‖₂` |
//! | MRI | [`memory_retention`] | cosine similarity, `0.0` on a zero norm |
//!
//! Every function is pure and total over `&[f64]`. Degenerate input is not
//! clamped: an all-zero buffer in [`delta_entropy`] yields NaN and that NaN
//! is carried into the artefact. [`MetricResults::non_finite`] reports it.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::CoherenceContext;

// ─── Metric functions ───────────────────────────────────────────────────────

/// Global phase coherence Σ: magnitude of the mean unit phasor.
///
/// `1.0` when every phase is identical, near `0.0` when phases are spread
/// uniformly around the circle. An empty buffer yields NaN.
pub fn sigma(phases: &[f64]) -> f64 {
    let sum: Complex64 = phases.iter().map(|&p| Complex64::new(0.0, p).exp()).sum();
    (sum / phases.len() as f64).norm()
}

/// Phase locking value. Identical to [`sigma`].
pub fn plv(phases: &[f64]) -> f64 {
    sigma(phases)
}

/// Signal energy: trapezoidal integral of `signal[i]²` over unit-spaced samples.
pub fn energy(signal: &[f64]) -> f64 {
    energy_with_spacing(signal, 1.0)
}

/// Trapezoidal integral of `signal[i]²` with sample spacing `dx`.
///
/// Fewer than two samples integrate to `+0.0`.
pub fn energy_with_spacing(signal: &[f64], dx: f64) -> f64 {
    signal
        .windows(2)
        .map(|w| dx * (w[0] * w[0] + w[1] * w[1]) / 2.0)
        .fold(0.0, |acc, v| acc + v)
}

/// Shannon entropy (nats) of the normalised magnitude distribution `|x| / Σ|x|`.
///
/// Zero probabilities are skipped. A buffer whose magnitudes sum to zero
/// divides by zero and yields NaN.
pub fn shannon_entropy(x: &[f64]) -> f64 {
    let total: f64 = x.iter().map(|v| v.abs()).sum();
    x.iter()
        .map(|v| v.abs() / total)
        .filter(|&p| p != 0.0)
        .fold(0.0, |acc, p| acc - p * p.ln())
}

/// Entropy delta `H(b) − H(a)`.
pub fn delta_entropy(a: &[f64], b: &[f64]) -> f64 {
    shannon_entropy(b) - shannon_entropy(a)
}

/// Euclidean norm. An empty buffer has norm `+0.0`.
pub fn l2_norm(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |acc, v| acc + v * v).sqrt()
}

/// Lyapunov proxy: growth of the Euclidean norm from `prev` to `nxt`.
///
/// Not a true Lyapunov exponent. Positive means the magnitude grew.
pub fn lyapunov(prev: &[f64], nxt: &[f64]) -> f64 {
    l2_norm(nxt) - l2_norm(prev)
}

/// Memory Retention Index: cosine similarity of two state vectors.
///
/// Elements are paired by position; the tail of a longer buffer is ignored.
/// Returns exactly `0.0` when either norm is zero.
pub fn memory_retention(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let den = l2_norm(a) * l2_norm(b);
    if den == 0.0 {
        0.0
    } else {
        dot / den
    }
}

// ─── Metric keys ────────────────────────────────────────────────────────────

/// Names of the six metrics, in artefact declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Global phase coherence.
    Sigma,
    /// Phase locking value.
    Plv,
    /// Signal energy.
    Energy,
    /// Shannon entropy delta.
    DeltaS,
    /// Norm-growth divergence proxy.
    Lyapunov,
    /// Memory Retention Index.
    Mri,
}

impl Metric {
    /// All metrics in declaration order.
    pub const ALL: [Metric; 6] = [
        Metric::Sigma,
        Metric::Plv,
        Metric::Energy,
        Metric::DeltaS,
        Metric::Lyapunov,
        Metric::Mri,
    ];

    /// Key used for this metric in the artefact's `results` object.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Sigma => "Sigma",
            Metric::Plv => "PLV",
            Metric::Energy => "Energy",
            Metric::DeltaS => "DeltaS",
            Metric::Lyapunov => "Lyapunov",
            Metric::Mri => "MRI",
        }
    }
}

// ─── Result set ─────────────────────────────────────────────────────────────

/// Serde representation of a metric value.
///
/// Finite values are plain JSON numbers. NaN and the infinities have no JSON
/// number form, so they travel as the strings `"NaN"`, `"Infinity"` and
/// `"-Infinity"`, the same tokens the canonical encoding uses.
mod float_token {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use crate::canonical::format_float;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&format_float(*value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatTokenVisitor)
    }

    struct FloatTokenVisitor;

    impl<'de> Visitor<'de> for FloatTokenVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(r#"a number or one of "NaN", "Infinity", "-Infinity""#)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }
}

/// The six metric values of one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricResults {
    /// Σ over the context phases.
    #[serde(rename = "Sigma", with = "float_token")]
    pub sigma: f64,
    /// PLV over the context phases.
    #[serde(rename = "PLV", with = "float_token")]
    pub plv: f64,
    /// Energy of the context signal.
    #[serde(rename = "Energy", with = "float_token")]
    pub energy: f64,
    /// Entropy delta between the signal and its negation.
    #[serde(rename = "DeltaS", with = "float_token")]
    pub delta_s: f64,
    /// Norm growth from `signal[..n-1]` to `signal[1..]`.
    #[serde(rename = "Lyapunov", with = "float_token")]
    pub lyapunov: f64,
    /// MRI of the context state against itself.
    #[serde(rename = "MRI", with = "float_token")]
    pub mri: f64,
}

impl MetricResults {
    /// Evaluate all six metrics over `ctx`, in declaration order.
    pub fn compute(ctx: &CoherenceContext) -> Self {
        let signal = ctx.signal();
        let negated: Vec<f64> = signal.iter().map(|v| -v).collect();
        let prev = &signal[..signal.len().saturating_sub(1)];
        let nxt = signal.get(1..).unwrap_or(&[]);

        let results = Self {
            sigma: sigma(ctx.phases()),
            plv: plv(ctx.phases()),
            energy: energy(signal),
            delta_s: delta_entropy(signal, &negated),
            lyapunov: lyapunov(prev, nxt),
            mri: memory_retention(ctx.state(), ctx.state()),
        };
        for (metric, value) in results.iter() {
            debug!(metric = metric.key(), value, "computed metric");
        }
        results
    }

    /// Value of a single metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sigma => self.sigma,
            Metric::Plv => self.plv,
            Metric::Energy => self.energy,
            Metric::DeltaS => self.delta_s,
            Metric::Lyapunov => self.lyapunov,
            Metric::Mri => self.mri,
        }
    }

    /// `(metric, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Metrics whose value is NaN or infinite.
    pub fn non_finite(&self) -> Vec<Metric> {
        self.iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(m, _)| m)
            .collect()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
