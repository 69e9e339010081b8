/*
 * C8 Coherence Benchmark.
 *
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Deterministic input buffers for a benchmark run.
//!
//! A [`CoherenceContext`] is four co-indexed buffers sampled over one full
//! turn `[0, 2π]`:
//!
//! ```text
//! time[i]   = i · 2π / (n − 1)          (last sample pinned to 2π)
//! signal[i] = sin(time[i])
//! phases[i] = arg(exp(i · time[i]))     wrapped into (−π, π]
//! state[i]  = cos(time[i])
//! ```
//!
//! # Invariants
//!
//! - All four buffers have exactly `n ≥ 1` elements.
//! - The context is read-only once built; buffers are exposed as slices.

use core::f64::consts::TAU;
use core::num::NonZeroUsize;

use num_complex::Complex64;
use tracing::debug;

use crate::error::{C8Error, C8Result};

/// Immutable bundle of the time axis and the three signals derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct CoherenceContext {
    time: Vec<f64>,
    signal: Vec<f64>,
    phases: Vec<f64>,
    state: Vec<f64>,
}

impl CoherenceContext {
    /// Sample all four buffers with `n` points over `[0, 2π]`.
    pub fn new(n: NonZeroUsize) -> Self {
        let time = linspace(0.0, TAU, n.get());
        let signal = time.iter().map(|t| t.sin()).collect();
        let phases = time.iter().map(|&t| wrap_phase(t)).collect();
        let state = time.iter().map(|t| t.cos()).collect();
        debug!(samples = n.get(), "built coherence context");
        Self {
            time,
            signal,
            phases,
            state,
        }
    }

    /// Number of samples in each buffer.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always `false`; a context holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Evenly spaced time axis over `[0, 2π]`.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// `sin(t)` sampled on the time axis.
    pub fn signal(&self) -> &[f64] {
        &self.signal
    }

    /// Instantaneous phase of `exp(i·t)`, in `(−π, π]`.
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// `cos(t)` sampled on the time axis.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Spacing between consecutive time samples; `0.0` for a single sample.
    pub fn time_step(&self) -> f64 {
        match self.time.len() {
            0 | 1 => 0.0,
            n => TAU / (n - 1) as f64,
        }
    }
}

/// Build a context of `n` samples, rejecting `n == 0`.
pub fn build_context(n: usize) -> C8Result<CoherenceContext> {
    let n = NonZeroUsize::new(n).ok_or(C8Error::InvalidContextSize { requested: n })?;
    Ok(CoherenceContext::new(n))
}

/// Angle of the unit phasor `exp(i·t)`.
///
/// Goes through the complex exponential so the branch cut matches `atan2`:
/// results lie in `(−π, π]`.
pub fn wrap_phase(t: f64) -> f64 {
    Complex64::new(0.0, t).exp().arg()
}

/// `n` evenly spaced samples over the closed interval `[start, stop]`.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            // Pin the endpoint so accumulated rounding never misses it.
            out[n - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn test_default_size_buffers_have_equal_length() {
        let ctx = build_context(4096).unwrap();
        assert_eq!(ctx.len(), 4096);
        assert_eq!(ctx.time().len(), 4096);
        assert_eq!(ctx.signal().len(), 4096);
        assert_eq!(ctx.phases().len(), 4096);
        assert_eq!(ctx.state().len(), 4096);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = build_context(0).unwrap_err();
        assert!(matches!(err, C8Error::InvalidContextSize { requested: 0 }));
    }

    #[test]
    fn test_time_axis_is_closed_interval() {
        let ctx = build_context(5).unwrap();
        let t = ctx.time();
        assert_eq!(t[0], 0.0);
        assert_eq!(t[4], TAU);
        assert!((t[1] - TAU / 4.0).abs() < 1e-15);
        assert!((ctx.time_step() - TAU / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_single_sample_context() {
        let ctx = build_context(1).unwrap();
        assert_eq!(ctx.time(), &[0.0]);
        assert_eq!(ctx.signal(), &[0.0]);
        assert_eq!(ctx.state(), &[1.0]);
        assert_eq!(ctx.time_step(), 0.0);
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_signal_and_state_follow_sin_cos() {
        let ctx = build_context(17).unwrap();
        for (i, &t) in ctx.time().iter().enumerate() {
            assert_eq!(ctx.signal()[i], t.sin());
            assert_eq!(ctx.state()[i], t.cos());
        }
    }

    #[test]
    fn test_phases_are_wrapped() {
        let ctx = build_context(4096).unwrap();
        for &p in ctx.phases() {
            assert!(p > -PI - 1e-12 && p <= PI, "phase {} outside (−π, π]", p);
        }
        // First half of the turn is unchanged by wrapping.
        assert!((ctx.phases()[1] - ctx.time()[1]).abs() < 1e-12);
        // Second half comes back negative.
        assert!(ctx.phases()[3000] < 0.0);
    }

    #[test]
    fn test_wrap_phase_matches_atan2() {
        for &t in &[0.0, 1.0, PI - 1e-9, 4.0, 5.5, TAU, 10.0, -2.0] {
            let expected = t.sin().atan2(t.cos());
            assert!(
                (wrap_phase(t) - expected).abs() < 1e-12,
                "wrap_phase({}) = {}, expected {}",
                t,
                wrap_phase(t),
                expected
            );
        }
    }

    #[test]
    fn test_full_turn_wraps_near_zero() {
        // 2π lands just below zero, not at π.
        assert!(wrap_phase(TAU).abs() < 1e-12);
    }
}
