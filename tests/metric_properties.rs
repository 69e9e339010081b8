//! Property tests for the metric functions.

use std::f64::consts::PI;

use proptest::prelude::*;

use c8_coherence::context::wrap_phase;
use c8_coherence::metrics::{
    delta_entropy, energy, l2_norm, lyapunov, memory_retention, plv, sigma,
};

fn buffer(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3f64, 0..max_len)
}

fn non_empty_buffer(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3f64, 1..max_len)
}

proptest! {
    #[test]
    fn prop_energy_is_non_negative(s in buffer(128)) {
        prop_assert!(energy(&s) >= 0.0);
    }

    #[test]
    fn prop_sigma_equals_plv(p in buffer(128)) {
        let a = sigma(&p);
        let b = plv(&p);
        prop_assert!(a == b || (a.is_nan() && b.is_nan()));
    }

    #[test]
    fn prop_sigma_is_bounded(p in non_empty_buffer(128)) {
        let s = sigma(&p);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&s), "sigma={}", s);
    }

    #[test]
    fn prop_lyapunov_is_antisymmetric(a in buffer(64), b in buffer(64)) {
        prop_assert_eq!(lyapunov(&a, &b), -lyapunov(&b, &a));
    }

    #[test]
    fn prop_mri_self_similarity(x in non_empty_buffer(64)) {
        prop_assume!(l2_norm(&x) > 1e-6);
        let m = memory_retention(&x, &x);
        prop_assert!((m - 1.0).abs() < 1e-9, "mri={}", m);
    }

    #[test]
    fn prop_mri_zero_guard(x in buffer(64)) {
        let zeros = vec![0.0; x.len()];
        prop_assert_eq!(memory_retention(&zeros, &x), 0.0);
        prop_assert_eq!(memory_retention(&x, &zeros), 0.0);
    }

    #[test]
    fn prop_mri_is_bounded(a in buffer(64), b in buffer(64)) {
        let n = a.len().min(b.len());
        let m = memory_retention(&a[..n], &b[..n]);
        prop_assert!(m.abs() <= 1.0 + 1e-12, "mri={}", m);
    }

    #[test]
    fn prop_delta_entropy_is_antisymmetric(a in non_empty_buffer(64), b in non_empty_buffer(64)) {
        prop_assume!(l2_norm(&a) > 0.0 && l2_norm(&b) > 0.0);
        prop_assert_eq!(delta_entropy(&a, &b), -delta_entropy(&b, &a));
    }

    #[test]
    fn prop_delta_entropy_ignores_sign(a in non_empty_buffer(64)) {
        prop_assume!(l2_norm(&a) > 0.0);
        let negated: Vec<f64> = a.iter().map(|v| -v).collect();
        prop_assert_eq!(delta_entropy(&a, &negated), 0.0);
    }

    #[test]
    fn prop_wrapped_phase_within_pi(t in -100.0..100.0f64) {
        let p = wrap_phase(t);
        prop_assert!((-PI..=PI).contains(&p), "wrap_phase({}) = {}", t, p);
    }
}
