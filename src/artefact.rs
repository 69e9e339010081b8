/*
 * C8 Coherence Benchmark.
 *
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Benchmark run and the sealed, self-verifying artefact it produces.
//!
//! ```text
//! BenchmarkConfig → CoherenceContext → MetricResults → ArtefactBody ──seal()──→ Artefact
//!                                                          │                      │
//!                                                 canonical_json()          body + sha256
//!                                                          └──── SHA-256 ────────┘
//! ```
//!
//! # Invariants
//!
//! - The digest covers the canonical encoding of the body only; an
//!   [`ArtefactBody`] has no digest field, so it cannot leak into its own hash.
//! - `sha256` is appended last and is never rehashed.
//! - An [`Artefact`] is read-only after sealing.
//! - Non-finite metric values are sealed as-is; the run logs a warning and
//!   succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::canonical::JsonNode;
use crate::config::BenchmarkConfig;
use crate::context::CoherenceContext;
use crate::error::{C8Error, C8Result};
use crate::metrics::{Metric, MetricResults};

// ─── Unsigned body ──────────────────────────────────────────────────────────

/// Everything an artefact records, before the digest is attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtefactBody {
    /// Framework label.
    pub framework: String,
    /// Anchor label.
    pub anchor: String,
    /// The six metric values.
    pub results: MetricResults,
    /// ISO-8601 UTC time of the run with a literal `Z` suffix.
    pub timestamp: String,
}

impl ArtefactBody {
    /// Assemble a body from the run configuration, its results and the run instant.
    pub fn new(config: &BenchmarkConfig, results: MetricResults, now: DateTime<Utc>) -> Self {
        Self {
            framework: config.framework.clone(),
            anchor: config.anchor.clone(),
            results,
            timestamp: format_timestamp(now),
        }
    }

    /// JSON tree in declaration order.
    pub fn to_node(&self) -> JsonNode<'_> {
        let results = self
            .results
            .iter()
            .map(|(metric, value)| (metric.key(), JsonNode::Number(value)))
            .collect();
        JsonNode::Object(vec![
            ("framework", JsonNode::Str(&self.framework)),
            ("anchor", JsonNode::Str(&self.anchor)),
            ("results", JsonNode::Object(results)),
            ("timestamp", JsonNode::Str(&self.timestamp)),
        ])
    }

    /// The canonical encoding the digest is computed over.
    pub fn canonical_json(&self) -> String {
        self.to_node().to_canonical_string()
    }

    /// Lowercase hex SHA-256 of [`canonical_json`](Self::canonical_json).
    pub fn digest(&self) -> String {
        sha256_hex(&self.canonical_json())
    }

    /// Bind the digest of this body into a finished [`Artefact`].
    pub fn seal(self) -> Artefact {
        let sha256 = self.digest();
        Artefact { body: self, sha256 }
    }
}

// ─── Sealed artefact ────────────────────────────────────────────────────────

/// A sealed benchmark artefact: the body plus the digest of its canonical form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artefact {
    #[serde(flatten)]
    body: ArtefactBody,
    sha256: String,
}

impl Artefact {
    /// The sealed body.
    pub fn body(&self) -> &ArtefactBody {
        &self.body
    }

    /// Framework label.
    pub fn framework(&self) -> &str {
        &self.body.framework
    }

    /// Anchor label.
    pub fn anchor(&self) -> &str {
        &self.body.anchor
    }

    /// Metric values.
    pub fn results(&self) -> &MetricResults {
        &self.body.results
    }

    /// Run timestamp, e.g. `2026-02-23T12:00:00.123456Z`.
    pub fn timestamp(&self) -> &str {
        &self.body.timestamp
    }

    /// Stored digest: 64 lowercase hex characters.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Recompute the digest of the body and compare it with the stored one.
    pub fn verify(&self) -> C8Result<()> {
        let actual = self.body.digest();
        if actual == self.sha256 {
            Ok(())
        } else {
            Err(C8Error::DigestMismatch {
                expected: self.sha256.clone(),
                actual,
            })
        }
    }

    /// JSON tree in declaration order, digest last.
    pub fn to_node(&self) -> JsonNode<'_> {
        match self.body.to_node() {
            JsonNode::Object(mut members) => {
                members.push(("sha256", JsonNode::Str(&self.sha256)));
                JsonNode::Object(members)
            }
            other => other,
        }
    }

    /// Two-space indented JSON in declaration order, as written to disk.
    pub fn to_pretty_json(&self) -> String {
        self.to_node().to_pretty_string()
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Lowercase hex SHA-256 of the UTF-8 bytes of `text`.
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`.
///
/// Microseconds are written only when non-zero; the `Z` is a literal suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    let micros = now.timestamp_subsec_micros().min(999_999);
    let mut ts = now.format("%Y-%m-%dT%H:%M:%S").to_string();
    if micros != 0 {
        ts.push_str(&format!(".{:06}", micros));
    }
    ts.push('Z');
    ts
}

// ─── Run ────────────────────────────────────────────────────────────────────

/// Run the benchmark with the default configuration at the current UTC time.
pub fn run_core() -> Artefact {
    run_with(&BenchmarkConfig::default(), Utc::now())
}

/// Run the benchmark with `config`, stamping the artefact with `now`.
///
/// Deterministic for a fixed `config` and `now`.
pub fn run_with(config: &BenchmarkConfig, now: DateTime<Utc>) -> Artefact {
    let ctx = CoherenceContext::new(config.context_size);
    let results = MetricResults::compute(&ctx);

    let anomalies = results.non_finite();
    if !anomalies.is_empty() {
        let keys: Vec<&str> = anomalies.iter().map(Metric::key).collect();
        warn!(metrics = ?keys, "non-finite metric values recorded in artefact");
    }

    let artefact = ArtefactBody::new(config, results, now).seal();
    info!(
        sha256 = %artefact.sha256(),
        timestamp = %artefact.timestamp(),
        samples = ctx.len(),
        "sealed benchmark artefact"
    );
    artefact
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn frozen(micro: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(2026, 2, 23)
            .unwrap()
            .and_hms_micro_opt(12, 0, 0, micro)
            .unwrap();
        Utc.from_utc_datetime(&naive)
    }

    fn fixed_body() -> ArtefactBody {
        ArtefactBody {
            framework: "C8 Coherence Benchmark".to_string(),
            anchor: "C8".to_string(),
            results: MetricResults {
                sigma: 0.25,
                plv: 0.25,
                energy: 2047.5,
                delta_s: 0.0,
                lyapunov: 0.0,
                mri: 1.0,
            },
            timestamp: "2026-02-23T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_timestamp_without_micros() {
        assert_eq!(format_timestamp(frozen(0)), "2026-02-23T12:00:00Z");
    }

    #[test]
    fn test_timestamp_with_micros() {
        assert_eq!(format_timestamp(frozen(1_250)), "2026-02-23T12:00:00.001250Z");
    }

    #[test]
    fn test_canonical_json_layout() {
        assert_eq!(
            fixed_body().canonical_json(),
            concat!(
                r#"{"anchor": "C8", "framework": "C8 Coherence Benchmark", "#,
                r#""results": {"DeltaS": 0.0, "Energy": 2047.5, "Lyapunov": 0.0, "#,
                r#""MRI": 1.0, "PLV": 0.25, "Sigma": 0.25}, "#,
                r#""timestamp": "2026-02-23T12:00:00Z"}"#
            )
        );
    }

    #[test]
    fn test_known_digest() {
        // SHA-256 of the canonical text asserted above.
        assert_eq!(
            fixed_body().digest(),
            "b1b9519499bb8aa49c24ec5215027bcf4b5d34eedab8b640146c33cd88f3ce7e"
        );
    }

    #[test]
    fn test_seal_appends_digest_last() {
        let artefact = fixed_body().seal();
        assert_eq!(artefact.sha256().len(), 64);
        assert!(artefact.sha256().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        let pretty = artefact.to_pretty_json();
        let sha_pos = pretty.find("\"sha256\"").unwrap();
        let ts_pos = pretty.find("\"timestamp\"").unwrap();
        assert!(sha_pos > ts_pos);
        assert!(pretty.trim_end().ends_with('}'));
    }

    #[test]
    fn test_pretty_json_layout() {
        let artefact = fixed_body().seal();
        let expected = format!(
            concat!(
                "{{\n",
                "  \"framework\": \"C8 Coherence Benchmark\",\n",
                "  \"anchor\": \"C8\",\n",
                "  \"results\": {{\n",
                "    \"Sigma\": 0.25,\n",
                "    \"PLV\": 0.25,\n",
                "    \"Energy\": 2047.5,\n",
                "    \"DeltaS\": 0.0,\n",
                "    \"Lyapunov\": 0.0,\n",
                "    \"MRI\": 1.0\n",
                "  }},\n",
                "  \"timestamp\": \"2026-02-23T12:00:00Z\",\n",
                "  \"sha256\": \"{}\"\n",
                "}}"
            ),
            artefact.sha256()
        );
        assert_eq!(artefact.to_pretty_json(), expected);
    }

    #[test]
    fn test_verify_detects_tampering() {
        let artefact = fixed_body().seal();
        assert!(artefact.verify().is_ok());

        let mut tampered = artefact.clone();
        tampered.body.results.energy = 2048.0;
        let err = tampered.verify().unwrap_err();
        match err {
            C8Error::DigestMismatch { expected, actual } => {
                assert_eq!(expected, artefact.sha256());
                assert_ne!(actual, expected);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_with_is_deterministic() {
        let cfg = BenchmarkConfig::new().with_context_size(256).unwrap();
        let a = run_with(&cfg, frozen(42));
        let b = run_with(&cfg, frozen(42));
        assert_eq!(a.results(), b.results());
        assert_eq!(a.sha256(), b.sha256());
        assert_eq!(a.timestamp(), "2026-02-23T12:00:00.000042Z");
    }

    #[test]
    fn test_run_with_nan_is_sealed() {
        // A single sample makes the entropy normaliser zero.
        let cfg = BenchmarkConfig::new().with_context_size(1).unwrap();
        let artefact = run_with(&cfg, frozen(0));
        assert!(artefact.results().delta_s.is_nan());
        assert!(artefact.body().canonical_json().contains("\"DeltaS\": NaN"));
        assert!(artefact.verify().is_ok());
    }

    #[test]
    fn test_serde_round_trip_keeps_nan_and_digest() {
        let cfg = BenchmarkConfig::new().with_context_size(1).unwrap();
        let artefact = run_with(&cfg, frozen(0));

        let text = serde_json::to_string(&artefact).unwrap();
        assert!(text.contains(r#""DeltaS":"NaN""#), "{}", text);
        assert!(text.contains(r#""Energy":0.0"#), "{}", text);

        let restored: Artefact = serde_json::from_str(&text).unwrap();
        assert!(restored.results().delta_s.is_nan());
        assert_eq!(restored.sha256(), artefact.sha256());
        assert_eq!(restored.body().canonical_json(), artefact.body().canonical_json());
        assert!(restored.verify().is_ok());
    }

    #[test]
    fn test_pretty_json_writes_bare_nan_token() {
        let cfg = BenchmarkConfig::new().with_context_size(1).unwrap();
        let pretty = run_with(&cfg, frozen(0)).to_pretty_json();
        assert!(pretty.contains("\"DeltaS\": NaN,"));
        assert!(pretty.contains("\"Energy\": 0.0,"));
    }

    #[test]
    fn test_run_core_uses_default_labels() {
        let artefact = run_core();
        assert_eq!(artefact.framework(), "C8 Coherence Benchmark");
        assert_eq!(artefact.anchor(), "C8");
        assert!(artefact.timestamp().ends_with('Z'));
        assert!(artefact.verify().is_ok());
    }
}
