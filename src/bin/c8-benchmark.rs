//! `c8-benchmark` binary — run the C8 Coherence Benchmark once and persist it.
//!
//! Takes no arguments. Computes the six coherence metrics over the default
//! 4096-sample context, seals them into a SHA-256 verifiable artefact and
//! writes it to `benchmark_output_<YYYYMMDDTHHMMSSZ>.json` in the working
//! directory.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | Artefact written (non-finite metrics are recorded, not fatal) |
//! | 1    | The artefact could not be written |

use std::path::Path;

use chrono::Utc;
use tracing_subscriber::filter::LevelFilter;

use c8_coherence::artefact::run_with;
use c8_coherence::config::BenchmarkConfig;
use c8_coherence::persist::write_artefact;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let now = Utc::now();
    let artefact = run_with(&BenchmarkConfig::default(), now);

    let path = match write_artefact(&artefact, Path::new("."), now) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    println!("C8 Coherence Benchmark executed successfully.");
    println!("Output saved to: {file_name}");
    println!("SHA256: {}", artefact.sha256());
}
