//! Writing sealed artefacts to disk.
//!
//! The file name carries the run instant at second resolution:
//! `benchmark_output_YYYYMMDDTHHMMSSZ.json`. The content is
//! [`Artefact::to_pretty_json`] without a trailing newline.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::artefact::Artefact;
use crate::error::{C8Error, C8Result};

/// File name for an artefact produced at `now`.
pub fn output_file_name(now: DateTime<Utc>) -> String {
    now.format("benchmark_output_%Y%m%dT%H%M%SZ.json").to_string()
}

/// Write `artefact` into `dir` under [`output_file_name`] and return the path.
pub fn write_artefact(artefact: &Artefact, dir: &Path, now: DateTime<Utc>) -> C8Result<PathBuf> {
    let path = dir.join(output_file_name(now));
    fs::write(&path, artefact.to_pretty_json()).map_err(|source| C8Error::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote benchmark artefact");
    Ok(path)
}
