//! Bundled example configurations.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AnalyzerError, Result};

/// `(file name, contents)` of every bundled sample, in write order.
pub const SAMPLES: [(&str, &str); 3] = [
  ("nxlog_sample.conf", include_str!("samples/nxlog_sample.conf")),
  ("nxlog_web.conf", include_str!("samples/nxlog_web.conf")),
  ("nxlog_db.conf", include_str!("samples/nxlog_db.conf")),
];

/// Writes the samples into `dir`, creating it if needed, and returns their paths.
/// Existing files with the same names are overwritten.
pub fn write_samples(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
  let dir = dir.as_ref();
  fs::create_dir_all(dir).map_err(|e| AnalyzerError::export(dir, e))?;
  let mut written = Vec::with_capacity(SAMPLES.len());
  for (name, contents) in SAMPLES {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|e| AnalyzerError::export(&path, e))?;
    written.push(path);
  }
  info!(dir = %dir.display(), count = written.len(), "sample configurations written");
  Ok(written)
}
