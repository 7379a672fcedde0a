//! Per-document pipeline (read → parse → analyze → render) and the concurrent batch runner.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::config_parser::parse_config;
use crate::error::{AnalyzerError, Result};
use crate::graphviz::render_dot;
use crate::types::{FlowGraph, ParameterRecord};

/// Extension of the configuration files picked up by [`discover_configs`].
pub const CONFIG_EXTENSION: &str = "conf";

/// Everything derived from one configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
  /// File stem, used to name the document's output files.
  pub name: String,
  pub path: PathBuf,
  pub records: Vec<ParameterRecord>,
  pub graph: FlowGraph,
  /// DOT rendering of `graph`.
  pub dot: String,
}

impl DocumentAnalysis {
  /// Parses and analyzes already-loaded document text.
  pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
    let path = path.into();
    let name = document_name(&path);
    let parsed = parse_config(text);
    let graph = parsed.analyze();
    let dot = render_dot(&graph);
    Self {
      name,
      path,
      records: parsed.records,
      graph,
      dot,
    }
  }
}

fn document_name(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}

/// Reads and analyzes one document.
#[instrument(level = "trace", skip(path), fields(path = %path.as_ref().display()))]
pub fn analyze_document(path: impl AsRef<Path>) -> Result<DocumentAnalysis> {
  let path = path.as_ref();
  let text = std::fs::read_to_string(path).map_err(|e| AnalyzerError::from_read(path, e))?;
  Ok(DocumentAnalysis::from_text(path, &text))
}

async fn analyze_document_async(path: PathBuf) -> Result<DocumentAnalysis> {
  let text = tokio::fs::read_to_string(&path)
    .await
    .map_err(|e| AnalyzerError::from_read(&path, e))?;
  Ok(DocumentAnalysis::from_text(path, &text))
}

/// Outcome of [`analyze_batch`]: analyzed documents in input order, and the errors of those
/// that could not be read.
#[derive(Debug, Default)]
pub struct BatchReport {
  pub documents: Vec<DocumentAnalysis>,
  pub skipped: Vec<AnalyzerError>,
}

impl BatchReport {
  pub fn processed(&self) -> usize {
    self.documents.len()
  }

  pub fn skipped(&self) -> usize {
    self.skipped.len()
  }
}

/// Analyzes `paths` with at most `concurrency` documents in flight. Results keep input order;
/// a document that cannot be read is logged and skipped without stopping the batch.
#[instrument(level = "trace", skip(paths), fields(documents = paths.len()))]
pub async fn analyze_batch(paths: Vec<PathBuf>, concurrency: usize) -> BatchReport {
  let results: Vec<Result<DocumentAnalysis>> = stream::iter(paths)
    .map(analyze_document_async)
    .buffered(concurrency.max(1))
    .collect()
    .await;

  let mut report = BatchReport::default();
  for result in results {
    match result {
      Ok(document) => {
        info!(
          document = %document.name,
          records = document.records.len(),
          flows = document.graph.flows.len(),
          "document analyzed"
        );
        report.documents.push(document);
      }
      Err(e) => {
        warn!(error = %e, "skipping document");
        report.skipped.push(e);
      }
    }
  }
  info!(
    processed = report.processed(),
    skipped = report.skipped(),
    "batch complete"
  );
  report
}

/// `*.conf` files directly inside `dir`, sorted by path.
pub fn discover_configs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
  let dir = dir.as_ref();
  let entries = std::fs::read_dir(dir).map_err(|e| AnalyzerError::from_read(dir, e))?;
  let mut paths = Vec::new();
  for entry in entries {
    let path = entry.map_err(|e| AnalyzerError::from_read(dir, e))?.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == CONFIG_EXTENSION) {
      paths.push(path);
    }
  }
  paths.sort();
  Ok(paths)
}
