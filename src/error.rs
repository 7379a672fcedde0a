//! Errors surfaced at document and sink boundaries.
//!
//! Parsing itself never fails: malformed lines are ignored and unresolved route names
//! become `Unknown` flow endpoints. Only reading documents and writing outputs can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("configuration file '{}' not found", path.display())]
  FileNotFound { path: PathBuf },

  #[error("cannot read configuration file '{}': {source}", path.display())]
  FileUnreadable {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot write '{}': {source}", path.display())]
  Export {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot write CSV '{}': {source}", path.display())]
  Csv {
    path: PathBuf,
    #[source]
    source: csv::Error,
  },

  #[error("cannot write workbook '{}': {source}", path.display())]
  Workbook {
    path: PathBuf,
    #[source]
    source: rust_xlsxwriter::XlsxError,
  },

  #[error("JSON serialization failed: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnalyzerError {
  /// Classifies a read failure for `path`.
  pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    let path = path.into();
    if source.kind() == std::io::ErrorKind::NotFound {
      AnalyzerError::FileNotFound { path }
    } else {
      AnalyzerError::FileUnreadable { path, source }
    }
  }

  pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    AnalyzerError::Export {
      path: path.into(),
      source,
    }
  }

  pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
    AnalyzerError::Csv {
      path: path.into(),
      source,
    }
  }

  pub fn workbook(path: impl Into<PathBuf>, source: rust_xlsxwriter::XlsxError) -> Self {
    AnalyzerError::Workbook {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
