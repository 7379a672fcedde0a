//! Tests for `AnalyzerError`.

use crate::error::AnalyzerError;
use std::io::{Error, ErrorKind};

#[test]
fn not_found_is_classified() {
  let e = AnalyzerError::from_read("a.conf", Error::new(ErrorKind::NotFound, "gone"));
  assert!(matches!(e, AnalyzerError::FileNotFound { .. }));
  assert!(e.to_string().contains("a.conf"));
  assert!(e.to_string().contains("not found"));
}

#[test]
fn other_io_errors_are_unreadable() {
  let e = AnalyzerError::from_read(
    "b.conf",
    Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
  );
  assert!(matches!(e, AnalyzerError::FileUnreadable { .. }));
  assert!(e.to_string().contains("valid UTF-8"));
}

#[test]
fn export_error_names_path() {
  let e = AnalyzerError::export("out/x.csv", Error::new(ErrorKind::PermissionDenied, "denied"));
  assert!(e.to_string().contains("out/x.csv"));
}
