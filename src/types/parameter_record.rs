//! One parsed key-value assignment.

use serde::Serialize;

/// One parsed key-value assignment, in document-scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRecord {
  /// Tag name of the enclosing block (e.g. `Input`, `Route`).
  pub section_type: String,
  /// Name following the tag.
  pub section_name: String,
  pub parameter: String,
  /// Value with one layer of surrounding quotes removed. `Exec` values may span lines
  /// (tagged block) or be ` | `-joined (implicit run).
  pub value: String,
}

impl ParameterRecord {
  pub fn new(
    section_type: impl Into<String>,
    section_name: impl Into<String>,
    parameter: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    Self {
      section_type: section_type.into(),
      section_name: section_name.into(),
      parameter: parameter.into(),
      value: value.into(),
    }
  }

  /// True for `Exec` records, whatever their case.
  pub fn is_exec(&self) -> bool {
    self.parameter.eq_ignore_ascii_case("exec")
  }
}
