//! A directed connection between two section names, derived from a route.

use serde::Serialize;

use super::SectionType;

/// Marker shown for an absent priority or condition.
pub const NOT_APPLICABLE: &str = "N/A";

/// Marker shown for the type or module of a name that was never declared.
pub const UNKNOWN: &str = "Unknown";

/// A directed edge of the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
  pub route: String,
  pub source: String,
  pub target: String,
  /// `None` when `source` names no declared section.
  pub source_type: Option<SectionType>,
  pub target_type: Option<SectionType>,
  /// [`UNKNOWN`] when undeclared, empty when declared without a `Module`.
  pub source_module: String,
  pub target_module: String,
  pub priority: Option<i64>,
  pub condition: Option<String>,
}

impl Flow {
  pub fn source_type_label(&self) -> &str {
    type_label(self.source_type.as_ref())
  }

  pub fn target_type_label(&self) -> &str {
    type_label(self.target_type.as_ref())
  }

  pub fn priority_label(&self) -> String {
    self
      .priority
      .map(|p| p.to_string())
      .unwrap_or_else(|| NOT_APPLICABLE.to_string())
  }

  pub fn condition_label(&self) -> &str {
    self.condition.as_deref().unwrap_or(NOT_APPLICABLE)
  }
}

fn type_label(t: Option<&SectionType>) -> &str {
  t.map(SectionType::as_str).unwrap_or(UNKNOWN)
}
