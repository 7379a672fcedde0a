//! Tests for `descriptions`.

use crate::descriptions::{EXEC_FALLBACK, GENERIC_FALLBACK, ParameterDescriptions};
use crate::types::ParameterRecord;

fn record(parameter: &str) -> ParameterRecord {
  ParameterRecord::new("Input", "in", parameter, "v")
}

#[test]
fn builtin_table_describes_common_parameters() {
  let d = ParameterDescriptions::default();
  assert!(d.len() > 100);
  assert_eq!(d.describe(&record("Port")), "Connection port");
  assert_eq!(d.get("Path"), Some("Processing path"));
}

#[test]
fn exec_lookup_ignores_case() {
  let d = ParameterDescriptions::default();
  assert_eq!(d.describe(&record("exec")), d.describe(&record("Exec")));
}

#[test]
fn unknown_parameters_fall_back() {
  let d = ParameterDescriptions::default();
  assert_eq!(d.describe(&record("Frobnicate")), GENERIC_FALLBACK);
  // Lookups other than Exec are exact.
  assert_eq!(d.describe(&record("port")), GENERIC_FALLBACK);
}

#[test]
fn empty_table_uses_fallbacks() {
  let d = ParameterDescriptions::empty();
  assert!(d.is_empty());
  assert_eq!(d.describe(&record("Exec")), EXEC_FALLBACK);
  assert_eq!(d.describe(&record("Module")), GENERIC_FALLBACK);
}

#[test]
fn overrides_replace_entries() {
  let d = ParameterDescriptions::empty().with("Module", "custom");
  assert_eq!(d.describe(&record("Module")), "custom");
}

#[test]
fn annotate_keeps_record_order() {
  let d = ParameterDescriptions::default();
  let annotated = d.annotate(&[record("Module"), record("Unknown1")]);
  assert_eq!(annotated.len(), 2);
  assert_eq!(annotated[0].parameter, "Module");
  assert_eq!(annotated[1].description, GENERIC_FALLBACK);
  assert_eq!(annotated[0].section_name, "in");
}
