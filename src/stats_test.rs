//! Tests for `stats`.

use crate::batch::DocumentAnalysis;
use crate::stats::{ConfigStats, ConsolidatedStats};
use crate::types::ParameterRecord;

#[test]
fn counts_types_modules_and_exec() {
  let records = vec![
    ParameterRecord::new("Input", "a", "Module", "im_file"),
    ParameterRecord::new("Input", "a", "Exec", "x;"),
    ParameterRecord::new("Input", "b", "Module", "im_file"),
    ParameterRecord::new("Output", "c", "Module", "om_tcp"),
    ParameterRecord::new("Output", "c", "exec", "y;"),
  ];
  let stats = ConfigStats::from_records(&records);
  assert_eq!(stats.total_parameters, 5);
  assert_eq!(stats.sections_count(), 2);
  assert_eq!(stats.modules_count(), 2);
  assert_eq!(stats.exec_count, 2);
  assert!(stats.modules.contains("om_tcp"));
}

#[test]
fn empty_records_give_zeroes() {
  assert_eq!(ConfigStats::from_records(&[]), ConfigStats::default());
}

#[test]
fn consolidates_across_documents() {
  let web = DocumentAnalysis::from_text(
    "web.conf",
    "<Input in>\nModule im_file\nExec a;\n</Input>\n<Output out>\nModule om_file\n</Output>\n\
     <Route r>\nPath in => out\n</Route>",
  );
  let db = DocumentAnalysis::from_text(
    "db.conf",
    "<Input q>\nModule im_file\n</Input>\n<Extension x>\nModule xm_json\n</Extension>",
  );
  let total = ConsolidatedStats::from_documents(&[web, db]);
  assert_eq!(total.files, 2);
  assert_eq!(total.total_parameters, 6);
  assert_eq!(total.total_exec_count, 1);
  assert_eq!(total.total_routes, 1);
  assert_eq!(total.total_flows, 1);
  assert_eq!(total.total_sections(), 4);
  assert_eq!(total.total_modules(), 3);
  assert_eq!(total.per_file[0].name, "web");
  assert_eq!(total.per_file[0].parameters, 4);
  assert_eq!(total.per_file[1].routes, 0);
}
