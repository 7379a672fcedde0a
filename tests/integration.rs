//! End-to-end tests: the library on the bundled samples, and the nxlog_analyze CLI run as a
//! separate process against temp directories.

use nxlog_flowmap::batch::{analyze_batch, discover_configs};
use nxlog_flowmap::sample::write_samples;
use nxlog_flowmap::{ConsolidatedStats, ParameterDescriptions, analyze_document, export};
use calamine::{Reader, Xlsx, open_workbook};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(args: &[&str], cwd: &Path, env: &[(&str, &str)]) -> Output {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_nxlog_analyze"));
  cmd
    .args(args)
    .current_dir(cwd)
    .env_remove("NXLOG_ANALYZER_OUTPUT_DIR")
    .env_remove("NXLOG_ANALYZER_CONCURRENCY");
  for (k, v) in env {
    cmd.env(k, v);
  }
  cmd.output().expect("run nxlog_analyze")
}

#[tokio::test]
async fn samples_analyze_as_a_batch() {
  let dir = tempfile::tempdir().expect("temp dir");
  write_samples(dir.path()).expect("write samples");
  let paths = discover_configs(dir.path()).expect("discover");
  let names: Vec<String> = paths
    .iter()
    .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["nxlog_db", "nxlog_sample", "nxlog_web"]);

  let report = analyze_batch(paths, 3).await;
  assert_eq!(report.processed(), 3);
  assert_eq!(report.skipped(), 0);

  let stats = ConsolidatedStats::from_documents(&report.documents);
  assert_eq!(stats.files, 3);
  assert_eq!(stats.total_routes, 7);
  assert_eq!(stats.total_flows, 17);
  assert_eq!(stats.total_sections(), 5);

  for doc in &report.documents {
    assert_eq!(doc.graph.stats.total_flows, doc.graph.flows.len());
    assert!(doc.dot.contains("subgraph cluster_legend"));
  }
}

#[test]
fn document_exports_land_in_output_dir() {
  let dir = tempfile::tempdir().expect("temp dir");
  let data = dir.path().join("data");
  let out = dir.path().join("output");
  let paths = write_samples(&data).expect("write samples");
  let web = paths
    .iter()
    .find(|p| p.ends_with("nxlog_web.conf"))
    .expect("web sample");
  let doc = analyze_document(web).expect("analyze");

  export::write_flows_csv(&out, &doc.name, &doc.graph).expect("flows csv");
  export::write_sections_csv(&out, &doc.name, &doc.graph).expect("sections csv");
  export::write_pairs_csv(&out, &doc.name, &doc.graph.routes).expect("pairs csv");
  export::write_graphviz(&out, &doc.name, &doc.dot).expect("graphviz");
  export::write_config_csv(&out, &doc.name, &doc.records, Some(&ParameterDescriptions::default()))
    .expect("config csv");

  for file in [
    "nxlog_web_flows.csv",
    "nxlog_web_sections.csv",
    "nxlog_web_pairs.csv",
    "nxlog_web_flow.dot",
    "nxlog_web_generate_images.sh",
    "nxlog_web_config.csv",
  ] {
    assert!(out.join(file).is_file(), "missing {}", file);
  }
  let flows = fs::read_to_string(out.join("nxlog_web_flows.csv")).unwrap();
  // Quotes inside a field are doubled and the field is quoted.
  assert!(flows.contains(
    "web_alerts;web_filter;Processor;pm_filter;alert_file;Output;om_file;2;\"$AlertLevel == \"\"HIGH\"\"\""
  ));
}

#[test]
fn cli_without_input_prints_usage() {
  let dir = tempfile::tempdir().expect("temp dir");
  let out = run_cli(&[], dir.path(), &[]);
  assert!(!out.status.success());
  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(stdout.contains("Usage"), "stdout: {}", stdout);
}

#[test]
fn cli_fails_for_missing_file() {
  let dir = tempfile::tempdir().expect("temp dir");
  let out = run_cli(&["absent.conf"], dir.path(), &[]);
  assert_eq!(out.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn cli_fails_for_missing_directory() {
  let dir = tempfile::tempdir().expect("temp dir");
  let out = run_cli(&["--directory", "nope"], dir.path(), &[]);
  assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cli_creates_samples() {
  let dir = tempfile::tempdir().expect("temp dir");
  let out = run_cli(&["--create-sample"], dir.path(), &[]);
  assert!(out.status.success());
  for name in ["nxlog_sample.conf", "nxlog_web.conf", "nxlog_db.conf"] {
    assert!(dir.path().join("data").join(name).is_file());
  }
}

#[test]
fn cli_prints_record_table() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(&["data/nxlog_web.conf"], dir.path(), &[]);
  assert!(out.status.success());
  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(stdout.contains("| File "));
  assert!(stdout.contains("| nxlog_web "));
  assert!(stdout.contains("apache_access"));
  assert!(stdout.contains("Done. 1 file(s) analyzed, 0 skipped."));
}

#[test]
fn cli_json_output_is_clean() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(
    &["--directory", "data", "--format", "json", "--stats", "--flows"],
    dir.path(),
    &[],
  );
  assert!(out.status.success());
  let value: serde_json::Value =
    serde_json::from_slice(&out.stdout).expect("stdout is one JSON document");
  let object = value.as_object().expect("object");
  assert_eq!(object.len(), 3);
  assert!(object.contains_key("nxlog_db"));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("CONSOLIDATED CONFIGURATION STATISTICS"));
  assert!(stderr.contains("FLOW MAP - NXLOG_WEB"));
}

#[test]
fn cli_csv_output_uses_semicolons() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(&["data/nxlog_db.conf", "--format", "csv"], dir.path(), &[]);
  assert!(out.status.success());
  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(stdout.starts_with("File;Section;Section Name;Parameter;Value;Description"));
}

#[test]
fn cli_writes_exports_to_output_dir() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(
    &[
      "--directory",
      "data",
      "--csv-multiple",
      "--flows-csv",
      "--graphviz",
      "--output-dir",
      "maps",
    ],
    dir.path(),
    &[],
  );
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let maps = dir.path().join("maps");
  for stem in ["nxlog_sample", "nxlog_web", "nxlog_db"] {
    for suffix in ["_config.csv", "_flows.csv", "_sections.csv", "_pairs.csv", "_flow.dot", "_generate_images.sh"] {
      assert!(maps.join(format!("{}{}", stem, suffix)).is_file(), "{}{}", stem, suffix);
    }
  }
}

#[test]
fn env_overrides_output_dir_flag() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(
    &["data/nxlog_web.conf", "--graphviz", "--output-dir", "flag_dir"],
    dir.path(),
    &[("NXLOG_ANALYZER_OUTPUT_DIR", "env_dir"), ("NXLOG_ANALYZER_CONCURRENCY", "1")],
  );
  assert!(out.status.success());
  assert!(dir.path().join("env_dir").join("nxlog_web_flow.dot").is_file());
  assert!(!dir.path().join("flag_dir").exists());
}

#[test]
fn cli_writes_consolidated_csv() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(
    &["--directory", "data", "--consolidated-csv", "all.csv"],
    dir.path(),
    &[],
  );
  assert!(out.status.success());
  let text = fs::read_to_string(dir.path().join("all.csv")).unwrap();
  assert!(text.starts_with("File;Section_Type;Section_Name;Parameter;Value;Description"));
  assert!(text.contains("\nnxlog_db;"));
  assert!(text.contains("\nnxlog_web;"));
}

#[test]
fn cli_writes_workbook() {
  let dir = tempfile::tempdir().expect("temp dir");
  run_cli(&["--create-sample"], dir.path(), &[]);
  let out = run_cli(&["--directory", "data", "--excel", "book.xlsx"], dir.path(), &[]);
  assert!(out.status.success());
  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(stdout.contains("Written: book.xlsx"));

  let book: Xlsx<_> = open_workbook(dir.path().join("book.xlsx")).expect("open workbook");
  assert_eq!(
    book.sheet_names(),
    vec![
      "nxlog_db",
      "nxlog_sample",
      "nxlog_web",
      "nxlog_db_Flows",
      "nxlog_db_Sections",
      "nxlog_sample_Flows",
      "nxlog_sample_Sections",
      "nxlog_web_Flows",
      "nxlog_web_Sections",
    ]
  );
}
