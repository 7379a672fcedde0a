//! Tests for `config_parser`.

use crate::config_parser::{parse_config, strip_quotes};
use crate::types::SectionType;

fn values<'a>(parsed: &'a crate::config_parser::ParsedConfig, parameter: &str) -> Vec<&'a str> {
  parsed
    .records
    .iter()
    .filter(|r| r.parameter == parameter)
    .map(|r| r.value.as_str())
    .collect()
}

#[test]
fn parses_sections_and_records() {
  let text = r#"
    # global directives are outside any section
    LogLevel INFO

    <Input in>
      Module im_file
      File "/var/log/app.log"   # trailing comment
    </Input>

    <Output out>
      Module om_udp
      Port 514
    </Output>
  "#;
  let parsed = parse_config(text);
  assert_eq!(parsed.records.len(), 4);
  assert_eq!(parsed.records[0].section_type, "Input");
  assert_eq!(parsed.records[0].section_name, "in");
  assert_eq!(parsed.records[1].value, "/var/log/app.log");
  assert_eq!(parsed.records[3].parameter, "Port");

  let input = parsed.sections.get("in").unwrap();
  assert_eq!(input.section_type, SectionType::Input);
  assert_eq!(input.module.as_deref(), Some("im_file"));
  assert_eq!(input.attribute("File"), Some("/var/log/app.log"));
  assert_eq!(parsed.sections.len(), 2);
}

#[test]
fn quotes_are_stripped_once_when_balanced() {
  assert_eq!(strip_quotes("\"abc\""), "abc");
  assert_eq!(strip_quotes("'abc'"), "abc");
  assert_eq!(strip_quotes("\"abc"), "\"abc");
  assert_eq!(strip_quotes("\"abc'"), "\"abc'");
  assert_eq!(strip_quotes("\"\"x\"\""), "\"x\"");
  assert_eq!(strip_quotes("\""), "");

  let parsed = parse_config("<Input a>\nFile \"abc\nHost 'h'\n</Input>");
  assert_eq!(values(&parsed, "File"), vec!["\"abc"]);
  assert_eq!(values(&parsed, "Host"), vec!["h"]);
}

#[test]
fn implicit_exec_lines_merge() {
  let text = "<Input in>\nExec a\nExec b\nexec c\nModule im_file\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(values(&parsed, "Exec"), vec!["a | b | c"]);
  assert_eq!(values(&parsed, "Module"), vec!["im_file"]);
  assert_eq!(parsed.records.len(), 2);
}

#[test]
fn implicit_exec_run_skips_blank_lines() {
  let text = "<Input in>\nExec a;\n\n   \nExec b;\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(values(&parsed, "Exec"), vec!["a; | b;"]);
}

#[test]
fn tagged_exec_block_is_one_record() {
  let text = "<Input in>\n  <Exec>\n    $a = 1;\n\n    # comment only\n    $b = 2;\n  </Exec>\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(parsed.records.len(), 1);
  assert_eq!(parsed.records[0].parameter, "Exec");
  assert_eq!(parsed.records[0].value, "$a = 1;\n$b = 2;");
  // The block value is not an attribute.
  assert!(parsed.sections.get("in").unwrap().attribute("Exec").is_none());
}

#[test]
fn tagged_and_implicit_exec_coexist() {
  let text = "<Input in>\nExec x;\nExec y;\n<Exec>\nz;\n</Exec>\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(values(&parsed, "Exec"), vec!["x; | y;", "z;"]);
}

#[test]
fn empty_exec_block_emits_nothing() {
  let parsed = parse_config("<Input in>\n<Exec>\n\n</Exec>\n</Input>");
  assert!(parsed.records.is_empty());
  assert!(parsed.sections.contains("in"));
}

#[test]
fn exec_block_runs_to_end_of_input() {
  let parsed = parse_config("<Input in>\n<Exec>\n$a = 1;\n");
  assert!(parsed.records.is_empty());
  assert!(parsed.sections.is_empty());
}

#[test]
fn unclosed_trailing_section_is_dropped() {
  let text = "<Input a>\nModule im_file\n</Input>\n<Output b>\nModule om_file\n";
  let parsed = parse_config(text);
  assert!(parsed.sections.contains("a"));
  assert!(!parsed.sections.contains("b"));
  assert!(parsed.records.iter().all(|r| r.section_name == "a"));
}

#[test]
fn nested_open_tag_replaces_context() {
  let text = "<Input outer>\nModule im_file\n<Output inner>\nModule om_file\n</Output>\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(parsed.sections.len(), 1);
  let inner = parsed.sections.get("inner").unwrap();
  assert_eq!(inner.section_type, SectionType::Output);
  assert!(!parsed.sections.contains("outer"));
  assert_eq!(parsed.records.len(), 1);
  assert_eq!(parsed.records[0].section_name, "inner");
}

#[test]
fn stray_closing_tag_is_noop() {
  let parsed = parse_config("</Input>\n<Input a>\nModule m\n</Input>\n</Input>");
  assert_eq!(parsed.sections.len(), 1);
  assert_eq!(parsed.records.len(), 1);
}

#[test]
fn redeclaration_overwrites_section() {
  let text = "<Input a>\nModule one\n</Input>\n<Output b>\n</Output>\n<Input a>\nModule two\n</Input>";
  let parsed = parse_config(text);
  assert_eq!(parsed.sections.names().collect::<Vec<_>>(), vec!["a", "b"]);
  assert_eq!(parsed.sections.get("a").unwrap().module.as_deref(), Some("two"));
  assert_eq!(values(&parsed, "Module"), vec!["one", "two"]);
}

#[test]
fn attributes_keep_last_value() {
  let parsed = parse_config("<Input a>\nPort 1\nPort 2\n</Input>");
  assert_eq!(parsed.sections.get("a").unwrap().attribute("Port"), Some("2"));
  assert_eq!(values(&parsed, "Port"), vec!["1", "2"]);
}

#[test]
fn route_uses_priority_and_condition_seen_before_path() {
  let text = "<Route r>\nPriority 2\nCondition $Severity == ERROR\nPath a => b\n</Route>";
  let parsed = parse_config(text);
  let route = parsed.routes.get("r").unwrap();
  assert_eq!(route.priority, Some(2));
  assert_eq!(route.condition.as_deref(), Some("$Severity == ERROR"));
  assert_eq!(route.inputs, vec!["a"]);
  assert_eq!(route.outputs, vec!["b"]);
}

#[test]
fn priority_after_path_is_not_picked_up() {
  let text = "<Route r>\nPath a => b\nPriority 1\nCondition $x\n</Route>";
  let parsed = parse_config(text);
  let route = parsed.routes.get("r").unwrap();
  assert_eq!(route.priority, None);
  assert_eq!(route.condition, None);
  // Still recorded on the section.
  let section = parsed.sections.get("r").unwrap();
  assert_eq!(section.attribute("Priority"), Some("1"));
}

#[test]
fn non_numeric_priority_is_absent() {
  let parsed = parse_config("<Route r>\nPriority high\nPath a => b\n</Route>");
  assert_eq!(parsed.routes.get("r").unwrap().priority, None);
}

#[test]
fn route_detection_is_case_sensitive() {
  let parsed = parse_config("<route r>\nPath a => b\n</route>\n<Route s>\npath a => b\n</Route>");
  assert!(parsed.routes.is_empty());
}

#[test]
fn route_registered_even_if_block_never_closes() {
  let parsed = parse_config("<Route r>\nPath a => b\n");
  assert!(parsed.routes.contains("r"));
  assert!(parsed.sections.is_empty());
  assert!(parsed.records.is_empty());
}

#[test]
fn malformed_lines_are_ignored() {
  let text = "<Input a>\n<<<\nlonely\n= x\nModule m\n</Input>\n<>\n";
  let parsed = parse_config(text);
  assert_eq!(parsed.records.len(), 1);
  assert_eq!(parsed.records[0].parameter, "Module");
}

#[test]
fn empty_document() {
  let parsed = parse_config("");
  assert!(parsed.records.is_empty());
  assert!(parsed.sections.is_empty());
  assert!(parsed.routes.is_empty());
}

#[test]
fn other_section_types_are_kept() {
  let parsed = parse_config("<Custom c>\nKey v\n</Custom>");
  assert_eq!(
    parsed.sections.get("c").unwrap().section_type,
    SectionType::Other("Custom".to_string())
  );
}
