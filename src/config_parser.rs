//! Block parser for NXLog-style configuration documents.
//!
//! A flat state machine over [`LineScanner`] lines: at most one section is open at a time,
//! and an opening tag met while a section is open replaces it (no nesting). Each line is
//! tried, in order, as an opening tag, a closing tag, an `<Exec>` block, and a
//! `Name value` parameter. Anything else is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

use crate::flow_mapper;
use crate::scanner::LineScanner;
use crate::types::{FlowGraph, OrderedTable, ParameterRecord, Route, Section, SectionType};

static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(\w+)\s+([^>]+)>").unwrap());
static CLOSE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^</\w+>").unwrap());
static EXEC_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^<Exec>").unwrap());
static EXEC_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^</Exec>").unwrap());
static PARAMETER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s+(.+)").unwrap());
static EXEC_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Exec\s+(.+)").unwrap());

/// Name of the parameter holding exec code.
pub const EXEC_PARAMETER: &str = "Exec";

/// Separator joining an implicit run of bare `Exec` lines.
pub const EXEC_RUN_SEPARATOR: &str = " | ";

/// Output of [`parse_config`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConfig {
  /// Records of closed sections, in document-scan order.
  pub records: Vec<ParameterRecord>,
  /// Sections whose closing tag was reached.
  pub sections: OrderedTable<Section>,
  /// Routes registered from `Route` blocks' `Path` lines.
  pub routes: OrderedTable<Route>,
}

impl ParsedConfig {
  /// Runs flow analysis on the parsed sections and routes.
  pub fn analyze(&self) -> FlowGraph {
    flow_mapper::analyze(&self.sections, &self.routes)
  }
}

/// The section context currently open.
#[derive(Debug)]
struct OpenSection {
  tag: String,
  name: String,
  module: Option<String>,
  attributes: BTreeMap<String, String>,
  /// Records held back until the closing tag commits them.
  pending: Vec<ParameterRecord>,
}

impl OpenSection {
  fn new(tag: &str, name: &str) -> Self {
    Self {
      tag: tag.to_string(),
      name: name.to_string(),
      module: None,
      attributes: BTreeMap::new(),
      pending: Vec::new(),
    }
  }

  fn record(&self, parameter: &str, value: &str) -> ParameterRecord {
    ParameterRecord::new(&self.tag, &self.name, parameter, value)
  }
}

struct BlockParser {
  scanner: LineScanner,
  current: Option<OpenSection>,
  out: ParsedConfig,
}

/// Parses a whole document. Never fails: malformed input degrades to partial output.
#[instrument(level = "trace", skip(text), fields(bytes = text.len()))]
pub fn parse_config(text: &str) -> ParsedConfig {
  let mut parser = BlockParser {
    scanner: LineScanner::new(text),
    current: None,
    out: ParsedConfig::default(),
  };
  parser.run();
  parser.out
}

impl BlockParser {
  fn run(&mut self) {
    while let Some(line) = self.scanner.current().map(str::to_string) {
      if line.is_empty() {
        self.scanner.advance();
        continue;
      }

      if let Some(caps) = OPEN_TAG.captures(&line) {
        self.open_section(&caps[1], &caps[2]);
        self.scanner.advance();
      } else if CLOSE_TAG.is_match(&line) {
        self.close_section();
        self.scanner.advance();
      } else if EXEC_OPEN.is_match(&line) {
        self.exec_block();
      } else if let Some(caps) = PARAMETER.captures(&line) {
        self.parameter(&caps[1], caps[2].trim());
      } else {
        trace!(line = %line, "ignoring unrecognized line");
        self.scanner.advance();
      }
    }

    if let Some(open) = self.current.take() {
      debug!(section = %open.name, "dropping section without closing tag");
    }
  }

  fn open_section(&mut self, tag: &str, name: &str) {
    if let Some(replaced) = self.current.take() {
      debug!(replaced = %replaced.name, by = %name, "opening tag inside open section, discarding it");
    }
    self.current = Some(OpenSection::new(tag, name));
  }

  fn close_section(&mut self) {
    let Some(open) = self.current.take() else {
      return;
    };
    debug!(section = %open.name, tag = %open.tag, "registering section");
    self.out.records.extend(open.pending);
    self.out.sections.insert(Section::new(
      open.name,
      SectionType::from_tag(&open.tag),
      open.module,
      open.attributes,
    ));
  }

  /// Captures an `<Exec>` ... `</Exec>` block as one record, lines joined by `\n`.
  /// The cursor is on the `<Exec>` line; it ends past `</Exec>` (or at end of input).
  fn exec_block(&mut self) {
    self.scanner.advance();
    let mut lines = Vec::new();
    while let Some(line) = self.scanner.current() {
      if EXEC_CLOSE.is_match(line) {
        break;
      }
      if !line.is_empty() {
        lines.push(line.to_string());
      }
      self.scanner.advance();
    }
    self.scanner.advance();

    if lines.is_empty() {
      return;
    }
    if let Some(open) = self.current.as_mut() {
      let record = open.record(EXEC_PARAMETER, &lines.join("\n"));
      open.pending.push(record);
    }
  }

  /// Handles a `Name value` line. The cursor is on that line; it ends past every line consumed.
  fn parameter(&mut self, name: &str, value: &str) {
    if self.current.is_none() {
      trace!(parameter = %name, "ignoring parameter outside any section");
      self.scanner.advance();
      return;
    }

    let raw = if name.eq_ignore_ascii_case(EXEC_PARAMETER) {
      self.implicit_exec_run(value)
    } else {
      self.scanner.advance();
      value.to_string()
    };
    let value = strip_quotes(&raw).to_string();

    let Some(open) = self.current.as_mut() else {
      return;
    };
    if name == "Module" {
      open.module = Some(value.clone());
    }
    if open.tag == "Route" && name == "Path" {
      let route = register_route(open, &value);
      self.out.routes.insert(route);
    }
    open.attributes.insert(name.to_string(), value.clone());
    let record = open.record(name, &value);
    open.pending.push(record);
  }

  /// Merges the bare `Exec` lines following the current one (blank lines in between are
  /// skipped) and moves the cursor past them.
  fn implicit_exec_run(&mut self, first: &str) -> String {
    let mut parts = vec![first.to_string()];
    let mut next = self.scanner.position() + 1;
    while let Some(line) = self.scanner.line(next) {
      if line.is_empty() {
        next += 1;
        continue;
      }
      match EXEC_LINE.captures(line) {
        Some(caps) => {
          parts.push(caps[1].trim().to_string());
          next += 1;
        }
        None => break,
      }
    }
    self.scanner.seek(next);
    parts.join(EXEC_RUN_SEPARATOR)
  }
}

/// Builds the route declared by `path` in the open `Route` block.
///
/// Precondition: only `Priority` and `Condition` values already seen in this block are
/// used, so they must come before `Path` in the document. A later `Priority` or
/// `Condition` is recorded as an attribute but does not reach the route.
fn register_route(open: &OpenSection, path: &str) -> Route {
  let priority = open
    .attributes
    .get("Priority")
    .and_then(|p| parse_priority(&open.name, p));
  let condition = open
    .attributes
    .get("Condition")
    .filter(|c| !c.is_empty())
    .cloned();
  debug!(route = %open.name, path = %path, ?priority, ?condition, "registering route");
  Route::from_path(open.name.clone(), path, priority, condition)
}

fn parse_priority(route: &str, raw: &str) -> Option<i64> {
  match raw.trim().parse() {
    Ok(p) => Some(p),
    Err(_) => {
      debug!(route = %route, priority = %raw, "ignoring non-numeric priority");
      None
    }
  }
}

/// Removes one layer of matching `"` or `'` around `value`. Unbalanced quotes are kept.
pub(crate) fn strip_quotes(value: &str) -> &str {
  for quote in ['"', '\''] {
    if value.starts_with(quote) && value.ends_with(quote) {
      return if value.len() >= 2 {
        &value[1..value.len() - 1]
      } else {
        ""
      };
    }
  }
  value
}
