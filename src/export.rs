//! File sinks: `;`-delimited CSV, the xlsx workbook, Graphviz files and the JSON report.
//!
//! Every writer creates the output directory on demand and returns the path it wrote.

use csv::{QuoteStyle, WriterBuilder};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::batch::DocumentAnalysis;
use crate::config_parser::EXEC_PARAMETER;
use crate::descriptions::{DescribedRecord, ParameterDescriptions};
use crate::error::{AnalyzerError, Result};
use crate::graphviz::image_script;
use crate::route_path::expand_pairs;
use crate::types::{
  FlowGraph, FlowRow, NOT_APPLICABLE, OrderedTable, PairRow, ParameterRecord, Route, SectionRow,
};

/// Field delimiter of every CSV output.
pub const CSV_DELIMITER: u8 = b';';

/// One record of the consolidated CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedRow {
  #[serde(rename = "File")]
  pub file: String,
  #[serde(rename = "Section_Type")]
  pub section_type: String,
  #[serde(rename = "Section_Name")]
  pub section_name: String,
  #[serde(rename = "Parameter")]
  pub parameter: String,
  #[serde(rename = "Value")]
  pub value: String,
  #[serde(rename = "Description")]
  pub description: String,
}

/// Record without description, for the plain per-document config CSV.
#[derive(Serialize)]
struct PlainRecord<'a> {
  #[serde(rename = "Section_Type")]
  section_type: &'a str,
  #[serde(rename = "Section_Name")]
  section_name: &'a str,
  #[serde(rename = "Parameter")]
  parameter: &'a str,
  #[serde(rename = "Value")]
  value: &'a str,
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir).map_err(|e| AnalyzerError::export(dir, e))
}

/// Writes `rows` with headers to `path`.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    ensure_dir(parent)?;
  }
  let mut writer = WriterBuilder::new()
    .delimiter(CSV_DELIMITER)
    .quote_style(QuoteStyle::Necessary)
    .from_path(path)
    .map_err(|e| AnalyzerError::csv(path, e))?;
  for row in rows {
    writer
      .serialize(row)
      .map_err(|e| AnalyzerError::csv(path, e))?;
  }
  writer
    .flush()
    .map_err(|e| AnalyzerError::export(path, e))?;
  debug!(path = %path.display(), rows = rows.len(), "csv written");
  Ok(())
}

/// Renders headers and rows as `;`-delimited text.
pub fn csv_string(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
  let mut writer = WriterBuilder::new()
    .delimiter(CSV_DELIMITER)
    .from_writer(Vec::new());
  let stdout = Path::new("<stdout>");
  writer
    .write_record(headers)
    .map_err(|e| AnalyzerError::csv(stdout, e))?;
  for row in rows {
    writer
      .write_record(row)
      .map_err(|e| AnalyzerError::csv(stdout, e))?;
  }
  let bytes = writer
    .into_inner()
    .map_err(|e| AnalyzerError::export(stdout, e.into_error()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `<stem>_config.csv`. With `descriptions`, a `Description` column is appended.
#[instrument(level = "trace", skip(records, descriptions))]
pub fn write_config_csv(
  dir: &Path,
  stem: &str,
  records: &[ParameterRecord],
  descriptions: Option<&ParameterDescriptions>,
) -> Result<PathBuf> {
  let path = dir.join(format!("{}_config.csv", stem));
  match descriptions {
    Some(descriptions) => write_csv(&path, &descriptions.annotate(records))?,
    None => {
      let rows: Vec<PlainRecord<'_>> = records
        .iter()
        .map(|r| PlainRecord {
          section_type: &r.section_type,
          section_name: &r.section_name,
          parameter: &r.parameter,
          value: &r.value,
        })
        .collect();
      write_csv(&path, &rows)?
    }
  }
  Ok(path)
}

/// `<stem>_flows.csv`, one row per flow.
#[instrument(level = "trace", skip(graph))]
pub fn write_flows_csv(dir: &Path, stem: &str, graph: &FlowGraph) -> Result<PathBuf> {
  let path = dir.join(format!("{}_flows.csv", stem));
  write_csv(&path, &graph.flow_rows())?;
  Ok(path)
}

/// `<stem>_sections.csv`, one row per section.
#[instrument(level = "trace", skip(graph))]
pub fn write_sections_csv(dir: &Path, stem: &str, graph: &FlowGraph) -> Result<PathBuf> {
  let path = dir.join(format!("{}_sections.csv", stem));
  write_csv(&path, &graph.section_rows())?;
  Ok(path)
}

/// Cartesian (source, destination) pairs of every route path.
pub fn pair_rows(routes: &OrderedTable<Route>) -> Vec<PairRow> {
  let mut rows = Vec::new();
  for route in routes {
    let priority = route
      .priority
      .map(|p| p.to_string())
      .unwrap_or_else(|| NOT_APPLICABLE.to_string());
    let condition = route
      .condition
      .clone()
      .unwrap_or_else(|| NOT_APPLICABLE.to_string());
    for (source, target) in expand_pairs(&route.raw_path) {
      rows.push(PairRow {
        route: route.name.clone(),
        source,
        target,
        priority: priority.clone(),
        condition: condition.clone(),
      });
    }
  }
  rows
}

/// `<stem>_pairs.csv`, the cartesian reading of every route path.
#[instrument(level = "trace", skip(routes))]
pub fn write_pairs_csv(dir: &Path, stem: &str, routes: &OrderedTable<Route>) -> Result<PathBuf> {
  let path = dir.join(format!("{}_pairs.csv", stem));
  write_csv(&path, &pair_rows(routes))?;
  Ok(path)
}

/// All records of all documents in one CSV, each row tagged with its document name.
#[instrument(level = "trace", skip(documents, descriptions))]
pub fn write_consolidated_csv(
  path: &Path,
  documents: &[DocumentAnalysis],
  descriptions: &ParameterDescriptions,
) -> Result<PathBuf> {
  let rows: Vec<ConsolidatedRow> = documents
    .iter()
    .flat_map(|doc| {
      doc.records.iter().map(move |r| ConsolidatedRow {
        file: doc.name.clone(),
        section_type: r.section_type.clone(),
        section_name: r.section_name.clone(),
        parameter: r.parameter.clone(),
        value: r.value.clone(),
        description: descriptions.describe(r).to_string(),
      })
    })
    .collect();
  write_csv(path, &rows)?;
  Ok(path.to_path_buf())
}

/// Column headers of a document's record sheet.
pub const RECORD_SHEET_HEADERS: [&str; 5] =
  ["Section", "Section Name", "Parameter", "Value", "Description"];

const RECORD_SHEET_WIDTHS: [f64; 5] = [12.0, 15.0, 15.0, 50.0, 40.0];
const FLOW_SHEET_WIDTHS: [f64; 9] = [12.0, 15.0, 12.0, 15.0, 15.0, 12.0, 15.0, 10.0, 20.0];
const SECTION_SHEET_WIDTHS: [f64; 5] = [20.0, 12.0, 15.0, 40.0, 10.0];
const HEADER_FILL: u32 = 0x366092;
const SHADED_FILL: u32 = 0xF8F9FA;
const MULTILINE_ROW_HEIGHT: f64 = 60.0;
const ROW_HEIGHT: f64 = 20.0;
const SHEET_NAME_LIMIT: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Hands out valid, workbook-unique sheet names.
///
/// Names are at most 31 characters, free of the characters Excel rejects, and unique
/// ignoring case. A clash gets a `~2`, `~3`, ... marker before the suffix.
pub(crate) struct SheetNames {
  used: HashSet<String>,
}

impl SheetNames {
  pub(crate) fn new() -> Self {
    // Reserved by Excel.
    Self {
      used: HashSet::from(["history".to_string()]),
    }
  }

  pub(crate) fn claim(&mut self, stem: &str, suffix: &str) -> String {
    let clean: String = stem
      .chars()
      .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
      .collect();
    let clean = clean.trim_matches('\'');
    let clean = if clean.is_empty() && suffix.is_empty() { "Sheet" } else { clean };
    let mut attempt = 1;
    loop {
      let tag = if attempt == 1 {
        suffix.to_string()
      } else {
        format!("~{}{}", attempt, suffix)
      };
      let room = SHEET_NAME_LIMIT.saturating_sub(tag.chars().count());
      let base: String = clean.chars().take(room).collect();
      let name = format!("{}{}", base.trim_end_matches('\''), tag);
      if self.used.insert(name.to_lowercase()) {
        return name;
      }
      attempt += 1;
    }
  }
}

/// Cell formats shared by every sheet.
struct SheetStyle {
  header: Format,
  plain: Format,
  shaded: Format,
  code: Format,
  code_shaded: Format,
}

impl SheetStyle {
  fn new() -> Self {
    let bordered = Format::new().set_border(FormatBorder::Thin);
    let header = bordered
      .clone()
      .set_bold()
      .set_font_color(Color::White)
      .set_background_color(Color::RGB(HEADER_FILL))
      .set_align(FormatAlign::Center)
      .set_align(FormatAlign::VerticalCenter);
    let plain = bordered
      .set_align(FormatAlign::Left)
      .set_align(FormatAlign::Top)
      .set_text_wrap();
    let shaded = plain.clone().set_background_color(Color::RGB(SHADED_FILL));
    let code = plain.clone().set_font_name("Consolas").set_font_size(9);
    let code_shaded = shaded.clone().set_font_name("Consolas").set_font_size(9);
    Self {
      header,
      plain,
      shaded,
      code,
      code_shaded,
    }
  }

  /// Data rows start at 1; every other one is shaded, starting with the first.
  fn cell(&self, row: u32, code: bool) -> &Format {
    match (row % 2 == 1, code) {
      (true, true) => &self.code_shaded,
      (true, false) => &self.shaded,
      (false, true) => &self.code,
      (false, false) => &self.plain,
    }
  }

  fn header_row(
    &self,
    sheet: &mut Worksheet,
    headers: &[&str],
    widths: &[f64],
  ) -> std::result::Result<(), XlsxError> {
    for (col, (header, width)) in headers.iter().zip(widths).enumerate() {
      let col = col as u16;
      sheet.write_string_with_format(0, col, *header, &self.header)?;
      sheet.set_column_width(col, *width)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
  }
}

/// One sheet of described records per document, named after it, then a `_Flows` and a
/// `_Sections` sheet per document.
#[instrument(level = "trace", skip(documents, descriptions))]
pub fn write_workbook(
  path: &Path,
  documents: &[DocumentAnalysis],
  descriptions: &ParameterDescriptions,
) -> Result<PathBuf> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    ensure_dir(parent)?;
  }
  let mut workbook = Workbook::new();
  fill_workbook(&mut workbook, documents, descriptions)
    .map_err(|e| AnalyzerError::workbook(path, e))?;
  workbook
    .save(path)
    .map_err(|e| AnalyzerError::workbook(path, e))?;
  debug!(path = %path.display(), documents = documents.len(), "workbook written");
  Ok(path.to_path_buf())
}

fn fill_workbook(
  workbook: &mut Workbook,
  documents: &[DocumentAnalysis],
  descriptions: &ParameterDescriptions,
) -> std::result::Result<(), XlsxError> {
  let style = SheetStyle::new();
  let mut names = SheetNames::new();

  for doc in documents {
    let sheet = workbook.add_worksheet();
    sheet.set_name(names.claim(&doc.name, ""))?;
    style.header_row(sheet, &RECORD_SHEET_HEADERS, &RECORD_SHEET_WIDTHS)?;
    for (i, record) in descriptions.annotate(&doc.records).iter().enumerate() {
      let row = (i + 1) as u32;
      let code = record.parameter.eq_ignore_ascii_case(EXEC_PARAMETER);
      let cells = [
        &record.section_type,
        &record.section_name,
        &record.parameter,
        &record.value,
        &record.description,
      ];
      for (col, value) in cells.into_iter().enumerate() {
        let format = style.cell(row, code && col == 3);
        sheet.write_string_with_format(row, col as u16, value.as_str(), format)?;
      }
      let multiline = record.value.contains('\n') || record.value.contains('|');
      sheet.set_row_height(row, if multiline { MULTILINE_ROW_HEIGHT } else { ROW_HEIGHT })?;
    }
  }

  for doc in documents {
    let sheet = workbook.add_worksheet();
    sheet.set_name(names.claim(&doc.name, "_Flows"))?;
    style.header_row(sheet, &FlowRow::HEADERS, &FLOW_SHEET_WIDTHS)?;
    for (i, flow) in doc.graph.flow_rows().iter().enumerate() {
      let row = (i + 1) as u32;
      for (col, value) in flow.cells().iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, value.as_str(), style.cell(row, false))?;
      }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(names.claim(&doc.name, "_Sections"))?;
    style.header_row(sheet, &SectionRow::HEADERS, &SECTION_SHEET_WIDTHS)?;
    for (i, section) in doc.graph.section_rows().iter().enumerate() {
      let row = (i + 1) as u32;
      let format = style.cell(row, false);
      let cells = [
        &section.section_name,
        &section.section_type,
        &section.module,
        &section.connected_routes,
      ];
      for (col, value) in cells.into_iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, value.as_str(), format)?;
      }
      sheet.write_number_with_format(row, 4, section.route_count as f64, format)?;
    }
  }
  Ok(())
}

/// Paths written by [`write_graphviz`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizFiles {
  pub dot: PathBuf,
  pub script: PathBuf,
}

/// `<stem>_flow.dot` and the executable `<stem>_generate_images.sh` next to it.
#[instrument(level = "trace", skip(dot))]
pub fn write_graphviz(dir: &Path, stem: &str, dot: &str) -> Result<GraphvizFiles> {
  ensure_dir(dir)?;
  let dot_path = dir.join(format!("{}_flow.dot", stem));
  fs::write(&dot_path, dot).map_err(|e| AnalyzerError::export(&dot_path, e))?;

  let script_path = dir.join(format!("{}_generate_images.sh", stem));
  fs::write(&script_path, image_script(stem)).map_err(|e| AnalyzerError::export(&script_path, e))?;
  make_executable(&script_path)?;

  Ok(GraphvizFiles {
    dot: dot_path,
    script: script_path,
  })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  let mut permissions = fs::metadata(path)
    .map_err(|e| AnalyzerError::export(path, e))?
    .permissions();
  permissions.set_mode(permissions.mode() | 0o111);
  fs::set_permissions(path, permissions).map_err(|e| AnalyzerError::export(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}

/// Document name → described records, in batch order.
struct JsonReport<'a> {
  documents: &'a [DocumentAnalysis],
  descriptions: &'a ParameterDescriptions,
}

impl Serialize for JsonReport<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.documents.len()))?;
    for doc in self.documents {
      let records: Vec<DescribedRecord> = self.descriptions.annotate(&doc.records);
      map.serialize_entry(&doc.name, &records)?;
    }
    map.end()
  }
}

/// Pretty-printed `{ name: [records with description] }` report.
pub fn json_report(
  documents: &[DocumentAnalysis],
  descriptions: &ParameterDescriptions,
) -> Result<String> {
  Ok(serde_json::to_string_pretty(&JsonReport {
    documents,
    descriptions,
  })?)
}

pub fn write_json_report(
  path: &Path,
  documents: &[DocumentAnalysis],
  descriptions: &ParameterDescriptions,
) -> Result<PathBuf> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    ensure_dir(parent)?;
  }
  let json = json_report(documents, descriptions)?;
  fs::write(path, json).map_err(|e| AnalyzerError::export(path, e))?;
  Ok(path.to_path_buf())
}
