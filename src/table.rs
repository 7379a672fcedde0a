//! Plain-text `+---+` grids for terminal output.

use crate::descriptions::ParameterDescriptions;
use crate::types::ParameterRecord;

/// Display width of a value cell.
pub const VALUE_WIDTH: usize = 50;
/// Display width of an `Exec` value cell.
pub const EXEC_VALUE_WIDTH: usize = 100;
/// Display width of a description cell.
pub const DESCRIPTION_WIDTH: usize = 80;

/// Column headers of [`record_rows`].
pub const RECORD_HEADERS: [&str; 6] = [
  "File",
  "Section",
  "Section Name",
  "Parameter",
  "Value",
  "Description",
];

/// Draws `rows` under `headers` as a grid. Cells are padded to the widest entry of their
/// column, counted in characters; cells past the header count are dropped.
pub fn render_grid<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
  let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      let cell: &str = cell.as_ref();
      *width = (*width).max(cell.chars().count());
    }
  }

  let separator = {
    let mut line = String::from("+");
    for width in &widths {
      line.push_str(&"-".repeat(width + 2));
      line.push('+');
    }
    line
  };
  let render_row = |cells: Vec<&str>| {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
      let cell = cells.get(i).copied().unwrap_or("");
      let pad = width - cell.chars().count();
      line.push(' ');
      line.push_str(cell);
      line.push_str(&" ".repeat(pad));
      line.push_str(" |");
    }
    line
  };

  let mut out = Vec::with_capacity(rows.len() + 4);
  out.push(separator.clone());
  out.push(render_row(headers.to_vec()));
  out.push(separator.clone());
  for row in rows {
    let cells: Vec<&str> = row.iter().map(|c| c.as_ref()).collect();
    out.push(render_row(cells));
  }
  out.push(separator);
  out.join("\n")
}

/// Cuts `text` to `limit` characters, marking the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
  if text.chars().count() > limit {
    let head: String = text.chars().take(limit).collect();
    format!("{}...", head)
  } else {
    text.to_string()
  }
}

/// Value as shown in a table: `Exec` newlines become ` | ` and the cell is cut at
/// [`EXEC_VALUE_WIDTH`], other values at [`VALUE_WIDTH`].
pub fn display_value(record: &ParameterRecord) -> String {
  if record.is_exec() {
    truncate(&record.value.replace('\n', " | "), EXEC_VALUE_WIDTH)
  } else {
    truncate(&record.value, VALUE_WIDTH)
  }
}

/// Display rows for the records of one document, matching [`RECORD_HEADERS`].
pub fn record_rows(
  file: &str,
  records: &[ParameterRecord],
  descriptions: &ParameterDescriptions,
) -> Vec<Vec<String>> {
  records
    .iter()
    .map(|r| {
      vec![
        file.to_string(),
        r.section_type.clone(),
        r.section_name.clone(),
        r.parameter.clone(),
        display_value(r),
        truncate(descriptions.describe(r), DESCRIPTION_WIDTH),
      ]
    })
    .collect()
}
