//! Line scanner: comment stripping and a cursor over the document's lines.

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)#.*$").unwrap());

/// Removes everything from `#` to end of line, on every line.
///
/// Quoting is not considered: a `#` inside a value starts a comment too.
pub fn strip_comments(text: &str) -> String {
  COMMENT.replace_all(text, "").into_owned()
}

/// Indexable, cursor-driven view of a document's lines, comments already stripped.
///
/// The parser moves the cursor itself so that it can look ahead and consume several
/// lines at once (exec blocks, implicit `Exec` runs).
#[derive(Debug, Clone)]
pub struct LineScanner {
  lines: Vec<String>,
  pos: usize,
}

impl LineScanner {
  pub fn new(text: &str) -> Self {
    let stripped = strip_comments(text);
    Self {
      lines: stripped.split('\n').map(String::from).collect(),
      pos: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn position(&self) -> usize {
    self.pos
  }

  pub fn is_done(&self) -> bool {
    self.pos >= self.lines.len()
  }

  /// Trimmed line at absolute index `i`.
  pub fn line(&self, i: usize) -> Option<&str> {
    self.lines.get(i).map(|l| l.trim())
  }

  /// Trimmed line under the cursor.
  pub fn current(&self) -> Option<&str> {
    self.line(self.pos)
  }

  pub fn advance(&mut self) {
    self.pos += 1;
  }

  /// Moves the cursor to absolute index `i`.
  pub fn seek(&mut self, i: usize) {
    self.pos = i.min(self.lines.len());
  }
}
