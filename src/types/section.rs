//! A declared, uniquely named configuration block.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Named, SectionType};

/// A declared configuration block (a node of the flow graph).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
  pub name: String,
  #[serde(rename = "type")]
  pub section_type: SectionType,
  /// Value of the block's `Module` parameter, if any.
  pub module: Option<String>,
  /// Last-seen value per parameter name within the block.
  pub attributes: BTreeMap<String, String>,
  /// Routes naming this section, one entry per appearance. Filled by flow analysis only.
  pub connected_routes: Vec<String>,
}

impl Section {
  pub fn new(
    name: impl Into<String>,
    section_type: SectionType,
    module: Option<String>,
    attributes: BTreeMap<String, String>,
  ) -> Self {
    Self {
      name: name.into(),
      section_type,
      module,
      attributes,
      connected_routes: Vec::new(),
    }
  }

  pub fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.get(key).map(String::as_str)
  }
}

impl Named for Section {
  fn name(&self) -> &str {
    &self.name
  }
}
