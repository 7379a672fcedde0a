//! A named path declaration from a `Route` block.

use serde::Serialize;

use super::Named;
use crate::route_path::{self, RouteComponents};

/// A route declared by a `Route` block's `Path` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
  pub name: String,
  pub raw_path: String,
  pub priority: Option<i64>,
  pub condition: Option<String>,
  /// Names in the first stage.
  pub inputs: Vec<String>,
  /// Names of all interior stages, flattened in stage order.
  pub processors: Vec<String>,
  /// Names in the last stage.
  pub outputs: Vec<String>,
}

impl Route {
  /// Builds a route and interprets its path expression.
  pub fn from_path(
    name: impl Into<String>,
    raw_path: impl Into<String>,
    priority: Option<i64>,
    condition: Option<String>,
  ) -> Self {
    let raw_path = raw_path.into();
    let RouteComponents {
      inputs,
      processors,
      outputs,
    } = route_path::interpret(&raw_path);
    Self {
      name: name.into(),
      raw_path,
      priority,
      condition,
      inputs,
      processors,
      outputs,
    }
  }

  /// `inputs ++ processors ++ outputs`.
  pub fn components(&self) -> Vec<&str> {
    self
      .inputs
      .iter()
      .chain(&self.processors)
      .chain(&self.outputs)
      .map(String::as_str)
      .collect()
  }
}

impl Named for Route {
  fn name(&self) -> &str {
    &self.name
  }
}
