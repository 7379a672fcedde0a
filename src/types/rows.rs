//! Flat row projections for tabular and delimited-text sinks.
//!
//! Field renames are the CSV column headers.

use serde::Serialize;

use super::Flow;

/// One flow as a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRow {
  #[serde(rename = "Route")]
  pub route: String,
  #[serde(rename = "Source")]
  pub source: String,
  #[serde(rename = "Source_Type")]
  pub source_type: String,
  #[serde(rename = "Source_Module")]
  pub source_module: String,
  #[serde(rename = "Destination")]
  pub target: String,
  #[serde(rename = "Destination_Type")]
  pub target_type: String,
  #[serde(rename = "Destination_Module")]
  pub target_module: String,
  #[serde(rename = "Priority")]
  pub priority: String,
  #[serde(rename = "Condition")]
  pub condition: String,
}

impl From<&Flow> for FlowRow {
  fn from(flow: &Flow) -> Self {
    Self {
      route: flow.route.clone(),
      source: flow.source.clone(),
      source_type: flow.source_type_label().to_string(),
      source_module: flow.source_module.clone(),
      target: flow.target.clone(),
      target_type: flow.target_type_label().to_string(),
      target_module: flow.target_module.clone(),
      priority: flow.priority_label(),
      condition: flow.condition_label().to_string(),
    }
  }
}

impl FlowRow {
  pub const HEADERS: [&'static str; 9] = [
    "Route",
    "Source",
    "Source Type",
    "Source Module",
    "Destination",
    "Destination Type",
    "Destination Module",
    "Priority",
    "Condition",
  ];

  pub fn cells(&self) -> Vec<String> {
    vec![
      self.route.clone(),
      self.source.clone(),
      self.source_type.clone(),
      self.source_module.clone(),
      self.target.clone(),
      self.target_type.clone(),
      self.target_module.clone(),
      self.priority.clone(),
      self.condition.clone(),
    ]
  }
}

/// One section as a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
  #[serde(rename = "Section_Name")]
  pub section_name: String,
  #[serde(rename = "Type")]
  pub section_type: String,
  #[serde(rename = "Module")]
  pub module: String,
  #[serde(rename = "Connected_Routes")]
  pub connected_routes: String,
  #[serde(rename = "Route_Count")]
  pub route_count: usize,
}

impl SectionRow {
  pub const HEADERS: [&'static str; 5] =
    ["Section Name", "Type", "Module", "Connected Routes", "Route Count"];

  pub fn cells(&self) -> Vec<String> {
    vec![
      self.section_name.clone(),
      self.section_type.clone(),
      self.module.clone(),
      self.connected_routes.clone(),
      self.route_count.to_string(),
    ]
  }
}

/// One cartesian (source, destination) pair of a route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRow {
  #[serde(rename = "Route")]
  pub route: String,
  #[serde(rename = "Source")]
  pub source: String,
  #[serde(rename = "Destination")]
  pub target: String,
  #[serde(rename = "Priority")]
  pub priority: String,
  #[serde(rename = "Condition")]
  pub condition: String,
}
