//! Analyzed flow graph of one configuration document.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::{Flow, FlowRow, OrderedTable, Route, Section, SectionRow, SectionType};

/// Shown in section rows for a section no route names.
pub const NOT_CONNECTED: &str = "Not connected";

/// Connectivity statistics of a [`FlowGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowStats {
  pub total_routes: usize,
  pub total_sections: usize,
  pub total_flows: usize,
  pub unconnected_sections: usize,
  /// Section count per type name.
  pub by_type: BTreeMap<String, usize>,
}

/// Per-known-type overview of a [`FlowGraph`].
///
/// `unconnected_sections` here counts sections that no route names at all, which can differ
/// from [`FlowStats::unconnected_sections`]: a section named by a one-component route is
/// connected to that route but is the endpoint of no flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowSummary {
  pub total_routes: usize,
  pub total_sections: usize,
  pub total_flows: usize,
  pub input_sections: usize,
  pub output_sections: usize,
  pub processor_sections: usize,
  pub extension_sections: usize,
  pub unconnected_sections: usize,
}

/// Sections, routes and the flows derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
  pub sections: OrderedTable<Section>,
  pub routes: OrderedTable<Route>,
  /// Route declaration order, then component order within each route.
  pub flows: Vec<Flow>,
  /// Declared sections that are neither source nor target of any flow.
  pub unconnected: BTreeSet<String>,
  pub stats: FlowStats,
}

impl FlowGraph {
  pub fn is_unconnected(&self, section: &str) -> bool {
    self.unconnected.contains(section)
  }

  pub fn flows_for_route<'a>(&'a self, route: &'a str) -> impl Iterator<Item = &'a Flow> + 'a {
    self.flows.iter().filter(move |f| f.route == route)
  }

  /// Section types present, in declaration order of their first section.
  pub fn section_types(&self) -> Vec<&SectionType> {
    let mut seen: Vec<&SectionType> = Vec::new();
    for section in &self.sections {
      if !seen.contains(&&section.section_type) {
        seen.push(&section.section_type);
      }
    }
    seen
  }

  pub fn summary(&self) -> FlowSummary {
    let count = |t: SectionType| {
      self
        .sections
        .iter()
        .filter(|s| s.section_type == t)
        .count()
    };
    FlowSummary {
      total_routes: self.routes.len(),
      total_sections: self.sections.len(),
      total_flows: self.flows.len(),
      input_sections: count(SectionType::Input),
      output_sections: count(SectionType::Output),
      processor_sections: count(SectionType::Processor),
      extension_sections: count(SectionType::Extension),
      unconnected_sections: self
        .sections
        .iter()
        .filter(|s| s.connected_routes.is_empty())
        .count(),
    }
  }

  pub fn flow_rows(&self) -> Vec<FlowRow> {
    self.flows.iter().map(FlowRow::from).collect()
  }

  pub fn section_rows(&self) -> Vec<SectionRow> {
    self
      .sections
      .iter()
      .map(|s| SectionRow {
        section_name: s.name.clone(),
        section_type: s.section_type.to_string(),
        module: s
          .module
          .clone()
          .unwrap_or_else(|| super::NOT_APPLICABLE.to_string()),
        connected_routes: if s.connected_routes.is_empty() {
          NOT_CONNECTED.to_string()
        } else {
          s.connected_routes.join(", ")
        },
        route_count: s.connected_routes.len(),
      })
      .collect()
  }
}
