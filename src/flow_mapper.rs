//! Flow analysis: turns sections and routes into a [`FlowGraph`].
//!
//! Each route's components are flattened (`inputs ++ processors ++ outputs`) and chained
//! pairwise: one flow per pair of list-adjacent names, whatever stage they came from.
//! `a, b => c, d` therefore yields a→b, b→c, c→d. The cartesian reading of a path lives
//! in [`crate::route_path::expand_pairs`] and is not used here.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

use crate::types::{Flow, FlowGraph, FlowStats, OrderedTable, Route, Section, SectionType, UNKNOWN};

/// Builds the flow graph. Pure: the input tables are not modified and the same input
/// always gives the same graph.
#[instrument(level = "trace", skip_all, fields(sections = sections.len(), routes = routes.len()))]
pub fn analyze(sections: &OrderedTable<Section>, routes: &OrderedTable<Route>) -> FlowGraph {
  let mut sections = sections.clone();
  for section in sections.iter_mut() {
    section.connected_routes.clear();
  }

  let mut flows = Vec::new();
  for route in routes {
    let components = route.components();
    for name in &components {
      if let Some(section) = sections.get_mut(name) {
        section.connected_routes.push(route.name.clone());
      }
    }
    flows.extend(pairwise_flows(route, &components, &sections));
  }

  let unconnected = unconnected_sections(&sections, &flows);
  let stats = compute_stats(&sections, routes, &flows, &unconnected);
  debug!(
    flows = flows.len(),
    unconnected = unconnected.len(),
    "flow analysis complete"
  );

  FlowGraph {
    sections,
    routes: routes.clone(),
    flows,
    unconnected,
    stats,
  }
}

/// One flow per consecutive pair of `components`, tagged with `route`'s identity,
/// priority and condition. Endpoints not declared in `sections` get an unknown type and
/// the [`UNKNOWN`] module.
pub fn pairwise_flows(
  route: &Route,
  components: &[&str],
  sections: &OrderedTable<Section>,
) -> Vec<Flow> {
  components
    .windows(2)
    .map(|pair| {
      let (source, target) = (pair[0], pair[1]);
      let (source_type, source_module) = endpoint(sections, source);
      let (target_type, target_module) = endpoint(sections, target);
      Flow {
        route: route.name.clone(),
        source: source.to_string(),
        target: target.to_string(),
        source_type,
        target_type,
        source_module,
        target_module,
        priority: route.priority,
        condition: route.condition.clone(),
      }
    })
    .collect()
}

fn endpoint(
  sections: &OrderedTable<Section>,
  name: &str,
) -> (Option<SectionType>, String) {
  match sections.get(name) {
    Some(section) => (
      Some(section.section_type.clone()),
      section.module.clone().unwrap_or_default(),
    ),
    None => (None, UNKNOWN.to_string()),
  }
}

/// Declared section names that are neither the source nor the target of any flow.
pub fn unconnected_sections(sections: &OrderedTable<Section>, flows: &[Flow]) -> BTreeSet<String> {
  let connected: BTreeSet<&str> = flows
    .iter()
    .flat_map(|f| [f.source.as_str(), f.target.as_str()])
    .collect();
  sections
    .names()
    .filter(|name| !connected.contains(name))
    .map(String::from)
    .collect()
}

fn compute_stats(
  sections: &OrderedTable<Section>,
  routes: &OrderedTable<Route>,
  flows: &[Flow],
  unconnected: &BTreeSet<String>,
) -> FlowStats {
  let mut by_type = BTreeMap::new();
  for section in sections {
    *by_type
      .entry(section.section_type.to_string())
      .or_insert(0usize) += 1;
  }
  FlowStats {
    total_routes: routes.len(),
    total_sections: sections.len(),
    total_flows: flows.len(),
    unconnected_sections: unconnected.len(),
    by_type,
  }
}
