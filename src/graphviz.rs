//! Graphviz DOT rendering of a [`FlowGraph`].

use std::collections::HashMap;
use std::fmt::Write;
use tracing::instrument;

use crate::types::{FlowGraph, SectionType};

/// Fill color for sections of a type without an entry in [`node_color`].
pub const DEFAULT_NODE_COLOR: &str = "#FFFFFF";

/// Edge colors, handed out per route in first-seen order and reused cyclically.
pub const ROUTE_PALETTE: [&str; 6] = [
  "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD",
];

/// Conditions longer than this are cut in edge labels.
pub const CONDITION_LABEL_LIMIT: usize = 30;

const LEGEND_FILL: &str = "#F5F5F5";
const LEGEND_DISCONNECTED: &str = "Not connected";

pub fn node_color(section_type: &SectionType) -> &'static str {
  match section_type {
    SectionType::Input => "#E8F5E8",
    SectionType::Output => "#FFE8E8",
    SectionType::Processor => "#E8E8FF",
    SectionType::Extension => "#FFFFE8",
    SectionType::Route => "#F0F0F0",
    SectionType::Other(_) => DEFAULT_NODE_COLOR,
  }
}

/// Renders the graph as a `digraph NXLogFlow`: one node per section, one edge per flow, and a
/// legend cluster. Output depends only on the graph.
#[instrument(level = "trace", skip(graph), fields(sections = graph.sections.len(), flows = graph.flows.len()))]
pub fn render_dot(graph: &FlowGraph) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "digraph NXLogFlow {{");
  let _ = writeln!(out, "    rankdir=LR;");
  let _ = writeln!(out, "    node [shape=box, style=filled];");
  let _ = writeln!(out, "    edge [fontsize=10];");
  out.push('\n');

  out.push_str("    // Sections\n");
  for section in &graph.sections {
    let mut label = format!(
      "{}\\n({})",
      escape(&section.name),
      escape(section.section_type.as_str())
    );
    if let Some(module) = section.module.as_deref().filter(|m| !m.is_empty()) {
      let _ = write!(label, "\\n{}", escape(module));
    }
    let color = node_color(&section.section_type);
    if graph.is_unconnected(&section.name) {
      let _ = writeln!(
        out,
        "    \"{}\" [label=\"{}\", fillcolor=\"{}\", style=\"filled,dashed\"];",
        escape(&section.name),
        label,
        color
      );
    } else {
      let _ = writeln!(
        out,
        "    \"{}\" [label=\"{}\", fillcolor=\"{}\"];",
        escape(&section.name),
        label,
        color
      );
    }
  }
  out.push('\n');

  out.push_str("    // Flows\n");
  let mut route_colors: HashMap<&str, &str> = HashMap::new();
  for flow in &graph.flows {
    let next = ROUTE_PALETTE[route_colors.len() % ROUTE_PALETTE.len()];
    let color = *route_colors.entry(flow.route.as_str()).or_insert(next);

    let mut label = format!("Route: {}", escape(&flow.route));
    if let Some(priority) = flow.priority {
      let _ = write!(label, "\\nPriority: {}", priority);
    }
    if let Some(condition) = &flow.condition {
      let _ = write!(label, "\\nCondition: {}", escape(&shorten(condition)));
    }
    let _ = writeln!(
      out,
      "    \"{}\" -> \"{}\" [label=\"{}\", color=\"{}\", fontcolor=\"{}\"];",
      escape(&flow.source),
      escape(&flow.target),
      label,
      color,
      color
    );
  }
  out.push('\n');

  render_legend(graph, &mut out);
  out.push('\n');
  out.push('}');
  out
}

fn render_legend(graph: &FlowGraph, out: &mut String) {
  out.push_str("    // Legend\n");
  out.push_str("    subgraph cluster_legend {\n");
  out.push_str("        label=\"Legend\";\n");
  out.push_str("        style=filled;\n");
  let _ = writeln!(out, "        fillcolor=\"{}\";", LEGEND_FILL);
  out.push_str("        fontsize=12;\n");
  out.push('\n');

  let present = graph.section_types();
  let known_types = SectionType::KNOWN;
  let known = known_types.iter().filter(|t| present.contains(t));
  let other = present.iter().copied().filter(|t| !t.is_known());
  for section_type in known.chain(other) {
    let name = escape(section_type.as_str());
    let _ = writeln!(
      out,
      "        \"legend_{}\" [label=\"{}\", fillcolor=\"{}\", shape=box];",
      name,
      name,
      node_color(section_type)
    );
  }
  let _ = writeln!(
    out,
    "        \"legend_disconnected\" [label=\"{}\", fillcolor=\"{}\", style=\"filled,dashed\", shape=box];",
    LEGEND_DISCONNECTED, DEFAULT_NODE_COLOR
  );
  out.push_str("    }\n");
}

fn shorten(condition: &str) -> String {
  if condition.chars().count() > CONDITION_LABEL_LIMIT {
    let head: String = condition.chars().take(CONDITION_LABEL_LIMIT).collect();
    format!("{}...", head)
  } else {
    condition.to_string()
  }
}

/// Escapes text for use inside a double-quoted DOT string.
pub fn escape(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace('"', "\\\"")
    .replace('\n', "\\n")
    .replace('\r', "\\r")
    .replace('\t', "\\t")
}

/// Shell script that renders `<base_name>_flow.dot` to PNG, SVG and PDF with `dot`.
pub fn image_script(base_name: &str) -> String {
  let mut out = String::new();
  out.push_str("#!/bin/bash\n");
  out.push_str("# Renders the flow map from the .dot file.\n");
  out.push_str("# Requires Graphviz (e.g. sudo apt-get install graphviz).\n\n");
  for (format, comment) in [
    ("png", "PNG image"),
    ("svg", "SVG image (vector)"),
    ("pdf", "PDF document"),
  ] {
    let _ = writeln!(out, "# {}", comment);
    let _ = writeln!(
      out,
      "dot -T{} {}_flow.dot -o {}_flow.{}\n",
      format, base_name, base_name, format
    );
  }
  out.push_str("echo 'Images generated.'\n");
  out
}
