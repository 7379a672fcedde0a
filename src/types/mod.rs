//! Data model shared by the parser, the flow mapper and the exporters.
//!
//! Everything here is plain data deriving `Serialize`, so sinks can emit it directly.

mod flow;
mod flow_graph;
mod ordered_table;
mod parameter_record;
mod route;
mod rows;
mod section;
mod section_type;

pub use flow::{Flow, NOT_APPLICABLE, UNKNOWN};
pub use flow_graph::{FlowGraph, FlowStats, FlowSummary, NOT_CONNECTED};
pub use ordered_table::{Named, OrderedTable};
pub use parameter_record::ParameterRecord;
pub use route::Route;
pub use rows::{FlowRow, PairRow, SectionRow};
pub use section::Section;
pub use section_type::SectionType;
