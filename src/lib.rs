//! # nxlog-flowmap
//!
//! Static analysis of NXLog-style configuration documents.
//!
//! A document is parsed into parameter records, declared sections and routes
//! ([`config_parser`]). Route paths (`a, b => proc => out`) are chained into directed flows
//! between sections ([`flow_mapper`]), and the resulting [`FlowGraph`] can be rendered to
//! Graphviz DOT ([`graphviz`]) or exported as `;`-delimited CSV and JSON ([`export`]).
//!
//! Parsing and analysis never fail; only reading documents and writing outputs return
//! [`AnalyzerError`]. Several documents can be analyzed concurrently with
//! [`batch::analyze_batch`].

pub mod batch;
pub mod config_parser;
#[cfg(test)]
mod config_parser_test;
pub mod descriptions;
#[cfg(test)]
mod descriptions_test;
pub mod error;
#[cfg(test)]
mod error_test;
pub mod export;
pub mod flow_mapper;
pub mod graphviz;
pub mod route_path;
pub mod sample;
pub mod scanner;
pub mod stats;
#[cfg(test)]
mod stats_test;
pub mod table;
pub mod types;

pub use batch::{BatchReport, DocumentAnalysis, analyze_batch, analyze_document, discover_configs};
pub use config_parser::{ParsedConfig, parse_config};
pub use descriptions::ParameterDescriptions;
pub use error::{AnalyzerError, Result};
pub use flow_mapper::analyze;
pub use graphviz::{image_script, render_dot};
pub use route_path::expand_pairs;
pub use stats::{ConfigStats, ConsolidatedStats};
pub use types::{Flow, FlowGraph, ParameterRecord, Route, Section, SectionType};
