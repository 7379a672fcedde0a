//! CLI: analyze NXLog configuration files and map their route flows.
//!
//! Usage: `nxlog_analyze [OPTIONS] [CONFIG_FILE]`
//! Example: nxlog_analyze --directory data --flows --stats --graphviz
//!
//! Records go to stdout as a table, CSV or JSON. Logs go to stderr; set
//! RUST_LOG=nxlog_flowmap=debug to follow section and route registration.

use clap::{CommandFactory, Parser, ValueEnum};
use nxlog_flowmap::batch::{BatchReport, DocumentAnalysis, analyze_batch, discover_configs};
use nxlog_flowmap::descriptions::ParameterDescriptions;
use nxlog_flowmap::stats::{ConfigStats, ConsolidatedStats};
use nxlog_flowmap::table::{RECORD_HEADERS, record_rows, render_grid};
use nxlog_flowmap::types::{FlowRow, SectionRow};
use nxlog_flowmap::{export, sample};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const OUTPUT_DIR: &str = "output";
const SAMPLE_DIR: &str = "data";
const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
  Table,
  Csv,
  Json,
}

/// Analyze NXLog configuration files and map their route flows.
#[derive(Parser, Debug)]
#[command(name = "nxlog_analyze")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  NXLOG_ANALYZER_OUTPUT_DIR    Directory for CSV and Graphviz files (default: output).
  NXLOG_ANALYZER_CONCURRENCY   Documents analyzed at once in directory mode (default: 4).

Examples:
  nxlog_analyze nxlog.conf --flows --stats
  nxlog_analyze --directory data --csv-multiple --flows-csv
  nxlog_analyze --directory data --graphviz
  nxlog_analyze --directory data --excel output.xlsx
  nxlog_analyze --create-sample"#
)]
struct Args {
  /// Configuration file to analyze
  #[arg(value_name = "CONFIG_FILE")]
  config_file: Option<PathBuf>,

  /// Analyze every .conf file in this directory
  #[arg(short, long, value_name = "DIR")]
  directory: Option<PathBuf>,

  /// Write the bundled sample configurations to ./data and exit
  #[arg(long)]
  create_sample: bool,

  /// Print the flow map of each document
  #[arg(long)]
  flows: bool,

  /// Print statistics
  #[arg(long)]
  stats: bool,

  /// Format of the record listing on stdout
  #[arg(long, value_enum, default_value_t = Format::Table)]
  format: Format,

  /// Write one <name>_config.csv per document
  #[arg(long)]
  csv_multiple: bool,

  /// Write <name>_flows.csv, <name>_sections.csv and <name>_pairs.csv per document
  #[arg(long)]
  flows_csv: bool,

  /// Write <name>_flow.dot and <name>_generate_images.sh per document
  #[arg(long)]
  graphviz: bool,

  /// Write every record of every document to one CSV file
  #[arg(long, value_name = "FILE")]
  consolidated_csv: Option<PathBuf>,

  /// Write an xlsx workbook: a record sheet per document plus flow and section sheets
  #[arg(long, value_name = "FILE")]
  excel: Option<PathBuf>,

  /// Directory for generated files. Overridden by NXLOG_ANALYZER_OUTPUT_DIR if set.
  #[arg(long, value_name = "DIR", default_value = OUTPUT_DIR)]
  output_dir: PathBuf,

  /// Documents analyzed at once. Overridden by NXLOG_ANALYZER_CONCURRENCY if set.
  #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
  concurrency: usize,
}

/// Human-readable reports go to stdout for tables and to stderr otherwise, so CSV and
/// JSON listings stay parseable.
struct Console {
  machine_output: bool,
}

impl Console {
  fn say(&self, text: impl AsRef<str>) {
    if self.machine_output {
      eprintln!("{}", text.as_ref());
    } else {
      println!("{}", text.as_ref());
    }
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  if args.create_sample {
    match sample::write_samples(SAMPLE_DIR) {
      Ok(paths) => {
        println!("{} sample files written:", paths.len());
        for path in paths {
          println!("  - {}", path.display());
        }
      }
      Err(e) => {
        eprintln!("Error: {}", e);
        process::exit(1);
      }
    }
    return;
  }

  // Env vars override flags.
  let output_dir = env::var("NXLOG_ANALYZER_OUTPUT_DIR")
    .ok()
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| args.output_dir.clone());
  let concurrency = match env::var("NXLOG_ANALYZER_CONCURRENCY") {
    Ok(raw) => raw.parse().unwrap_or_else(|_| {
      warn!(value = %raw, "ignoring invalid NXLOG_ANALYZER_CONCURRENCY");
      args.concurrency
    }),
    Err(_) => args.concurrency,
  };
  info!(output_dir = %output_dir.display(), concurrency, "options (env or flags)");

  let paths = if let Some(dir) = &args.directory {
    if !dir.is_dir() {
      eprintln!("Error: directory '{}' does not exist.", dir.display());
      process::exit(1);
    }
    match discover_configs(dir) {
      Ok(paths) if paths.is_empty() => {
        eprintln!("No .conf file found in '{}'.", dir.display());
        process::exit(1);
      }
      Ok(paths) => paths,
      Err(e) => {
        eprintln!("Error: {}", e);
        process::exit(1);
      }
    }
  } else if let Some(file) = &args.config_file {
    vec![file.clone()]
  } else {
    let _ = Args::command().print_help();
    process::exit(2);
  };

  let report = analyze_batch(paths, concurrency).await;
  for e in &report.skipped {
    eprintln!("Error: {}", e);
  }
  if report.processed() == 0 {
    eprintln!("No configuration file could be analyzed.");
    process::exit(1);
  }

  let console = Console {
    machine_output: args.format != Format::Table,
  };
  let descriptions = ParameterDescriptions::default();
  let mut failed = false;

  if let Err(e) = print_records(&report, &descriptions, args.format) {
    eprintln!("Error: {}", e);
    failed = true;
  }

  for doc in &report.documents {
    if args.flows {
      print_flows(&console, doc);
    }
    if args.flows_csv {
      let written = export::write_flows_csv(&output_dir, &doc.name, &doc.graph)
        .and_then(|flows| {
          let sections = export::write_sections_csv(&output_dir, &doc.name, &doc.graph)?;
          let pairs = export::write_pairs_csv(&output_dir, &doc.name, &doc.graph.routes)?;
          Ok([flows, sections, pairs])
        });
      match written {
        Ok(paths) => {
          for path in paths {
            console.say(format!("Written: {}", path.display()));
          }
        }
        Err(e) => {
          warn!(document = %doc.name, error = %e, "flow export failed");
          failed = true;
        }
      }
    }
    if args.csv_multiple {
      match export::write_config_csv(&output_dir, &doc.name, &doc.records, Some(&descriptions)) {
        Ok(path) => console.say(format!("Written: {}", path.display())),
        Err(e) => {
          warn!(document = %doc.name, error = %e, "config export failed");
          failed = true;
        }
      }
    }
    if args.graphviz {
      match export::write_graphviz(&output_dir, &doc.name, &doc.dot) {
        Ok(files) => {
          console.say(format!("Written: {}", files.dot.display()));
          console.say(format!("Written: {}", files.script.display()));
          console.say(format!(
            "To render images: cd {} && ./{}_generate_images.sh",
            output_dir.display(),
            doc.name
          ));
        }
        Err(e) => {
          warn!(document = %doc.name, error = %e, "graphviz export failed");
          failed = true;
        }
      }
    }
  }

  if let Some(path) = &args.consolidated_csv {
    match export::write_consolidated_csv(path, &report.documents, &descriptions) {
      Ok(path) => console.say(format!("Written: {}", path.display())),
      Err(e) => {
        warn!(error = %e, "consolidated export failed");
        failed = true;
      }
    }
  }

  if let Some(path) = &args.excel {
    match export::write_workbook(path, &report.documents, &descriptions) {
      Ok(path) => console.say(format!("Written: {}", path.display())),
      Err(e) => {
        warn!(error = %e, "workbook export failed");
        failed = true;
      }
    }
  }

  if args.stats {
    print_stats(&console, &report);
  }

  console.say(format!(
    "Done. {} file(s) analyzed, {} skipped.",
    report.processed(),
    report.skipped()
  ));
  if failed {
    process::exit(1);
  }
}

fn print_records(
  report: &BatchReport,
  descriptions: &ParameterDescriptions,
  format: Format,
) -> nxlog_flowmap::Result<()> {
  match format {
    Format::Table | Format::Csv => {
      let rows: Vec<Vec<String>> = report
        .documents
        .iter()
        .flat_map(|doc| record_rows(&doc.name, &doc.records, descriptions))
        .collect();
      if format == Format::Table {
        if rows.is_empty() {
          println!("No parameter found in the configuration files.");
        } else {
          println!("{}", render_grid(&RECORD_HEADERS, &rows));
        }
      } else {
        print!("{}", export::csv_string(&RECORD_HEADERS, &rows)?);
      }
    }
    Format::Json => {
      println!("{}", export::json_report(&report.documents, descriptions)?);
    }
  }
  Ok(())
}

fn print_flows(console: &Console, doc: &DocumentAnalysis) {
  let rule = "=".repeat(80);
  let summary = doc.graph.summary();
  console.say("");
  console.say(&rule);
  console.say(format!("FLOW MAP - {}", doc.name.to_uppercase()));
  console.say(&rule);
  console.say("Summary:");
  console.say(format!("  Routes: {}", summary.total_routes));
  console.say(format!("  Sections: {}", summary.total_sections));
  console.say(format!("  Flows: {}", summary.total_flows));
  console.say(format!("  Inputs: {}", summary.input_sections));
  console.say(format!("  Outputs: {}", summary.output_sections));
  console.say(format!("  Processors: {}", summary.processor_sections));
  console.say(format!("  Extensions: {}", summary.extension_sections));
  console.say(format!("  Unconnected sections: {}", summary.unconnected_sections));

  let flows: Vec<Vec<String>> = doc.graph.flow_rows().iter().map(FlowRow::cells).collect();
  if !flows.is_empty() {
    console.say("\nFlows:");
    console.say(render_grid(&FlowRow::HEADERS, &flows));
  }
  let sections: Vec<Vec<String>> = doc
    .graph
    .section_rows()
    .iter()
    .map(SectionRow::cells)
    .collect();
  console.say("\nSections:");
  console.say(render_grid(&SectionRow::HEADERS, &sections));
}

fn print_stats(console: &Console, report: &BatchReport) {
  if let [doc] = report.documents.as_slice() {
    let rule = "=".repeat(50);
    let stats = ConfigStats::from_records(&doc.records);
    let summary = doc.graph.summary();
    console.say("");
    console.say(&rule);
    console.say("CONFIGURATION STATISTICS");
    console.say(&rule);
    console.say(format!("Parameters: {}", stats.total_parameters));
    console.say(format!("Section types: {}", stats.sections_count()));
    console.say(format!("Modules: {}", stats.modules_count()));
    console.say(format!("Exec parameters: {}", stats.exec_count));
    if !stats.section_types.is_empty() {
      console.say(format!("\nSection types found: {}", join(&stats.section_types)));
    }
    if !stats.modules.is_empty() {
      console.say(format!("Modules used: {}", join(&stats.modules)));
    }
    console.say("\nFlow statistics:");
    console.say(format!("Routes: {}", summary.total_routes));
    console.say(format!("Flows: {}", summary.total_flows));
    console.say(format!("Unconnected sections: {}", summary.unconnected_sections));
    console.say(&rule);
    return;
  }

  let rule = "=".repeat(60);
  let stats = ConsolidatedStats::from_documents(&report.documents);
  console.say("");
  console.say(&rule);
  console.say("CONSOLIDATED CONFIGURATION STATISTICS");
  console.say(&rule);
  console.say(format!("Files: {}", stats.files));
  console.say(format!("Parameters: {}", stats.total_parameters));
  console.say(format!("Section types: {}", stats.total_sections()));
  console.say(format!("Modules: {}", stats.total_modules()));
  console.say(format!("Exec parameters: {}", stats.total_exec_count));
  console.say(format!("Routes: {}", stats.total_routes));
  console.say(format!("Flows: {}", stats.total_flows));
  if !stats.section_types.is_empty() {
    console.say(format!("\nSection types found: {}", join(&stats.section_types)));
  }
  if !stats.modules.is_empty() {
    console.say(format!("Modules used: {}", join(&stats.modules)));
  }
  console.say(format!("\n{}", "-".repeat(60)));
  console.say("PER FILE");
  console.say("-".repeat(60));
  for file in &stats.per_file {
    console.say(format!("\n{}:", file.name));
    console.say(format!("  Parameters: {}", file.parameters));
    console.say(format!("  Section types: {}", file.sections));
    console.say(format!("  Modules: {}", file.modules));
    console.say(format!("  Exec parameters: {}", file.exec_count));
    console.say(format!("  Routes: {}", file.routes));
    console.say(format!("  Flows: {}", file.flows));
  }
  console.say(&rule);
}

fn join(items: &std::collections::BTreeSet<String>) -> String {
  items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
