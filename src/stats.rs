//! Record-level statistics for one document and across a batch.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::batch::DocumentAnalysis;
use crate::types::ParameterRecord;

/// Name of the parameter whose values count as modules.
const MODULE_PARAMETER: &str = "Module";

/// Statistics over the records of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigStats {
  pub total_parameters: usize,
  /// Distinct section types that carry at least one record.
  pub section_types: BTreeSet<String>,
  /// Distinct `Module` values.
  pub modules: BTreeSet<String>,
  /// Records whose parameter is `Exec`, in any case.
  pub exec_count: usize,
}

impl ConfigStats {
  pub fn from_records(records: &[ParameterRecord]) -> Self {
    let mut stats = ConfigStats {
      total_parameters: records.len(),
      ..Default::default()
    };
    for record in records {
      stats.section_types.insert(record.section_type.clone());
      if record.parameter == MODULE_PARAMETER {
        stats.modules.insert(record.value.clone());
      }
      if record.is_exec() {
        stats.exec_count += 1;
      }
    }
    stats
  }

  pub fn sections_count(&self) -> usize {
    self.section_types.len()
  }

  pub fn modules_count(&self) -> usize {
    self.modules.len()
  }
}

/// One document's line in [`ConsolidatedStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
  pub name: String,
  pub parameters: usize,
  pub sections: usize,
  pub modules: usize,
  pub exec_count: usize,
  pub routes: usize,
  pub flows: usize,
}

/// Statistics aggregated over several documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidatedStats {
  pub files: usize,
  pub total_parameters: usize,
  pub total_exec_count: usize,
  pub total_routes: usize,
  pub total_flows: usize,
  /// Union of the per-document section types.
  pub section_types: BTreeSet<String>,
  /// Union of the per-document modules.
  pub modules: BTreeSet<String>,
  pub per_file: Vec<FileStats>,
}

impl ConsolidatedStats {
  pub fn from_documents(documents: &[DocumentAnalysis]) -> Self {
    let mut total = ConsolidatedStats {
      files: documents.len(),
      ..Default::default()
    };
    for doc in documents {
      let stats = ConfigStats::from_records(&doc.records);
      let routes = doc.graph.routes.len();
      let flows = doc.graph.flows.len();

      total.total_parameters += stats.total_parameters;
      total.total_exec_count += stats.exec_count;
      total.total_routes += routes;
      total.total_flows += flows;
      total.per_file.push(FileStats {
        name: doc.name.clone(),
        parameters: stats.total_parameters,
        sections: stats.sections_count(),
        modules: stats.modules_count(),
        exec_count: stats.exec_count,
        routes,
        flows,
      });
      total.section_types.extend(stats.section_types);
      total.modules.extend(stats.modules);
    }
    total
  }

  pub fn total_sections(&self) -> usize {
    self.section_types.len()
  }

  pub fn total_modules(&self) -> usize {
    self.modules.len()
  }
}
