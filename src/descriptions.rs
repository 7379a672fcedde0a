//! Human-readable descriptions of NXLog parameters, attached to records on export.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::types::ParameterRecord;

/// Used for an `Exec` record when the table has no `Exec` entry.
pub const EXEC_FALLBACK: &str = "Block of statements to execute";

/// Used for any parameter missing from the table.
pub const GENERIC_FALLBACK: &str = "Module-specific parameter";

static BUILTIN: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
  vec![
    // General
    ("Module", "Module in use (im_file, om_file, ...)"),
    ("File", "Path of the log file"),
    ("InputType", "Input data type"),
    ("OutputType", "Output data type"),
    ("Host", "IP address or host name"),
    ("Port", "Connection port"),
    ("Protocol", "Transport protocol (TCP/UDP)"),
    ("Facility", "Syslog facility"),
    ("Severity", "Severity level"),
    ("SourceName", "Source name"),
    ("Exec", "Statement or script to execute (may span several lines)"),
    ("Schedule", "Execution schedule"),
    ("SavePos", "Persist the read position"),
    ("ReadFromLast", "Start reading from the last position"),
    ("PollInterval", "Polling interval in seconds"),
    ("DirCheckInterval", "Directory check interval"),
    ("ActiveFiles", "Maximum number of open files"),
    ("CloseWhenIdle", "Close idle files"),
    ("Format", "Data format"),
    ("CSVDelimiter", "CSV delimiter"),
    ("CSVQuoteChar", "CSV quote character"),
    ("Fields", "Declared fields"),
    ("Types", "Field data types"),
    ("Reconnect", "Automatic reconnection"),
    ("ConnectionTimeout", "Connection timeout"),
    ("FlushInterval", "Flush interval"),
    ("SyncInterval", "Sync interval"),
    ("CreateDir", "Create the directory if missing"),
    ("Truncate", "Truncate the file"),
    ("Sync", "Force synchronous writes"),
    ("BufferSize", "Buffer size"),
    // Global directives
    ("LogLevel", "Log level"),
    ("LogFile", "Log file"),
    ("LogToConsole", "Print logs to the console"),
    ("SpoolDir", "Spool directory"),
    ("CacheDir", "Cache directory"),
    ("PidFile", "PID file"),
    ("RootDir", "Root directory"),
    ("User", "Run-as user"),
    ("Group", "Run-as group"),
    ("ModuleDir", "Module directory"),
    ("IncludeDir", "Include directory"),
    ("SharedDir", "Shared directory"),
    ("DefaultCharset", "Default character set"),
    ("NoCache", "Disable the cache"),
    ("Threads", "Number of threads"),
    ("MaxEvents", "Maximum number of events"),
    ("MaxQueueSize", "Maximum queue size"),
    // Routing
    ("Route", "Processing route"),
    ("Path", "Processing path"),
    ("Priority", "Priority"),
    ("Condition", "Execution condition"),
    ("Drop", "Drop the event"),
    ("Transform", "Data transformation"),
    // Regular expressions
    ("Regex", "Regular expression"),
    ("Pattern", "Search pattern"),
    ("Replacement", "Replacement string"),
    ("Global", "Replace all matches"),
    ("CaseSensitive", "Case sensitive"),
    ("Multiline", "Multi-line mode"),
    ("DotAll", "Dot matches newlines"),
    ("Extended", "Extended mode"),
    ("Ungreedy", "Non-greedy mode"),
    ("Key", "Configuration key"),
    ("Value", "Configuration value"),
    // TLS and compression
    ("SSL", "Use SSL/TLS"),
    ("CertFile", "Certificate file"),
    ("CertKeyFile", "Private key file"),
    ("CAFile", "CA file"),
    ("CRLFile", "CRL file"),
    ("AllowUntrusted", "Accept untrusted certificates"),
    ("Compression", "Data compression"),
    ("Gzip", "gzip compression"),
    ("Bzip2", "bzip2 compression"),
    ("XZ", "xz compression"),
    // Authentication and HTTP
    ("Password", "Password"),
    ("Username", "User name"),
    ("Domain", "Domain"),
    ("Workstation", "Workstation name"),
    ("HTTPSProxy", "HTTPS proxy"),
    ("HTTPProxy", "HTTP proxy"),
    ("ProxyUser", "Proxy user"),
    ("ProxyPass", "Proxy password"),
    ("ContentType", "Content type"),
    ("Headers", "HTTP headers"),
    ("URL", "Destination URL"),
    ("HTTPSCertFile", "HTTPS certificate file"),
    ("HTTPSCertKeyFile", "HTTPS private key file"),
    ("HTTPSCAFile", "HTTPS CA file"),
    ("HTTPSCRLFile", "HTTPS CRL file"),
    ("HTTPSAllowUntrusted", "Accept untrusted HTTPS certificates"),
    // Structured formats
    ("JSONDateFormat", "JSON date format"),
    ("JSONDateField", "JSON date field"),
    ("JSONTimeFormat", "JSON time format"),
    ("JSONTimeField", "JSON time field"),
    ("XMLDateFormat", "XML date format"),
    ("XMLDateField", "XML date field"),
    ("XMLTimeFormat", "XML time format"),
    ("XMLTimeField", "XML time field"),
    ("Delimiter", "Delimiter"),
    ("QuoteChar", "Quote character"),
    ("EscapeChar", "Escape character"),
    ("EscapeControl", "Escape control characters"),
    ("UndefValue", "Value for undefined fields"),
    ("HeaderLine", "Header line"),
    ("FieldTypes", "Field types"),
    ("FieldNames", "Field names"),
  ]
});

/// Read-only lookup from parameter name to description.
///
/// Passed explicitly to the export and table code; the parser never consults it.
#[derive(Debug, Clone)]
pub struct ParameterDescriptions {
  table: HashMap<String, String>,
}

impl Default for ParameterDescriptions {
  fn default() -> Self {
    Self {
      table: BUILTIN
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    }
  }
}

impl ParameterDescriptions {
  /// A table with no entries, so every lookup falls back.
  pub fn empty() -> Self {
    Self {
      table: HashMap::new(),
    }
  }

  /// Adds or replaces one entry.
  pub fn with(mut self, parameter: impl Into<String>, description: impl Into<String>) -> Self {
    self.table.insert(parameter.into(), description.into());
    self
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  /// Exact-name lookup.
  pub fn get(&self, parameter: &str) -> Option<&str> {
    self.table.get(parameter).map(String::as_str)
  }

  /// Description of a record. Exec records (any case) use the `Exec` entry.
  pub fn describe(&self, record: &ParameterRecord) -> &str {
    if record.is_exec() {
      self.get("Exec").unwrap_or(EXEC_FALLBACK)
    } else {
      self.get(&record.parameter).unwrap_or(GENERIC_FALLBACK)
    }
  }

  /// Pairs every record with its description.
  pub fn annotate(&self, records: &[ParameterRecord]) -> Vec<DescribedRecord> {
    records
      .iter()
      .map(|r| DescribedRecord::new(r, self.describe(r)))
      .collect()
  }
}

/// A parameter record with its description, as written to CSV and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribedRecord {
  #[serde(rename = "Section_Type")]
  pub section_type: String,
  #[serde(rename = "Section_Name")]
  pub section_name: String,
  #[serde(rename = "Parameter")]
  pub parameter: String,
  #[serde(rename = "Value")]
  pub value: String,
  #[serde(rename = "Description")]
  pub description: String,
}

impl DescribedRecord {
  pub fn new(record: &ParameterRecord, description: &str) -> Self {
    Self {
      section_type: record.section_type.clone(),
      section_name: record.section_name.clone(),
      parameter: record.parameter.clone(),
      value: record.value.clone(),
      description: description.to_string(),
    }
  }
}
