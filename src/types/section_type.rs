//! Section type (the tag name of a configuration block).

use serde::{Serialize, Serializer};
use std::fmt;

/// Section type taken from a block's opening tag.
///
/// The known NXLog block kinds get their own variant; any other tag is kept verbatim in
/// [`SectionType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionType {
  Input,
  Output,
  Processor,
  Extension,
  Route,
  Other(String),
}

impl SectionType {
  /// Known types in legend order.
  pub const KNOWN: [SectionType; 5] = [
    SectionType::Input,
    SectionType::Output,
    SectionType::Processor,
    SectionType::Extension,
    SectionType::Route,
  ];

  /// Classifies a tag name. Matching is case-sensitive, like the route detection in the parser.
  pub fn from_tag(tag: &str) -> Self {
    match tag {
      "Input" => SectionType::Input,
      "Output" => SectionType::Output,
      "Processor" => SectionType::Processor,
      "Extension" => SectionType::Extension,
      "Route" => SectionType::Route,
      other => SectionType::Other(other.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      SectionType::Input => "Input",
      SectionType::Output => "Output",
      SectionType::Processor => "Processor",
      SectionType::Extension => "Extension",
      SectionType::Route => "Route",
      SectionType::Other(tag) => tag,
    }
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, SectionType::Other(_))
  }
}

impl fmt::Display for SectionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for SectionType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}
