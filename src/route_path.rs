//! Route path expressions: `in1, in2 => proc => out1, out2`.
//!
//! `,` binds tighter than the `=>` stage separator. Two readings of a path coexist:
//! [`interpret`] sorts names into inputs / processors / outputs for the flow mapper, and
//! [`expand_pairs`] yields the cartesian product of every pair of adjacent stages for the
//! pairs export.

use tracing::instrument;

/// Token separating the stages of a path.
pub const STAGE_SEPARATOR: &str = "=>";

/// Names of a path, classified by stage position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteComponents {
  /// First stage.
  pub inputs: Vec<String>,
  /// Interior stages, flattened in order.
  pub processors: Vec<String>,
  /// Last stage (only when there are at least two stages).
  pub outputs: Vec<String>,
}

/// Splits a stage on `,`, trimming each name. Empty names are kept.
fn split_stage(stage: &str) -> Vec<String> {
  stage.split(',').map(|name| name.trim().to_string()).collect()
}

/// Classifies the names of `path` into inputs, processors and outputs.
///
/// A path without any `=>` yields no components at all, so such a route produces no
/// flows. Empty stages contribute nothing.
#[instrument(level = "trace")]
pub fn interpret(path: &str) -> RouteComponents {
  let mut components = RouteComponents::default();
  if !path.contains(STAGE_SEPARATOR) {
    return components;
  }

  let stages: Vec<&str> = path.split(STAGE_SEPARATOR).map(str::trim).collect();
  let last = stages.len() - 1;

  if !stages[0].is_empty() {
    components.inputs = split_stage(stages[0]);
  }
  if last >= 1 && !stages[last].is_empty() {
    components.outputs = split_stage(stages[last]);
  }
  for stage in stages.iter().take(last).skip(1) {
    if !stage.is_empty() {
      components.processors.extend(split_stage(stage));
    }
  }
  components
}

/// Expands `path` into every (source, destination) pair between adjacent stages.
///
/// Unlike the flow mapper's pairwise chaining, this is a full cartesian product per stage
/// pair: `a, b => c, d` gives a→c, a→d, b→c, b→d. Pairs with an empty side are skipped.
#[instrument(level = "trace")]
pub fn expand_pairs(path: &str) -> Vec<(String, String)> {
  let stages: Vec<Vec<String>> = path
    .trim()
    .split(STAGE_SEPARATOR)
    .map(split_stage)
    .collect();

  let mut pairs = Vec::new();
  for window in stages.windows(2) {
    for source in &window[0] {
      for dest in &window[1] {
        if !source.is_empty() && !dest.is_empty() {
          pairs.push((source.clone(), dest.clone()));
        }
      }
    }
  }
  pairs
}
