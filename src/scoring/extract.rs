//! Recovering the consolidated score from a task's event history.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::gateway::{EventBatch, Part};

/// Keys every consolidated payload must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["score", "softSkillFeedback", "techSkillFeedback"];

/// The final scoring payload, returned to the caller as-is.
///
/// Only [`ConsolidatedResult::from_value`] builds one, so holding a value
/// means the shape check passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConsolidatedResult(Map<String, Value>);

impl ConsolidatedResult {
    /// Accept `value` if it is an object carrying all [`REQUIRED_KEYS`].
    ///
    /// Value types are not checked.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if REQUIRED_KEYS.iter().all(|k| map.contains_key(*k)) => {
                Some(Self(map))
            }
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Find the most recent consolidated payload in `batch`.
///
/// Events are scanned newest first, and within an event the parts are scanned
/// last first. Candidates that fail validation are skipped.
pub fn extract_consolidated(batch: &EventBatch) -> Option<ConsolidatedResult> {
    batch.tasks.values().find_map(|record| {
        record
            .events
            .iter()
            .rev()
            .filter_map(|event| event.message())
            .find_map(|message| message.parts.iter().rev().find_map(candidate))
    })
}

fn candidate(part: &Part) -> Option<ConsolidatedResult> {
    match part {
        Part::Data { data } => ConsolidatedResult::from_value(data.clone()),
        Part::Text { text } => parse_text_payload(text),
        Part::Other => None,
    }
}

/// Parse agent text as JSON, tolerating a surrounding code fence.
pub fn parse_text_payload(text: &str) -> Option<ConsolidatedResult> {
    let value: Value = serde_json::from_str(&strip_json_fences(text)).ok()?;
    ConsolidatedResult::from_value(value)
}

/// Remove a leading ```` ``` ```` line (with optional language tag) and a
/// trailing fence line from trimmed text.
pub fn strip_json_fences(text: &str) -> String {
    let stripped = text.trim();
    if !stripped.starts_with("```") {
        return stripped.to_string();
    }

    let mut lines: Vec<&str> = stripped.lines().collect();
    if lines.first().is_some_and(|l| l.starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim().starts_with("```")) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}
