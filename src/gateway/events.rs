//! Partial-decoding view of the gateway's task event history.
//!
//! The gateway nests agent output several objects deep and any level may be
//! missing. Every field here is optional, and an entry that does not match its
//! expected shape is dropped instead of failing the whole batch.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::TaskHandle;

/// Response to `GET /api/v1/tasks/{id}/events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventBatch {
    #[serde(default, deserialize_with = "lenient_map")]
    pub tasks: BTreeMap<String, TaskRecord>,
}

impl EventBatch {
    /// Explicit status marker of `task`, when the gateway variant sends one.
    pub fn status_of(&self, task: &TaskHandle) -> Option<&str> {
        self.tasks.get(task.as_str())?.status.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient")]
    pub full_payload: Option<FullPayload>,
}

impl Event {
    /// The message carried by this event.
    ///
    /// A status-wrapped message wins over a bare `result.message`.
    pub fn message(&self) -> Option<&Message> {
        let result = self.full_payload.as_ref()?.result.as_ref()?;
        result
            .status
            .as_ref()
            .and_then(|s| s.message.as_ref())
            .or(result.message.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<EventResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventResult {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<StatusUpdate>,
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdate {
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub parts: Vec<Part>,
}

/// One piece of agent output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Structured output: an arbitrary JSON value
    Data {
        #[serde(default)]
        data: Value,
    },
    /// Free text, possibly a fenced JSON block
    Text {
        #[serde(default)]
        text: String,
    },
    /// Files and any future part kinds
    #[serde(other)]
    Other,
}

/// Synchronous reply to `message/send`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, deserialize_with = "lenient")]
    result: Option<AcknowledgedTask>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AcknowledgedTask {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
}

impl Acknowledgement {
    pub fn task_handle(self) -> Option<TaskHandle> {
        self.result?
            .id
            .filter(|id| !id.is_empty())
            .map(TaskHandle::new)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like [`lenient`], but an empty `{}` message counts as absent.
fn lenient_message<'de, D>(deserializer: D) -> Result<Option<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(fields)) if fields.is_empty() => Ok(None),
        Some(value) => Ok(serde_json::from_value(value).ok()),
        None => Ok(None),
    }
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(entries)) => Ok(entries
            .into_iter()
            .filter_map(|(key, item)| serde_json::from_value(item).ok().map(|v| (key, v)))
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}
