use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Error returned when stdin does not hold a usable event.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// The event received from Claude Code on stdin after a tool ran.
///
/// Field names match the snake_case JSON that Claude Code sends. Every
/// other top-level key is kept in `raw_payload` so it can be logged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolEvent {
    #[serde(default, deserialize_with = "string_or_none")]
    pub tool_name: Option<String>,
    #[serde(default = "empty_object")]
    pub tool_input: Value,
    #[serde(default, deserialize_with = "string_or_none")]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub raw_payload: Map<String, Value>,
    /// All top-level keys in the order they arrived.
    #[serde(skip)]
    pub keys: Vec<String>,
}

impl ToolEvent {
    /// Parse an event from raw stdin text.
    pub fn from_json(input: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse an event from an already decoded JSON value.
    ///
    /// The top-level key order is captured before deserializing, since
    /// the derived fields no longer carry it.
    pub fn from_value(value: Value) -> Result<Self, InputError> {
        let keys = match &value {
            Value::Object(object) => object.keys().cloned().collect(),
            other => return Err(InputError::NotAnObject(kind_of(other))),
        };
        let event: ToolEvent = serde_json::from_value(value)?;
        Ok(ToolEvent { keys, ..event })
    }

    /// Path of the edited file: `file_path`, falling back to `filePath`.
    ///
    /// Empty strings and non-string values count as absent.
    pub fn file_path(&self) -> Option<&str> {
        extract_str(&self.tool_input, "file_path")
            .or_else(|| extract_str(&self.tool_input, "filePath"))
    }

    /// Keys of `tool_input`, or an empty list when it is not an object.
    pub fn parameter_keys(&self) -> Vec<String> {
        object_keys(&self.tool_input)
    }
}

/// Keys of a JSON object in insertion order; empty for any other value.
pub(crate) fn object_keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

/// Extract a non-empty string field from JSON.
fn extract_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Tool name and session id are informational; a non-string value is
/// treated as absent rather than rejecting the event.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
