//! Append-only log of the tool events the hook receives.
//!
//! One pretty-printed JSON record per invocation, separated by a blank line.
//! Records are only ever appended, so concurrent hooks may interleave but
//! never clobber each other.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::protocol::input::object_keys;
use crate::protocol::ToolEvent;

/// File name of the event log, created in the working directory.
pub const LOG_FILE_NAME: &str = "claude-tool-events.log";

/// Event type recorded for every hook invocation.
pub const TOOL_EXECUTION: &str = "tool_execution";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogEntry {
    timestamp: String,
    event_type: String,
    tool_name: Value,
    parameters: Vec<String>,
    session_id: Value,
    full_data_keys: Vec<String>,
}

/// Handle on the event log file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// The log file inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        EventLog {
            path: dir.as_ref().join(LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record describing `event`.
    pub fn append(&self, event_type: &str, event: &ToolEvent) -> std::io::Result<()> {
        let entry = entry_for(event_type, event);
        let mut record = serde_json::to_string_pretty(&entry)?;
        record.push_str("\n\n");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.as_bytes())
    }
}

/// Camel-case keys sent by other hook runners take precedence over the
/// snake_case ones Claude Code sends.
fn entry_for(event_type: &str, event: &ToolEvent) -> LogEntry {
    let payload = &event.raw_payload;

    let tool_name = truthy(payload.get("toolName"))
        .or_else(|| event.tool_name.clone().map(Value::String))
        .unwrap_or(Value::Null);
    let session_id = truthy(payload.get("sessionId"))
        .or_else(|| event.session_id.clone().map(Value::String))
        .unwrap_or(Value::Null);
    let parameters = match truthy(payload.get("parameters")) {
        Some(parameters) => object_keys(&parameters),
        None => event.parameter_keys(),
    };

    LogEntry {
        timestamp: chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        event_type: event_type.to_string(),
        tool_name,
        parameters,
        session_id,
        full_data_keys: event.keys.clone(),
    }
}

fn truthy(value: Option<&Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Object(o)) if o.is_empty() => None,
        Some(Value::Array(a)) if a.is_empty() => None,
        Some(other) => Some(other.clone()),
    }
}
