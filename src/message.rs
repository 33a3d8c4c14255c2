//! The record emitted for a single log call.

use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::caller::Caller;
use crate::level::LogLevel;

/// Local time, seconds precision, no offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One log entry.
///
/// The serialized field names match the document shape an indexing backend
/// would receive, though the facade only ever renders it to a text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogMessage {
    /// Moment the entry was emitted
    #[serde(rename = "@timeStamp")]
    pub timestamp: DateTime<Local>,

    /// Display name of the level
    pub level: String,

    /// Text of the associated error, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl LogMessage {
    /// Create an entry stamped with the current local time
    pub fn new(level: LogLevel, error: Option<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level: level.name().to_string(),
            error,
            message: message.into(),
        }
    }

    /// Render the stdout line for this entry, without the trailing newline.
    ///
    /// `<timestamp> [<Level>] [<caller>] <message>` when a caller is given,
    /// `<timestamp> [<Level>] <message>` otherwise. The caller segment is the
    /// enclosing function name, or `file:line` when that cannot be resolved.
    pub fn render_line(&self, caller: Option<&Caller<'_>>) -> String {
        let timestamp = self.timestamp.format(TIMESTAMP_FORMAT);
        match caller {
            Some(caller) => format!(
                "{} [{}] [{}] {}",
                timestamp,
                self.level,
                caller.identifier(),
                self.message
            ),
            None => format!("{} [{}] {}", timestamp, self.level, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_message(level: LogLevel, message: &str) -> LogMessage {
        LogMessage {
            timestamp: Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
            level: level.name().to_string(),
            error: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_render_without_caller() {
        let msg = fixed_message(LogLevel::Warning, "disk at 91%");
        assert_eq!(msg.render_line(None), "2024-03-09T07:05:01 [Warning] disk at 91%");
    }

    #[test]
    fn test_render_with_caller() {
        let msg = fixed_message(LogLevel::Info, "ready");
        let caller = Caller::new("src/main.rs", 12);
        assert_eq!(
            msg.render_line(Some(&caller)),
            "2024-03-09T07:05:01 [Info] [src/main.rs:12] ready"
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let mut msg = fixed_message(LogLevel::Error, "write failed");
        msg.error = Some("boom".to_string());

        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("@timeStamp").is_some());
        assert_eq!(value["level"], "Error");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["message"], "write failed");
    }

    #[test]
    fn test_error_omitted_when_absent() {
        let msg = fixed_message(LogLevel::Debug, "hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("error").is_none());
    }
}
