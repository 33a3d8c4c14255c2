//! JSON Schema generation for the log record and configuration shapes
//!
//! External sinks and config tooling can use these to validate documents
//! without depending on this crate.

use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::config::LoggerConfig;
use crate::message::LogMessage;

/// Generate the JSON schema of a type as a JSON value
pub fn generate_schema<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    serde_json::to_value(&schema).unwrap_or(Value::Null)
}

/// Schema of a serialized [`LogMessage`]
pub fn log_message_schema() -> Value {
    generate_schema::<LogMessage>()
}

/// Schema of a [`LoggerConfig`] document
pub fn logger_config_schema() -> Value {
    generate_schema::<LoggerConfig>()
}
