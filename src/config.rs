//! Construction-time configuration for the logger.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::Result;

/// Settings consumed once by [`crate::new_logger`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    /// Connection settings for an indexing backend. When present, a client is built.
    pub elastic_config: Option<ElasticConfig>,

    /// Name of the service. Accepted but not printed.
    pub service_name: String,

    /// Accepted but not consulted.
    pub print_service_name: bool,

    /// Print the caller location on every entry, whatever its level
    pub print_error_log_line: bool,
}

impl LoggerConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Connection settings for an Elasticsearch-compatible backend
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ElasticConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    /// Naming template for target indices
    pub index_template: String,
}

impl fmt::Debug for ElasticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("index_template", &self.index_template)
            .finish()
    }
}
