//! Minimal leveled logging facade.
//!
//! Each call produces one timestamped line on stdout, optionally annotated
//! with the caller's source location. A client for an Elasticsearch-compatible
//! backend can be configured; it is constructed and held but never used to
//! ship records.
//!
//! ```no_run
//! use sl::{LoggerConfig, log_warning};
//!
//! let logger = sl::new_logger(LoggerConfig::default());
//! log_warning!(logger, "disk at {}%", 91);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

pub mod backend;
pub mod caller;
pub mod config;
pub mod level;
pub mod logger;
pub mod logging;
pub mod message;
pub mod schema;

// Re-export key types
pub use backend::ElasticClient;
pub use caller::Caller;
pub use config::{ElasticConfig, LoggerConfig};
pub use level::{LogLevel, level_name};
pub use logger::Logger;
pub use message::LogMessage;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// Input/output error
    Io(std::io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Invalid configuration value
    InvalidConfig(String),
    /// Backend client could not be built
    Backend(String),
    /// A global `log` backend is already installed
    AlreadyInitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
            Error::AlreadyInitialized => write!(f, "A global logger is already installed"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidConfig(_) => None,
            Error::Backend(_) => None,
            Error::AlreadyInitialized => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Type alias for library results
pub type Result<T> = std::result::Result<T, Error>;

/// Factory function to create a shareable logger from its configuration
pub fn new_logger(config: LoggerConfig) -> Arc<Logger> {
    Arc::new(Logger::new(config))
}
