//! Bridge from the `log` crate to the facade.
//!
//! After [`init`], records emitted with `log::info!` and friends anywhere in
//! the process (this crate's own diagnostics included) are printed by the
//! installed [`Logger`].

use std::sync::Arc;

use log::{LevelFilter, Metadata, Record};

use crate::caller::Caller;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::message::LogMessage;
use crate::{Error, Result};

/// Install `logger` as the global `log` backend with every level enabled
pub fn init(logger: Arc<Logger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge(logger))).map_err(|_| Error::AlreadyInitialized)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

struct LogBridge(Arc<Logger>);

impl log::Log for LogBridge {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let caller = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Caller::new(file, line),
            _ => Caller::unknown(),
        };
        let entry = LogMessage::new(LogLevel::from(record.level()), None, record.args().to_string());
        self.0.emit(&entry, caller);
    }

    fn flush(&self) {}
}

// Re-export the log crate macros for callers that log through the bridge
pub use log::{debug, error, info, trace, warn};
