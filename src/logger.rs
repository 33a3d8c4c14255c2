//! The leveled logging facade.
//!
//! Every call formats one entry and writes it to stdout as a single line
//! before returning. The logger is immutable once built, so it can be shared
//! freely across threads behind an `Arc`.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use crate::backend::ElasticClient;
use crate::caller::Caller;
use crate::config::LoggerConfig;
use crate::level::LogLevel;
use crate::message::LogMessage;

/// Leveled stdout logger
#[derive(Debug, Clone)]
pub struct Logger {
    print_error_log_line: bool,
    backend: Option<ElasticClient>,
    sink: Sink,
}

/// Where rendered lines go
#[derive(Debug, Clone, Default)]
enum Sink {
    #[default]
    Stdout,
    #[cfg(test)]
    Memory(Arc<Mutex<Vec<u8>>>),
}

impl Logger {
    /// Build a logger from its configuration.
    ///
    /// A backend client is attempted whenever `elastic_config` is set. If that
    /// fails the logger is still returned, just without a backend.
    pub fn new(config: LoggerConfig) -> Self {
        let backend = config
            .elastic_config
            .as_ref()
            .and_then(|elastic| match ElasticClient::new(elastic) {
                Ok(client) => Some(client),
                Err(e) => {
                    log::debug!("Backend client construction failed: {}", e);
                    None
                }
            });

        Self {
            print_error_log_line: config.print_error_log_line,
            backend,
            sink: Sink::default(),
        }
    }

    /// Whether entries carry the caller location
    pub fn prints_caller(&self) -> bool {
        self.print_error_log_line
    }

    /// The backend client, if one was constructed
    pub fn backend(&self) -> Option<&ElasticClient> {
        self.backend.as_ref()
    }

    /// Log a formatted message at the given level
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.emit(&LogMessage::new(level, None, args.to_string()), Caller::resolve());
    }

    #[track_caller]
    pub fn log_trace(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    #[track_caller]
    pub fn log_debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Informational message. Emitted at the Debug level.
    #[track_caller]
    pub fn log_information(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn log_warning(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, args);
    }

    /// Log an error with the call site appended to the message
    #[track_caller]
    pub fn log_error(&self, err: &dyn StdError, message: &str) {
        let caller = Caller::resolve();
        self.emit(&failure_entry(LogLevel::Error, err, message, &caller), caller);
    }

    /// Same as [`Logger::log_error`] at the Fatal level. Does not exit.
    #[track_caller]
    pub fn log_fatal(&self, err: &dyn StdError, message: &str) {
        let caller = Caller::resolve();
        self.emit(&failure_entry(LogLevel::Fatal, err, message, &caller), caller);
    }

    /// Write an entry to stdout. Write errors are dropped.
    pub(crate) fn emit(&self, entry: &LogMessage, caller: Caller<'_>) {
        match &self.sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                let _ = self.write_entry(&mut out, entry, caller);
            }
            #[cfg(test)]
            Sink::Memory(buffer) => {
                if let Ok(mut out) = buffer.lock() {
                    let _ = self.write_entry(&mut *out, entry, caller);
                }
            }
        }
    }

    fn write_entry<W: Write>(
        &self,
        out: &mut W,
        entry: &LogMessage,
        caller: Caller<'_>,
    ) -> io::Result<()> {
        let caller = self.print_error_log_line.then_some(&caller);
        writeln!(out, "{}", entry.render_line(caller))
    }
}

/// Entry for `log_error` / `log_fatal`: `<message> at <file>:<line>\n<detail>`
fn failure_entry(
    level: LogLevel,
    err: &dyn StdError,
    message: &str,
    caller: &Caller<'_>,
) -> LogMessage {
    let detail = error_detail(err);
    let text = format!("{} at {}\n{}", message, caller, detail);
    LogMessage::new(level, Some(detail), text)
}

/// The error followed by its source chain
fn error_detail(err: &dyn StdError) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str("\nCaused by: ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

/// Log at an explicit level with `format!`-style arguments
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_trace(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_debug(format_args!($($arg)+))
    };
}

/// Emitted at the Debug level, see [`Logger::log_information`]
#[macro_export]
macro_rules! log_information {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_information(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_warning(format_args!($($arg)+))
    };
}
