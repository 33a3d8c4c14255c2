use std::io;

use sl::{LoggerConfig, log_debug, log_information, log_trace, log_warning, logging};

fn main() -> sl::Result<()> {
    // Load the config from the path given on the command line, if any
    let config = match std::env::args().nth(1) {
        Some(path) => LoggerConfig::from_json_file(path)?,
        None => LoggerConfig {
            print_error_log_line: true,
            ..Default::default()
        },
    };

    let logger = sl::new_logger(config);
    logging::init(logger.clone())?;

    log_trace!(logger, "This is a trace message");
    log_debug!(logger, "This is a debug message");
    log_information!(logger, "This is an information message");
    log_warning!(logger, "disk at {}%", 91);

    let err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system");
    logger.log_error(&err, "failed to write snapshot");
    logger.log_fatal(&err, "cannot continue without snapshots");

    // Records from the log crate go through the same logger
    log::info!("Routed through the log crate");
    Ok(())
}
