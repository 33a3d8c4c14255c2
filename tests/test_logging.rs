use log::{LevelFilter, debug, info, trace, warn};
use sl::{Error, LoggerConfig, logging, new_logger};

/// Test that the facade can be installed as the `log` backend and used
#[test]
fn test_logging_bridge() {
    let logger = new_logger(LoggerConfig {
        print_error_log_line: true,
        ..Default::default()
    });

    logging::init(logger.clone()).expect("first install succeeds");
    assert_eq!(log::max_level(), LevelFilter::Trace);

    // Every level passes through, nothing is filtered
    trace!("This is a trace message");
    debug!("This is a debug message");
    info!("This is an info message");
    warn!("This is a warning message");
    assert!(log::log_enabled!(log::Level::Trace));

    // Only one global backend per process
    let second = logging::init(logger);
    assert!(matches!(second, Err(Error::AlreadyInitialized)));
}
