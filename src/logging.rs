// src/logging.rs

use crate::config;
use crate::errors::PalaverResult;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;

/// One record per round trip with the chat backend.
#[derive(Debug)]
pub struct RoundTripLog {
    pub endpoint: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Starts the file logger. Writing to stdout would tear up the terminal UI,
/// so everything goes to the configured log directory. The returned handle
/// must be kept alive for the lifetime of the program.
pub fn init_logging() -> PalaverResult<LoggerHandle> {
    let config = config::get_config();

    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_directory.as_str())
                .basename("palaver"),
        )
        .append()
        .start()?;

    Ok(handle)
}

/// Logs one finished round trip.
pub fn log_round_trip(log: &RoundTripLog) {
    info!(
        "{} - Status: {} - Time: {}ms",
        log.endpoint, log.response_status, log.response_time_ms
    );
}
