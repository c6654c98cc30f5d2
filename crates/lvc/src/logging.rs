//! Logging initialization.
//!
//! lvc is quiet by default. Logs reach stderr only with `--verbose`, so
//! stdout carries nothing but command results and forwarded git output.

use lvc_util::log::{self, LogConfig, LogLevel};

/// Initialize logging based on verbosity.
pub fn init_logging(verbose: bool) {
    log::init(LogConfig {
        print: verbose,
        level: LogLevel::from_verbose(verbose),
        include_location: false,
    });
}
