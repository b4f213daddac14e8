use crate::logging::{init_logger, parse_level};
use log::LevelFilter;

#[uniffi::export]
pub fn set_debug_log_level() {
    init_logger(LevelFilter::Trace);
}

/// Returns false for an unrecognised level name.
#[uniffi::export]
pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(level) => {
            init_logger(level);
            true
        }
        None => false,
    }
}
