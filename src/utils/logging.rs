//! Logging setup and module-gated logging macros.
//!
//! Modules opt in to the macros by defining a flag:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn, log_error};
//!
//! log_info!("Started session {session_id}");
//! ```

use std::str::FromStr;

/// Installs `env_logger`. `RUST_LOG` wins over `default_level`, and an
/// unrecognized level falls back to `info`. Safe to call more than once.
pub fn init_logging(default_level: &str) {
    let level = log::LevelFilter::from_str(default_level).unwrap_or(log::LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Info log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
