//! Conditional logging macros gated by a module-level `ENABLE_LOGS` const.
//!
//! Chatty modules (the device reader, the capture loop) declare
//! `const ENABLE_LOGS: bool = ...;` and use these instead of the bare `log`
//! macros, so per-module verbosity is a one-line toggle:
//!
//! ```rust,ignore
//! const ENABLE_LOGS: bool = true;
//! use packcheck::{log_info, log_warn};
//!
//! log_info!("device line {line:?}");
//! ```

/// Info-level logging, emitted only when the calling module's
/// `ENABLE_LOGS` const is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level counterpart of [`log_info!`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error-level counterpart of [`log_info!`].
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
