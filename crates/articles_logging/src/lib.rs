#![deny(missing_docs)]
//! Request-tagged logging for the articles client.
//!
//! Requests to the article service run concurrently on the engine thread, so
//! their log lines interleave. [`next_action_seq`] hands out the number that
//! the app and the engine both stamp on every line of one request. The
//! `articles_*` macros forward to `log`, and [`initialize_for_tests`] gives
//! test binaries a terminal logger.

use std::sync::atomic::{AtomicU64, Ordering};

static ACTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Allocates the next action sequence number.
///
/// Every user-initiated request is tagged with one so that the log lines of
/// overlapping requests can be told apart.
pub fn next_action_seq() -> u64 {
    ACTION_SEQ.fetch_add(1, Ordering::Relaxed) + 1
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! articles_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! articles_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! articles_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! articles_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! articles_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
