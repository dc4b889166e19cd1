#![deny(missing_docs)]
//! Logging helpers shared by the career client crates.
//!
//! The `career_*` macros forward to the `log` facade through this crate, so
//! a caller only needs `career_logging` in scope. Request and response lines
//! are tied together with [`next_request_seq`].

use std::sync::atomic::{AtomicU64, Ordering};

#[doc(hidden)]
pub use log as __log;

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Next request sequence number, starting at 1. Process-wide.
pub fn next_request_seq() -> u64 {
    REQUEST_SEQ.fetch_add(1, Ordering::Relaxed) + 1
}

/// Trace-level log line.
#[macro_export]
macro_rules! career_trace {
    ($($arg:tt)*) => {
        $crate::__log::trace!($($arg)*)
    };
}

/// Debug-level log line.
#[macro_export]
macro_rules! career_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

/// Info-level log line.
#[macro_export]
macro_rules! career_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

/// Warn-level log line.
#[macro_export]
macro_rules! career_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

/// Error-level log line.
#[macro_export]
macro_rules! career_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

/// Routes log output into the test harness, which shows it for failing tests only.
///
/// Calling it more than once is harmless.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = simplelog::TestLogger::init(level, simplelog::Config::default());
}
