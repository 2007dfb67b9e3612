// src/logger.rs
// =============================================================================
// The logging capability handed to a Scanner.
//
// The library never configures logging for the whole process. Instead the
// Scanner is given a Logger when it is built, and only emits scan-level
// events when that Logger is enabled. Where the events end up (terminal,
// file, nowhere) is decided by whoever installed the tracing subscriber,
// which is the binary in our case.
// =============================================================================

use std::fmt::Display;

/// Switchable front for the `tracing` macros, tagged with the `scanner` target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logger {
    enabled: bool,
}

impl Logger {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A scan is starting work on one page.
    pub fn searching(&self, term: &str, url: &str) {
        if self.enabled {
            tracing::info!(target: "scanner", term, url, "looking for search term");
        }
    }

    /// One result was recorded.
    pub fn result(&self, term: &str, url: &str, found: bool) {
        if self.enabled {
            tracing::info!(target: "scanner", term, url, found, "result");
        }
    }

    pub fn warn(&self, message: &str, url: &str, error: &dyn Display) {
        if self.enabled {
            tracing::warn!(target: "scanner", url, error = %error, "{}", message);
        }
    }

    pub fn error(&self, message: &str, url: &str, error: &dyn Display) {
        if self.enabled {
            tracing::error!(target: "scanner", url, error = %error, "{}", message);
        }
    }
}

impl From<bool> for Logger {
    fn from(enabled: bool) -> Self {
        Self { enabled }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `target: "scanner"`?
//    - Every tracing event carries a target, normally the module path
//    - Setting it lets RUST_LOG=scanner=info pick out just these lines
//
// 2. What does `error = %error` mean?
//    - It records a field using the value's Display impl (the % sigil)
// -----------------------------------------------------------------------------
