// src/scanner/config.rs
// =============================================================================
// Knobs for a scanning session.
// =============================================================================

use std::time::Duration;

/// Default number of scans allowed to run at once.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`Scanner`](super::Scanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Maximum scan calls holding the gate at once
    pub concurrency_limit: usize,
    /// Maximum links scanned per call (0 = the given page only)
    pub depth_limit: usize,
    /// Whole-request timeout, including reading the body
    pub request_timeout: Duration,
    /// Timeout for establishing a connection
    pub connect_timeout: Duration,
    /// Emit scan-level log events
    pub logging: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY,
            depth_limit: 0,
            request_timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            logging: false,
        }
    }
}

impl ScannerConfig {
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Sets the request timeout; the connect timeout never exceeds it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self.connect_timeout = self.connect_timeout.min(timeout);
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `mut self` in the with_* methods?
//    - Each method takes the config by value, changes it, and returns it
//    - That lets calls chain: ScannerConfig::default().with_depth_limit(5)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.concurrency_limit, 20);
        assert_eq!(config.depth_limit, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.logging);
    }

    #[test]
    fn test_short_timeout_caps_connect_timeout() {
        let config = ScannerConfig::default().with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }
}
