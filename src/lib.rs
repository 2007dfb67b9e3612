// src/lib.rs
// =============================================================================
// keyword-scanner: search many web pages at once for a keyword, a regular
// expression, or email addresses.
//
// Quick tour:
//
//   let scanner = Arc::new(Scanner::new(20, 0, false)?);
//   scanner.search("facebook.com", "Connect with friends").await?;
//   let mut results = scanner.results();
//   results.sort_by_url();
//
// Modules:
// - normalize: canonical URLs from messy input
// - fetch: shared HTTP client, http -> https retry, buffer pool
// - crawl: same-site link discovery
// - matcher: keyword / pattern / email matching
// - scanner: the session object, concurrency gate and result log
// - logger: the logging switch a Scanner is built with
// - error: error type and comparable error kinds
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod matcher;
pub mod normalize;
pub mod scanner;

pub use error::{ErrorKind, Result, ScanError, UrlProblem};
pub use logger::Logger;
pub use matcher::{Pattern, DEFAULT_EMAIL_PATTERN};
pub use normalize::normalize;
pub use scanner::{Context, Keyword, ResultSet, ScanResult, Scanner, ScannerConfig};
