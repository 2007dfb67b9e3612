// src/scanner/mod.rs
// =============================================================================
// The Scanner: one scanning session shared by every concurrent scan call.
//
// Each scan call walks through the same steps:
//
//   admitted    wait for a slot in the concurrency gate
//   normalizing clean up the URL (bad input fails here, nothing recorded)
//   discovering find same-site links (failure just means "this page only")
//   per link:   fetch -> match -> record
//   released    the gate slot is given back, whatever happened above
//
// Links inside one call are handled one after another, in discovery order.
// Parallelism comes from many calls running at once, up to the gate limit.
//
// If fetching a link fails, that link is recorded as "not found" and the
// call stops there with the error; links after it are not scanned.
// =============================================================================

mod config;
mod gate;
mod results;

pub use config::{ScannerConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
pub use gate::{ConcurrencyGate, GatePermit};
pub use results::{Context, Keyword, ResultLog, ResultSet, ScanResult};

use regex::Regex;

use crate::crawl::discover_links;
use crate::error::Result;
use crate::fetch::{BufferPool, Fetcher, Page};
use crate::logger::Logger;
use crate::matcher::{EmailMatcher, Pattern, PatternMatcher, Search};
use crate::normalize::normalize;

/// A scanning session. Share it between tasks with an `Arc`.
#[derive(Debug)]
pub struct Scanner {
    gate: ConcurrencyGate,
    fetcher: Fetcher,
    results: ResultLog,
    depth_limit: usize,
    logger: Logger,
}

impl Scanner {
    /// Scanner with the default timeout.
    pub fn new(concurrency_limit: usize, depth_limit: usize, enable_logging: bool) -> Result<Self> {
        let config = ScannerConfig::default()
            .with_concurrency_limit(concurrency_limit)
            .with_depth_limit(depth_limit)
            .with_logging(enable_logging);

        Self::with_config(config)
    }

    pub fn with_config(config: ScannerConfig) -> Result<Self> {
        let logger = Logger::from(config.logging);
        Self::with_logger(config, logger)
    }

    /// Scanner that reports through `logger` (the config's logging flag is ignored).
    pub fn with_logger(config: ScannerConfig, logger: Logger) -> Result<Self> {
        let gate = ConcurrencyGate::new(config.concurrency_limit);
        let fetcher = Fetcher::new(
            config.request_timeout,
            config.connect_timeout,
            gate.limit(),
            logger,
        )?;

        Ok(Self {
            gate,
            fetcher,
            results: ResultLog::new(),
            depth_limit: config.depth_limit,
            logger,
        })
    }

    /// Searches the page (and discovered links) for a literal keyword.
    pub async fn search(&self, url: &str, keyword: &str) -> Result<()> {
        let search = Search::Pattern(PatternMatcher::new(Pattern::from(keyword))?);
        self.scan(url, &search).await
    }

    /// Searches the page (and discovered links) for a regular expression.
    pub async fn search_with_pattern(&self, url: &str, pattern: Regex) -> Result<()> {
        let search = Search::Pattern(PatternMatcher::new(Pattern::Compiled(pattern))?);
        self.scan(url, &search).await
    }

    /// Collects email addresses from the page (and discovered links).
    ///
    /// Without a pattern the built-in email pattern is used; addresses
    /// containing any of `filters` are left out.
    pub async fn search_for_email(
        &self,
        url: &str,
        pattern: Option<Regex>,
        filters: Option<Vec<String>>,
    ) -> Result<()> {
        let search = Search::Email(EmailMatcher::new(pattern, filters.unwrap_or_default())?);
        self.scan(url, &search).await
    }

    /// Copy of every result recorded so far, in completion order.
    pub fn results(&self) -> ResultSet {
        self.results.snapshot()
    }

    /// Results as a JSON array.
    pub fn results_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.results.snapshot())?)
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    pub fn buffers(&self) -> &BufferPool {
        self.fetcher.buffers()
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    async fn scan(&self, url: &str, search: &Search) -> Result<()> {
        // Held until this function returns, on every path
        let _permit = self.gate.acquire().await?;

        let base_url = normalize(url)
            .inspect_err(|e| self.logger.error("could not normalize url", url, e))?;

        let links = discover_links(&self.fetcher, &base_url, self.depth_limit, self.logger).await;

        for link in links {
            self.logger.searching(search.term(), &link);

            let Page { url, body } = match self.fetcher.fetch(&link).await {
                Ok(page) => page,
                Err(e) => {
                    self.logger.error("could not fetch page", &link, &e);
                    self.record(link, search, false, search.empty_context());
                    return Err(e);
                }
            };

            let (found, context) = search.evaluate(&body);
            // Hand the buffer back before taking the results lock
            drop(body);
            self.record(url, search, found, context);
        }

        Ok(())
    }

    fn record(&self, url: String, search: &Search, found: bool, context: Context) {
        self.logger.result(search.term(), &url, found);
        self.results.record(url, search.keyword(), found, context);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `_permit` named with an underscore?
//    - We never use it, we only keep it alive until the function ends
//    - A plain `_` would drop it immediately, which would free the slot
//
// 2. What does inspect_err do?
//    - Runs a closure on the error (here: log it) and passes it through
//      unchanged, so `?` still returns it
// -----------------------------------------------------------------------------
