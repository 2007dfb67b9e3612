// src/scanner/results.rs
// =============================================================================
// Scan results and the shared log they are collected in.
//
// Many scans run at once and all of them append here, so the log keeps its
// Vec behind a Mutex. There is exactly one way in (record) and one way out
// (snapshot, which copies), so nothing outside this file can touch the Vec
// without holding the lock.
// =============================================================================

use serde::Serialize;
use std::ops::Deref;
use std::sync::{Mutex, PoisonError};

/// The search term a result was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Keyword {
    /// Plain text keyword
    Literal(String),
    /// Source of a regular expression
    Pattern(String),
}

impl Keyword {
    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Literal(text) | Keyword::Pattern(text) => text,
        }
    }
}

/// What was found around a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Context {
    /// Markup fragment around a keyword match
    Snippet(String),
    /// Every address an email search turned up
    Matches(Vec<String>),
}

impl Context {
    pub fn is_empty(&self) -> bool {
        match self {
            Context::Snippet(text) => text.is_empty(),
            Context::Matches(items) => items.is_empty(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::Snippet(String::new())
    }
}

/// Outcome of scanning one page for one search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    #[serde(skip_serializing_if = "keyword_is_empty")]
    pub keyword: Option<Keyword>,
    pub url: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Context::is_empty")]
    pub context: Context,
}

fn keyword_is_empty(keyword: &Option<Keyword>) -> bool {
    keyword.as_ref().map_or(true, |k| k.as_str().is_empty())
}

/// An ordered copy of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ScanResult>);

impl ResultSet {
    /// Sorts by URL, ascending. Results with the same URL keep their order.
    pub fn sort_by_url(&mut self) {
        self.0.sort_by(|a, b| a.url.cmp(&b.url));
    }

    pub fn into_vec(self) -> Vec<ScanResult> {
        self.0
    }
}

impl Deref for ResultSet {
    type Target = [ScanResult];

    fn deref(&self) -> &[ScanResult] {
        &self.0
    }
}

impl From<Vec<ScanResult>> for ResultSet {
    fn from(results: Vec<ScanResult>) -> Self {
        Self(results)
    }
}

impl IntoIterator for ResultSet {
    type Item = ScanResult;
    type IntoIter = std::vec::IntoIter<ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ScanResult;
    type IntoIter = std::slice::Iter<'a, ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Append-only, thread-safe collection of scan results.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Mutex<Vec<ScanResult>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, url: String, keyword: Option<Keyword>, found: bool, context: Context) {
        let result = ScanResult {
            keyword,
            url,
            found,
            context,
        };

        // Built outside the lock; only the push happens inside
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> ResultSet {
        let results = self.results.lock().unwrap_or_else(PoisonError::into_inner);
        ResultSet(results.clone())
    }

    pub fn len(&self) -> usize {
        self.results.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(untagged)] do?
//    - Serializes an enum as just its contents, with no variant name
//    - Context::Snippet("x") becomes "x", Context::Matches(v) becomes [..]
//
// 2. Why does snapshot() clone?
//    - The caller gets its own copy and the lock is released right away
//    - Scans that are still running can keep recording meanwhile
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn literal(text: &str) -> Option<Keyword> {
        Some(Keyword::Literal(text.to_string()))
    }

    #[test]
    fn test_sort_by_url_is_ascending_and_stable() {
        let log = ResultLog::new();
        log.record("https://c.com".into(), literal("first"), true, Context::default());
        log.record("https://a.com".into(), literal("x"), false, Context::default());
        log.record("https://c.com".into(), literal("second"), false, Context::default());
        log.record("http://b.com".into(), literal("x"), false, Context::default());

        let mut results = log.snapshot();
        results.sort_by_url();

        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["http://b.com", "https://a.com", "https://c.com", "https://c.com"]
        );
        assert!(results.windows(2).all(|w| w[0].url <= w[1].url));
        // Equal URLs keep insertion order
        assert_eq!(results[2].keyword, literal("first"));
        assert_eq!(results[3].keyword, literal("second"));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let log = ResultLog::new();
        log.record("https://a.com".into(), literal("x"), false, Context::default());
        let snapshot = log.snapshot();

        log.record("https://b.com".into(), literal("x"), false, Context::default());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_concurrent_records_are_all_kept() {
        let log = Arc::new(ResultLog::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        log.record(format!("https://{t}-{i}.com"), None, false, Context::default());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 400);
    }

    #[test]
    fn test_json_omits_empty_keyword_and_context() {
        let results = ResultSet::from(vec![
            ScanResult {
                keyword: literal("Connect"),
                url: "https://a.com".into(),
                found: true,
                context: Context::Snippet("<p>Connect</p>".into()),
            },
            ScanResult {
                keyword: None,
                url: "https://b.com".into(),
                found: false,
                context: Context::Matches(Vec::new()),
            },
            ScanResult {
                keyword: None,
                url: "https://c.com".into(),
                found: true,
                context: Context::Matches(vec!["me@c.com".into()]),
            },
        ]);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"keyword": "Connect", "url": "https://a.com", "found": true, "context": "<p>Connect</p>"},
                {"url": "https://b.com", "found": false},
                {"url": "https://c.com", "found": true, "context": ["me@c.com"]},
            ])
        );
    }
}
