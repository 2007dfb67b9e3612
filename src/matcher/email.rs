// src/matcher/email.rs
// =============================================================================
// Pulls email addresses out of page bodies.
//
// The default pattern understands plain addresses and the usual obfuscation:
//   jane.doe@example.com
//   jane.doe at example dot com
//
// Callers can pass their own pattern, plus substring filters to throw away
// addresses they don't care about (e.g. "noreply", "example.com").
// =============================================================================

use regex::bytes::Regex as BytesRegex;
use regex::Regex;

use super::pattern::case_insensitive;
use crate::error::Result;

/// Default email pattern: `user@domain` plus `user at domain dot tld`.
pub const DEFAULT_EMAIL_PATTERN: &str = r"[a-z0-9!#$%&'*+/=?^_{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_{|}~-]+)*(?:@|\sat\s)(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.|\sdot\s))+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";

#[derive(Debug, Clone)]
pub struct EmailMatcher {
    pattern: BytesRegex,
    filters: Vec<String>,
}

impl EmailMatcher {
    /// Uses [`DEFAULT_EMAIL_PATTERN`] when `pattern` is `None`.
    pub fn new(pattern: Option<Regex>, filters: Vec<String>) -> Result<Self> {
        let source = pattern
            .as_ref()
            .map(Regex::as_str)
            .unwrap_or(DEFAULT_EMAIL_PATTERN);

        Ok(Self {
            pattern: case_insensitive(source)?,
            // An empty filter would match (and drop) every address
            filters: filters.into_iter().filter(|f| !f.is_empty()).collect(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Every distinct address in `body`, in the order they first appear,
    /// minus anything containing one of the filters.
    pub fn extract(&self, body: &[u8]) -> Vec<String> {
        let mut emails: Vec<String> = Vec::new();

        for found in self.pattern.find_iter(body) {
            let email = String::from_utf8_lossy(found.as_bytes()).trim().to_string();

            if email.is_empty() || self.is_filtered(&email) || emails.contains(&email) {
                continue;
            }
            emails.push(email);
        }

        emails
    }

    fn is_filtered(&self, email: &str) -> bool {
        self.filters.iter().any(|filter| email.contains(filter.as_str()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is find_iter?
//    - An iterator over every non-overlapping match in the input
//
// 2. Why emails.contains() and not a HashSet?
//    - We want first-seen order, and a page rarely has many addresses
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_obfuscated_addresses() {
        let matcher = EmailMatcher::new(None, Vec::new()).unwrap();
        let body = b"<p>Write to jane.doe@example.com or press at newsroom dot org.</p>";
        assert_eq!(
            matcher.extract(body),
            vec!["jane.doe@example.com", "press at newsroom dot org"]
        );
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let matcher = EmailMatcher::new(None, Vec::new()).unwrap();
        let body = b"b@site.com a@site.com b@site.com";
        assert_eq!(matcher.extract(body), vec!["b@site.com", "a@site.com"]);
    }

    #[test]
    fn test_filters_exclude_matches() {
        let filters = vec!["noreply".to_string(), String::new()];
        let matcher = EmailMatcher::new(None, filters).unwrap();
        let body = b"noreply@site.com help@site.com";
        assert_eq!(matcher.extract(body), vec!["help@site.com"]);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = Regex::new(r"[a-z]+@corp\.io").unwrap();
        let matcher = EmailMatcher::new(Some(pattern), Vec::new()).unwrap();
        assert_eq!(matcher.extract(b"x@gmail.com Ops@corp.io"), vec!["Ops@corp.io"]);
    }

    #[test]
    fn test_no_addresses() {
        let matcher = EmailMatcher::new(None, Vec::new()).unwrap();
        assert!(matcher.extract(b"<p>nothing to see</p>").is_empty());
    }
}
