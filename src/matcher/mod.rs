// src/matcher/mod.rs
// =============================================================================
// This module decides whether a page is a hit.
//
// Submodules:
// - pattern: keyword / regex matching with context extraction
// - email: email address extraction with filters
//
// A Search wraps whichever of the two a scan is running, so the scan loop
// doesn't need to care which kind of search it is doing.
// =============================================================================

mod email;
mod pattern;

pub use email::{EmailMatcher, DEFAULT_EMAIL_PATTERN};
pub use pattern::{Match, Pattern, PatternMatcher};

use crate::scanner::{Context, Keyword};

/// The search a scan call runs against every page it fetches.
#[derive(Debug, Clone)]
pub enum Search {
    Pattern(PatternMatcher),
    Email(EmailMatcher),
}

impl Search {
    /// The keyword recorded with each result (email searches have none).
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Search::Pattern(matcher) => Some(matcher.keyword().clone()),
            Search::Email(_) => None,
        }
    }

    /// Human readable search term, for log lines.
    pub fn term(&self) -> &str {
        match self {
            Search::Pattern(matcher) => matcher.keyword().as_str(),
            Search::Email(_) => "email",
        }
    }

    /// Context recorded for a page that couldn't be searched.
    pub fn empty_context(&self) -> Context {
        match self {
            Search::Pattern(_) => Context::Snippet(String::new()),
            Search::Email(_) => Context::Matches(Vec::new()),
        }
    }

    /// Runs the search over one page body.
    pub fn evaluate(&self, body: &[u8]) -> (bool, Context) {
        match self {
            Search::Pattern(matcher) => {
                let Match { found, context } = matcher.find(body);
                (found, Context::Snippet(context))
            }
            Search::Email(matcher) => {
                let emails = matcher.extract(body);
                (!emails.is_empty(), Context::Matches(emails))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an enum instead of a trait object?
//    - There are exactly two kinds of search and we know them both
//    - A match on the enum is simple and needs no Box<dyn ...>
// -----------------------------------------------------------------------------
