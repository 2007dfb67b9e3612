// src/matcher/pattern.rs
// =============================================================================
// Keyword and pattern matching over page bodies.
//
// A search term arrives either as plain text ("Connect with friends") or as
// an already compiled regular expression. Both are turned into the same
// thing here, once, before any page is looked at:
//
//   Literal("a.b")   -> regex "a\.b"      (escaped, so "." is just a dot)
//   Compiled(/a.b/)  -> regex "a.b"       (used as written)
//
// Matching is case-insensitive unless the pattern itself switches that off
// with an inline flag like "(?-i)".
//
// When a page matches we also pull out a little context: the markup around
// the first hit, "<opening fragment>MATCH<closing fragment>", with line
// breaks removed so it fits on one report line.
// =============================================================================

use regex::bytes::{Regex as BytesRegex, RegexBuilder};
use regex::Regex;

use crate::error::Result;
use crate::scanner::Keyword;

/// What to search for.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Plain text, matched literally
    Literal(String),
    /// A regular expression supplied by the caller
    Compiled(Regex),
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Literal(text.to_string())
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::Literal(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Compiled(regex)
    }
}

/// Outcome of matching one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub found: bool,
    /// Markup around the first hit; empty when nothing was found
    pub context: String,
}

/// A search term compiled for matching raw page bytes.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    keyword: Keyword,
    search: BytesRegex,
    context: BytesRegex,
}

impl PatternMatcher {
    pub fn new(pattern: Pattern) -> Result<Self> {
        let (source, keyword) = match pattern {
            Pattern::Literal(text) => (regex::escape(&text), Keyword::Literal(text)),
            Pattern::Compiled(regex) => {
                let source = regex.as_str().to_string();
                (source.clone(), Keyword::Pattern(source))
            }
        };

        let search = case_insensitive(&source)?;
        // Smallest tag-ish fragment around the hit:
        //   (<[^<]+)   back to the nearest "<"
        //   ([^>]+>)   forward to the next ">"
        let context = case_insensitive(&format!("(<[^<]+)({})([^>]+>)", source))?;

        Ok(Self {
            keyword,
            search,
            context,
        })
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    /// Looks for the term in `body` and extracts context for the first hit.
    pub fn find(&self, body: &[u8]) -> Match {
        if !self.search.is_match(body) {
            return Match {
                found: false,
                context: String::new(),
            };
        }

        let context = self
            .context
            .find(body)
            .map(|m| strip_line_breaks(&String::from_utf8_lossy(m.as_bytes())))
            .unwrap_or_default();

        Match {
            found: true,
            context,
        }
    }
}

// Inline flags in the source (e.g. "(?-i)") still override the builder default
pub(crate) fn case_insensitive(source: &str) -> Result<BytesRegex> {
    Ok(RegexBuilder::new(source).case_insensitive(true).build()?)
}

fn strip_line_breaks(text: &str) -> String {
    // Removing every '\r' and '\n' covers "\r\n", "\n" and "\r"
    text.replace(['\r', '\n'], "")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why regex::bytes instead of regex::Regex?
//    - Page bodies are raw bytes and not always valid UTF-8
//    - bytes::Regex searches &[u8] directly, no conversion needed
//
// 2. What does regex::escape do?
//    - Puts a backslash in front of characters that mean something in a
//      regex, so "a.b" matches only the text "a.b"
//
// 3. Why compile in new() and not in find()?
//    - Compiling a regex is slow compared to running it
//    - One compile per search term, then reuse it for every page
// -----------------------------------------------------------------------------
