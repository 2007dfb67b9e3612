// src/error.rs
// =============================================================================
// Errors the scanning library can return.
//
// Callers (the CLI, or anyone embedding the library) usually want to know
// *which kind* of failure happened so they can decide whether to skip a URL
// or abort the whole batch. `ScanError::kind()` gives them a small `Copy`
// value they can compare with `==` without caring about the error details.
// =============================================================================

use thiserror::Error;

/// Everything that can go wrong while scanning a URL.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The caller passed an empty (or whitespace-only) URL
    #[error("url string is empty")]
    EmptyUrl,

    /// The host has no top-level domain, e.g. "facebook" instead of "facebook.com"
    #[error("url domain (e.g. .com, .net) is missing: {url}")]
    DomainMissing { url: String },

    /// The URL could not be parsed at all
    #[error("malformed url '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: UrlProblem,
    },

    /// Both the original request and the https retry failed
    #[error("url could not be resolved or timed out: {url}")]
    UnresolvedOrTimedOut {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A caller-supplied pattern could not be compiled
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The concurrency gate was closed while waiting for a slot
    #[error("concurrency gate is closed")]
    GateClosed,

    /// The HTTP client could not be built
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Results could not be encoded
    #[error("could not serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a URL was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlProblem {
    /// The url crate could not parse it
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    /// A '%' not followed by two hex digits
    #[error("invalid percent-encoding at byte {0}")]
    InvalidPercentEncoding(usize),
}

/// Stable, comparable identity of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyUrl,
    DomainMissing,
    MalformedUrl,
    UnresolvedOrTimedOut,
    InvalidPattern,
    GateClosed,
    Client,
    Serialize,
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::EmptyUrl => ErrorKind::EmptyUrl,
            ScanError::DomainMissing { .. } => ErrorKind::DomainMissing,
            ScanError::MalformedUrl { .. } => ErrorKind::MalformedUrl,
            ScanError::UnresolvedOrTimedOut { .. } => ErrorKind::UnresolvedOrTimedOut,
            ScanError::InvalidPattern(_) => ErrorKind::InvalidPattern,
            ScanError::GateClosed => ErrorKind::GateClosed,
            ScanError::Client(_) => ErrorKind::Client,
            ScanError::Serialize(_) => ErrorKind::Serialize,
        }
    }

    /// True for errors caused by bad input rather than the network.
    /// These are never retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EmptyUrl | ErrorKind::DomainMissing | ErrorKind::MalformedUrl
        )
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does thiserror do?
//    - #[derive(Error)] writes the Display and Error impls for us
//    - #[error("...")] is the message; {url} and {0} pull in fields
//    - #[from] also generates a From impl, so `?` converts automatically
//
// 2. Why thiserror here but anyhow in main.rs?
//    - A library's callers want to match on what went wrong
//    - A binary mostly wants to print the error and exit
// -----------------------------------------------------------------------------
