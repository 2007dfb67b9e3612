// src/normalize.rs
// =============================================================================
// Turns whatever the user typed into a canonical absolute URL.
//
// Input lists are messy: "facebook.com/", "https://facebook.com/",
// "//cdn.example.org" all show up. Before we touch the network we want one
// canonical spelling per site so results can be compared and sorted, and so
// obviously bad input fails fast without a request.
//
// Canonical form:
//   scheme://host[:port][/path]     (path only when it has 2+ segments)
//
// Examples:
//   "facebook.com/"                              -> "http://facebook.com"
//   "https://facebook.com/"                      -> "https://facebook.com"
//   "https://en.wikipedia.org/wiki/Email_address" -> unchanged
// =============================================================================

use url::{ParseError, Url};

use crate::error::{Result, ScanError, UrlProblem};

/// Normalizes a user-supplied URL string.
///
/// Fails with `EmptyUrl`, `MalformedUrl` or `DomainMissing`. Pure: no I/O,
/// and `normalize(normalize(x)) == normalize(x)` for every accepted input.
pub fn normalize(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScanError::EmptyUrl);
    }

    let parsed = parse_with_default_scheme(input)?;

    // has_host() was checked while parsing, but stay defensive about it
    let host = parsed.host_str().ok_or_else(|| ScanError::DomainMissing {
        url: input.to_string(),
    })?;

    // Need at least "name.tld"
    let labels = host.split('.').filter(|label| !label.is_empty()).count();
    if labels < 2 {
        return Err(ScanError::DomainMissing {
            url: input.to_string(),
        });
    }

    let mut canonical = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        canonical.push_str(&format!(":{}", port));
    }

    // "/" and "/about" are dropped, "/wiki/Email_address" is kept
    let path = parsed.path();
    if path.matches('/').count() > 1 {
        canonical.push_str(path);
    }

    Ok(canonical)
}

// Parses the input, retrying with an "http://" prefix when it has no scheme.
//
// "facebook.com/" is a relative URL to the url crate, and "facebook.com:8080"
// even parses with "facebook.com" as its scheme. Both come out without a
// host, which is our signal to add the default scheme and try again.
fn parse_with_default_scheme(input: &str) -> Result<Url> {
    let malformed = |source: ParseError| ScanError::MalformedUrl {
        url: input.to_string(),
        source: UrlProblem::Parse(source),
    };

    // The url crate lets "%zz" through untouched; we don't
    if let Some(position) = invalid_percent_encoding(input) {
        return Err(ScanError::MalformedUrl {
            url: input.to_string(),
            source: UrlProblem::InvalidPercentEncoding(position),
        });
    }

    match Url::parse(input) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            let candidate = format!("http://{}", input.trim_matches('/'));
            Url::parse(&candidate).map_err(malformed)
        }
        Err(e) => Err(malformed(e)),
    }
}

// Byte offset of the first '%' that isn't followed by two hex digits
fn invalid_percent_encoding(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    input.match_indices('%').map(|(i, _)| i).find(|&i| {
        !bytes
            .get(i + 1..i + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why parse twice?
//    - Url::parse needs a scheme; "facebook.com" alone is a relative URL
//    - On that specific error we add "http://" and try again
//
// 2. What is percent-encoding?
//    - Characters that can't appear in a URL are written as %XX in hex
//    - "%20" is a space; "%zz" is not valid, so we reject it up front
//
// 3. Why return Result instead of Option?
//    - The caller wants to know *why* a URL was rejected (empty, no domain,
//      malformed), and ScanError carries that
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bare_domain_defaults_to_http() {
        assert_eq!(normalize("facebook.com/").unwrap(), "http://facebook.com");
    }

    #[test]
    fn test_scheme_is_kept() {
        assert_eq!(normalize("http://facebook.com/").unwrap(), "http://facebook.com");
        assert_eq!(normalize("https://facebook.com/").unwrap(), "https://facebook.com");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("").unwrap_err().kind(), ErrorKind::EmptyUrl);
        assert_eq!(normalize("   ").unwrap_err().kind(), ErrorKind::EmptyUrl);
    }

    #[test]
    fn test_missing_domain() {
        assert_eq!(normalize("facebook").unwrap_err().kind(), ErrorKind::DomainMissing);
        assert_eq!(
            normalize("http://localhost/").unwrap_err().kind(),
            ErrorKind::DomainMissing
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            normalize("https://[::1").unwrap_err().kind(),
            ErrorKind::MalformedUrl
        );
        assert_eq!(
            normalize("http://exa mple.com").unwrap_err().kind(),
            ErrorKind::MalformedUrl
        );
    }

    #[test]
    fn test_invalid_percent_encoding() {
        for input in [
            "http://example.com/%zz",
            "http://example.com/a/%zz",
            "example.com/a/%4",
            "http://example.com/a/b%",
        ] {
            let err = normalize(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedUrl, "accepted {}", input);
        }
        assert!(matches!(
            normalize("http://example.com/%zz"),
            Err(ScanError::MalformedUrl {
                source: UrlProblem::InvalidPercentEncoding(19),
                ..
            })
        ));
    }

    #[test]
    fn test_valid_percent_encoding() {
        assert_eq!(
            normalize("http://example.com/a/b%20c").unwrap(),
            "http://example.com/a/b%20c"
        );
    }

    #[test]
    fn test_long_path_is_preserved() {
        let url = "https://en.wikipedia.org/wiki/Email_address";
        assert_eq!(normalize(url).unwrap(), url);
    }

    #[test]
    fn test_single_segment_path_and_query_dropped() {
        assert_eq!(normalize("https://example.com/about?x=1").unwrap(), "https://example.com");
    }

    #[test]
    fn test_protocol_relative_and_port() {
        assert_eq!(normalize("//cdn.example.org/").unwrap(), "http://cdn.example.org");
        assert_eq!(normalize("example.com:8080").unwrap(), "http://example.com:8080");
        assert_eq!(normalize("http://127.0.0.1:4000").unwrap(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "facebook.com/",
            "https://facebook.com/",
            "HTTPS://Example.COM/a/b/",
            "https://en.wikipedia.org/wiki/Email_address",
            "example.com:8080/docs/intro?page=2",
            "www.site.co.uk",
            "http://127.0.0.1:4000/a/b c",
        ];
        for input in inputs {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", input);
        }
    }
}
