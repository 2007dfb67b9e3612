// src/fetch/http.rs
// =============================================================================
// Downloads pages over HTTP.
//
// Key functionality:
// - One shared, connection-pooled client for every scan in a session
// - Fixed per-request timeout (10 seconds unless configured otherwise)
// - If a plain http:// request fails, retry exactly once over https://
// - Reads the whole body into a pooled buffer before returning
//
// HTTP status codes are *not* treated as failures here: a 404 page still has
// a body that may or may not contain the keyword. Only transport problems
// (DNS, refused connection, timeout, broken body) count as failures.
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::buffer::{BufferPool, PooledBuffer};
use crate::error::{Result, ScanError};
use crate::logger::Logger;

/// A downloaded page.
#[derive(Debug)]
pub struct Page {
    /// The URL that actually answered (may be the https:// rewrite)
    pub url: String,
    /// The full response body, on loan from the buffer pool
    pub body: PooledBuffer,
}

/// Shared HTTP fetcher with the http -> https fallback.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    buffers: BufferPool,
    logger: Logger,
}

impl Fetcher {
    /// Builds the shared client.
    ///
    /// `max_idle` bounds idle keep-alive connections per host; the Scanner
    /// passes its concurrency limit so every admitted scan can reuse one.
    pub fn new(
        request_timeout: Duration,
        connect_timeout: Duration,
        max_idle: usize,
        logger: Logger,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(max_idle)
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self {
            client,
            buffers: BufferPool::new(),
            logger,
        })
    }

    pub fn buffers(&self) -> &BufferPool {
        &self.buffers
    }

    /// Fetches a page, retrying once over https if the first attempt fails.
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        let first_error = match self.get(url).await {
            Ok(body) => {
                return Ok(Page {
                    url: url.to_string(),
                    body,
                })
            }
            Err(e) => e,
        };

        // Already https (or not a URL we can rewrite): nothing left to try
        let Some(secure_url) = upgrade_to_https(url) else {
            return Err(unresolved(url, first_error));
        };

        self.logger.warn(
            &format!("{}, retrying over https", describe_error(&first_error)),
            url,
            &first_error,
        );

        match self.get(&secure_url).await {
            Ok(body) => Ok(Page {
                url: secure_url,
                body,
            }),
            Err(e) => Err(unresolved(&secure_url, e)),
        }
    }

    // One GET, body streamed chunk by chunk into a pooled buffer.
    // If reading fails halfway the buffer is dropped and goes back to the pool.
    async fn get(&self, url: &str) -> std::result::Result<PooledBuffer, reqwest::Error> {
        let mut response = self.client.get(url).send().await?;

        let mut body = self.buffers.acquire();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

/// Rewrites the scheme to https, or `None` if the URL is already https
/// or can't be parsed.
pub fn upgrade_to_https(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if parsed.scheme() == "https" {
        return None;
    }
    parsed.set_scheme("https").ok()?;

    // Url always serializes a root path as "/", keep the caller's spelling
    let mut upgraded = parsed.to_string();
    if !url.ends_with('/') && parsed.path() == "/" && parsed.query().is_none() {
        upgraded.pop();
    }
    Some(upgraded)
}

fn unresolved(url: &str, source: reqwest::Error) -> ScanError {
    ScanError::UnresolvedOrTimedOut {
        url: url.to_string(),
        source,
    }
}

// Short human description of a transport error, for log lines
fn describe_error(error: &reqwest::Error) -> &'static str {
    let text = error.to_string();

    if error.is_timeout() {
        "request timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        if text.contains("dns") {
            "could not resolve hostname"
        } else {
            "connection failed"
        }
    } else if text.contains("certificate") || text.contains("ssl") {
        "ssl certificate error"
    } else if error.is_body() || error.is_decode() {
        "could not read response body"
    } else {
        "request failed"
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one Client for everything?
//    - reqwest::Client keeps a pool of open connections inside it
//    - Cloning it is cheap and shares that pool; building new ones is not
//
// 2. What is `let ... else`?
//    - `let Some(x) = value else { return ...; };` binds x or leaves early
//    - It keeps the happy path unindented
//
// 3. Why response.chunk() in a loop?
//    - The body arrives in pieces; we copy each piece into our own buffer
//      instead of letting reqwest allocate a fresh one per page
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> Fetcher {
        Fetcher::new(
            Duration::from_secs(2),
            Duration::from_secs(2),
            4,
            Logger::disabled(),
        )
        .unwrap()
    }

    #[test]
    fn test_upgrade_to_https() {
        assert_eq!(
            upgrade_to_https("http://example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            upgrade_to_https("http://example.com/a/b"),
            Some("https://example.com/a/b".to_string())
        );
        assert_eq!(upgrade_to_https("https://example.com"), None);
        assert_eq!(upgrade_to_https("not a url"), None);
    }

    #[tokio::test]
    async fn test_fetch_reads_whole_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let page = fetcher.fetch(&server.uri()).await.unwrap();
        assert_eq!(page.url, server.uri());
        assert_eq!(page.body.as_slice(), b"<p>hello</p>");

        drop(page);
        assert_eq!(fetcher.buffers().idle(), 1);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let page = fetcher().fetch(&server.uri()).await.unwrap();
        assert_eq!(page.body.as_slice(), b"missing");
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_after_retry() {
        // Nothing listens on port 1, so both http and https attempts fail fast
        let err = fetcher().fetch("http://127.0.0.1:1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedOrTimedOut);
        match err {
            ScanError::UnresolvedOrTimedOut { url, .. } => {
                assert_eq!(url, "https://127.0.0.1:1")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_https_failure_is_not_retried() {
        let err = fetcher().fetch("https://127.0.0.1:1").await.unwrap_err();
        match err {
            ScanError::UnresolvedOrTimedOut { url, .. } => {
                assert_eq!(url, "https://127.0.0.1:1")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
