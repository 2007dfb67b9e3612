// src/crawl/links.rs
// =============================================================================
// Finds more pages on the same site to scan.
//
// How it works:
// 1. With a limit of 0 we don't crawl at all, the start page is the only link
// 2. Otherwise fetch the start page and parse it as HTML
// 3. Walk every <a href> and resolve it to an absolute URL
// 4. Keep links that contain the start URL (a cheap "same site" check)
// 5. Stop once we have `limit` links, the start page included
//
// Crawling is best-effort. If the start page can't be fetched we log it and
// fall back to scanning just the start page; the scan itself will then
// report the real fetch error.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::fetch::Fetcher;
use crate::logger::Logger;

/// Returns the links to scan for `base_url`, always starting with `base_url`.
pub async fn discover_links(
    fetcher: &Fetcher,
    base_url: &str,
    limit: usize,
    logger: Logger,
) -> Vec<String> {
    if limit == 0 {
        return vec![base_url.to_string()];
    }

    match fetcher.fetch(base_url).await {
        Ok(page) => {
            let html = String::from_utf8_lossy(&page.body);
            extract_same_site_links(&html, base_url, limit)
        }
        Err(e) => {
            logger.warn("could not fetch page for link discovery", base_url, &e);
            vec![base_url.to_string()]
        }
    }
}

/// Collects same-site links from `html` in first-seen order.
///
/// The result starts with `base_url` and holds at most `max(limit, 1)` links.
pub fn extract_same_site_links(html: &str, base_url: &str, limit: usize) -> Vec<String> {
    let mut links = vec![base_url.to_string()];
    // Keyed without the trailing slash so "https://x.com/" matches "https://x.com"
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(base_url.trim_end_matches('/').to_string());

    let (Ok(selector), Ok(base)) = (Selector::parse("a[href]"), Url::parse(base_url)) else {
        return links;
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        if links.len() >= limit {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute_url) = resolve_link(&base, href) else {
            continue;
        };

        if absolute_url.contains(base_url)
            && seen.insert(absolute_url.trim_end_matches('/').to_string())
        {
            links.push(absolute_url);
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // "/page#top" and "/page" are the same page
    url.set_fragment(None);
    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a CSS selector?
//    - "a[href]" means "every <a> element that has an href attribute"
//    - scraper uses the same selector syntax as browsers
//
// 2. Why a HashSet next to the Vec?
//    - The Vec keeps links in the order we found them
//    - The HashSet answers "have we seen this one already?" quickly
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const BASE: &str = "https://example.com";

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        assert_eq!(
            resolve_link(&base, "/docs"),
            Some("https://example.com/docs".to_string())
        );
    }

    #[test]
    fn test_skip_anchor_and_mailto() {
        let base = Url::parse(BASE).unwrap();
        assert_eq!(resolve_link(&base, "#section"), None);
        assert_eq!(resolve_link(&base, "mailto:test@example.com"), None);
        assert_eq!(resolve_link(&base, "ftp://example.com/file"), None);
    }

    #[test]
    fn test_keeps_same_site_links_in_order() {
        let html = r#"
            <body>
              <a href="/about">About</a>
              <a href="https://other.org/x">Elsewhere</a>
              <a href="https://example.com/blog/post">Post</a>
              <a href="/about#team">About again</a>
            </body>
        "#;
        let links = extract_same_site_links(html, BASE, 10);
        assert_eq!(
            links,
            vec![
                "https://example.com",
                "https://example.com/about",
                "https://example.com/blog/post",
            ]
        );
    }

    #[test]
    fn test_stops_at_limit() {
        let html = r#"
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="/c">C</a>
        "#;
        let links = extract_same_site_links(html, BASE, 2);
        assert_eq!(links, vec!["https://example.com", "https://example.com/a"]);
    }

    #[test]
    fn test_base_link_is_not_duplicated() {
        let html = r#"<a href="https://example.com">Home</a><a href="/">Home</a><a href="/x">X</a>"#;
        let links = extract_same_site_links(html, BASE, 10);
        assert_eq!(links, vec!["https://example.com", "https://example.com/x"]);
    }

    #[tokio::test]
    async fn test_zero_limit_skips_network() {
        let fetcher = Fetcher::new(
            Duration::from_secs(1),
            Duration::from_secs(1),
            1,
            Logger::disabled(),
        )
        .unwrap();
        // Port 1 would fail; with limit 0 it is never contacted
        let links = discover_links(&fetcher, "http://127.0.0.1:1", 0, Logger::disabled()).await;
        assert_eq!(links, vec!["http://127.0.0.1:1"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_base() {
        let fetcher = Fetcher::new(
            Duration::from_secs(1),
            Duration::from_secs(1),
            1,
            Logger::disabled(),
        )
        .unwrap();
        let links = discover_links(&fetcher, "http://127.0.0.1:1", 5, Logger::disabled()).await;
        assert_eq!(links, vec!["http://127.0.0.1:1"]);
    }
}
