// src/crawl/discover.rs
// =============================================================================
// Sample page discovery.
//
// How it works:
// 1. Fetch the home page of the site
// 2. Parse it with scraper and collect every <a href>
// 3. Keep links on the same origin (scheme + host + port) as the base URL
// 4. Reduce them to paths, drop duplicates, stop at the page limit
//
// Only one page is fetched: this is a sample for the metadata check, not a
// crawl of the whole site. If the home page can't be fetched the sample is
// just "/", and the metadata check reports the failure for it.
// =============================================================================

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::checker::fetch_resource;

/// Returns up to `max_pages` page paths, starting with `/`.
pub async fn discover_sample_pages(client: &Client, base: &Url, max_pages: usize) -> Vec<String> {
    if max_pages == 0 {
        return Vec::new();
    }

    let home = match base.join("/") {
        Ok(url) => url,
        Err(_) => return vec!["/".to_string()],
    };

    let html = match fetch_resource(client, &home).await {
        Ok(page) if page.is_success() => page.body,
        Ok(page) => {
            tracing::warn!(url = %home, status = page.status.as_u16(), "home page not available for discovery");
            return vec!["/".to_string()];
        }
        Err(failure) => {
            tracing::warn!(url = %home, %failure, "home page not available for discovery");
            return vec!["/".to_string()];
        }
    };

    let mut pages = vec!["/".to_string()];
    for path in extract_same_origin_paths(&html, &home) {
        if pages.len() >= max_pages {
            break;
        }
        if !pages.contains(&path) {
            pages.push(path);
        }
    }

    tracing::debug!(count = pages.len(), "sample pages discovered");
    pages
}

/// Collects the paths of all same-origin links in `html`, first occurrence
/// first, without duplicates.
pub fn extract_same_origin_paths(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_link(page_url, href) else {
            continue;
        };

        if is_same_origin(page_url, &url) && seen.insert(url.path().to_string()) {
            paths.push(url.path().to_string());
        }
    }

    paths
}

// Resolves a possibly-relative href against the page URL, skipping anchors
// and non-page schemes.
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    base.join(href).ok()
}

fn is_same_origin(base: &Url, url: &Url) -> bool {
    url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(x) = value else { continue; };` binds x or leaves the branch
//    - It keeps the happy path unindented
//
// 2. Why port_or_known_default() and not port()?
//    - port() is None whenever the URL uses the scheme's default port
//    - port_or_known_default() fills in 80/443, so the comparison is always
//      between real port numbers
// -----------------------------------------------------------------------------
