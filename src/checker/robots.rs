// src/checker/robots.rs
// =============================================================================
// robots.txt check.
//
// Rules:
// 1. robots.txt must answer with a 2xx status, otherwise one error and stop
// 2. it should point crawlers at the sitemap with a `Sitemap:` directive
//    (matched as written: `sitemap:` in lower case does not count)
// 3. a bare `Disallow: /` line is read as "blocks all crawling"
//
// Rule 3 does not parse user-agent groups: `Disallow: /` under
// `User-agent: BadBot` is flagged the same as under `User-agent: *`. This is
// a known limitation of the check.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use url::Url;

use super::http::{check_failed_issue, fetch_resource};
use super::issue::{IssueType, SeoIssue, Severity};

static SITEMAP_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Sitemap:").unwrap());

static DISALLOW_ALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Disallow:\s*/\s*$").unwrap());

/// Fetches `{base}/robots.txt` and checks it.
pub async fn check_robots_txt(client: &Client, base: &Url) -> Vec<SeoIssue> {
    let url = match base.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => return vec![check_failed_issue("robots-check-failed", "robots.txt", &e)],
    };

    match fetch_resource(client, &url).await {
        Ok(resource) if resource.is_success() => analyze_robots_txt(&resource.body),
        Ok(resource) => vec![missing_issue(resource.status.as_u16())],
        Err(failure) => {
            tracing::warn!(%url, %failure, "robots.txt check failed");
            vec![check_failed_issue("robots-check-failed", "robots.txt", &failure)]
        }
    }
}

/// Checks the body of a robots.txt that was served successfully.
pub fn analyze_robots_txt(body: &str) -> Vec<SeoIssue> {
    let mut issues = Vec::new();
    if !SITEMAP_DIRECTIVE.is_match(body) {
        issues.push(
            SeoIssue::new(
                "robots-no-sitemap",
                IssueType::Technical,
                Severity::Warning,
                "robots.txt does not reference the sitemap",
                "No Sitemap: directive was found in robots.txt",
                "Add a line such as `Sitemap: https://example.com/sitemap.xml`",
            )
            .auto_fixable(),
        );
    }

    if DISALLOW_ALL.is_match(body) {
        issues.push(SeoIssue::new(
            "robots-block-all",
            IssueType::Technical,
            Severity::Error,
            "robots.txt blocks all crawling",
            "robots.txt contains a `Disallow: /` line",
            "Remove `Disallow: /` unless the site must stay out of search results",
        ));
    }

    issues
}

fn missing_issue(status: u16) -> SeoIssue {
    SeoIssue::new(
        "robots-missing",
        IssueType::Technical,
        Severity::Error,
        "robots.txt is missing",
        format!("robots.txt answered with HTTP {}", status),
        "Serve a robots.txt at the site root",
    )
    .auto_fixable()
}
