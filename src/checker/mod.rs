// src/checker/mod.rs
// =============================================================================
// This module contains the SEO health check.
//
// Submodules:
// - http: shared client, fetching, failure categories
// - issue: the issue record and the score
// - robots: robots.txt rules
// - sitemap: sitemap.xml rules
// - page: per-page metadata rules
//
// The whole run is one straight pipeline: robots.txt, sitemap.xml, then each
// sample page, one request at a time. The sample is the caller's paths, or
// just "/" unless discovery from the home page's links is switched on. A resource that can't be fetched turns
// into a warning and the run carries on, so a valid base URL always yields a
// report.
// =============================================================================

mod http;
mod issue;
mod page;
mod robots;
mod sitemap;

#[cfg(test)]
pub(crate) mod test_server;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::crawl;
use crate::report::HealthReport;

pub use http::{build_client, check_failed_issue, fetch_resource, FetchFailure, FetchedResource};
pub use issue::{calculate_score, count_severity, IssueType, SeoIssue, Severity};
pub use page::{
    analyze_page_metadata, check_page_metadata, extract_page_metadata, PageMetadata,
    DESCRIPTION_LENGTH, TITLE_LENGTH,
};
pub use robots::{analyze_robots_txt, check_robots_txt};
pub use sitemap::{analyze_sitemap, check_sitemap, count_urls, FEW_URLS_THRESHOLD};

/// Default number of sample pages checked per run.
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Page paths to check. Empty means the home page only, or the
    /// discovered sample when `discover` is set.
    pub pages: Vec<String>,
    /// Pick sample pages from the home page's links when `pages` is empty.
    pub discover: bool,
    /// Upper bound on the number of pages checked.
    pub max_pages: usize,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            pages: Vec::new(),
            discover: false,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Parses and validates the base URL of the site to check.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).with_context(|| format!("invalid URL '{}'", base_url))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("URL must use http or https: {}", base_url));
    }
    if url.host_str().is_none() {
        return Err(anyhow!("URL has no host: {}", base_url));
    }

    Ok(url)
}

/// Runs every check against `base_url` and assembles the report.
///
/// Only a malformed base URL (or a client that can't be built) is an error.
/// Network failures along the way end up as issues in the report.
pub async fn run_seo_health_check(base_url: &str, config: &CheckConfig) -> Result<HealthReport> {
    let base = parse_base_url(base_url)?;
    let client = build_client(config.timeout)?;

    tracing::info!(url = %base, "checking robots.txt");
    let mut technical = check_robots_txt(&client, &base).await;

    tracing::info!(url = %base, "checking sitemap.xml");
    technical.extend(check_sitemap(&client, &base).await);

    let pages = if !config.pages.is_empty() {
        config.pages.iter().take(config.max_pages).cloned().collect()
    } else if config.discover {
        crawl::discover_sample_pages(&client, &base, config.max_pages).await
    } else {
        vec!["/".to_string()]
    };

    let mut content = Vec::new();
    for path in &pages {
        tracing::info!(page = %path, "checking page metadata");
        content.extend(check_page_metadata(&client, &base, path).await);
    }

    let report = HealthReport::new(base_url, technical, content, pages);
    tracing::info!(
        score = report.overall_score,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "check finished"
    );

    Ok(report)
}
