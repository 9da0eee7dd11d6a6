// src/checker/sitemap.rs
// =============================================================================
// sitemap.xml check.
//
// The sitemap is not parsed as XML. The check looks for the markers a
// sitemap normally starts with and counts `<url>` entries:
// - no 2xx response          -> error, stop
// - neither `<?xml` nor `<urlset` present -> error
// - zero `<url>` entries     -> warning
// - fewer than 10 entries    -> info
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use url::Url;

use super::http::{check_failed_issue, fetch_resource};
use super::issue::{IssueType, SeoIssue, Severity};

/// Below this many URLs a sitemap is reported as small.
pub const FEW_URLS_THRESHOLD: usize = 10;

static URL_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"<url>").unwrap());

/// Fetches `{base}/sitemap.xml` and checks it.
pub async fn check_sitemap(client: &Client, base: &Url) -> Vec<SeoIssue> {
    let url = match base.join("/sitemap.xml") {
        Ok(url) => url,
        Err(e) => return vec![check_failed_issue("sitemap-check-failed", "sitemap.xml", &e)],
    };

    match fetch_resource(client, &url).await {
        Ok(resource) if resource.is_success() => analyze_sitemap(&resource.body),
        Ok(resource) => vec![SeoIssue::new(
            "sitemap-missing",
            IssueType::Technical,
            Severity::Error,
            "sitemap.xml is missing",
            format!("sitemap.xml answered with HTTP {}", resource.status.as_u16()),
            "Generate a sitemap.xml listing every public page",
        )
        .auto_fixable()],
        Err(failure) => {
            tracing::warn!(%url, %failure, "sitemap.xml check failed");
            vec![check_failed_issue("sitemap-check-failed", "sitemap.xml", &failure)]
        }
    }
}

/// Number of `<url>` entries in a sitemap body.
pub fn count_urls(body: &str) -> usize {
    URL_ENTRY.find_iter(body).count()
}

/// Checks the body of a sitemap.xml that was served successfully.
pub fn analyze_sitemap(body: &str) -> Vec<SeoIssue> {
    let mut issues = Vec::new();

    if !body.contains("<?xml") && !body.contains("<urlset") {
        issues.push(SeoIssue::new(
            "sitemap-invalid",
            IssueType::Technical,
            Severity::Error,
            "sitemap.xml is not a valid sitemap",
            "Neither an XML declaration nor a <urlset> element was found",
            "Serve an XML sitemap following the sitemaps.org protocol",
        ));
    }

    let url_count = count_urls(body);
    if url_count == 0 {
        issues.push(SeoIssue::new(
            "sitemap-empty",
            IssueType::Technical,
            Severity::Warning,
            "sitemap.xml lists no URLs",
            "No <url> entries were found in sitemap.xml",
            "List every public page in the sitemap",
        ));
    } else if url_count < FEW_URLS_THRESHOLD {
        issues.push(SeoIssue::new(
            "sitemap-few-urls",
            IssueType::Technical,
            Severity::Info,
            "sitemap.xml lists few URLs",
            format!("Only {} URL(s) were found in sitemap.xml", url_count),
            "Check that product, blog and case study pages are included",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::http::build_client;
    use crate::checker::test_server::TestServer;
    use std::time::Duration;

    fn sitemap_with(count: usize) -> String {
        let entries: String = (0..count)
            .map(|i| format!("<url><loc>https://example.com/p{}</loc></url>", i))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
            entries
        )
    }

    #[test]
    fn test_three_urls_is_info_only() {
        let issues = analyze_sitemap(&sitemap_with(3));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "sitemap-few-urls");
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_large_sitemap_passes() {
        assert!(analyze_sitemap(&sitemap_with(12)).is_empty());
    }

    #[test]
    fn test_empty_urlset_is_a_warning() {
        let issues = analyze_sitemap(&sitemap_with(0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "sitemap-empty");
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_non_xml_body_is_invalid_and_empty() {
        let issues = analyze_sitemap("<html><body>Not found</body></html>");
        let ids: Vec<_> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["sitemap-invalid", "sitemap-empty"]);
    }

    #[test]
    fn test_urlset_without_prolog_is_accepted() {
        let body = "<urlset><url><loc>/a</loc></url></urlset>";
        let ids: Vec<_> = analyze_sitemap(body).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["sitemap-few-urls"]);
    }

    #[tokio::test]
    async fn test_missing_sitemap_is_one_error() {
        let server = TestServer::start(&[]);
        let client = build_client(Duration::from_secs(5)).unwrap();

        let issues = check_sitemap(&client, &server.url("/")).await;

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "sitemap-missing");
        assert_eq!(issues[0].severity, Severity::Error);
    }
}
