// src/checker/page.rs
// =============================================================================
// Per-page metadata check.
//
// The page HTML is scanned with regular expressions, not parsed. The patterns
// only recognise the common tag shapes: attributes in the usual order, quoted
// values, no attribute split across lines. Anything else is missed.
//
// Rules (each one independent, all of them always run):
// - <title>: missing = error, under 30 chars or over 60 chars = warning
// - meta description: missing = error, under 120 or over 160 chars = warning
// - <h1>: none = error, more than one = warning
// - <img> without alt="..." : one warning with the count
// - no JSON-LD <script> block: warning (the JSON is never validated)
// =============================================================================

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use url::Url;

use super::http::{check_failed_issue, fetch_resource};
use super::issue::{IssueType, SeoIssue, Severity};

/// Title lengths (in characters) that pass silently.
pub const TITLE_LENGTH: RangeInclusive<usize> = 30..=60;

/// Meta description lengths (in characters) that pass silently.
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 120..=160;

struct PagePatterns {
    title: Regex,
    meta_description: Regex,
    h1: Regex,
    img: Regex,
    alt: Regex,
    json_ld: Regex,
}

static PATTERNS: Lazy<PagePatterns> = Lazy::new(|| PagePatterns {
    title: Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap(),
    meta_description: Regex::new(
        r#"(?i)<meta\s+name=["']description["']\s+content=(?:"([^"]*)"|'([^']*)')"#,
    )
    .unwrap(),
    h1: Regex::new(r"(?is)<h1[^>]*>.*?</h1>").unwrap(),
    img: Regex::new(r"(?i)<img\b[^>]*>").unwrap(),
    alt: Regex::new(r#"(?i)\balt=["'][^"']*["']"#).unwrap(),
    json_ld: Regex::new(r#"(?i)<script[^>]*type=["']application/ld\+json["'][^>]*>"#).unwrap(),
});

/// What the patterns found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: usize,
    pub image_count: usize,
    pub images_without_alt: usize,
    pub json_ld_blocks: usize,
}

/// Runs the patterns over `html`. Empty title/description text counts as
/// missing.
pub fn extract_page_metadata(html: &str) -> PageMetadata {
    let patterns = &*PATTERNS;

    let non_empty = |text: &str| {
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    };

    let title = patterns
        .title
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()));

    // one capture group per quote style
    let meta_description = patterns
        .meta_description
        .captures(html)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .and_then(|m| non_empty(m.as_str()));

    let images: Vec<&str> = patterns.img.find_iter(html).map(|m| m.as_str()).collect();
    let images_without_alt = images
        .iter()
        .filter(|tag| !patterns.alt.is_match(tag))
        .count();

    PageMetadata {
        title,
        meta_description,
        h1_count: patterns.h1.find_iter(html).count(),
        image_count: images.len(),
        images_without_alt,
        json_ld_blocks: patterns.json_ld.find_iter(html).count(),
    }
}

/// Fetches one page below `base` and checks its metadata.
pub async fn check_page_metadata(client: &Client, base: &Url, path: &str) -> Vec<SeoIssue> {
    let url = match base.join(path) {
        Ok(url) => url,
        Err(e) => return vec![check_failed_issue("page-check-failed", path, &e).on_page(path)],
    };

    match fetch_resource(client, &url).await {
        Ok(page) if page.is_success() => analyze_page_metadata(&page.body, path),
        Ok(page) => {
            let reason = format!("HTTP {}", page.status.as_u16());
            vec![check_failed_issue("page-check-failed", path, &reason).on_page(path)]
        }
        Err(failure) => {
            tracing::warn!(%url, %failure, "page check failed");
            vec![check_failed_issue("page-check-failed", path, &failure).on_page(path)]
        }
    }
}

/// Applies every metadata rule to the HTML of the page at `path`.
pub fn analyze_page_metadata(html: &str, path: &str) -> Vec<SeoIssue> {
    let meta = extract_page_metadata(html);
    let mut issues = Vec::new();

    match &meta.title {
        None => issues.push(content_issue(
            "title-missing",
            Severity::Error,
            "Page title is missing",
            "No <title> element was found".to_string(),
            "Add a unique, descriptive <title> of 30-60 characters",
        )),
        Some(title) => {
            let len = title.chars().count();
            if len < *TITLE_LENGTH.start() {
                issues.push(content_issue(
                    "title-too-short",
                    Severity::Warning,
                    "Page title is too short",
                    format!("The title is {} characters long", len),
                    "Expand the title to at least 30 characters",
                ));
            } else if len > *TITLE_LENGTH.end() {
                issues.push(content_issue(
                    "title-too-long",
                    Severity::Warning,
                    "Page title is too long",
                    format!("The title is {} characters long", len),
                    "Shorten the title to 60 characters or fewer",
                ));
            }
        }
    }

    match &meta.meta_description {
        None => issues.push(content_issue(
            "meta-description-missing",
            Severity::Error,
            "Meta description is missing",
            "No <meta name=\"description\"> content was found".to_string(),
            "Add a meta description of 120-160 characters",
        )),
        Some(description) => {
            let len = description.chars().count();
            if len < *DESCRIPTION_LENGTH.start() {
                issues.push(content_issue(
                    "meta-description-too-short",
                    Severity::Warning,
                    "Meta description is too short",
                    format!("The meta description is {} characters long", len),
                    "Expand the description to at least 120 characters",
                ));
            } else if len > *DESCRIPTION_LENGTH.end() {
                issues.push(content_issue(
                    "meta-description-too-long",
                    Severity::Warning,
                    "Meta description is too long",
                    format!("The meta description is {} characters long", len),
                    "Shorten the description to 160 characters or fewer",
                ));
            }
        }
    }

    if meta.h1_count == 0 {
        issues.push(content_issue(
            "h1-missing",
            Severity::Error,
            "Page has no H1 heading",
            "No <h1> element was found".to_string(),
            "Add exactly one <h1> describing the page",
        ));
    } else if meta.h1_count > 1 {
        issues.push(content_issue(
            "h1-multiple",
            Severity::Warning,
            "Page has more than one H1 heading",
            format!("{} <h1> elements were found", meta.h1_count),
            "Keep a single <h1> and demote the others to <h2>",
        ));
    }

    if meta.images_without_alt > 0 {
        issues.push(content_issue(
            "images-missing-alt",
            Severity::Warning,
            "Images without alt text",
            format!(
                "{} of {} image(s) have no alt attribute",
                meta.images_without_alt, meta.image_count
            ),
            "Describe every meaningful image with an alt attribute",
        ));
    }

    if meta.json_ld_blocks == 0 {
        issues.push(SeoIssue::new(
            "structured-data-missing",
            IssueType::StructuredData,
            Severity::Warning,
            "Structured data is missing",
            "No <script type=\"application/ld+json\"> block was found",
            "Add JSON-LD structured data (Organization, Product, Article...)",
        ));
    }

    issues.into_iter().map(|issue| issue.on_page(path)).collect()
}

fn content_issue(
    id: &str,
    severity: Severity,
    title: &str,
    description: String,
    recommendation: &str,
) -> SeoIssue {
    SeoIssue::new(id, IssueType::Content, severity, title, description, recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::http::build_client;
    use crate::checker::test_server::TestServer;
    use std::time::Duration;

    fn page(title: &str, description: &str, body: &str) -> String {
        format!(
            r#"<!doctype html>
<html>
  <head>
    <title>{}</title>
    <meta name="description" content="{}">
    <script type="application/ld+json">{{"@type":"Organization"}}</script>
  </head>
  <body>{}</body>
</html>"#,
            title, description, body
        )
    }

    fn ids(issues: &[SeoIssue]) -> Vec<&str> {
        issues.iter().map(|issue| issue.id.as_str()).collect()
    }

    #[test]
    fn test_well_formed_page_has_no_issues() {
        let html = page(&"t".repeat(45), &"d".repeat(140), "<h1>Rides</h1><img src=a.png alt=\"x\">");
        assert!(analyze_page_metadata(&html, "/").is_empty());
    }

    #[test]
    fn test_length_boundaries_pass() {
        for (title_len, description_len) in [(30, 120), (60, 160)] {
            let html = page(&"t".repeat(title_len), &"d".repeat(description_len), "<h1>x</h1>");
            assert!(analyze_page_metadata(&html, "/").is_empty());
        }
    }

    #[test]
    fn test_short_title_and_long_description() {
        let html = page("Rides", &"d".repeat(161), "<h1>x</h1>");
        let issues = analyze_page_metadata(&html, "/products");

        assert_eq!(ids(&issues), vec!["title-too-short", "meta-description-too-long"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert_eq!(issues[0].affected_pages, Some(vec!["/products".to_string()]));
    }

    #[test]
    fn test_long_title_and_short_description() {
        let html = page(&"t".repeat(61), &"d".repeat(119), "<h1>x</h1>");
        let issues = analyze_page_metadata(&html, "/");
        assert_eq!(ids(&issues), vec!["title-too-long", "meta-description-too-short"]);
    }

    #[test]
    fn test_bare_page_reports_every_missing_element() {
        let issues = analyze_page_metadata("<html><body><p>hi</p></body></html>", "/");

        assert_eq!(
            ids(&issues),
            vec![
                "title-missing",
                "meta-description-missing",
                "h1-missing",
                "structured-data-missing",
            ]
        );
        assert_eq!(issues[3].issue_type, IssueType::StructuredData);
    }

    #[test]
    fn test_multiple_h1_is_a_warning() {
        let html = page(&"t".repeat(40), &"d".repeat(130), "<h1>a</h1><h1 class=\"x\">b</h1>");
        let issues = analyze_page_metadata(&html, "/");
        assert_eq!(ids(&issues), vec!["h1-multiple"]);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_images_without_alt_are_one_issue() {
        let body = r#"<h1>x</h1><img src="a.png"><img src="b.png" alt="b"><IMG src="c.png" />"#;
        let html = page(&"t".repeat(40), &"d".repeat(130), body);

        let issues = analyze_page_metadata(&html, "/");

        assert_eq!(ids(&issues), vec!["images-missing-alt"]);
        assert!(issues[0].description.starts_with("2 of 3"));
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let meta = extract_page_metadata("<title>  Fahrgeschäfte für Freizeitparks  </title>");
        assert_eq!(meta.title.as_deref(), Some("Fahrgeschäfte für Freizeitparks"));
        assert_eq!(meta.title.unwrap().chars().count(), 31);
    }

    #[test]
    fn test_description_keeps_the_other_quote_character() {
        let text = "We're the world's leading maker of family rides, carousels and coasters for parks, piers and fairs across Europe and Asia.";
        let html = format!(r#"<meta name="description" content="{}">"#, text);
        assert_eq!(extract_page_metadata(&html).meta_description.as_deref(), Some(text));

        let html = r#"<meta name='description' content='The "Galaxy" coaster'>"#;
        assert_eq!(
            extract_page_metadata(html).meta_description.as_deref(),
            Some(r#"The "Galaxy" coaster"#)
        );
    }

    #[test]
    fn test_empty_title_counts_as_missing() {
        assert_eq!(extract_page_metadata("<title> </title>").title, None);
    }

    #[tokio::test]
    async fn test_page_fetched_and_checked() {
        let good = page(&"t".repeat(45), &"d".repeat(140), "<h1>x</h1>");
        let server = TestServer::start(&[("/products", 200, good.as_str())]);
        let client = build_client(Duration::from_secs(5)).unwrap();

        let issues = check_page_metadata(&client, &server.url("/"), "/products").await;

        assert!(issues.is_empty());
        assert_eq!(server.hits(), vec!["/products"]);
    }

    #[tokio::test]
    async fn test_missing_page_becomes_check_failed_warning() {
        let server = TestServer::start(&[]);
        let client = build_client(Duration::from_secs(5)).unwrap();

        let issues = check_page_metadata(&client, &server.url("/"), "/nope").await;

        assert_eq!(ids(&issues), vec!["page-check-failed"]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].description.contains("HTTP 404"));
    }
}
