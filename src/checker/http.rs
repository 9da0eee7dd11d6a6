// src/checker/http.rs
// =============================================================================
// This module fetches the resources the checks look at.
//
// Key functionality:
// - Builds one shared HTTP client (connection pooling, redirect limit,
//   request timeout)
// - Fetches a URL with a plain GET and keeps status + body
// - Sorts transport failures into a few readable categories so a failed
//   fetch can be reported as an issue instead of an error
//
// A non-2xx response is NOT a failure here: robots.txt and sitemap.xml
// checks report a missing resource differently from an unreachable host.
// =============================================================================

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use url::Url;

use super::issue::{IssueType, SeoIssue, Severity};

const USER_AGENT: &str = concat!("seo-guardian/", env!("CARGO_PKG_VERSION"));

// Builds the client shared by every check in one run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("failed to create HTTP client")
}

/// A fetched resource: where it came from, the status, and the body text.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl FetchedResource {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Why a fetch produced no response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Timeout,
    TooManyRedirects,
    DnsError,
    ConnectionFailed,
    SslError,
    Other(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Timeout => write!(f, "request timed out"),
            FetchFailure::TooManyRedirects => write!(f, "too many redirects"),
            FetchFailure::DnsError => write!(f, "could not resolve hostname"),
            FetchFailure::ConnectionFailed => write!(f, "connection failed"),
            FetchFailure::SslError => write!(f, "SSL certificate error"),
            FetchFailure::Other(message) => write!(f, "{}", message),
        }
    }
}

/// GETs `url` and returns status and body, whatever the status is.
pub async fn fetch_resource(client: &Client, url: &Url) -> Result<FetchedResource, FetchFailure> {
    tracing::debug!(%url, "fetching");

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(categorize_error)?;

    let status = response.status();
    let body = response.text().await.map_err(categorize_error)?;

    tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "fetched");

    Ok(FetchedResource {
        url: url.to_string(),
        status,
        body,
    })
}

// Sorts a reqwest error into a failure category.
//
// reqwest only exposes a few predicates, so DNS and certificate problems are
// recognised from the error text.
fn categorize_error(error: reqwest::Error) -> FetchFailure {
    let error_string = format!("{:#}", error).to_lowercase();

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_redirect() {
        FetchFailure::TooManyRedirects
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        FetchFailure::SslError
    } else if error.is_connect() {
        if error_string.contains("dns") {
            FetchFailure::DnsError
        } else {
            FetchFailure::ConnectionFailed
        }
    } else {
        FetchFailure::Other(error.to_string())
    }
}

/// The single warning a check reports when its resource could not be
/// fetched. The pipeline carries on after it.
pub fn check_failed_issue(id: &str, resource: &str, reason: &dyn fmt::Display) -> SeoIssue {
    SeoIssue::new(
        id,
        IssueType::Technical,
        Severity::Warning,
        format!("Could not check {}", resource),
        format!("Fetching {} failed: {}", resource, reason),
        format!("Make sure {} is reachable and try again", resource),
    )
}
