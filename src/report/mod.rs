// src/report/mod.rs
// =============================================================================
// The health report a check run produces, and its renderers.
//
// Submodules:
// - text: plain key/value header plus an issue table
// - csv: one row per issue
// - html: a self-contained, inline-styled HTML page
// - json: pretty-printed JSON
//
// Five categories are advertised, but only two are checked: technical
// (robots.txt, sitemap.xml) and content (page metadata). Performance,
// structured data and mobile always read "not_checked" with a score of 0 and
// stay out of the overall score.
// =============================================================================

mod csv;
mod html;
mod json;
mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checker::{calculate_score, count_severity, SeoIssue, Severity};

pub use self::csv::render_csv;
pub use self::html::render_html;
pub use self::json::render_json;
pub use self::text::render_text;

/// Weight (percent) of the technical score in the overall score.
pub const TECHNICAL_WEIGHT: u32 = 30;

/// Weight (percent) of the content score in the overall score.
pub const CONTENT_WEIGHT: u32 = 70;

/// Outcome of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    NotChecked,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
            CheckStatus::Warning => "warning",
            CheckStatus::NotChecked => "not_checked",
        }
    }
}

/// One category of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCheck {
    pub status: CheckStatus,
    pub score: u8,
    pub issues: Vec<SeoIssue>,
}

impl CategoryCheck {
    /// Scores a checked category. Any error fails it, any warning downgrades
    /// it to a warning; info issues alone still pass.
    pub fn from_issues(issues: Vec<SeoIssue>) -> Self {
        let status = if count_severity(&issues, Severity::Error) > 0 {
            CheckStatus::Fail
        } else if count_severity(&issues, Severity::Warning) > 0 {
            CheckStatus::Warning
        } else {
            CheckStatus::Pass
        };

        CategoryCheck {
            status,
            score: calculate_score(&issues),
            issues,
        }
    }

    /// A category that has no check behind it.
    pub fn not_checked() -> Self {
        CategoryCheck {
            status: CheckStatus::NotChecked,
            score: 0,
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportChecks {
    pub technical: CategoryCheck,
    pub performance: CategoryCheck,
    pub content: CategoryCheck,
    pub structured_data: CategoryCheck,
    pub mobile: CategoryCheck,
}

impl ReportChecks {
    /// Categories in display order, with their report names.
    pub fn named(&self) -> [(&'static str, &CategoryCheck); 5] {
        [
            ("technical", &self.technical),
            ("performance", &self.performance),
            ("content", &self.content),
            ("structured_data", &self.structured_data),
            ("mobile", &self.mobile),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub total_issues: usize,
    pub pages_checked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub checks: ReportChecks,
    pub summary: ReportSummary,
}

impl HealthReport {
    /// Assembles the report from the issues of the two checked categories.
    pub fn new(
        url: &str,
        technical_issues: Vec<SeoIssue>,
        content_issues: Vec<SeoIssue>,
        pages_checked: Vec<String>,
    ) -> Self {
        let technical = CategoryCheck::from_issues(technical_issues);
        let content = CategoryCheck::from_issues(content_issues);
        let overall_score = overall_score(technical.score, content.score);

        let checks = ReportChecks {
            technical,
            performance: CategoryCheck::not_checked(),
            content,
            structured_data: CategoryCheck::not_checked(),
            mobile: CategoryCheck::not_checked(),
        };

        let all: Vec<&SeoIssue> = checks.technical.issues.iter().chain(&checks.content.issues).collect();
        let count = |severity| all.iter().filter(|issue| issue.severity == severity).count();
        let summary = ReportSummary {
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            total_issues: all.len(),
            pages_checked,
        };

        HealthReport {
            url: url.to_string(),
            timestamp: Utc::now(),
            overall_score,
            checks,
            summary,
        }
    }

    /// Every issue in the report with the name of its category.
    pub fn issues(&self) -> impl Iterator<Item = (&'static str, &SeoIssue)> {
        self.checks
            .named()
            .into_iter()
            .flat_map(|(name, check)| check.issues.iter().map(move |issue| (name, issue)))
    }

    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}

/// Weighted average of the two checked categories, rounded half up.
pub fn overall_score(technical: u8, content: u8) -> u8 {
    let weighted = u32::from(technical) * TECHNICAL_WEIGHT + u32::from(content) * CONTENT_WEIGHT;
    ((weighted + 50) / 100).min(100) as u8
}
