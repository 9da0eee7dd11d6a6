// src/checker/issue.rs
// =============================================================================
// The issue record every check produces, and the score derived from a list
// of issues.
//
// Issues are plain values: a check builds them, the report holds them, and
// nothing mutates them afterwards.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Which area an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Technical,
    Content,
    StructuredData,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Technical => "technical",
            IssueType::Content => "content",
            IssueType::StructuredData => "structured-data",
        }
    }
}

/// How bad an issue is. Each level costs a fixed number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Points subtracted from a perfect 100 for one issue of this severity.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::Error => 10,
            Severity::Warning => 5,
            Severity::Info => 2,
        }
    }
}

/// A single finding from a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoIssue {
    /// Stable identifier such as `robots-block-all`
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    /// Page paths the issue was found on, for page-level checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_pages: Option<Vec<String>>,
    pub auto_fixable: bool,
}

impl SeoIssue {
    pub fn new(
        id: &str,
        issue_type: IssueType,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        SeoIssue {
            id: id.to_string(),
            issue_type,
            severity,
            title: title.into(),
            description: description.into(),
            recommendation: recommendation.into(),
            affected_pages: None,
            auto_fixable: false,
        }
    }

    pub fn on_page(mut self, path: &str) -> Self {
        self.affected_pages = Some(vec![path.to_string()]);
        self
    }

    pub fn auto_fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}

/// Scores a list of issues: 100 minus 10 per error, 5 per warning and 2 per
/// info, never below 0.
pub fn calculate_score(issues: &[SeoIssue]) -> u8 {
    let penalty: u32 = issues.iter().map(|issue| issue.severity.penalty()).sum();
    100u32.saturating_sub(penalty) as u8
}

/// Counts issues of one severity.
pub fn count_severity(issues: &[SeoIssue], severity: Severity) -> usize {
    issues.iter().filter(|issue| issue.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> SeoIssue {
        SeoIssue::new("test", IssueType::Technical, severity, "t", "d", "r")
    }

    #[test]
    fn test_no_issues_scores_100() {
        assert_eq!(calculate_score(&[]), 100);
    }

    #[test]
    fn test_error_and_warning_score_85() {
        let issues = vec![issue(Severity::Error), issue(Severity::Warning)];
        assert_eq!(calculate_score(&issues), 85);
    }

    #[test]
    fn test_info_costs_two_points() {
        let issues = vec![issue(Severity::Info), issue(Severity::Info)];
        assert_eq!(calculate_score(&issues), 96);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let issues: Vec<_> = (0..25).map(|_| issue(Severity::Error)).collect();
        assert_eq!(calculate_score(&issues), 0);
    }

    #[test]
    fn test_issue_serializes_with_type_tag() {
        let value = serde_json::to_value(
            SeoIssue::new("x", IssueType::StructuredData, Severity::Warning, "t", "d", "r")
                .on_page("/about"),
        )
        .unwrap();

        assert_eq!(value["type"], "structured-data");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["affected_pages"][0], "/about");
        assert_eq!(value["auto_fixable"], false);
    }
}
