// src/report/html.rs
// =============================================================================
// HTML rendering.
//
// The output is one self-contained document: styles are inline, there are no
// scripts and no external assets, so the file can be opened or mailed as is.
// Every piece of report text goes through `escape` before it is written.
// =============================================================================

use std::fmt::Write as _;

use super::{CheckStatus, HealthReport};
use crate::checker::Severity;

pub fn render_html(report: &HealthReport) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>SEO Health Report - {}</title>", escape(&report.url));
    out.push_str("</head>\n");
    out.push_str(
        "<body style=\"font-family: -apple-system, Helvetica, Arial, sans-serif; \
         max-width: 960px; margin: 2rem auto; color: #1f2933;\">\n",
    );

    let _ = writeln!(out, "<h1 style=\"margin-bottom: 0.25rem;\">SEO Health Report</h1>");
    let _ = writeln!(
        out,
        "<p style=\"color: #52606d;\">{} &middot; {}</p>",
        escape(&report.url),
        escape(&report.timestamp.to_rfc3339())
    );
    let _ = writeln!(
        out,
        "<div style=\"font-size: 3rem; font-weight: bold; color: {};\">{}<span style=\"font-size: 1.25rem; color: #52606d;\">/100</span></div>",
        score_color(report.overall_score),
        report.overall_score
    );

    out.push_str("<h2>Categories</h2>\n");
    out.push_str("<table style=\"border-collapse: collapse; width: 100%;\">\n");
    out.push_str("<tr><th style=\"text-align: left; padding: 6px;\">Category</th><th style=\"text-align: left; padding: 6px;\">Status</th><th style=\"text-align: right; padding: 6px;\">Score</th></tr>\n");
    for (name, check) in report.checks.named() {
        let _ = writeln!(
            out,
            "<tr style=\"border-top: 1px solid #e4e7eb;\"><td style=\"padding: 6px;\">{}</td><td style=\"padding: 6px; color: {};\">{}</td><td style=\"padding: 6px; text-align: right;\">{}</td></tr>",
            escape(name),
            status_color(check.status),
            check.status.as_str(),
            check.score
        );
    }
    out.push_str("</table>\n");

    let _ = writeln!(
        out,
        "<h2>Issues ({})</h2>\n<p>{} errors, {} warnings, {} info &middot; pages checked: {}</p>",
        report.summary.total_issues,
        report.summary.errors,
        report.summary.warnings,
        report.summary.infos,
        escape(&report.summary.pages_checked.join(", "))
    );

    for (category, issue) in report.issues() {
        let _ = writeln!(
            out,
            "<div style=\"border-left: 4px solid {}; padding: 8px 12px; margin: 12px 0; background: #f5f7fa;\">",
            severity_color(issue.severity)
        );
        let _ = writeln!(
            out,
            "<strong>{}</strong> <small style=\"color: #52606d;\">{} &middot; {} &middot; {}</small>",
            escape(&issue.title),
            issue.severity.as_str(),
            escape(category),
            escape(&issue.id)
        );
        let _ = writeln!(out, "<p style=\"margin: 4px 0;\">{}</p>", escape(&issue.description));
        let _ = writeln!(
            out,
            "<p style=\"margin: 4px 0;\"><em>Recommendation:</em> {}</p>",
            escape(&issue.recommendation)
        );
        if let Some(pages) = &issue.affected_pages {
            let _ = writeln!(
                out,
                "<p style=\"margin: 4px 0; color: #52606d;\">Pages: {}</p>",
                escape(&pages.join(", "))
            );
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn score_color(score: u8) -> &'static str {
    match score {
        90..=100 => "#2f9e44",
        70..=89 => "#e67700",
        _ => "#c92a2a",
    }
}

fn status_color(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "#2f9e44",
        CheckStatus::Warning => "#e67700",
        CheckStatus::Fail => "#c92a2a",
        CheckStatus::NotChecked => "#9aa5b1",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "#c92a2a",
        Severity::Warning => "#e67700",
        Severity::Info => "#1c7ed6",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_html_is_self_contained() {
        let html = render_html(&sample_report());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("<link"));
        assert!(html.contains("robots-block-all"));
        assert!(html.contains("Pages: /products"));
    }

    #[test]
    fn test_report_text_is_escaped() {
        let html = render_html(&sample_report());

        assert!(html.contains("Rides &amp; &lt;Coasters&gt;"));
        assert!(!html.contains("<Coasters>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
