// src/report/text.rs
// Plain-text rendering: a key/value header, one line per category, then an
// issue table.

use super::HealthReport;

pub fn render_text(report: &HealthReport) -> String {
    let mut lines = vec![
        "SEO Health Report".to_string(),
        "=".repeat(17),
        format!("URL: {}", report.url),
        format!("Generated: {}", report.timestamp.to_rfc3339()),
        format!("Overall score: {}/100", report.overall_score),
        format!("Pages checked: {}", report.summary.pages_checked.join(", ")),
        String::new(),
        "Categories".to_string(),
        "-".repeat(10),
    ];

    for (name, check) in report.checks.named() {
        lines.push(format!(
            "{:<16} {:<12} {:>3}",
            name,
            check.status.as_str(),
            check.score
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Issues: {} ({} errors, {} warnings, {} info)",
        report.summary.total_issues,
        report.summary.errors,
        report.summary.warnings,
        report.summary.infos
    ));

    if report.summary.total_issues > 0 {
        lines.push(format!(
            "{:<10} {:<12} {:<28} {:<20} {}",
            "SEVERITY", "CATEGORY", "ID", "PAGES", "TITLE"
        ));
        lines.push("=".repeat(100));

        for (category, issue) in report.issues() {
            let pages = issue
                .affected_pages
                .as_ref()
                .map(|pages| pages.join(" "))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{:<10} {:<12} {:<28} {:<20} {}",
                issue.severity.as_str(),
                category,
                issue.id,
                pages,
                issue.title
            ));
            lines.push(format!("{:>11} {}", "->", issue.recommendation));
        }
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_text_report_lists_scores_and_issues() {
        let text = render_text(&sample_report());

        assert!(text.contains("URL: https://rides.example.com"));
        assert!(text.contains("Overall score: 93/100"));
        assert!(text.contains("Pages checked: /, /products"));
        assert!(text.contains("performance"));
        assert!(text.contains("not_checked"));
        assert!(text.contains("robots-block-all"));
        assert!(text.contains("Issues: 3 (1 errors, 1 warnings, 1 info)"));
        assert!(text.ends_with('\n'));
    }
}
