// src/report/csv.rs
// CSV rendering: a header row, then one row per issue. Fields that contain a
// comma, quote or line break are quoted with inner quotes doubled.

use super::HealthReport;

const HEADER: [&str; 9] = [
    "category",
    "id",
    "severity",
    "type",
    "title",
    "description",
    "recommendation",
    "affected_pages",
    "auto_fixable",
];

pub fn render_csv(report: &HealthReport) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().copied());

    for (category, issue) in report.issues() {
        let pages = issue
            .affected_pages
            .as_ref()
            .map(|pages| pages.join(";"))
            .unwrap_or_default();
        let auto_fixable = issue.auto_fixable.to_string();

        push_row(
            &mut out,
            [
                category,
                issue.id.as_str(),
                issue.severity.as_str(),
                issue.issue_type.as_str(),
                issue.title.as_str(),
                issue.description.as_str(),
                issue.recommendation.as_str(),
                pages.as_str(),
                auto_fixable.as_str(),
            ],
        );
    }

    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape_field).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_one_row_per_issue_plus_header() {
        let csv = render_csv(&sample_report());
        let rows: Vec<&str> = csv.split_terminator("\r\n").collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("category,id,severity"));
        assert!(rows[1].starts_with("technical,robots-block-all,error,technical,"));
        assert!(rows[3].starts_with("content,title-too-short,warning,content,"));
        assert!(rows[3].contains(",/products,false"));
    }

    #[test]
    fn test_fields_with_quotes_and_commas_are_escaped() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a, b"), "\"a, b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
