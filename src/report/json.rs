// src/report/json.rs
// Pretty-printed JSON, the same shape the report serializes to everywhere.

use anyhow::Result;

use super::HealthReport;

pub fn render_json(report: &HealthReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_json_round_trips_the_report_shape() {
        let report = sample_report();
        let json = render_json(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall_score"], 93);
        assert_eq!(value["checks"]["mobile"]["status"], "not_checked");
        assert_eq!(value["checks"]["technical"]["status"], "fail");
        assert_eq!(value["checks"]["technical"]["issues"][0]["id"], "robots-block-all");
        assert_eq!(value["summary"]["pages_checked"][1], "/products");

        let parsed: HealthReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
