//! Assertion helpers for tests.

use color_probe::ElementReport;
use huecheck::inspect::InspectionRun;
use pretty_assertions::assert_eq;

/// Assert the run's issue lines, in order
pub fn assert_issues(run: &InspectionRun, expected: &[&str]) {
    assert_eq!(
        run.issues, expected,
        "Unexpected issues. Full run: {}",
        serde_json::to_string_pretty(run).unwrap()
    );
}

/// Assert a report measured the expected colors (most significant first)
pub fn assert_colors(report: &ElementReport, expected: &[&str]) {
    assert_eq!(
        report.colors, expected,
        "Unexpected colors for {} {:?} (ratio {})",
        report.kind, report.text, report.contrast.ratio
    );
}

/// Assert the serialized run has the fields consumers rely on
pub fn assert_run_json_shape(json: &serde_json::Value, elements: usize) {
    assert!(
        json["generated_at"].is_string(),
        "generated_at missing: {json}"
    );
    assert!(json["screenshot"].is_string(), "screenshot missing: {json}");
    let reports = json["reports"].as_array().expect("reports array");
    assert_eq!(reports.len(), elements);
    for report in reports {
        for field in ["kind", "colors", "contrast", "truncated", "clipped", "low_contrast"] {
            assert!(!report[field].is_null(), "{field} missing in {report}");
        }
        assert!(report["contrast"]["ratio"].is_number());
    }
    assert!(json["issues"].is_array());
}
