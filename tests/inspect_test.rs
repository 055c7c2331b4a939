//! End-to-end inspection runs on PNG screenshots written to disk.

mod common;

use common::fixtures::{sample_run_dir, SAMPLE_MANIFEST_JSON, SAMPLE_MANIFEST_YAML};
use huecheck::config::AppConfig;
use huecheck::error::{ImageError, InspectError};
use huecheck::inspect::{run_inspection, Manifest};
use pretty_assertions::assert_eq;

fn seeded_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.sampling.seed = Some(11);
    config
}

#[test]
fn test_yaml_manifest_run() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);

    let run = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap();

    assert_eq!(run.reports.len(), 3);
    common::assert_colors(&run.reports[0], &["yellow", "white", "white", "navy"]);
    assert_eq!(run.reports[0].contrast.first, "navy");
    assert_eq!(run.reports[0].contrast.second, "yellow");
    common::assert_colors(&run.reports[1], &["white", "black"]);
    common::assert_colors(&run.reports[2], &["silver", "gainsboro"]);

    common::assert_issues(
        &run,
        &[
            "label with text: Total is TRUNCATED!",
            "label with text: Terms apply has low contrast!",
        ],
    );
    assert!(run.screenshot.ends_with("screen.png"));
}

#[test]
fn test_json_manifest_run() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.json", SAMPLE_MANIFEST_JSON);

    let run = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap();

    assert_eq!(run.reports.len(), 1);
    common::assert_colors(&run.reports[0], &["white", "black"]);
    common::assert_issues(&run, &["button label with text: OK is CLIPPED!"]);
}

#[test]
fn test_run_serializes_to_json() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);
    let run = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap();

    let json = serde_json::to_value(&run).unwrap();
    common::assert_run_json_shape(&json, 3);
    assert_eq!(json["reports"][0]["kind"], "button");
    assert_eq!(json["reports"][1]["truncated"], true);
    assert_eq!(json["reports"][2]["font_size"], 9.0);
    assert!(json["reports"][0].get("font_size").is_none());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);
    let config = seeded_config();

    let a = run_inspection(&screenshot, &manifest, &config).unwrap();
    let b = run_inspection(&screenshot, &manifest, &config).unwrap();
    assert_eq!(a.reports, b.reports);
}

#[test]
fn test_stricter_threshold_flags_every_label() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);
    let mut config = seeded_config();
    config.report.low_contrast = 22.0;

    let run = run_inspection(&screenshot, &manifest, &config).unwrap();
    assert!(run.reports.iter().all(|r| r.low_contrast));
    assert_eq!(run.issues.len(), 4);
}

#[test]
fn test_frame_outside_screenshot() {
    let manifest = r#"
elements:
  - kind: label
    text: Offscreen
    frame: { x: 100, y: 70, width: 40, height: 20 }
"#;
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", manifest);

    let err = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap_err();
    assert!(
        matches!(
            err,
            InspectError::Image(ImageError::RegionOutOfBounds {
                image_width: 120,
                image_height: 80,
                ..
            })
        ),
        "{err}"
    );
}

#[test]
fn test_missing_manifest() {
    let (dir, screenshot, _) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);
    let missing = dir.path().join("nope.yaml");

    let err = run_inspection(&screenshot, &missing, &seeded_config()).unwrap_err();
    assert!(matches!(err, InspectError::ManifestRead { .. }), "{err}");
}

#[test]
fn test_invalid_manifest_kind() {
    let manifest = "elements:\n  - kind: slider\n    frame: { x: 0, y: 0, width: 1, height: 1 }\n";
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", manifest);

    let err = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap_err();
    assert!(matches!(err, InspectError::ManifestYaml(_)), "{err}");
}

#[test]
fn test_not_a_png() {
    let (dir, _, manifest) = sample_run_dir("manifest.yaml", SAMPLE_MANIFEST_YAML);
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"GIF89a").unwrap();

    let err = run_inspection(&bogus, &manifest, &seeded_config()).unwrap_err();
    assert!(
        matches!(err, InspectError::Image(ImageError::PngDecode(_))),
        "{err}"
    );
}

#[test]
fn test_empty_manifest_has_no_reports() {
    let (_dir, screenshot, manifest) = sample_run_dir("manifest.yaml", "elements: []\n");

    let run = run_inspection(&screenshot, &manifest, &seeded_config()).unwrap();
    assert!(run.reports.is_empty());
    assert!(!run.has_issues());
    assert_eq!(Manifest::from_yaml("{}").unwrap(), Manifest::default());
}
