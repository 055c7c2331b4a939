//! Screenshot inspection runs
//!
//! A manifest lists the elements on screen (kind, text, frame in screenshot
//! pixels, and layout flags measured by whoever produced the screenshot).
//! Each frame is cropped out of the screenshot and measured:
//!
//! - labels and button labels by random sampling (two dominant named colors)
//! - buttons by the histogram palette (background against primary)
//!
//! ```yaml
//! elements:
//!   - kind: button
//!     text: Buy now
//!     frame: { x: 20, y: 400, width: 200, height: 44 }
//!   - kind: label
//!     text: Total
//!     frame: { x: 20, y: 120, width: 80, height: 18 }
//!     truncated: true
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use color_probe::{
    extract_palette_with, sample_colors, ColorCatalog, ElementKind, ElementReport, LayoutFlags,
    PixelBuffer, Region,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ImageError, InspectError};
use crate::imaging::{crop, Screenshot};

/// One element to measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub kind: ElementKind,
    #[serde(default)]
    pub text: Option<String>,
    /// Bounds in screenshot pixels.
    pub frame: Region,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub clipped: bool,
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl ElementSpec {
    fn flags(&self) -> LayoutFlags {
        LayoutFlags {
            truncated: self.truncated,
            clipped: self.clipped,
        }
    }
}

/// Elements on one screenshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl Manifest {
    /// Read a manifest; `.json` files are parsed as JSON, anything else as
    /// YAML.
    pub fn load(path: &Path) -> Result<Self, InspectError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| InspectError::ManifestRead {
                path: path.to_path_buf(),
                source,
            })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let manifest = if is_json {
            serde_json::from_str(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        Ok(manifest)
    }

    pub fn from_yaml(content: &str) -> Result<Self, InspectError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Result of inspecting one screenshot.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionRun {
    pub generated_at: DateTime<Utc>,
    pub screenshot: String,
    pub reports: Vec<ElementReport>,
    /// Human-readable problems, in element order.
    pub issues: Vec<String>,
}

impl InspectionRun {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Measures elements with one configuration and catalog.
pub struct Inspector<'a> {
    config: &'a AppConfig,
    catalog: &'a ColorCatalog,
}

impl<'a> Inspector<'a> {
    pub fn new(config: &'a AppConfig, catalog: &'a ColorCatalog) -> Self {
        Self { config, catalog }
    }

    /// Measure one element inside `screen`.
    pub fn measure<B, R>(
        &self,
        screen: &B,
        element: &ElementSpec,
        rng: &mut R,
    ) -> Result<ElementReport, ImageError>
    where
        B: PixelBuffer + ?Sized,
        R: Rng,
    {
        let view = crop(screen, element.frame)?;
        let text = element.text.clone();

        let mut report = if element.kind.uses_palette() {
            let palette = extract_palette_with(&view, &self.config.palette.options());
            ElementReport::from_palette(element.kind, text, &palette, self.catalog, element.flags())
        } else {
            let samples: Vec<_> = sample_colors(
                &view,
                self.catalog,
                self.config.sampling.options(),
                &mut *rng,
            )
            .collect();
            ElementReport::from_samples(element.kind, text, &samples, element.flags())
        };
        report.low_contrast = report.contrast.ratio < self.config.report.low_contrast;
        report.font_size = element.font_size;

        tracing::debug!(
            kind = %element.kind,
            text = element.text.as_deref().unwrap_or(""),
            colors = ?report.colors,
            ratio = report.contrast.ratio,
            "Measured element"
        );
        Ok(report)
    }

    /// Measure every element, stopping at the first frame that does not fit.
    pub fn measure_all<B, R>(
        &self,
        screen: &B,
        elements: &[ElementSpec],
        rng: &mut R,
    ) -> Result<Vec<ElementReport>, ImageError>
    where
        B: PixelBuffer + ?Sized,
        R: Rng,
    {
        elements
            .iter()
            .map(|element| self.measure(screen, element, rng))
            .collect()
    }
}

/// Inspect a PNG screenshot against a manifest file.
pub fn run_inspection(
    screenshot: &Path,
    manifest: &Path,
    config: &AppConfig,
) -> Result<InspectionRun, InspectError> {
    let manifest = Manifest::load(manifest)?;
    let shot = Screenshot::open(screenshot)?;
    let raster = shot.raster()?;

    let inspector = Inspector::new(config, ColorCatalog::web());
    let mut rng = config.sampling.rng();
    let reports = inspector.measure_all(&raster, &manifest.elements, &mut rng)?;

    let run = build_run(screenshot.to_path_buf(), reports);
    tracing::info!(
        elements = run.reports.len(),
        issues = run.issues.len(),
        "Inspection finished"
    );
    Ok(run)
}

fn build_run(screenshot: PathBuf, reports: Vec<ElementReport>) -> InspectionRun {
    let issues = reports
        .iter()
        .flat_map(|r| r.issues())
        .map(|issue| issue.to_string())
        .collect();
    InspectionRun {
        generated_at: Utc::now(),
        screenshot: screenshot.display().to_string(),
        reports,
        issues,
    }
}
