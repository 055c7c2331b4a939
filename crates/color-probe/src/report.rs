//! Per-element verdicts
//!
//! An [`ElementReport`] ties the colors measured in one element's pixels to
//! the layout facts supplied by the caller (was the text truncated, was the
//! element clipped) and flags low contrast.
//!
//! The low-contrast flag uses [`LOW_CONTRAST_THRESHOLD`] (3.0), which is
//! deliberately separate from the WCAG policies in [`crate::contrast`]:
//!
//! | Threshold | Value | Meaning |
//! |---|---|---|
//! | [`LOW_CONTRAST_THRESHOLD`] | ratio < 3.0 | report flags the element |
//! | [`ContrastPolicy::Standard`](crate::ContrastPolicy::Standard) | ratio > 4.5 | WCAG AA passes |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ColorCatalog;
use crate::contrast::contrast_ratio;
use crate::extract::{ColorSample, PaletteResult};

/// Elements whose measured contrast ratio is below this are flagged.
pub const LOW_CONTRAST_THRESHOLD: f64 = 3.0;

/// What kind of element was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Label,
    /// The title label inside a button.
    ButtonLabel,
    Button,
}

impl ElementKind {
    /// Buttons are measured with the palette; labels by sampling.
    pub fn uses_palette(self) -> bool {
        matches!(self, ElementKind::Button)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Label => "label",
            ElementKind::ButtonLabel => "button label",
            ElementKind::Button => "button",
        })
    }
}

/// Layout facts measured outside this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFlags {
    pub truncated: bool,
    pub clipped: bool,
}

/// The two colors a contrast ratio was measured between, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContrast {
    pub first: String,
    pub second: String,
    pub ratio: f64,
}

/// Measured colors and flags for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReport {
    pub kind: ElementKind,
    pub text: Option<String>,
    /// Color names, most significant first.
    pub colors: Vec<String>,
    pub contrast: NamedContrast,
    pub truncated: bool,
    pub clipped: bool,
    pub low_contrast: bool,
    /// Point size the element was rendered at, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ElementReport {
    fn new(
        kind: ElementKind,
        text: Option<String>,
        colors: Vec<String>,
        contrast: NamedContrast,
        flags: LayoutFlags,
    ) -> Self {
        let low_contrast = contrast.ratio < LOW_CONTRAST_THRESHOLD;
        Self {
            kind,
            text,
            colors,
            contrast,
            truncated: flags.truncated,
            clipped: flags.clipped,
            low_contrast,
            font_size: None,
        }
    }

    /// Report from random samples (label path).
    ///
    /// The ratio is taken between the two most frequent samples. A single
    /// sample is measured against itself and no samples at all count as a
    /// ratio of 1.0, so both are flagged.
    pub fn from_samples(
        kind: ElementKind,
        text: Option<String>,
        samples: &[ColorSample],
        flags: LayoutFlags,
    ) -> Self {
        let contrast = match samples {
            [] => NamedContrast {
                first: String::new(),
                second: String::new(),
                ratio: 1.0,
            },
            [only] => NamedContrast {
                first: only.name.clone(),
                second: only.name.clone(),
                ratio: contrast_ratio(only.color, only.color),
            },
            [first, second, ..] => NamedContrast {
                first: first.name.clone(),
                second: second.name.clone(),
                ratio: contrast_ratio(first.color, second.color),
            },
        };
        let colors = samples.iter().map(|s| s.name.clone()).collect();
        Self::new(kind, text, colors, contrast, flags)
    }

    /// Report from a four-slot palette (button path).
    ///
    /// Colors are named primary, secondary, detail, background; the ratio is
    /// between background and primary.
    pub fn from_palette(
        kind: ElementKind,
        text: Option<String>,
        palette: &PaletteResult,
        catalog: &ColorCatalog,
        flags: LayoutFlags,
    ) -> Self {
        let colors: Vec<String> = [
            palette.primary,
            palette.secondary,
            palette.detail,
            palette.background,
        ]
        .into_iter()
        .map(|c| catalog.name_of(c))
        .collect();

        let contrast = NamedContrast {
            first: colors[3].clone(),
            second: colors[0].clone(),
            ratio: contrast_ratio(palette.background, palette.primary),
        };
        Self::new(kind, text, colors, contrast, flags)
    }

    /// Problems found, in the order clipped, truncated, low contrast.
    pub fn issues(&self) -> Vec<Issue> {
        [
            (self.clipped, Problem::Clipped),
            (self.truncated, Problem::Truncated),
            (self.low_contrast, Problem::LowContrast),
        ]
        .into_iter()
        .filter(|(flagged, _)| *flagged)
        .map(|(_, problem)| Issue {
            kind: self.kind,
            text: self.text.clone().unwrap_or_default(),
            problem,
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    Clipped,
    Truncated,
    LowContrast,
}

/// One problem with one element.
///
/// Displays as e.g. `label with text: Save is TRUNCATED!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: ElementKind,
    pub text: String,
    pub problem: Problem,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.problem {
            Problem::Clipped => "is CLIPPED!",
            Problem::Truncated => "is TRUNCATED!",
            Problem::LowContrast => "has low contrast!",
        };
        write!(f, "{} with text: {} {}", self.kind, self.text, verdict)
    }
}

/// Round to `digits` significant digits.
///
/// ```
/// use color_probe::round_significant;
///
/// assert_eq!(round_significant(4.5678, 2), 4.6);
/// assert_eq!(round_significant(0.012345, 2), 0.012);
/// assert_eq!(round_significant(0.0, 3), 0.0);
/// ```
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let divisor = 10f64.powf(digits as f64 - value.abs().log10().ceil());
    (value * divisor).round() / divisor
}
