#![allow(clippy::module_inception, clippy::excessive_precision)]

//! color-probe: color measurement for rendered UI
//!
//! Feed it the pixels of one on-screen element and it tells you which
//! colors are there, what they are called and whether they contrast enough
//! to be read.
//!
//! # Quick Start
//!
//! ```
//! use color_probe::{contrast_ratio, extract_palette, nearest_name, Color, ColorGrid};
//!
//! // A dark blue button with a yellow title
//! let navy = Color::from_u8(0, 0, 128);
//! let yellow = Color::from_u8(255, 255, 0);
//! let button = ColorGrid::from_fn(40, 12, |x, y| {
//!     if (4..8).contains(&y) && (10..30).contains(&x) { yellow } else { navy }
//! });
//!
//! let palette = extract_palette(&button);
//! assert_eq!(nearest_name(palette.background), "navy");
//! assert_eq!(nearest_name(palette.primary), "yellow");
//! assert!(contrast_ratio(palette.background, palette.primary) > 7.0);
//! ```
//!
//! # Modules
//!
//! - [`color`]: [`Color`] and its conversions to [`Xyz`] and [`Lab`]
//! - [`distance`]: channel-weighted, CIE94 and CIEDE2000 distances
//! - [`contrast`]: WCAG luminance, contrast ratio and thresholds
//! - [`catalog`]: named colors and nearest-name lookup
//! - [`buffer`]: the [`PixelBuffer`] trait and its implementations
//! - [`extract`]: random sampling and histogram palettes
//! - [`report`]: per-element verdicts
//!
//! # Two Ways to Find Colors
//!
//! Text is thin and anti-aliased: most of its pixels are blends. Sampling a
//! few hundred random pixels and naming each one with the catalog makes the
//! blends scatter over many names while text color and background pile up on
//! two ([`sample_colors`]).
//!
//! Buttons are mostly flat fills. An exact histogram finds the fill as the
//! most frequent color and then looks for up to three colors of the opposite
//! darkness that stand out against it ([`extract_palette`]).
//!
//! # Thresholds
//!
//! | Constant | Value | Where |
//! |---|---|---|
//! | [`ContrastPolicy::Strict`] | ratio ≥ 7.0 | [`is_contrasting`] with `strict` |
//! | [`ContrastPolicy::Standard`] | ratio > 4.5 | [`is_contrasting`] |
//! | [`ContrastPolicy::Lenient`] | ratio > 1.0 | default palette gate |
//! | [`LOW_CONTRAST_THRESHOLD`] | ratio < 3.0 | [`ElementReport::low_contrast`] |
//! | [`NOISE_FLOOR_FRACTION`] | 1% of height | palette histogram |
//! | [`BACKGROUND_PROMOTION_RATIO`] | 30% | palette background |
//! | [`MIN_TEXT_SATURATION`] | 0.15 | palette foreground |

pub mod buffer;
pub mod catalog;
pub mod color;
pub mod contrast;
pub mod distance;
pub mod error;
pub mod extract;
pub mod report;


pub use buffer::{
    downscale, ColorGrid, ComponentLayout, PixelBuffer, Quality, RasterBuffer, Region, RegionView,
};
pub use catalog::{nearest_name, ColorCatalog, NamedColor, NOT_DETECTED};
pub use color::{Color, Lab, Rgb8, Xyz};
pub use contrast::{
    contrast_ratio, is_contrasting, is_dark, lowest_contrast_pair, relative_luminance,
    ContrastPair, ContrastPolicy,
};
pub use distance::{ChannelWeighted, Cie94, Ciede2000, ColorDistance, DistanceMetric};
pub use error::{BufferError, CatalogError, ParseColorError, ParseMetricError};
pub use extract::{
    extract_palette, extract_palette_array, extract_palette_array_with, extract_palette_with,
    sample_colors, ColorSample, ColorSamples, ContrastGate, PaletteOptions, PaletteResult,
    SampleOptions, BACKGROUND_PROMOTION_RATIO, MIN_TEXT_SATURATION, NOISE_FLOOR_FRACTION,
};
pub use report::{
    round_significant, ElementKind, ElementReport, Issue, LayoutFlags, NamedContrast, Problem,
    LOW_CONTRAST_THRESHOLD,
};
