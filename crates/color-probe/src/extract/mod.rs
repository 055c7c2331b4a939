//! Representative colors of a pixel region
//!
//! Two independent strategies:
//!
//! - [`sample_colors`]: random sampling plus catalog naming, for text where
//!   the answer is "which two named colors dominate"
//! - [`extract_palette`] / [`extract_palette_array`]: an exact histogram,
//!   for solid shapes where the answer is a background and the colors that
//!   stand out against it

mod histogram;
mod palette;
mod sample;

pub use palette::{
    extract_palette, extract_palette_array, extract_palette_array_with, extract_palette_with,
    ContrastGate, PaletteOptions, PaletteResult, BACKGROUND_PROMOTION_RATIO, MIN_TEXT_SATURATION,
    NOISE_FLOOR_FRACTION, OPAQUE_ALPHA_MIN,
};
pub use sample::{sample_colors, ColorSample, ColorSamples, SampleOptions, DEFAULT_DRAWS, DEFAULT_TOP};
