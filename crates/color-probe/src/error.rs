//! Error types for color parsing and catalog loading
//!
//! Color math itself never fails; these only surface at the edges where
//! text is turned into colors.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has the wrong number of digits (3, 6 or 8 after stripping `#`)
    #[error("invalid hex color length {0} (expected 3, 6 or 8 digits)")]
    InvalidLength(usize),

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),
}

/// Error type for constructing pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("expected {expected} pixels for {width}x{height}, got {actual}")]
    PixelCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("row stride {stride} is shorter than {min} bytes")]
    StrideTooSmall { stride: usize, min: usize },

    #[error("raster needs {expected} bytes, got {actual}")]
    DataTooShort { expected: usize, actual: usize },

    #[error("region {width}x{height}+{x}+{y} lies outside a {buffer_width}x{buffer_height} buffer")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        buffer_width: u32,
        buffer_height: u32,
    },
}

/// Error type for parsing a [`DistanceMetric`](crate::DistanceMetric) name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown distance metric {0:?} (expected weighted, cie94 or ciede2000)")]
pub struct ParseMetricError(pub String);

/// Error type for building a [`ColorCatalog`](crate::ColorCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no entries")]
    Empty,

    #[error("catalog entry {name:?} has channel {value} outside 0..=255")]
    ChannelOutOfRange { name: String, value: f64 },
}
