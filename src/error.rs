use std::path::PathBuf;

use color_probe::BufferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("Unsupported PNG format: {0}")]
    Unsupported(String),

    #[error("Frame {x},{y} {width}x{height} is outside the {image_width}x{image_height} screenshot")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] BufferError),
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML manifest: {0}")]
    ManifestYaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON manifest: {0}")]
    ManifestJson(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}
