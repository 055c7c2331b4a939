//! Owned pixel grids and downscaling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{assert_in_bounds, PixelBuffer};
use crate::color::Color;
use crate::error::BufferError;

/// Row-major grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ColorGrid {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`BufferError::PixelCount`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BufferError::PixelCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A grid of one color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// A grid whose pixel at `(x, y)` is `f(x, y)`.
    ///
    /// ```
    /// use color_probe::{Color, ColorGrid, PixelBuffer};
    ///
    /// let stripes = ColorGrid::from_fn(4, 2, |x, _| {
    ///     if x % 2 == 0 { Color::BLACK } else { Color::WHITE }
    /// });
    /// assert_eq!(stripes.pixel_at(1, 1), Color::WHITE);
    /// ```
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copy any buffer into a grid.
    pub fn from_buffer<B: PixelBuffer + ?Sized>(buffer: &B) -> Self {
        Self::from_fn(buffer.width(), buffer.height(), |x, y| buffer.pixel_at(x, y))
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }
}

impl PixelBuffer for ColorGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        assert_in_bounds(x, y, self.width, self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// How far a region is shrunk before palette extraction.
///
/// The value is the target length of the longer side in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 50 px
    Lowest,
    /// 100 px
    Low,
    /// 250 px
    #[default]
    High,
    /// No scaling
    Highest,
}

impl Quality {
    /// Target length of the longer side, or `None` for no scaling.
    pub fn max_side(self) -> Option<u32> {
        match self {
            Quality::Lowest => Some(50),
            Quality::Low => Some(100),
            Quality::High => Some(250),
            Quality::Highest => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Quality::Lowest => "lowest",
            Quality::Low => "low",
            Quality::High => "high",
            Quality::Highest => "highest",
        })
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest" => Ok(Quality::Lowest),
            "low" => Ok(Quality::Low),
            "high" => Ok(Quality::High),
            "highest" => Ok(Quality::Highest),
            other => Err(format!(
                "unknown quality {other:?} (expected lowest, low, high or highest)"
            )),
        }
    }
}

/// Nearest-neighbour downscale so the longer side is at most
/// `quality.max_side()`.
///
/// Never upscales; buffers already small enough (and [`Quality::Highest`])
/// are copied unchanged. The aspect ratio is kept and neither side drops
/// below one pixel.
pub fn downscale<B: PixelBuffer + ?Sized>(buffer: &B, quality: Quality) -> ColorGrid {
    let (width, height) = (buffer.width(), buffer.height());
    let longest = width.max(height);

    let target = match quality.max_side() {
        Some(side) if longest > side => side,
        _ => return ColorGrid::from_buffer(buffer),
    };

    let scale = target as f64 / longest as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);

    tracing::trace!(
        width,
        height,
        new_width,
        new_height,
        %quality,
        "Downscaling region"
    );

    ColorGrid::from_fn(new_width, new_height, |x, y| {
        // Sample the source pixel under the centre of the target pixel
        let sx = (((x as f64 + 0.5) * width as f64 / new_width as f64) as u32).min(width - 1);
        let sy = (((y as f64 + 0.5) * height as f64 / new_height as f64) as u32).min(height - 1);
        buffer.pixel_at(sx, sy)
    })
}
