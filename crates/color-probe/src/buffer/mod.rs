//! Pixel buffers
//!
//! Extraction reads pixels through the [`PixelBuffer`] trait, so it works the
//! same on decoded screenshots, in-memory grids and cropped views:
//!
//! - [`RasterBuffer`]: borrowed bytes in one of the common
//!   [`ComponentLayout`]s, optionally with premultiplied alpha
//! - [`ColorGrid`]: owned row-major [`Color`]s
//! - [`RegionView`]: a rectangle of another buffer, without copying
//!
//! Coordinates are `(x, y)` with the origin at the top-left corner.

mod grid;
mod raster;
mod region;

pub use grid::{downscale, ColorGrid, Quality};
pub use raster::{ComponentLayout, RasterBuffer};
pub use region::{Region, RegionView};

use crate::color::Color;

/// A rectangular grid of pixels.
///
/// # Panics
///
/// Implementations panic when [`pixel_at`](Self::pixel_at) is called with
/// coordinates outside `0..width() × 0..height()`.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel_at(&self, x: u32, y: u32) -> Color;

    /// Number of pixels.
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for &B {
    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn pixel_at(&self, x: u32, y: u32) -> Color {
        (**self).pixel_at(x, y)
    }
}

#[inline]
#[track_caller]
pub(crate) fn assert_in_bounds(x: u32, y: u32, width: u32, height: u32) {
    assert!(
        x < width && y < height,
        "pixel ({x}, {y}) out of bounds for {width}x{height} buffer"
    );
}
