//! Rectangular views into a buffer.

use serde::{Deserialize, Serialize};

use super::{assert_in_bounds, PixelBuffer};
use crate::color::Color;
use crate::error::BufferError;

/// A pixel rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a buffer.
    pub fn of<B: PixelBuffer + ?Sized>(buffer: &B) -> Self {
        Self::new(0, 0, buffer.width(), buffer.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the region lies entirely inside a `width × height` buffer.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        right <= width as u64 && bottom <= height as u64
    }

    /// The part of the region inside a `width × height` buffer.
    ///
    /// Returns an empty region when there is no overlap.
    pub fn clamp_to(&self, width: u32, height: u32) -> Region {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);
        Region::new(x, y, right - x, bottom - y)
    }
}

/// A [`Region`] of another buffer, read in place.
///
/// ```
/// use color_probe::{Color, ColorGrid, PixelBuffer, Region, RegionView};
///
/// let grid = ColorGrid::from_fn(10, 10, |x, y| Color::from_u8(x as u8, y as u8, 0));
/// let view = RegionView::new(&grid, Region::new(2, 3, 4, 4)).unwrap();
///
/// assert_eq!(view.width(), 4);
/// assert_eq!(view.pixel_at(0, 0), Color::from_u8(2, 3, 0));
/// ```
#[derive(Debug)]
pub struct RegionView<'a, B: PixelBuffer + ?Sized> {
    buffer: &'a B,
    region: Region,
}

impl<B: PixelBuffer + ?Sized> Clone for RegionView<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: PixelBuffer + ?Sized> Copy for RegionView<'_, B> {}

impl<'a, B: PixelBuffer + ?Sized> RegionView<'a, B> {
    /// # Errors
    ///
    /// [`BufferError::RegionOutOfBounds`] if the region does not fit.
    pub fn new(buffer: &'a B, region: Region) -> Result<Self, BufferError> {
        if !region.fits_within(buffer.width(), buffer.height()) {
            return Err(BufferError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                buffer_width: buffer.width(),
                buffer_height: buffer.height(),
            });
        }
        Ok(Self { buffer, region })
    }

    /// View the overlap of `region` with the buffer, never failing.
    pub fn clamped(buffer: &'a B, region: Region) -> Self {
        let region = region.clamp_to(buffer.width(), buffer.height());
        Self { buffer, region }
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for RegionView<'_, B> {
    fn width(&self) -> u32 {
        self.region.width
    }

    fn height(&self) -> u32 {
        self.region.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        assert_in_bounds(x, y, self.region.width, self.region.height);
        self.buffer.pixel_at(self.region.x + x, self.region.y + y)
    }
}
