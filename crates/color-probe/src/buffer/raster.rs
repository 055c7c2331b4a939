//! Byte-level raster access.

use serde::{Deserialize, Serialize};

use super::{assert_in_bounds, PixelBuffer};
use crate::color::Color;
use crate::error::BufferError;

/// Order of the components of one pixel in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentLayout {
    Rgba,
    Bgra,
    Argb,
    Abgr,
    Rgb,
    Bgr,
    Gray,
    GrayAlpha,
}

impl ComponentLayout {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ComponentLayout::Rgba
            | ComponentLayout::Bgra
            | ComponentLayout::Argb
            | ComponentLayout::Abgr => 4,
            ComponentLayout::Rgb | ComponentLayout::Bgr => 3,
            ComponentLayout::GrayAlpha => 2,
            ComponentLayout::Gray => 1,
        }
    }

    pub fn has_alpha(self) -> bool {
        !matches!(
            self,
            ComponentLayout::Rgb | ComponentLayout::Bgr | ComponentLayout::Gray
        )
    }

    /// Reorder one pixel's bytes into `[r, g, b, a]`.
    #[inline]
    fn decode(self, px: &[u8]) -> [u8; 4] {
        match self {
            ComponentLayout::Rgba => [px[0], px[1], px[2], px[3]],
            ComponentLayout::Bgra => [px[2], px[1], px[0], px[3]],
            ComponentLayout::Argb => [px[1], px[2], px[3], px[0]],
            ComponentLayout::Abgr => [px[3], px[2], px[1], px[0]],
            ComponentLayout::Rgb => [px[0], px[1], px[2], 255],
            ComponentLayout::Bgr => [px[2], px[1], px[0], 255],
            ComponentLayout::Gray => [px[0], px[0], px[0], 255],
            ComponentLayout::GrayAlpha => [px[0], px[0], px[0], px[1]],
        }
    }
}

/// A borrowed 8-bit raster.
///
/// # Example
///
/// ```
/// use color_probe::{Color, ComponentLayout, PixelBuffer, RasterBuffer};
///
/// // 2x1 BGRA: blue, then half-transparent red
/// let bytes = [255, 0, 0, 255, 0, 0, 255, 128];
/// let raster = RasterBuffer::new(&bytes, 2, 1, ComponentLayout::Bgra).unwrap();
///
/// assert_eq!(raster.pixel_at(0, 0), Color::from_u8(0, 0, 255));
/// assert_eq!(raster.pixel_at(1, 0).to_rgba8(), [255, 0, 0, 128]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RasterBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: ComponentLayout,
    premultiplied: bool,
}

impl<'a> RasterBuffer<'a> {
    /// Wrap tightly packed rows (stride = width × bytes per pixel).
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: ComponentLayout,
    ) -> Result<Self, BufferError> {
        let stride = width as usize * layout.bytes_per_pixel();
        Self::with_stride(data, width, height, stride, layout)
    }

    /// Wrap rows that are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// - [`BufferError::StrideTooSmall`] if a row does not fit in `stride`
    /// - [`BufferError::DataTooShort`] if `data` ends before the last pixel
    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        layout: ComponentLayout,
    ) -> Result<Self, BufferError> {
        let row = width as usize * layout.bytes_per_pixel();
        if stride < row {
            return Err(BufferError::StrideTooSmall { stride, min: row });
        }
        // The last row only needs its pixels, not the full stride
        let expected = if height == 0 {
            0
        } else {
            (height as usize - 1) * stride + row
        };
        if data.len() < expected {
            return Err(BufferError::DataTooShort {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
            premultiplied: false,
        })
    }

    /// Mark the color channels as premultiplied by alpha.
    ///
    /// Pixels are then divided by their alpha on read. Fully transparent
    /// pixels keep their stored channels.
    pub fn premultiplied(mut self, premultiplied: bool) -> Self {
        self.premultiplied = premultiplied;
        self
    }

    pub fn layout(&self) -> ComponentLayout {
        self.layout
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_premultiplied(&self) -> bool {
        self.premultiplied
    }
}

#[inline]
fn unpremultiply(c: u8, alpha: u8) -> u8 {
    (c as f64 * 255.0 / alpha as f64).round().min(255.0) as u8
}

impl PixelBuffer for RasterBuffer<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        assert_in_bounds(x, y, self.width, self.height);

        let bpp = self.layout.bytes_per_pixel();
        let offset = y as usize * self.stride + x as usize * bpp;
        let [mut r, mut g, mut b, a] = self.layout.decode(&self.data[offset..offset + bpp]);

        if self.premultiplied && self.layout.has_alpha() && a != 0 {
            r = unpremultiply(r, a);
            g = unpremultiply(g, a);
            b = unpremultiply(b, a);
        }
        Color::from_rgba8(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layout_decodes_the_same_pixel() {
        // r=10, g=20, b=30, a=40
        let cases: [(ComponentLayout, &[u8]); 6] = [
            (ComponentLayout::Rgba, &[10, 20, 30, 40]),
            (ComponentLayout::Bgra, &[30, 20, 10, 40]),
            (ComponentLayout::Argb, &[40, 10, 20, 30]),
            (ComponentLayout::Abgr, &[40, 30, 20, 10]),
            (ComponentLayout::Rgb, &[10, 20, 30]),
            (ComponentLayout::Bgr, &[30, 20, 10]),
        ];
        for (layout, bytes) in cases {
            let raster = RasterBuffer::new(bytes, 1, 1, layout).unwrap();
            let [r, g, b, a] = raster.pixel_at(0, 0).to_rgba8();
            assert_eq!([r, g, b], [10, 20, 30], "{layout:?}");
            let expected_alpha = if layout.has_alpha() { 40 } else { 255 };
            assert_eq!(a, expected_alpha, "{layout:?}");
        }
    }

    #[test]
    fn test_gray_layouts() {
        let gray = RasterBuffer::new(&[77], 1, 1, ComponentLayout::Gray).unwrap();
        assert_eq!(gray.pixel_at(0, 0).to_rgba8(), [77, 77, 77, 255]);

        let gray_alpha = RasterBuffer::new(&[77, 9], 1, 1, ComponentLayout::GrayAlpha).unwrap();
        assert_eq!(gray_alpha.pixel_at(0, 0).to_rgba8(), [77, 77, 77, 9]);
    }

    #[test]
    fn test_premultiplied_alpha() {
        // 50% red stored premultiplied
        let bytes = [128, 0, 0, 128];
        let raster = RasterBuffer::new(&bytes, 1, 1, ComponentLayout::Rgba)
            .unwrap()
            .premultiplied(true);
        assert_eq!(raster.pixel_at(0, 0).to_rgba8(), [255, 0, 0, 128]);

        // Zero alpha keeps chroma
        let bytes = [12, 34, 56, 0];
        let raster = RasterBuffer::new(&bytes, 1, 1, ComponentLayout::Rgba)
            .unwrap()
            .premultiplied(true);
        assert_eq!(raster.pixel_at(0, 0).to_rgba8(), [12, 34, 56, 0]);
    }

    #[test]
    fn test_stride_padding() {
        // 1x2 RGB with two padding bytes per row
        let bytes = [1, 2, 3, 0, 0, 4, 5, 6];
        let raster = RasterBuffer::with_stride(&bytes, 1, 2, 5, ComponentLayout::Rgb).unwrap();
        assert_eq!(raster.pixel_at(0, 1).to_rgba8(), [4, 5, 6, 255]);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            RasterBuffer::with_stride(&[0; 16], 2, 2, 4, ComponentLayout::Rgba).unwrap_err(),
            BufferError::StrideTooSmall { stride: 4, min: 8 }
        );
        assert_eq!(
            RasterBuffer::new(&[0; 15], 2, 2, ComponentLayout::Rgba).unwrap_err(),
            BufferError::DataTooShort {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_panics() {
        let raster = RasterBuffer::new(&[0; 4], 1, 1, ComponentLayout::Rgba).unwrap();
        raster.pixel_at(1, 0);
    }
}
