//! PNG screenshots as pixel buffers
//!
//! Decoding always expands palettes and low bit depths and strips 16-bit
//! samples, so every screenshot ends up as 8-bit gray, gray+alpha, RGB or
//! RGBA rows that [`RasterBuffer`] reads directly.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use color_probe::{BufferError, ComponentLayout, PixelBuffer, RasterBuffer, Region, RegionView};

use crate::error::ImageError;

/// A decoded screenshot owning its pixel bytes.
#[derive(Debug, Clone)]
pub struct Screenshot {
    width: u32,
    height: u32,
    stride: usize,
    layout: ComponentLayout,
    data: Vec<u8>,
}

impl Screenshot {
    /// Decode a PNG file.
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        let file = File::open(path)?;
        let shot = Self::decode(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            width = shot.width,
            height = shot.height,
            layout = ?shot.layout,
            "Decoded screenshot"
        );
        Ok(shot)
    }

    /// Decode a PNG stream.
    pub fn decode<R: Read>(reader: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::Unsupported(format!(
                "{:?} bit samples after expansion",
                info.bit_depth
            )));
        }
        let layout = match info.color_type {
            png::ColorType::Rgba => ComponentLayout::Rgba,
            png::ColorType::Rgb => ComponentLayout::Rgb,
            png::ColorType::GrayscaleAlpha => ComponentLayout::GrayAlpha,
            png::ColorType::Grayscale => ComponentLayout::Gray,
            png::ColorType::Indexed => {
                return Err(ImageError::Unsupported(
                    "indexed color was not expanded".to_string(),
                ))
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            stride: info.line_size,
            layout,
            data: buf,
        })
    }

    /// Wrap tightly packed 8-bit rows.
    pub fn from_raw(
        width: u32,
        height: u32,
        layout: ComponentLayout,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let stride = width as usize * layout.bytes_per_pixel();
        // Validate once so raster() cannot fail later
        RasterBuffer::with_stride(&data, width, height, stride, layout)?;
        Ok(Self {
            width,
            height,
            stride,
            layout,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ComponentLayout {
        self.layout
    }

    /// Borrow the pixels as a [`RasterBuffer`]. PNG alpha is straight.
    pub fn raster(&self) -> Result<RasterBuffer<'_>, ImageError> {
        Ok(RasterBuffer::with_stride(
            &self.data,
            self.width,
            self.height,
            self.stride,
            self.layout,
        )?)
    }
}

/// View one element's frame inside a screenshot.
pub fn crop<'a, B: PixelBuffer + ?Sized>(
    buffer: &'a B,
    frame: Region,
) -> Result<RegionView<'a, B>, ImageError> {
    RegionView::new(buffer, frame).map_err(|e| match e {
        BufferError::RegionOutOfBounds {
            x,
            y,
            width,
            height,
            buffer_width,
            buffer_height,
        } => ImageError::RegionOutOfBounds {
            x,
            y,
            width,
            height,
            image_width: buffer_width,
            image_height: buffer_height,
        },
        other => ImageError::Buffer(other),
    })
}
