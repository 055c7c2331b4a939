//! Random-sample color estimation.
//!
//! Used for text labels: a few hundred random pixels are named through a
//! [`ColorCatalog`] and the two most frequent names stand for the text and
//! its background. Anti-aliasing noise spreads across many names while the
//! two real colors dominate.

use serde::{Deserialize, Serialize};

use rand::Rng;

use super::histogram::Histogram;
use crate::buffer::PixelBuffer;
use crate::catalog::ColorCatalog;
use crate::color::Color;

/// Default number of random draws.
pub const DEFAULT_DRAWS: usize = 300;
/// Default number of names reported.
pub const DEFAULT_TOP: usize = 2;

/// Tuning for [`sample_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// Coordinates drawn.
    pub draws: usize,
    /// Names reported, most frequent first.
    pub top: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            draws: DEFAULT_DRAWS,
            top: DEFAULT_TOP,
        }
    }
}

/// One named color found by sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    /// Catalog name of the color.
    pub name: String,
    /// First pixel sampled under this name.
    pub color: Color,
    /// Draws that landed on this name.
    pub count: usize,
}

struct Pending<'a, B: ?Sized, R> {
    buffer: &'a B,
    catalog: &'a ColorCatalog,
    options: SampleOptions,
    rng: R,
}

impl<B: PixelBuffer + ?Sized, R: Rng> Pending<'_, B, R> {
    fn run(mut self) -> Vec<ColorSample> {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        if width < 3 || height < 3 {
            tracing::debug!(width, height, "Region too small to sample");
            return Vec::new();
        }

        let mut histogram: Histogram<String> = Histogram::new();
        let mut first_color: Vec<Color> = Vec::new();
        let mut skipped = 0usize;

        for _ in 0..self.options.draws {
            // Stay off the one-pixel border
            let x = self.rng.gen_range(1..width - 1);
            let y = self.rng.gen_range(1..height - 1);
            let color = self.buffer.pixel_at(x, y);
            if color.is_clear() {
                skipped += 1;
                continue;
            }

            let name = self.catalog.name_of(color);
            let seen = histogram.len();
            histogram.add(name, 1);
            if histogram.len() > seen {
                first_color.push(color);
            }
        }

        // Pair each bin with its first color before sorting reorders them
        let mut bins: Vec<ColorSample> = histogram
            .iter()
            .zip(&first_color)
            .map(|((name, count), &color)| ColorSample {
                name: name.clone(),
                color,
                count: *count,
            })
            .collect();
        bins.sort_by(|a, b| b.count.cmp(&a.count));
        bins.truncate(self.options.top);

        tracing::debug!(
            draws = self.options.draws,
            skipped,
            names = first_color.len(),
            top = ?bins.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "Sampled region"
        );
        bins
    }
}

/// Lazily sampled [`ColorSample`]s, most frequent first.
///
/// Nothing is drawn until the first call to `next()`. The sequence is
/// finite and cannot be restarted.
pub struct ColorSamples<'a, B: ?Sized, R> {
    pending: Option<Pending<'a, B, R>>,
    results: std::vec::IntoIter<ColorSample>,
}

impl<B: PixelBuffer + ?Sized, R: Rng> Iterator for ColorSamples<'_, B, R> {
    type Item = ColorSample;

    fn next(&mut self) -> Option<ColorSample> {
        if let Some(pending) = self.pending.take() {
            self.results = pending.run().into_iter();
        }
        self.results.next()
    }
}

/// Estimate the dominant named colors of a region by random sampling.
///
/// Draws `options.draws` coordinates uniformly from the interior of the
/// buffer (a one-pixel border is never sampled), names each pixel with
/// `catalog`, and yields the `options.top` most frequent names. Fully
/// transparent pixels are drawn but not counted. Buffers narrower or
/// shorter than 3 pixels have no interior and yield nothing.
///
/// # Example
///
/// ```
/// use color_probe::{sample_colors, Color, ColorCatalog, ColorGrid, SampleOptions};
///
/// let grid = ColorGrid::filled(5, 5, Color::from_u8(255, 0, 0));
/// let samples: Vec<_> = sample_colors(
///     &grid,
///     ColorCatalog::web(),
///     SampleOptions::default(),
///     rand::thread_rng(),
/// )
/// .collect();
///
/// assert_eq!(samples.len(), 1);
/// assert_eq!(samples[0].name, "red");
/// assert_eq!(samples[0].count, 300);
/// ```
pub fn sample_colors<'a, B, R>(
    buffer: &'a B,
    catalog: &'a ColorCatalog,
    options: SampleOptions,
    rng: R,
) -> ColorSamples<'a, B, R>
where
    B: PixelBuffer + ?Sized,
    R: Rng,
{
    ColorSamples {
        pending: Some(Pending {
            buffer,
            catalog,
            options,
            rng,
        }),
        results: Vec::new().into_iter(),
    }
}
