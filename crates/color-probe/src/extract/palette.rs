//! Histogram-based four-color palette.
//!
//! Used for buttons and other solid shapes: the most frequent color is the
//! background and up to three colors that stand out against it are the
//! foreground slots (primary, secondary, detail).
//!
//! The steps, on 8-bit colors:
//!
//! 1. Count every pixel with alpha ≥ 127. Colors seen no more than
//!    `floor(height × 0.01)` times are noise.
//! 2. The most frequent color is the background. A near-black or near-white
//!    background yields to the first runner-up that is neither, as long as
//!    runner-ups keep more than 30% of the leader's count.
//! 3. Every counted color gets its saturation raised to at least 0.15 and is
//!    kept if its darkness is the opposite of the background's.
//! 4. Candidates fill the slots in order of frequency, each one passing the
//!    [`ContrastGate`] against the background and, optionally, being
//!    distinct from the slots already filled.

use serde::{Deserialize, Serialize};

use super::histogram::Histogram;
use crate::buffer::{downscale, PixelBuffer, Quality};
use crate::color::{Color, Rgb8};
use crate::contrast::ContrastPolicy;

/// Minimum alpha byte for a pixel to be counted.
pub const OPAQUE_ALPHA_MIN: u8 = 127;
/// Noise floor as a fraction of the region height.
pub const NOISE_FLOOR_FRACTION: f64 = 0.01;
/// Share of the leader's count a runner-up needs to replace a near-black or
/// near-white background.
pub const BACKGROUND_PROMOTION_RATIO: f64 = 0.3;
/// Saturation floor applied to foreground candidates.
pub const MIN_TEXT_SATURATION: f64 = 0.15;

/// Contrast test a foreground candidate must pass against the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContrastGate {
    /// WCAG contrast ratio under a [`ContrastPolicy`].
    Wcag(ContrastPolicy),
    /// Ratio of Rec. 709 lumas (offset by 12.75) above 1.6.
    LumaRatio,
}

impl ContrastGate {
    pub fn passes(self, background: Rgb8, candidate: Rgb8) -> bool {
        match self {
            ContrastGate::Wcag(policy) => policy.passes(background.to_color(), candidate.to_color()),
            ContrastGate::LumaRatio => background.is_luma_contrasting(candidate),
        }
    }
}

impl Default for ContrastGate {
    fn default() -> Self {
        ContrastGate::Wcag(ContrastPolicy::Lenient)
    }
}

/// Tuning for [`extract_palette`] and [`extract_palette_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOptions {
    pub gate: ContrastGate,
    /// Require secondary and detail to be distinct from earlier slots.
    pub distinct: bool,
    /// Downscale applied before counting.
    pub quality: Quality,
}

impl PaletteOptions {
    /// Lenient WCAG gate with distinct slots. Used by [`extract_palette`].
    pub fn four_slot() -> Self {
        Self {
            gate: ContrastGate::Wcag(ContrastPolicy::Lenient),
            distinct: true,
            quality: Quality::Highest,
        }
    }

    /// Lenient WCAG gate without the distinctness check. Used by
    /// [`extract_palette_array`].
    pub fn summary() -> Self {
        Self {
            distinct: false,
            ..Self::four_slot()
        }
    }

    pub fn with_gate(self, gate: ContrastGate) -> Self {
        Self { gate, ..self }
    }

    pub fn with_quality(self, quality: Quality) -> Self {
        Self { quality, ..self }
    }
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self::four_slot()
    }
}

/// Background plus three foreground slots.
///
/// Slots that no candidate filled hold white on a dark background and black
/// otherwise; [`found`](Self::found) tells them apart from real finds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaletteResult {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub detail: Color,
    /// Whether primary, secondary and detail came from the image.
    pub found: [bool; 3],
}

impl PaletteResult {
    /// Foreground slots in order.
    pub fn slots(&self) -> [Color; 3] {
        [self.primary, self.secondary, self.detail]
    }

    /// The background followed by the slots that were actually found.
    pub fn found_colors(&self) -> Vec<Color> {
        let mut colors = vec![self.background];
        colors.extend(
            self.slots()
                .into_iter()
                .zip(self.found)
                .filter_map(|(color, found)| found.then_some(color)),
        );
        colors
    }
}

/// Count opaque pixels, column by column.
fn count_colors<B: PixelBuffer + ?Sized>(buffer: &B) -> Histogram<Rgb8> {
    let mut histogram = Histogram::new();
    for x in 0..buffer.width() {
        for y in 0..buffer.height() {
            let [r, g, b, a] = buffer.pixel_at(x, y).to_rgba8();
            if a >= OPAQUE_ALPHA_MIN {
                histogram.add(Rgb8::new(r, g, b), 1);
            }
        }
    }
    histogram
}

fn pick_background(sorted: &[(Rgb8, usize)]) -> Rgb8 {
    let Some(&(leader, leader_count)) = sorted.first() else {
        return Rgb8::BLACK;
    };
    if !leader.is_black_or_white() {
        return leader;
    }

    for &(candidate, count) in &sorted[1..] {
        if count as f64 / leader_count as f64 <= BACKGROUND_PROMOTION_RATIO {
            break;
        }
        if !candidate.is_black_or_white() {
            return candidate;
        }
    }
    leader
}

fn fill_slots(
    background: Rgb8,
    candidates: &[(Rgb8, usize)],
    options: &PaletteOptions,
) -> [Option<Rgb8>; 3] {
    let mut slots: [Option<Rgb8>; 3] = [None; 3];
    let mut filled = 0;

    for &(candidate, _) in candidates {
        if filled == slots.len() {
            break;
        }
        if !options.gate.passes(background, candidate) {
            continue;
        }
        if options.distinct
            && !slots[..filled]
                .iter()
                .flatten()
                .all(|&chosen| chosen.is_distinct(candidate))
        {
            continue;
        }
        slots[filled] = Some(candidate);
        filled += 1;
    }
    slots
}

fn build_palette<B: PixelBuffer + ?Sized>(buffer: &B, options: &PaletteOptions) -> PaletteResult {
    let scaled;
    let (histogram, height) = match options.quality {
        Quality::Highest => (count_colors(buffer), buffer.height()),
        quality => {
            scaled = downscale(buffer, quality);
            (count_colors(&scaled), scaled.height())
        }
    };

    let noise_floor = (height as f64 * NOISE_FLOOR_FRACTION) as usize;
    let sorted: Vec<(Rgb8, usize)> = histogram
        .clone()
        .into_sorted()
        .into_iter()
        .filter(|&(_, count)| count > noise_floor)
        .collect();

    let background = pick_background(&sorted);
    let want_dark = !background.is_dark();

    let mut text = Histogram::new();
    for &(color, count) in histogram.iter() {
        let boosted = color.with_min_saturation(MIN_TEXT_SATURATION);
        if boosted.is_dark() == want_dark {
            text.add(boosted, count);
        }
    }
    let candidates = text.into_sorted();

    let slots = fill_slots(background, &candidates, options);
    let fallback = if background.is_dark() {
        Color::WHITE
    } else {
        Color::BLACK
    };
    let color_of = |slot: Option<Rgb8>| slot.map_or(fallback, Rgb8::to_color);

    tracing::debug!(
        colors = histogram.len(),
        kept = sorted.len(),
        noise_floor,
        background = %background.to_color(),
        candidates = candidates.len(),
        found = slots.iter().flatten().count(),
        "Extracted palette"
    );

    PaletteResult {
        background: background.to_color(),
        primary: color_of(slots[0]),
        secondary: color_of(slots[1]),
        detail: color_of(slots[2]),
        found: slots.map(|s| s.is_some()),
    }
}

/// Background, primary, secondary and detail colors of a region, using
/// [`PaletteOptions::four_slot`].
///
/// Always returns four colors; see [`PaletteResult::found`].
///
/// # Example
///
/// ```
/// use color_probe::{extract_palette, Color, ColorGrid};
///
/// let navy = Color::from_u8(0, 0, 139);
/// let yellow = Color::from_u8(255, 255, 0);
/// let grid = ColorGrid::from_fn(10, 10, |x, _| if x < 8 { navy } else { yellow });
///
/// let palette = extract_palette(&grid);
/// assert_eq!(palette.background, navy);
/// assert_eq!(palette.primary.to_rgba8()[2], 0);
/// ```
pub fn extract_palette<B: PixelBuffer + ?Sized>(buffer: &B) -> PaletteResult {
    extract_palette_with(buffer, &PaletteOptions::four_slot())
}

/// [`extract_palette`] with explicit options.
pub fn extract_palette_with<B: PixelBuffer + ?Sized>(
    buffer: &B,
    options: &PaletteOptions,
) -> PaletteResult {
    build_palette(buffer, options)
}

/// The background followed by only the foreground colors actually found,
/// using [`PaletteOptions::summary`].
pub fn extract_palette_array<B: PixelBuffer + ?Sized>(buffer: &B) -> Vec<Color> {
    extract_palette_array_with(buffer, &PaletteOptions::summary())
}

/// [`extract_palette_array`] with explicit options.
pub fn extract_palette_array_with<B: PixelBuffer + ?Sized>(
    buffer: &B,
    options: &PaletteOptions,
) -> Vec<Color> {
    build_palette(buffer, options).found_colors()
}
