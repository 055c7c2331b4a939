//! 8-bit opaque color used as a histogram key
//!
//! The palette extractor counts pixels per exact 8-bit color and judges
//! candidates with a handful of tuned predicates on the 0..=255 scale. Those
//! predicates live here so the thresholds stay next to the arithmetic they
//! parameterize.

use super::rgba::Color;

/// Channels below this on all three axes count as near-black.
pub const NEAR_BLACK_MAX: u8 = 23;
/// Channels above this on all three axes count as near-white.
pub const NEAR_WHITE_MIN: u8 = 232;
/// Composite luma midpoint separating dark from light colors.
pub const DARK_LUMA_MIDPOINT: f64 = 127.5;
/// Minimum single-channel difference for two colors to be distinct.
pub const DISTINCT_CHANNEL_DELTA: f64 = 63.75;
/// Maximum channel spread of a color treated as gray.
pub const GRAY_SPREAD: f64 = 7.65;
/// Offset added to both lumas before taking the luma ratio.
pub const LUMA_RATIO_OFFSET: f64 = 12.75;
/// Luma ratio a pair must exceed to count as contrasting.
pub const LUMA_RATIO_MIN: f64 = 1.6;

/// An opaque color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb8 = Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize a [`Color`], dropping alpha.
    #[inline]
    pub fn from_color(color: Color) -> Self {
        let [r, g, b, _] = color.to_rgba8();
        Self { r, g, b }
    }

    #[inline]
    pub fn to_color(self) -> Color {
        Color::from_u8(self.r, self.g, self.b)
    }

    #[inline]
    fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Rec. 709 weighted luma on the 0..=255 scale.
    #[inline]
    pub fn luma(self) -> f64 {
        let [r, g, b] = self.channels();
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Luma below [`DARK_LUMA_MIDPOINT`].
    #[inline]
    pub fn is_dark(self) -> bool {
        self.luma() < DARK_LUMA_MIDPOINT
    }

    /// All channels below 23 or all above 232.
    pub fn is_black_or_white(self) -> bool {
        let black = self.r < NEAR_BLACK_MAX && self.g < NEAR_BLACK_MAX && self.b < NEAR_BLACK_MAX;
        let white = self.r > NEAR_WHITE_MIN && self.g > NEAR_WHITE_MIN && self.b > NEAR_WHITE_MIN;
        black || white
    }

    /// Spread between red and the other two channels stays under [`GRAY_SPREAD`].
    fn is_near_gray(self) -> bool {
        let [r, g, b] = self.channels();
        (r - g).abs() < GRAY_SPREAD && (r - b).abs() < GRAY_SPREAD
    }

    /// Some channel differs by more than 63.75 and the pair is not two grays.
    ///
    /// ```
    /// use color_probe::Rgb8;
    ///
    /// assert!(Rgb8::new(255, 0, 0).is_distinct(Rgb8::new(0, 0, 255)));
    /// // Two grays never count as distinct, however far apart
    /// assert!(!Rgb8::new(30, 30, 30).is_distinct(Rgb8::new(200, 200, 200)));
    /// ```
    pub fn is_distinct(self, other: Rgb8) -> bool {
        let [r, g, b] = self.channels();
        let [or, og, ob] = other.channels();
        let far = (r - or).abs() > DISTINCT_CHANNEL_DELTA
            || (g - og).abs() > DISTINCT_CHANNEL_DELTA
            || (b - ob).abs() > DISTINCT_CHANNEL_DELTA;
        far && !(self.is_near_gray() && other.is_near_gray())
    }

    /// Ratio of offset lumas, brighter over darker, above [`LUMA_RATIO_MIN`].
    pub fn is_luma_contrasting(self, other: Rgb8) -> bool {
        let a = self.luma() + LUMA_RATIO_OFFSET;
        let b = other.luma() + LUMA_RATIO_OFFSET;
        a.max(b) / a.min(b) > LUMA_RATIO_MIN
    }

    /// Raise HSV saturation to at least `min_saturation`, keeping hue and value.
    ///
    /// Colors already at or above the floor come back unchanged. Grays have
    /// no hue and are pushed towards red.
    pub fn with_min_saturation(self, min_saturation: f64) -> Rgb8 {
        let [r, g, b] = self.channels().map(|c| c / 255.0);
        let max = r.max(g).max(b);
        let chroma = max - r.min(g).min(b);
        let value = max;
        let saturation = if value == 0.0 { 0.0 } else { chroma / value };

        if min_saturation <= saturation {
            return self;
        }

        // Hue in sextants, 0.0..6.0
        let mut hue = if chroma == 0.0 {
            0.0
        } else if r == max {
            ((g - b) / chroma) % 6.0
        } else if g == max {
            2.0 + (b - r) / chroma
        } else {
            4.0 + (r - g) / chroma
        };
        if hue < 0.0 {
            hue += 6.0
        }

        let chroma = value * min_saturation;
        let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
        let (r, g, b) = match hue {
            h if h <= 1.0 => (chroma, x, 0.0),
            h if h <= 2.0 => (x, chroma, 0.0),
            h if h <= 3.0 => (0.0, chroma, x),
            h if h <= 4.0 => (0.0, x, chroma),
            h if h <= 5.0 => (x, 0.0, chroma),
            h if h < 6.0 => (chroma, 0.0, x),
            _ => (0.0, 0.0, 0.0),
        };

        let m = value - chroma;
        Rgb8 {
            r: floor_byte(r + m),
            g: floor_byte(g + m),
            b: floor_byte(b + m),
        }
    }
}

/// Truncate a 0..=1 channel to a byte.
#[inline]
fn floor_byte(v: f64) -> u8 {
    (v * 255.0).floor().clamp(0.0, 255.0) as u8
}

impl From<Color> for Rgb8 {
    fn from(color: Color) -> Self {
        Rgb8::from_color(color)
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        rgb.to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dark() {
        assert!(Rgb8::BLACK.is_dark());
        assert!(!Rgb8::WHITE.is_dark());
        assert!(Rgb8::new(0, 0, 255).is_dark());
        assert!(!Rgb8::new(255, 255, 0).is_dark());
    }

    #[test]
    fn test_black_or_white_bounds() {
        assert!(Rgb8::new(22, 22, 22).is_black_or_white());
        assert!(!Rgb8::new(23, 0, 0).is_black_or_white());
        assert!(Rgb8::new(233, 233, 233).is_black_or_white());
        assert!(!Rgb8::new(232, 255, 255).is_black_or_white());
    }

    #[test]
    fn test_is_distinct() {
        let red = Rgb8::new(255, 0, 0);
        let orange = Rgb8::new(255, 40, 0);
        assert!(!red.is_distinct(orange), "within 63.75 on every channel");
        assert!(red.is_distinct(Rgb8::new(255, 200, 0)));

        // Gray vs colored is fine, gray vs gray is not
        assert!(Rgb8::new(128, 128, 128).is_distinct(Rgb8::new(0, 0, 255)));
        assert!(!Rgb8::BLACK.is_distinct(Rgb8::WHITE));
    }

    #[test]
    fn test_luma_contrast() {
        assert!(Rgb8::BLACK.is_luma_contrasting(Rgb8::WHITE));
        assert!(Rgb8::WHITE.is_luma_contrasting(Rgb8::BLACK));
        assert!(!Rgb8::new(100, 100, 100).is_luma_contrasting(Rgb8::new(110, 110, 110)));
    }

    #[test]
    fn test_saturated_colors_unchanged() {
        let red = Rgb8::new(255, 0, 0);
        assert_eq!(red.with_min_saturation(0.15), red);

        let teal = Rgb8::new(0, 128, 128);
        assert_eq!(teal.with_min_saturation(0.15), teal);
    }

    #[test]
    fn test_saturation_floor_on_extremes() {
        assert_eq!(Rgb8::BLACK.with_min_saturation(0.15), Rgb8::BLACK);

        // White gets a red tint with 15% saturation
        let boosted = Rgb8::WHITE.with_min_saturation(0.15);
        assert_eq!(boosted, Rgb8::new(255, 216, 216));
        assert!(!boosted.is_dark());
    }

    #[test]
    fn test_saturation_floor_keeps_hue() {
        // Desaturated blue stays blue-dominant after the boost
        let dull = Rgb8::new(200, 200, 210);
        let boosted = dull.with_min_saturation(0.15);
        assert!(boosted.b > boosted.r);
        assert!(boosted.b > boosted.g);
        assert_eq!(boosted.b, 210);
    }

    #[test]
    fn test_saturation_floor_truncates() {
        // Float error just below a whole step is not rounded back up
        let cases = [(49, 48), (98, 97), (125, 124), (250, 249)];
        for (gray, red) in cases {
            let boosted = Rgb8::new(gray, gray, gray).with_min_saturation(0.15);
            assert_eq!(boosted.r, red, "gray {gray} -> {boosted:?}");
        }
        assert_eq!(
            Rgb8::new(49, 49, 49).with_min_saturation(0.15),
            Rgb8::new(48, 41, 41)
        );
    }
}
