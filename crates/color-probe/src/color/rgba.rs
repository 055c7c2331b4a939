//! RGBA color value
//!
//! [`Color`] is the single value type every other module consumes. Channels
//! are gamma-encoded sRGB, normalized to 0.0..=1.0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseColorError;

/// A color in sRGB with straight (non-premultiplied) alpha.
///
/// Every constructor clamps the channels into 0.0..=1.0, so a `Color` in
/// hand always satisfies that range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (gamma-encoded, 0.0..=1.0)
    pub r: f64,
    /// Green channel (gamma-encoded, 0.0..=1.0)
    pub g: f64,
    /// Blue channel (gamma-encoded, 0.0..=1.0)
    pub b: f64,
    /// Opacity (0.0 = fully transparent, 1.0 = opaque)
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const CLEAR: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create a color from normalized channels, clamping each to 0.0..=1.0.
    ///
    /// NaN channels collapse to 0.0.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    /// Create an opaque color from normalized channels.
    #[inline]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    ///
    /// # Example
    /// ```
    /// use color_probe::Color;
    /// let red = Color::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.a, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels including alpha.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Create a color from channels given either in 0..=1 or in 0..=255.
    ///
    /// If any of the RGB channels is above 1.0 all three are treated as
    /// 0..=255 values. Alpha is always normalized.
    ///
    /// # Example
    /// ```
    /// use color_probe::Color;
    /// assert_eq!(Color::from_scaled(255.0, 0.0, 0.0, 1.0), Color::rgb(1.0, 0.0, 0.0));
    /// assert_eq!(Color::from_scaled(1.0, 0.0, 0.0, 1.0), Color::rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn from_scaled(r: f64, g: f64, b: f64, a: f64) -> Self {
        if r > 1.0 || g > 1.0 || b > 1.0 {
            Self::new(r / 255.0, g / 255.0, b / 255.0, a)
        } else {
            Self::new(r, g, b, a)
        }
    }

    /// Convert to 8-bit `[r, g, b, a]`, rounding each channel.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            to_byte(self.a),
        ]
    }

    /// The same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: unit(a), ..self }
    }

    /// True when the alpha channel rounds to 255.
    #[inline]
    pub fn is_opaque(self) -> bool {
        to_byte(self.a) == 255
    }

    /// True when the alpha channel rounds to 0.
    #[inline]
    pub fn is_clear(self) -> bool {
        to_byte(self.a) == 0
    }

    /// Rec. 601 luma on the gamma-encoded channels.
    #[inline]
    pub fn luma(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn full_contrast_color(self) -> Color {
        if self.luma() > 0.5 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// All channels below 0.09 or all above 0.91.
    pub fn is_black_or_white(self) -> bool {
        let black = self.r < 0.09 && self.g < 0.09 && self.b < 0.09;
        let white = self.r > 0.91 && self.g > 0.91 && self.b > 0.91;
        black || white
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[inline]
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    /// `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// The leading `#` is optional, parsing is case-insensitive and
    /// surrounding whitespace is ignored.
    ///
    /// ```
    /// use color_probe::Color;
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::from_u8(255, 0, 0));
    ///
    /// let half: Color = "00000080".parse().unwrap();
    /// assert!(half.a < 1.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let digits = s
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ParseColorError::InvalidHex(c)))
            .collect::<Result<Vec<u8>, _>>();

        match s.chars().count() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let d = digits?;
                Ok(Self::from_u8(d[0] * 17, d[1] * 17, d[2] * 17))
            }
            6 => {
                let [r, g, b] = pair_bytes::<3>(&digits?);
                Ok(Self::from_u8(r, g, b))
            }
            8 => {
                let [r, g, b, a] = pair_bytes::<4>(&digits?);
                Ok(Self::from_rgba8(r, g, b, a))
            }
            n => Err(ParseColorError::InvalidLength(n)),
        }
    }
}

/// Combine validated hex digits two at a time into bytes.
fn pair_bytes<const N: usize>(digits: &[u8]) -> [u8; N] {
    std::array::from_fn(|i| (digits[2 * i] << 4) | digits[2 * i + 1])
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_clamp() {
        let c = Color::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);

        let nan = Color::new(f64::NAN, 0.0, 0.0, 1.0);
        assert_eq!(nan.r, 0.0);
    }

    #[test]
    fn test_from_scaled_detects_byte_range() {
        let bytes = Color::from_scaled(128.0, 64.0, 0.0, 0.5);
        assert!((bytes.r - 128.0 / 255.0).abs() < 1e-12);
        assert!((bytes.g - 64.0 / 255.0).abs() < 1e-12);
        assert_eq!(bytes.a, 0.5);

        let unit = Color::from_scaled(0.5, 0.25, 1.0, 1.0);
        assert_eq!(unit, Color::rgb(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_rgba8_round_trip() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let c = Color::from_rgba8(v, v, v, v);
            assert_eq!(c.to_rgba8(), [v, v, v, v]);
        }
    }

    #[test]
    fn test_hex_parsing() {
        let white: Color = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Color::WHITE);

        let short: Color = "#abc".parse().unwrap();
        assert_eq!(short, Color::from_u8(0xAA, 0xBB, 0xCC));

        let padded: Color = "  00ff00 ".parse().unwrap();
        assert_eq!(padded, Color::from_u8(0, 255, 0));

        let translucent: Color = "#FF000080".parse().unwrap();
        assert_eq!(translucent.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Color>(),
            Err(ParseColorError::InvalidHex('G'))
        ));
        // Signs are not hex digits
        assert_eq!(
            "#+10000".parse::<Color>(),
            Err(ParseColorError::InvalidHex('+'))
        );
        assert_eq!(
            "-FF".parse::<Color>(),
            Err(ParseColorError::InvalidHex('-'))
        );
        assert!(matches!(
            "#FFFF".parse::<Color>(),
            Err(ParseColorError::InvalidLength(4))
        ));
        assert!(matches!(
            "".parse::<Color>(),
            Err(ParseColorError::InvalidLength(0))
        ));
        assert!(matches!(
            "#ééé".parse::<Color>(),
            Err(ParseColorError::InvalidHex('é'))
        ));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::from_u8(255, 128, 0).to_string(), "#FF8000");
        assert_eq!(Color::from_rgba8(0, 0, 0, 0).to_string(), "#00000000");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::from_u8(0x12, 0x34, 0x56)).unwrap();
        assert_eq!(json, "\"#123456\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_u8(0x12, 0x34, 0x56));

        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_full_contrast_color() {
        assert_eq!(Color::WHITE.full_contrast_color(), Color::BLACK);
        assert_eq!(Color::BLACK.full_contrast_color(), Color::WHITE);
        assert_eq!(Color::from_u8(255, 255, 0).full_contrast_color(), Color::BLACK);
        assert_eq!(Color::from_u8(0, 0, 128).full_contrast_color(), Color::WHITE);
    }

    #[test]
    fn test_is_black_or_white() {
        assert!(Color::BLACK.is_black_or_white());
        assert!(Color::WHITE.is_black_or_white());
        assert!(Color::from_u8(20, 20, 20).is_black_or_white());
        assert!(!Color::from_u8(128, 128, 128).is_black_or_white());
        assert!(!Color::from_u8(255, 255, 0).is_black_or_white());
    }
}
