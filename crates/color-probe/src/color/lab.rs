//! CIE L*a*b* color space
//!
//! Lab is the working space of the perceptual distance metrics in
//! [`crate::distance`]. It is derived from [`Xyz`] against the D65 white.

use super::rgba::Color;
use super::xyz::{Xyz, D65_WHITE};

/// A color in CIE L*a*b*.
///
/// - `l`: lightness, 0.0 (black) to 100.0 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma: distance from the neutral axis.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, 0.0..360.0. Neutral colors report 0.0.
    pub fn hue_degrees(self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        let h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    }
}

/// Cube root above the 0.008856 knee, linear segment below it.
#[inline]
fn f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = f(xyz.x / D65_WHITE.x);
        let fy = f(xyz.y / D65_WHITE.y);
        let fz = f(xyz.z / D65_WHITE.z);

        Lab {
            l: (116.0 * fy - 16.0).clamp(0.0, 100.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Color> for Lab {
    fn from(color: Color) -> Self {
        Lab::from(Xyz::from(color))
    }
}
