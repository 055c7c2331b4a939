//! CIE XYZ tristimulus values (D65, 0..=100 scale)

use super::rgba::Color;

/// D65 / 2° reference white used for the XYZ -> Lab step.
pub const D65_WHITE: Xyz = Xyz {
    x: 95.047,
    y: 100.0,
    z: 108.883,
};

/// A color in CIE XYZ, scaled so that the reference white has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Gamma-expand one sRGB channel and scale it to 0..=100.
#[inline]
fn expand(c: f64) -> f64 {
    let linear = if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    };
    linear * 100.0
}

impl From<Color> for Xyz {
    /// sRGB -> XYZ. Alpha is ignored.
    fn from(color: Color) -> Self {
        let r = expand(color.r);
        let g = expand(color.g);
        let b = expand(color.b);

        Xyz {
            x: r * 0.4124 + g * 0.3576 + b * 0.1805,
            y: r * 0.2126 + g * 0.7152 + b * 0.0722,
            z: r * 0.0193 + g * 0.1192 + b * 0.9505,
        }
    }
}
