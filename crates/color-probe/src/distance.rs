//! Color distance metrics
//!
//! Three metrics share the [`ColorDistance`] trait:
//!
//! - [`ChannelWeighted`]: squared RGB differences weighted by Rec. 601 luma
//!   coefficients. Cheap, and good enough to pick between a dozen well
//!   separated reference colors.
//! - [`Cie94`]: the 1994 CIE formula on Lab, graphic-arts weights.
//! - [`Ciede2000`]: the full CIEDE2000 formula (Sharma, Wu & Dalal 2004).
//!
//! All metrics are total, non-negative, symmetric, and zero for identical
//! colors. [`DistanceMetric`] picks one by name at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Lab};
use crate::error::ParseMetricError;

/// A distance between two colors.
pub trait ColorDistance {
    fn distance(&self, a: Color, b: Color) -> f64;
}

/// `0.299·Δr² + 0.587·Δg² + 0.114·Δb²` on normalized channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelWeighted;

impl ColorDistance for ChannelWeighted {
    #[inline]
    fn distance(&self, a: Color, b: Color) -> f64 {
        let dr = a.r - b.r;
        let dg = a.g - b.g;
        let db = a.b - b.b;
        0.299 * dr * dr + 0.587 * dg * dg + 0.114 * db * db
    }
}

/// CIE94 with graphic-arts constants (kL = kC = kH = 1, K1 = 0.045, K2 = 0.015).
///
/// The textbook formula weights chroma by the first color only, which makes
/// it asymmetric. Here the weights use the geometric mean of both chromas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cie94;

impl Cie94 {
    const K1: f64 = 0.045;
    const K2: f64 = 0.015;

    pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
        let c1 = lab1.chroma();
        let c2 = lab2.chroma();
        let c = (c1 * c2).sqrt();

        let dl = lab1.l - lab2.l;
        let dc = c1 - c2;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        // Rounding can push ΔH² slightly below zero
        let dh_sq = (da * da + db * db - dc * dc).max(0.0);

        let sc = 1.0 + Self::K1 * c;
        let sh = 1.0 + Self::K2 * c;

        // kL = kC = kH = 1
        let sum: f64 = [dl * dl, (dc / sc).powi(2), dh_sq / (sh * sh)]
            .into_iter()
            .map(|term| if term.is_nan() { 0.0 } else { term })
            .sum();
        sum.sqrt()
    }
}

impl ColorDistance for Cie94 {
    fn distance(&self, a: Color, b: Color) -> f64 {
        Self::delta_e(Lab::from(a), Lab::from(b))
    }
}

/// CIEDE2000 color difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ciede2000;

/// 25^7, the chroma pivot of the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Hue angle in degrees, 0.0..360.0; 0.0 when both coordinates are zero.
#[inline]
fn hue_deg(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

#[inline]
fn cos_deg(d: f64) -> f64 {
    d.to_radians().cos()
}

impl Ciede2000 {
    pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
        let c_bar = (lab1.chroma() + lab2.chroma()) / 2.0;
        let c_bar7 = c_bar.powi(7);
        let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

        let a1p = (1.0 + g) * lab1.a;
        let a2p = (1.0 + g) * lab2.a;
        let c1p = a1p.hypot(lab1.b);
        let c2p = a2p.hypot(lab2.b);
        let h1p = hue_deg(a1p, lab1.b);
        let h2p = hue_deg(a2p, lab2.b);
        let chroma_product = c1p * c2p;

        let dl = lab2.l - lab1.l;
        let dc = c2p - c1p;
        let dh = if chroma_product == 0.0 {
            0.0
        } else {
            let d = h2p - h1p;
            if d > 180.0 {
                d - 360.0
            } else if d < -180.0 {
                d + 360.0
            } else {
                d
            }
        };
        let dh_big = 2.0 * chroma_product.sqrt() * (dh.to_radians() / 2.0).sin();

        let l_bar = (lab1.l + lab2.l) / 2.0;
        let cp_bar = (c1p + c2p) / 2.0;
        let hp_bar = if chroma_product == 0.0 {
            h1p + h2p
        } else if (h1p - h2p).abs() <= 180.0 {
            (h1p + h2p) / 2.0
        } else if h1p + h2p < 360.0 {
            (h1p + h2p + 360.0) / 2.0
        } else {
            (h1p + h2p - 360.0) / 2.0
        };

        let t = 1.0 - 0.17 * cos_deg(hp_bar - 30.0)
            + 0.24 * cos_deg(2.0 * hp_bar)
            + 0.32 * cos_deg(3.0 * hp_bar + 6.0)
            - 0.20 * cos_deg(4.0 * hp_bar - 63.0);

        let d_theta = 30.0 * (-((hp_bar - 275.0) / 25.0).powi(2)).exp();
        let cp_bar7 = cp_bar.powi(7);
        let rc = 2.0 * (cp_bar7 / (cp_bar7 + POW25_7)).sqrt();
        let l50 = (l_bar - 50.0).powi(2);
        let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
        let sc = 1.0 + 0.045 * cp_bar;
        let sh = 1.0 + 0.015 * cp_bar * t;
        let rt = -(2.0 * d_theta).to_radians().sin() * rc;

        let l_term = dl / sl;
        let c_term = dc / sc;
        let h_term = dh_big / sh;

        (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
            .max(0.0)
            .sqrt()
    }
}

impl ColorDistance for Ciede2000 {
    fn distance(&self, a: Color, b: Color) -> f64 {
        Self::delta_e(Lab::from(a), Lab::from(b))
    }
}

/// Runtime selection of a distance metric.
///
/// Parses from and displays as `weighted`, `cie94` or `ciede2000`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Weighted,
    Cie94,
    Ciede2000,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 3] = [
        DistanceMetric::Weighted,
        DistanceMetric::Cie94,
        DistanceMetric::Ciede2000,
    ];
}

impl ColorDistance for DistanceMetric {
    fn distance(&self, a: Color, b: Color) -> f64 {
        match self {
            DistanceMetric::Weighted => ChannelWeighted.distance(a, b),
            DistanceMetric::Cie94 => Cie94.distance(a, b),
            DistanceMetric::Ciede2000 => Ciede2000.distance(a, b),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            DistanceMetric::Weighted => "weighted",
            DistanceMetric::Cie94 => "cie94",
            DistanceMetric::Ciede2000 => "ciede2000",
        })
    }
}

impl FromStr for DistanceMetric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(DistanceMetric::Weighted),
            "cie94" => Ok(DistanceMetric::Cie94),
            "ciede2000" => Ok(DistanceMetric::Ciede2000),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}
