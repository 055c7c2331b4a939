//! WCAG relative luminance and contrast ratio
//!
//! The contrast ratio of two colors is `(L_max + 0.05) / (L_min + 0.05)` on
//! WCAG relative luminance. It ranges from 1.0 (identical luminance) to
//! 21.0 (black on white) and does not depend on argument order.
//!
//! Two families of thresholds are in use and must not be merged:
//!
//! | Threshold | Value | Used by |
//! |---|---|---|
//! | [`ContrastPolicy::Strict`] | ratio ≥ 7.0 | WCAG AAA check |
//! | [`ContrastPolicy::Standard`] | ratio > 4.5 | WCAG AA check |
//! | [`ContrastPolicy::Lenient`] | ratio > 1.0 | palette contrast gate |
//! | [`LOW_CONTRAST_THRESHOLD`](crate::report::LOW_CONTRAST_THRESHOLD) | ratio < 3.0 | element report flag |

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Pairs at or below this ratio are ignored by [`lowest_contrast_pair`].
pub const MIN_PAIR_RATIO: f64 = 1.2;

#[inline]
fn linearize(c: f64) -> f64 {
    if c < 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance, 0.0 (black) to 1.0 (white). Alpha is ignored.
///
/// ```
/// use color_probe::{relative_luminance, Color};
///
/// assert_eq!(relative_luminance(Color::BLACK), 0.0);
/// assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-12);
/// ```
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio, always ≥ 1.0.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Relative luminance below 0.5.
#[inline]
pub fn is_dark(color: Color) -> bool {
    relative_luminance(color) < 0.5
}

/// Named contrast thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastPolicy {
    /// Ratio of at least 7.0 (WCAG AAA for normal text).
    Strict,
    /// Ratio above 4.5 (WCAG AA for normal text).
    #[default]
    Standard,
    /// Ratio above 1.0: the colors are distinguishable at all.
    Lenient,
}

impl ContrastPolicy {
    /// Whether a measured ratio satisfies this policy.
    pub fn accepts(self, ratio: f64) -> bool {
        match self {
            ContrastPolicy::Strict => 7.0 <= ratio,
            ContrastPolicy::Standard => 4.5 < ratio,
            ContrastPolicy::Lenient => 1.0 < ratio,
        }
    }

    /// Whether two colors satisfy this policy.
    pub fn passes(self, a: Color, b: Color) -> bool {
        self.accepts(contrast_ratio(a, b))
    }
}

/// `Strict` when `strict` is set, `Standard` otherwise.
///
/// ```
/// use color_probe::{is_contrasting, Color};
///
/// assert!(is_contrasting(Color::BLACK, Color::WHITE, true));
/// let gray = Color::rgb(0.5, 0.5, 0.5);
/// assert!(!is_contrasting(gray, gray, false));
/// ```
pub fn is_contrasting(a: Color, b: Color, strict: bool) -> bool {
    let policy = if strict {
        ContrastPolicy::Strict
    } else {
        ContrastPolicy::Standard
    };
    policy.passes(a, b)
}

/// Two colors and the contrast ratio between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastPair {
    pub first: Color,
    pub second: Color,
    pub ratio: f64,
}

impl ContrastPair {
    pub fn new(first: Color, second: Color) -> Self {
        Self {
            first,
            second,
            ratio: contrast_ratio(first, second),
        }
    }
}

/// The pair of different colors with the lowest ratio above [`MIN_PAIR_RATIO`].
///
/// Pairs closer than that are treated as the same color rendered twice
/// (anti-aliasing, compression) rather than as a foreground/background pair.
/// Returns `None` when no pair qualifies. On ties the earliest pair wins.
pub fn lowest_contrast_pair(colors: &[Color]) -> Option<ContrastPair> {
    let mut lowest: Option<ContrastPair> = None;
    for (i, &first) in colors.iter().enumerate() {
        for &second in &colors[i + 1..] {
            if first == second {
                continue;
            }
            let pair = ContrastPair::new(first, second);
            if pair.ratio <= MIN_PAIR_RATIO {
                continue;
            }
            match lowest {
                Some(best) if best.ratio <= pair.ratio => {}
                _ => lowest = Some(pair),
            }
        }
    }
    lowest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_white_ratio() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(Color::WHITE, Color::BLACK), ratio);
    }

    #[test]
    fn test_identical_colors_ratio_one() {
        let c = Color::from_u8(120, 30, 200);
        assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn test_luminance_monotonic_in_gray() {
        let mut previous = -1.0;
        for v in 0..=255u8 {
            let l = relative_luminance(Color::from_u8(v, v, v));
            assert!(l > previous, "luminance not increasing at {v}");
            previous = l;
        }
    }

    #[test]
    fn test_policy_boundaries() {
        assert!(ContrastPolicy::Strict.accepts(7.0));
        assert!(!ContrastPolicy::Strict.accepts(6.99));
        assert!(!ContrastPolicy::Standard.accepts(4.5));
        assert!(ContrastPolicy::Standard.accepts(4.51));
        assert!(!ContrastPolicy::Lenient.accepts(1.0));
        assert!(ContrastPolicy::Lenient.accepts(1.01));
    }

    #[test]
    fn test_is_contrasting() {
        assert!(is_contrasting(Color::BLACK, Color::WHITE, true));
        assert!(is_contrasting(Color::BLACK, Color::WHITE, false));

        let gray = Color::rgb(0.5, 0.5, 0.5);
        assert!(!is_contrasting(gray, gray, false));
        assert!(!is_contrasting(gray, gray, true));

        // #767676 on white is just above AA, well below AAA
        let mid = Color::from_u8(0x76, 0x76, 0x76);
        assert!(is_contrasting(mid, Color::WHITE, false));
        assert!(!is_contrasting(mid, Color::WHITE, true));
    }

    #[test]
    fn test_is_dark() {
        assert!(is_dark(Color::BLACK));
        assert!(!is_dark(Color::WHITE));
        assert!(is_dark(Color::from_u8(255, 0, 0)));
        assert!(!is_dark(Color::from_u8(255, 255, 0)));
    }

    #[test]
    fn test_lowest_contrast_pair() {
        let colors = [
            Color::BLACK,
            Color::WHITE,
            Color::from_u8(0x76, 0x76, 0x76),
            // Near-duplicate of white, ratio below 1.2
            Color::from_u8(250, 250, 250),
        ];
        let pair = lowest_contrast_pair(&colors).unwrap();
        assert!(pair.ratio > MIN_PAIR_RATIO);
        // gray vs 250 is lower than gray vs white
        assert_eq!(pair.first, Color::from_u8(0x76, 0x76, 0x76));
        assert_eq!(pair.second, Color::from_u8(250, 250, 250));
    }

    #[test]
    fn test_lowest_contrast_pair_none() {
        assert!(lowest_contrast_pair(&[]).is_none());
        assert!(lowest_contrast_pair(&[Color::BLACK]).is_none());
        assert!(lowest_contrast_pair(&[Color::WHITE, Color::WHITE]).is_none());
    }
}
