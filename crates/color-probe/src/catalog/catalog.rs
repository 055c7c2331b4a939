//! Named color tables with nearest-name lookup.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::distance::ColorDistance;
use crate::error::CatalogError;

/// Returned by [`ColorCatalog::name_of`] when the catalog has no entries.
pub const NOT_DETECTED: &str = "NOT DETECTED";

static WEB_JSON: &str = include_str!("web_colors.json");

static WEB: OnceLock<ColorCatalog> = OnceLock::new();
static BASIC: OnceLock<ColorCatalog> = OnceLock::new();

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: Color,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// On-disk shape of a catalog entry: `{"name": …, "rgb": {"r", "g", "b"}}`
/// with channels in 0..=255. Missing channels read as 0.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rgb: RawRgb,
}

#[derive(Debug, Default, Deserialize)]
struct RawRgb {
    #[serde(default)]
    r: f64,
    #[serde(default)]
    g: f64,
    #[serde(default)]
    b: f64,
}

/// An immutable list of named colors.
///
/// Lookups are linear scans; catalogs are small (the web table has fewer
/// than 150 entries).
///
/// # Example
///
/// ```
/// use color_probe::{Color, ColorCatalog};
///
/// let web = ColorCatalog::web();
/// assert_eq!(web.name_of(Color::from_u8(250, 5, 3)), "red");
/// assert_eq!(web.name_of(Color::from_u8(255, 0, 0).with_alpha(0.5)), "redAlpha128");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorCatalog {
    entries: Vec<NamedColor>,
}

impl ColorCatalog {
    pub fn new(entries: Vec<NamedColor>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of `{"name", "rgb": {"r","g","b"}}`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Parse`] if the text is not such an array
    /// - [`CatalogError::Empty`] if the array has no entries
    /// - [`CatalogError::ChannelOutOfRange`] if a channel is outside 0..=255
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut entries = Vec::with_capacity(raw.len());
        for RawEntry { name, rgb } in raw {
            for value in [rgb.r, rgb.g, rgb.b] {
                if !(0.0..=255.0).contains(&value) {
                    return Err(CatalogError::ChannelOutOfRange { name, value });
                }
            }
            let color = Color::rgb(rgb.r / 255.0, rgb.g / 255.0, rgb.b / 255.0);
            entries.push(NamedColor { name, color });
        }
        Ok(Self { entries })
    }

    /// The CSS web color table, parsed on first use.
    ///
    /// A table that fails to parse leaves the catalog empty, so every lookup
    /// reports [`NOT_DETECTED`].
    pub fn web() -> &'static ColorCatalog {
        WEB.get_or_init(|| match Self::from_json(WEB_JSON) {
            Ok(catalog) => {
                tracing::debug!(entries = catalog.len(), "Loaded web color catalog");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Web color catalog unavailable");
                ColorCatalog::default()
            }
        })
    }

    /// Twelve coarse color names (black, blue, brown, … yellow).
    ///
    /// Meant for [`nearest_by`](Self::nearest_by) with
    /// [`ChannelWeighted`](crate::ChannelWeighted), which maps any color onto
    /// one of a handful of words a person would use.
    pub fn basic() -> &'static ColorCatalog {
        BASIC.get_or_init(|| {
            let entries = [
                ("black", 0.0, 0.0, 0.0),
                ("blue", 0.0, 0.0, 1.0),
                ("brown", 0.6, 0.4, 0.2),
                ("cyan", 0.0, 1.0, 1.0),
                ("gray", 0.5, 0.5, 0.5),
                ("green", 0.0, 1.0, 0.0),
                ("magenta", 1.0, 0.0, 1.0),
                ("orange", 1.0, 0.5, 0.0),
                ("purple", 0.5, 0.0, 0.5),
                ("red", 1.0, 0.0, 0.0),
                ("white", 1.0, 1.0, 1.0),
                ("yellow", 1.0, 1.0, 0.0),
            ]
            .into_iter()
            .map(|(name, r, g, b)| NamedColor::new(name, Color::rgb(r, g, b)))
            .collect();
            ColorCatalog::new(entries)
        })
    }

    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&NamedColor> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Nearest entry by L1 distance on the RGB channels. Alpha is ignored.
    ///
    /// The first entry at the minimum distance wins.
    pub fn nearest(&self, color: Color) -> Option<&NamedColor> {
        self.nearest_with(color, |a, b| {
            (a.r - b.r).abs() + (a.g - b.g).abs() + (a.b - b.b).abs()
        })
    }

    /// Nearest entry under an arbitrary [`ColorDistance`].
    pub fn nearest_by<D: ColorDistance + ?Sized>(
        &self,
        color: Color,
        metric: &D,
    ) -> Option<&NamedColor> {
        self.nearest_with(color, |a, b| metric.distance(a, b))
    }

    fn nearest_with(
        &self,
        color: Color,
        distance: impl Fn(Color, Color) -> f64,
    ) -> Option<&NamedColor> {
        let mut best: Option<(&NamedColor, f64)> = None;
        for entry in &self.entries {
            let d = distance(color, entry.color);
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((entry, d)),
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Name of the nearest entry, with `Alpha<0-255>` appended for
    /// translucent colors, or [`NOT_DETECTED`] for an empty catalog.
    pub fn name_of(&self, color: Color) -> String {
        let Some(entry) = self.nearest(color) else {
            return NOT_DETECTED.to_string();
        };
        if color.a < 1.0 {
            format!("{}Alpha{}", entry.name, (255.0 * color.a).round() as u8)
        } else {
            entry.name.clone()
        }
    }
}

/// Name of the nearest [web color](ColorCatalog::web).
pub fn nearest_name(color: Color) -> String {
    ColorCatalog::web().name_of(color)
}
