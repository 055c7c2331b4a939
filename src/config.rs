use crate::assets::AssetLoader;
use color_probe::{
    ContrastGate, ContrastPolicy, PaletteOptions, Quality, SampleOptions, LOW_CONTRAST_THRESHOLD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

/// Application configuration loaded from huecheck.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Random sampling (labels)
    pub sampling: SamplingConfig,

    /// Histogram palette (buttons)
    pub palette: PaletteConfig,

    /// Report thresholds
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub draws: usize,
    pub top: usize,
    /// Fixed RNG seed; a fresh seed per run when unset
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        let defaults = SampleOptions::default();
        Self {
            draws: defaults.draws,
            top: defaults.top,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn options(&self) -> SampleOptions {
        SampleOptions {
            draws: self.draws,
            top: self.top,
        }
    }

    /// RNG for one run: seeded when `seed` is set, from entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Gate setting as written in YAML.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GateSetting {
    Strict,
    Standard,
    #[default]
    Lenient,
    LumaRatio,
}

impl std::str::FromStr for GateSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(GateSetting::Strict),
            "standard" => Ok(GateSetting::Standard),
            "lenient" => Ok(GateSetting::Lenient),
            "luma_ratio" => Ok(GateSetting::LumaRatio),
            other => Err(format!(
                "unknown gate {other:?} (expected strict, standard, lenient or luma_ratio)"
            )),
        }
    }
}

impl From<GateSetting> for ContrastGate {
    fn from(setting: GateSetting) -> Self {
        match setting {
            GateSetting::Strict => ContrastGate::Wcag(ContrastPolicy::Strict),
            GateSetting::Standard => ContrastGate::Wcag(ContrastPolicy::Standard),
            GateSetting::Lenient => ContrastGate::Wcag(ContrastPolicy::Lenient),
            GateSetting::LumaRatio => ContrastGate::LumaRatio,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub quality: Quality,
    pub gate: GateSetting,
    pub distinct: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let defaults = PaletteOptions::four_slot();
        Self {
            quality: Quality::Lowest,
            gate: GateSetting::default(),
            distinct: defaults.distinct,
        }
    }
}

impl PaletteConfig {
    pub fn options(&self) -> PaletteOptions {
        PaletteOptions {
            gate: self.gate.into(),
            distinct: self.distinct,
            quality: self.quality,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Contrast ratios below this are flagged
    pub low_contrast: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            low_contrast: LOW_CONTRAST_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        draws = config.sampling.draws,
                        quality = %config.palette.quality,
                        low_contrast = config.report.low_contrast,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty or comment-only file parses as null
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
