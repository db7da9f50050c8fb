use serde::{Deserialize, Serialize};

use crate::core::{GammaCorrection, LinearRemap, NormalizeScale};
use crate::error::{OverlayError, OverlayResult};

/// Tunables of the bubble overlay.
///
/// This type is serializable so hosts can persist overlay setup alongside the
/// rest of their plot configuration. Nothing is validated until
/// [`BubbleConfig::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleConfig {
    /// Perceptual-correction exponent; must be > 0.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_radius_min")]
    pub radius_min: f64,
    #[serde(default = "default_radius_max")]
    pub radius_max: f64,
    /// Raw-value bounds mapped to `[0, 1]`; derived from the annotation when unset.
    #[serde(default)]
    pub normalization: Option<(f64, f64)>,
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
}

fn default_gamma() -> f64 {
    GammaCorrection::DEFAULT_GAMMA
}

fn default_radius_min() -> f64 {
    1.0
}

fn default_radius_max() -> f64 {
    10.0
}

fn default_fill_opacity() -> f64 {
    0.5
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
            radius_min: default_radius_min(),
            radius_max: default_radius_max(),
            normalization: None,
            fill_opacity: default_fill_opacity(),
        }
    }
}

impl BubbleConfig {
    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    #[must_use]
    pub fn with_radius_range(mut self, radius_min: f64, radius_max: f64) -> Self {
        self.radius_min = radius_min;
        self.radius_max = radius_max;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, low: f64, high: f64) -> Self {
        self.normalization = Some((low, high));
        self
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    /// Validates every tunable and returns the bound scale stages.
    pub fn bind(&self) -> OverlayResult<BoundBubbleConfig> {
        let gamma = GammaCorrection::new(self.gamma)?;
        if !(self.radius_min <= self.radius_max) || self.radius_min < 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "bubble radius range must satisfy 0 <= min <= max (got {}..{})",
                self.radius_min, self.radius_max
            )));
        }
        let remap = LinearRemap::new(self.radius_min, self.radius_max)?;
        let normalization = self
            .normalization
            .map(|(low, high)| NormalizeScale::new(low, high))
            .transpose()?;
        if !self.fill_opacity.is_finite() || !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(OverlayError::InvalidConfig(
                "bubble fill opacity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(BoundBubbleConfig {
            gamma,
            remap,
            normalization,
            fill_opacity: self.fill_opacity,
        })
    }

    pub fn from_json(json: &str) -> OverlayResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| OverlayError::InvalidConfig(format!("bubble config: {err}")))
    }

    pub fn to_json(&self) -> OverlayResult<String> {
        serde_json::to_string(self)
            .map_err(|err| OverlayError::InvalidConfig(format!("bubble config: {err}")))
    }
}

/// Validated bubble configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBubbleConfig {
    pub gamma: GammaCorrection,
    pub remap: LinearRemap,
    pub normalization: Option<NormalizeScale>,
    pub fill_opacity: f64,
}

/// Thumbnail rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Edge length of the square thumbnail, in thumbnail cells.
    #[serde(default = "default_thumbnail_resolution")]
    pub resolution: u32,
}

fn default_thumbnail_resolution() -> u32 {
    32
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            resolution: default_thumbnail_resolution(),
        }
    }
}

impl ThumbnailConfig {
    pub fn validate(self) -> OverlayResult<Self> {
        if self.resolution == 0 {
            return Err(OverlayError::InvalidConfig(
                "thumbnail resolution must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
