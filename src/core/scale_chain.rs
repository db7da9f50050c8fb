//! Composable value-scaling pipeline.
//!
//! A [`ScaleChain`] turns a raw per-record scalar into a visual encoding such as
//! a marker radius. Links are pure `f64 -> f64` functions applied in order; the
//! output of link `i` must lie in the input domain of link `i + 1`.
//!
//! Order preservation: [`NormalizeScale`] (with `low <= high`),
//! [`LinearRemap`] (with `target_min <= target_max`) and [`GammaCorrection`]
//! on `[0, 1]` are all non-decreasing, so a chain built from them keeps value
//! ordering. Gamma correction is only defined for non-negative inputs; values
//! normalized outside of `[0, 1]` are passed through `powf` unchanged, which
//! yields `NaN` for negative inputs. Nothing is clamped.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// One stage of a [`ScaleChain`].
///
/// Implementations must be pure so a chain can be shared between redraws.
pub trait ScaleFunction: Send + Sync {
    fn apply(&self, value: f64) -> f64;

    fn label(&self) -> &'static str {
        "custom"
    }
}

impl<F> ScaleFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn apply(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Maps raw values from `[low, high]` into the canonical `[0, 1]` range.
///
/// Degenerate bounds (`low == high`) map every input to `0.5`, the midpoint of
/// the canonical range, so the downstream visual range yields its midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeScale {
    low: f64,
    high: f64,
}

impl NormalizeScale {
    pub fn new(low: f64, high: f64) -> OverlayResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(OverlayError::InvalidConfig(
                "normalization bounds must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(OverlayError::InvalidConfig(format!(
                "normalization low {low} must not exceed high {high}"
            )));
        }
        Ok(Self { low, high })
    }

    /// Degenerate normalization at zero; every input maps to `0.5`.
    #[must_use]
    pub const fn collapsed() -> Self {
        Self {
            low: 0.0,
            high: 0.0,
        }
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.low, self.high)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.low == self.high
    }
}

impl ScaleFunction for NormalizeScale {
    fn apply(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        (value - self.low) / (self.high - self.low)
    }

    fn label(&self) -> &'static str {
        "normalize"
    }
}

/// Maps the canonical `[0, 1]` range onto `[target_min, target_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRemap {
    target_min: f64,
    target_max: f64,
}

impl LinearRemap {
    pub fn new(target_min: f64, target_max: f64) -> OverlayResult<Self> {
        if !target_min.is_finite() || !target_max.is_finite() {
            return Err(OverlayError::InvalidConfig(
                "remap target bounds must be finite".to_owned(),
            ));
        }
        Ok(Self {
            target_min,
            target_max,
        })
    }

    #[must_use]
    pub fn target(self) -> (f64, f64) {
        (self.target_min, self.target_max)
    }
}

impl ScaleFunction for LinearRemap {
    fn apply(&self, value: f64) -> f64 {
        self.target_min + (self.target_max - self.target_min) * value
    }

    fn label(&self) -> &'static str {
        "linear-remap"
    }
}

/// Perceptual correction `x^(1/gamma)` for inputs in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaCorrection {
    gamma: f64,
}

impl GammaCorrection {
    pub const DEFAULT_GAMMA: f64 = 1.0;

    /// Binds the exponent; `gamma` must be finite and strictly positive.
    pub fn new(gamma: f64) -> OverlayResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(OverlayError::InvalidConfig(format!(
                "gamma must be finite and > 0 (got {gamma})"
            )));
        }
        Ok(Self { gamma })
    }

    #[must_use]
    pub fn gamma(self) -> f64 {
        self.gamma
    }
}

impl Default for GammaCorrection {
    fn default() -> Self {
        Self {
            gamma: Self::DEFAULT_GAMMA,
        }
    }
}

impl ScaleFunction for GammaCorrection {
    fn apply(&self, value: f64) -> f64 {
        value.powf(1.0 / self.gamma)
    }

    fn label(&self) -> &'static str {
        "gamma"
    }
}

/// Ordered composition of [`ScaleFunction`] links.
///
/// `chain.apply(x) == links[n - 1](... links[0](x))`. An empty chain is the
/// identity. Cloning is cheap; links are shared.
#[derive(Clone, Default)]
pub struct ScaleChain {
    links: Vec<Arc<dyn ScaleFunction>>,
}

impl ScaleChain {
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn compose(links: Vec<Arc<dyn ScaleFunction>>) -> Self {
        Self { links }
    }

    /// Appends a link at the end of the chain.
    #[must_use]
    pub fn then(mut self, link: impl ScaleFunction + 'static) -> Self {
        self.links.push(Arc::new(link));
        self
    }

    /// The bubble encoding: normalize, gamma-correct on `[0, 1]`, then remap
    /// onto the radius range.
    #[must_use]
    pub fn normalize_gamma_remap(
        normalize: NormalizeScale,
        gamma: GammaCorrection,
        remap: LinearRemap,
    ) -> Self {
        Self::identity().then(normalize).then(gamma).then(remap)
    }

    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        self.links
            .iter()
            .fold(value, |acc, link| link.apply(acc))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.links.iter().map(|link| link.label()).collect()
    }
}

impl fmt::Debug for ScaleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleChain")
            .field("links", &self.labels())
            .finish()
    }
}
