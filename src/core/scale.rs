use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Linear 1D axis scale over one data dimension, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    min: f64,
    max: f64,
}

impl AxisScale {
    pub fn new(min: f64, max: f64) -> OverlayResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(OverlayError::InvalidData(format!(
                "axis scale domain must be finite with min < max (got {min}..{max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Builds the tightest scale covering `values`, widened by one unit when
    /// every value is identical.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> OverlayResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if !value.is_finite() {
                return Err(OverlayError::InvalidData(
                    "axis values must be finite".to_owned(),
                ));
            }
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return Err(OverlayError::InvalidData(
                "axis scale cannot be built from empty data".to_owned(),
            ));
        }
        if min == max {
            return Self::new(min - 0.5, max + 0.5);
        }
        Self::new(min, max)
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Maps a data value to `[0, 1]` for values inside the domain.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::AxisScale;

    #[test]
    fn normalize_maps_domain_onto_unit_interval() {
        let scale = AxisScale::new(-1.0, 10.0).expect("scale");
        assert_eq!(scale.normalize(-1.0), 0.0);
        assert_eq!(scale.normalize(10.0), 1.0);
        assert!((scale.normalize(4.5) - 0.5).abs() <= 1e-12);
    }

    #[test]
    fn from_values_widens_constant_data() {
        let scale = AxisScale::from_values([2.0, 2.0]).expect("scale");
        assert_eq!((scale.min(), scale.max()), (1.5, 2.5));
        assert!(AxisScale::from_values(std::iter::empty()).is_err());
        assert!(AxisScale::new(1.0, 1.0).is_err());
    }
}
