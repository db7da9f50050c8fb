use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Size of the drawing area in plot units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Identifier of one record in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl RecordId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Closed value interval on one data dimension.
///
/// `min == max` is legal and describes a degenerate, zero-width slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimRange {
    pub min: f64,
    pub max: f64,
}

impl DimRange {
    pub fn new(min: f64, max: f64) -> OverlayResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(OverlayError::InvalidData(
                "range bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(OverlayError::InvalidData(format!(
                "range min {min} must not exceed max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }
}

/// Per-dimension value ranges selected by the user.
///
/// The length equals the data dimensionality and is fixed at construction.
/// A `None` entry leaves that dimension unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelection {
    ranges: Vec<Option<DimRange>>,
}

impl RangeSelection {
    /// Creates a selection with every dimension unconstrained.
    #[must_use]
    pub fn unconstrained(dimensionality: usize) -> Self {
        Self {
            ranges: vec![None; dimensionality],
        }
    }

    pub fn from_ranges(ranges: Vec<Option<DimRange>>) -> OverlayResult<Self> {
        if ranges.is_empty() {
            return Err(OverlayError::InvalidData(
                "range selection needs at least one dimension".to_owned(),
            ));
        }
        Ok(Self { ranges })
    }

    /// Returns a copy with dimension `dim` (1-based) constrained to `range`.
    pub fn with_range(mut self, dim: usize, range: Option<DimRange>) -> OverlayResult<Self> {
        let dimensionality = self.ranges.len();
        let slot = dim
            .checked_sub(1)
            .and_then(|index| self.ranges.get_mut(index))
            .ok_or(OverlayError::InvalidDimension {
                dim,
                dimensionality,
            })?;
        *slot = range;
        Ok(self)
    }

    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn ranges(&self) -> &[Option<DimRange>] {
        &self.ranges
    }

    /// Range on dimension `dim` (1-based); `None` when unconstrained or out of bounds.
    #[must_use]
    pub fn range(&self, dim: usize) -> Option<DimRange> {
        dim.checked_sub(1)
            .and_then(|index| self.ranges.get(index))
            .copied()
            .flatten()
    }
}

/// Explicit set of selected records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordSelection {
    pub ids: IndexSet<RecordId>,
}

impl RecordSelection {
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

/// Current user selection held by the visualizer context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionContext {
    Records(RecordSelection),
    Ranges(RangeSelection),
}

impl SelectionContext {
    #[must_use]
    pub fn as_ranges(&self) -> Option<&RangeSelection> {
        match self {
            Self::Ranges(ranges) => Some(ranges),
            Self::Records(_) => None,
        }
    }
}
