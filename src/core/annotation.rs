use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::RecordId;

/// Per-record scalar produced by an analysis step, e.g. an outlier score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub name: String,
    values: IndexMap<RecordId, f64>,
}

impl AnnotationResult {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, id: u32, value: f64) -> Self {
        self.values.insert(RecordId::new(id), value);
        self
    }

    pub fn set(&mut self, id: RecordId, value: f64) {
        self.values.insert(id, value);
    }

    #[must_use]
    pub fn value_for(&self, id: RecordId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest finite value, `None` when no finite value exists.
    #[must_use]
    pub fn finite_bounds(&self) -> Option<(f64, f64)> {
        let finite = || {
            self.values
                .values()
                .copied()
                .filter(|value| value.is_finite())
                .map(OrderedFloat)
        };
        let min = finite().min()?;
        let max = finite().max()?;
        Some((min.into_inner(), max.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::AnnotationResult;
    use crate::core::RecordId;

    #[test]
    fn finite_bounds_ignore_nan() {
        let scores = AnnotationResult::new("lof")
            .with_value(1, 3.0)
            .with_value(2, f64::NAN)
            .with_value(3, -2.0);
        assert_eq!(scores.finite_bounds(), Some((-2.0, 3.0)));
        assert_eq!(scores.value_for(RecordId::new(3)), Some(-2.0));
        assert_eq!(scores.value_for(RecordId::new(9)), None);
        assert_eq!(AnnotationResult::new("empty").finite_bounds(), None);
    }
}
