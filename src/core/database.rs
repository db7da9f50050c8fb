use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::RecordId;
use crate::error::{OverlayError, OverlayResult};

/// One stored record: a numeric vector plus an optional class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<f64>,
    pub label: Option<String>,
}

/// Read-only view of the record store backing a plot.
pub trait RecordStore {
    fn dimensionality(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: RecordId) -> Option<&Record>;

    /// Record ids in storage order.
    fn ids(&self) -> Vec<RecordId>;
}

/// Vector records kept resident in memory, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDatabase {
    dimensionality: usize,
    records: IndexMap<RecordId, Record>,
}

impl InMemoryDatabase {
    pub fn new(dimensionality: usize) -> OverlayResult<Self> {
        if dimensionality == 0 {
            return Err(OverlayError::InvalidData(
                "database dimensionality must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            dimensionality,
            records: IndexMap::new(),
        })
    }

    /// Inserts or replaces a record.
    pub fn insert(
        &mut self,
        id: RecordId,
        values: Vec<f64>,
        label: Option<&str>,
    ) -> OverlayResult<()> {
        if values.len() != self.dimensionality {
            return Err(OverlayError::InvalidData(format!(
                "record {} has {} values, database dimensionality is {}",
                id.get(),
                values.len(),
                self.dimensionality
            )));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(OverlayError::InvalidData(format!(
                "record {} contains non-finite values",
                id.get()
            )));
        }
        self.records.insert(
            id,
            Record {
                values,
                label: label.map(str::to_owned),
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn with_record(mut self, id: u32, values: Vec<f64>, label: Option<&str>) -> Self {
        if let Err(err) = self.insert(RecordId::new(id), values, label) {
            tracing::warn!(error = %err, "dropping invalid record");
        }
        self
    }
}

impl RecordStore for InMemoryDatabase {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    fn ids(&self) -> Vec<RecordId> {
        self.records.keys().copied().collect()
    }
}
