use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{RecordId, RecordStore};

/// One group of records produced by a clustering algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: Option<String>,
    pub ids: Vec<RecordId>,
}

impl Cluster {
    #[must_use]
    pub fn new(name: Option<&str>, ids: Vec<RecordId>) -> Self {
        Self {
            name: name.map(str::to_owned),
            ids,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Read-only partition of records into clusters.
///
/// Iteration order is stable; [`Clustering::indexed`] hands out the 1-based
/// cluster index used for colors and style names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clustering {
    clusters: Vec<Cluster>,
}

impl Clustering {
    #[must_use]
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    /// Groups every stored record by its label, clusters ordered by first
    /// appearance. Unlabeled records share one unnamed cluster.
    #[must_use]
    pub fn by_label(store: &dyn RecordStore) -> Self {
        let mut groups: IndexMap<Option<String>, Vec<RecordId>> = IndexMap::new();
        for id in store.ids() {
            let label = store.get(id).and_then(|record| record.label.clone());
            groups.entry(label).or_default().push(id);
        }
        Self {
            clusters: groups
                .into_iter()
                .map(|(name, ids)| Cluster { name, ids })
                .collect(),
        }
    }

    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters paired with their 1-based index, in iteration order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| (index + 1, cluster))
    }
}
