use serde::{Deserialize, Serialize};

use crate::core::RecordId;

/// Change notifications delivered by the visualizer context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextEvent {
    /// Generic change (viewport, projection, data): every overlay may be stale.
    Redraw,
    /// The user selection was replaced.
    SelectionChanged,
    /// A new clustering result was published.
    ClusteringChanged,
    /// The pointer moved onto another record, or off all records.
    HoverChanged { record: Option<RecordId> },
    /// A visualizer was shown or hidden by the host.
    VisibilityChanged { visualizer: String, visible: bool },
}
