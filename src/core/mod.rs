pub mod annotation;
pub mod clustering;
pub mod database;
pub mod projection;
pub mod range_projector;
pub mod scale;
pub mod scale_chain;
pub mod types;

pub use annotation::AnnotationResult;
pub use clustering::{Cluster, Clustering};
pub use database::{InMemoryDatabase, Record, RecordStore};
pub use projection::{AxisProjection, Point, Projection};
pub use range_projector::{ProjectedRange, RangeVertices, project_range, resolve_extents};
pub use scale::AxisScale;
pub use scale_chain::{GammaCorrection, LinearRemap, NormalizeScale, ScaleChain, ScaleFunction};
pub use types::{DimRange, RangeSelection, RecordId, RecordSelection, SelectionContext, Viewport};
