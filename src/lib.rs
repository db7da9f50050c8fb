//! overlay-rs: incremental overlays for 2D projections of multi-dimensional data.
//!
//! Two overlays are provided: a selection cube marking the selected value
//! range of every dimension, and bubbles encoding a per-record scalar as
//! cluster-colored, size-scaled markers. Each overlay owns one layer that is
//! rebuilt wholesale when its context reports a relevant change.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{Visualization, VisualizerContext};
pub use error::{OverlayError, OverlayResult};
