//! Style definitions shared by every overlay drawing into one plot.

pub mod assigner;
pub mod class;
pub mod palette;
pub mod registry;

pub use assigner::{StyleCategory, StyleId, style_id_for};
pub use class::StyleClass;
pub use palette::ColorPalette;
pub use registry::{Registration, SharedStyleRegistry, StyleConflictEvent, StyleRegistry};
