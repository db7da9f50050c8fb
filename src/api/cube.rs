use tracing::debug;

use crate::core::project_range;
use crate::error::OverlayResult;
use crate::render::{LEVEL_DATA, PolygonPrimitive, Shape};
use crate::style::class::{FILL, OPACITY, STROKE, STROKE_OPACITY, STROKE_WIDTH};
use crate::style::{StyleCategory, StyleClass, StyleRegistry};

use super::{ContextEvent, PaintFrame};

/// Marks the selected value range of every dimension as a translucent box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionCubePainter;

impl SelectionCubePainter {
    pub const NAME: &'static str = "Selection Range";

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        LEVEL_DATA - 1
    }

    #[must_use]
    pub fn is_relevant(&self, event: &ContextEvent) -> bool {
        matches!(event, ContextEvent::Redraw | ContextEvent::SelectionChanged)
    }

    pub fn register_styles(&self, registry: &mut StyleRegistry) {
        registry.register(
            StyleClass::new(StyleCategory::SelectionCube.tag())
                .with(FILL, "blue")
                .with(OPACITY, "0.15"),
        );
        registry.register(
            StyleClass::new(StyleCategory::SelectionCubeFrame.tag())
                .with(STROKE, "blue")
                .with(STROKE_OPACITY, "0.5")
                .with(STROKE_WIDTH, "0.3"),
        );
    }

    /// Emits the filled cube and its frame. Without a range selection nothing
    /// is drawn; that is a legitimate state, not an error.
    pub fn paint(&self, frame: &PaintFrame<'_>, out: &mut Vec<Shape>) -> OverlayResult<()> {
        let Some(selection) = frame.context.selection() else {
            return Ok(());
        };
        let Some(ranges) = selection.as_ranges() else {
            return Ok(());
        };
        let dimensionality = frame.projection.dimensionality();
        if ranges.dimensionality() != dimensionality {
            debug!(
                selection_dims = ranges.dimensionality(),
                dimensionality, "ignoring range selection of foreign dimensionality"
            );
            return Ok(());
        }

        let projected = project_range(ranges.ranges(), frame.projection, frame.dimx, frame.dimy)?;
        out.push(
            PolygonPrimitive::fill_of(&projected, StyleCategory::SelectionCube.style_id()).into(),
        );
        out.push(
            PolygonPrimitive::frame_of(&projected, StyleCategory::SelectionCubeFrame.style_id())
                .into(),
        );
        Ok(())
    }
}
