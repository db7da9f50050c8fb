use crate::core::Projection;
use crate::error::OverlayResult;
use crate::render::Shape;
use crate::style::StyleRegistry;

use super::{BubblePainter, ContextEvent, SelectionCubePainter, ThumbnailPainter, VisualizerContext};

/// Read-only inputs of one paint pass.
pub struct PaintFrame<'a> {
    pub context: &'a VisualizerContext,
    pub projection: &'a dyn Projection,
    pub dimx: usize,
    pub dimy: usize,
}

/// Closed set of overlay kinds driven by a [`super::Visualization`].
#[derive(Debug, Clone)]
pub enum OverlayKind {
    SelectionCube(SelectionCubePainter),
    Bubble(BubblePainter),
    Thumbnail(ThumbnailPainter),
}

impl OverlayKind {
    /// Wraps this overlay into a thumbnail preview.
    pub fn into_thumbnail(self, config: super::ThumbnailConfig) -> OverlayResult<Self> {
        Ok(Self::Thumbnail(ThumbnailPainter::new(self, config)?))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SelectionCube(_) => SelectionCubePainter::NAME,
            Self::Bubble(_) => BubblePainter::NAME,
            Self::Thumbnail(thumbnail) => thumbnail.name(),
        }
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        match self {
            Self::SelectionCube(cube) => cube.level(),
            Self::Bubble(bubble) => bubble.level(),
            Self::Thumbnail(thumbnail) => thumbnail.level(),
        }
    }

    #[must_use]
    pub fn is_relevant(&self, event: &ContextEvent) -> bool {
        match self {
            Self::SelectionCube(cube) => cube.is_relevant(event),
            Self::Bubble(bubble) => bubble.is_relevant(event),
            Self::Thumbnail(thumbnail) => thumbnail.is_relevant(event),
        }
    }

    pub fn register_styles(&self, registry: &mut StyleRegistry) {
        match self {
            Self::SelectionCube(cube) => cube.register_styles(registry),
            Self::Bubble(bubble) => bubble.register_styles(registry),
            Self::Thumbnail(thumbnail) => thumbnail.register_styles(registry),
        }
    }

    pub fn paint(&self, frame: &PaintFrame<'_>, out: &mut Vec<Shape>) -> OverlayResult<()> {
        match self {
            Self::SelectionCube(cube) => cube.paint(frame, out),
            Self::Bubble(bubble) => bubble.paint(frame, out),
            Self::Thumbnail(thumbnail) => thumbnail.paint(frame, out),
        }
    }
}

impl From<SelectionCubePainter> for OverlayKind {
    fn from(cube: SelectionCubePainter) -> Self {
        Self::SelectionCube(cube)
    }
}

impl From<BubblePainter> for OverlayKind {
    fn from(bubble: BubblePainter) -> Self {
        Self::Bubble(bubble)
    }
}
