mod layer;
mod null_renderer;
mod primitives;
mod scene;
mod svg;

pub use layer::{LEVEL_DATA, Layer};
pub use null_renderer::NullRenderer;
pub use primitives::{CirclePrimitive, Color, PolygonPaint, PolygonPrimitive, Shape};
pub use scene::Scene;
pub use svg::{SvgRenderer, escape_xml, render_document};

use crate::error::OverlayResult;

/// Contract implemented by any output backend.
///
/// Backends receive a fully materialized `Scene` so drawing code stays
/// isolated from selection, clustering and redraw logic.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> OverlayResult<()>;
}
