use std::collections::HashSet;

use crate::core::Point;
use crate::error::OverlayResult;
use crate::render::{CirclePrimitive, PolygonPrimitive, Shape};
use crate::style::StyleRegistry;

use super::{ContextEvent, OverlayKind, PaintFrame, ThumbnailConfig};

/// Renders a wrapped overlay into a small square preview.
///
/// Geometry is rescaled from the projection viewport onto a
/// `resolution x resolution` grid; a marker whose center lands in an already
/// occupied grid cell is dropped.
#[derive(Debug, Clone)]
pub struct ThumbnailPainter {
    inner: Box<OverlayKind>,
    resolution: u32,
    name: String,
}

impl ThumbnailPainter {
    pub fn new(inner: OverlayKind, config: ThumbnailConfig) -> OverlayResult<Self> {
        let config = config.validate()?;
        let name = format!("{} (thumbnail)", inner.name());
        Ok(Self {
            inner: Box::new(inner),
            resolution: config.resolution,
            name,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inner(&self) -> &OverlayKind {
        &self.inner
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        self.inner.level()
    }

    #[must_use]
    pub fn is_relevant(&self, event: &ContextEvent) -> bool {
        self.inner.is_relevant(event)
    }

    pub fn register_styles(&self, registry: &mut StyleRegistry) {
        self.inner.register_styles(registry);
    }

    pub fn paint(&self, frame: &PaintFrame<'_>, out: &mut Vec<Shape>) -> OverlayResult<()> {
        let mut full = Vec::new();
        self.inner.paint(frame, &mut full)?;

        let viewport = frame.projection.viewport();
        let target = f64::from(self.resolution);
        let sx = target / viewport.width;
        let sy = target / viewport.height;
        let scale_point = |point: Point| Point::new(point.x * sx, point.y * sy);

        let mut occupied = HashSet::new();
        for shape in full {
            match shape {
                Shape::Polygon(polygon) => {
                    let vertices = polygon.vertices.iter().copied().map(scale_point).collect();
                    out.push(PolygonPrimitive::new(vertices, polygon.paint, polygon.style).into());
                }
                Shape::Circle(circle) => {
                    let center = scale_point(circle.center);
                    let cell = (center.x.floor() as i64, center.y.floor() as i64);
                    if !occupied.insert(cell) {
                        continue;
                    }
                    out.push(
                        CirclePrimitive {
                            center,
                            radius: circle.radius * sx.min(sy),
                            style: circle.style,
                            record: circle.record,
                        }
                        .into(),
                    );
                }
            }
        }
        Ok(())
    }
}
