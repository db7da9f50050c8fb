use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{AnnotationResult, Clustering, NormalizeScale, ScaleChain};
use crate::error::OverlayResult;
use crate::render::{CirclePrimitive, LEVEL_DATA, Shape};
use crate::style::class::{FILL, FILL_OPACITY, STROKE_WIDTH};
use crate::style::{ColorPalette, StyleCategory, StyleClass, StyleRegistry, style_id_for};

use super::{BoundBubbleConfig, ContextEvent, PaintFrame, VisualizerContext};

/// Draws one cluster-colored marker per record, sized by an annotation value.
#[derive(Debug, Clone)]
pub struct BubblePainter {
    annotation: Rc<AnnotationResult>,
    clustering: Rc<Clustering>,
    chain: ScaleChain,
    palette: ColorPalette,
    fill_opacity: f64,
}

impl BubblePainter {
    pub const NAME: &'static str = "Bubbles";

    /// Resolves everything the painter keeps for its lifetime.
    ///
    /// The clustering published on `context` is used when present, otherwise
    /// records are grouped by label. Cluster indices are fixed from here on.
    /// Without configured normalization bounds the annotation's finite
    /// min/max are used.
    pub fn new(
        context: &VisualizerContext,
        annotation: Rc<AnnotationResult>,
        config: BoundBubbleConfig,
    ) -> OverlayResult<Self> {
        let clustering = context.clustering().unwrap_or_else(|| {
            debug!("no clustering result published, grouping records by label");
            Rc::new(Clustering::by_label(context.database()))
        });
        let normalization = match (config.normalization, annotation.finite_bounds()) {
            (Some(normalization), _) => normalization,
            (None, Some((low, high))) => NormalizeScale::new(low, high)?,
            (None, None) => NormalizeScale::collapsed(),
        };
        let chain = ScaleChain::normalize_gamma_remap(normalization, config.gamma, config.remap);
        Ok(Self {
            annotation,
            clustering,
            chain,
            palette: ColorPalette::default(),
            fill_opacity: config.fill_opacity,
        })
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn clustering(&self) -> &Clustering {
        &self.clustering
    }

    #[must_use]
    pub fn chain(&self) -> &ScaleChain {
        &self.chain
    }

    /// Encoded marker size for a raw annotation value.
    #[must_use]
    pub fn scaled(&self, value: f64) -> f64 {
        self.chain.apply(value)
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        LEVEL_DATA
    }

    #[must_use]
    pub fn is_relevant(&self, event: &ContextEvent) -> bool {
        matches!(event, ContextEvent::Redraw | ContextEvent::SelectionChanged)
    }

    pub fn register_styles(&self, registry: &mut StyleRegistry) {
        for (index, _) in self.clustering.indexed() {
            let id = style_id_for(&StyleCategory::Bubble, index);
            registry.register(
                StyleClass::new(id.as_str())
                    .with(STROKE_WIDTH, "0.001")
                    .with(FILL, self.palette.color(index).to_css_hex())
                    .with(FILL_OPACITY, self.fill_opacity.to_string()),
            );
        }
    }

    pub fn paint(&self, frame: &PaintFrame<'_>, out: &mut Vec<Shape>) -> OverlayResult<()> {
        let database = frame.context.database();
        for (index, cluster) in self.clustering.indexed() {
            let style = style_id_for(&StyleCategory::Bubble, index);
            for &id in &cluster.ids {
                let Some(record) = database.get(id) else {
                    trace!(record = id.get(), "clustered record missing from database");
                    continue;
                };
                let Some(value) = self.annotation.value_for(id) else {
                    trace!(record = id.get(), "record has no annotation value");
                    continue;
                };
                let radius = self.scaled(value);
                if !radius.is_finite() || radius < 0.0 {
                    trace!(record = id.get(), value, radius, "skipping unencodable value");
                    continue;
                }
                let center = frame
                    .projection
                    .project_2d(&record.values, frame.dimx, frame.dimy)?;
                out.push(
                    CirclePrimitive::new(center, radius, style.clone())
                        .for_record(id)
                        .into(),
                );
            }
        }
        Ok(())
    }
}
