use crate::core::Viewport;
use crate::error::{OverlayError, OverlayResult};
use crate::render::Layer;
use crate::style::{StyleClass, StyleRegistry};

/// Backend-agnostic snapshot of one plot: styles plus layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub styles: Vec<StyleClass>,
    pub layers: Vec<Layer>,
}

impl Scene {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            styles: Vec::new(),
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_styles(mut self, registry: &StyleRegistry) -> Self {
        self.styles = registry.classes().cloned().collect();
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Layers bottom to top; equal levels keep insertion order.
    #[must_use]
    pub fn ordered_layers(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|layer| layer.level());
        layers
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if !self.viewport.is_valid() {
            return Err(OverlayError::InvalidData(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        for layer in &self.layers {
            layer.validate()?;
            for child in layer.children() {
                let style = child.style().as_str();
                if !self.styles.iter().any(|class| class.name() == style) {
                    return Err(OverlayError::InvalidData(format!(
                        "layer `{}` references unregistered style `{style}`",
                        layer.name()
                    )));
                }
            }
        }
        Ok(())
    }
}
