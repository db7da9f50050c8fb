use crate::error::OverlayResult;
use crate::render::{Renderer, Scene};

/// Headless renderer: validates the scene and remembers what it saw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_layer_count: usize,
    pub last_shape_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> OverlayResult<()> {
        scene.validate()?;
        self.last_layer_count = scene.layers.len();
        self.last_shape_count = scene.shape_count();
        self.frames_rendered += 1;
        Ok(())
    }
}
