use serde::{Deserialize, Serialize};

use crate::error::OverlayResult;
use crate::render::Shape;

/// Drawing level of the data markers; overlays stack around it.
pub const LEVEL_DATA: i32 = 0;

/// Drawing-surface subtree owned by one visualization instance.
///
/// A layer is never patched: every rebuild clears all children first and bumps
/// [`Layer::generation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    name: String,
    level: i32,
    generation: u64,
    children: Vec<Shape>,
}

impl Layer {
    #[must_use]
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
            generation: 0,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Number of completed clears; `0` until the first redraw starts.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Removes every child and starts a new generation. Returns the number of
    /// removed children.
    pub fn clear(&mut self) -> usize {
        let removed = self.children.len();
        self.children.clear();
        self.generation += 1;
        removed
    }

    pub fn append(&mut self, shape: impl Into<Shape>) {
        self.children.push(shape.into());
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.children.extend(shapes);
    }

    pub fn validate(&self) -> OverlayResult<()> {
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    /// Serializes the layer for snapshot comparisons and host diagnostics.
    pub fn to_json(&self) -> OverlayResult<String> {
        serde_json::to_string(self).map_err(|err| {
            crate::error::OverlayError::InvalidData(format!("layer snapshot failed: {err}"))
        })
    }
}
