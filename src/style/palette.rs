use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};
use crate::render::Color;

const DEFAULT_COLORS: [&str; 10] = [
    "#ff0000", "#0000ff", "#00ff00", "#ff8000", "#00ffff", "#ff00ff", "#ffff00", "#808080",
    "#800000", "#008080",
];

/// Qualitative color list indexed by 1-based cluster number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    colors: Vec<Color>,
}

impl ColorPalette {
    pub fn new(colors: Vec<Color>) -> OverlayResult<Self> {
        if colors.is_empty() {
            return Err(OverlayError::InvalidConfig(
                "color palette must not be empty".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    pub fn from_hex(colors: &[&str]) -> OverlayResult<Self> {
        let colors = colors
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<OverlayResult<Vec<_>>>()?;
        Self::new(colors)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for 1-based `index`, cycling once the palette is exhausted.
    /// Index `0` maps to the first color.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index.saturating_sub(1) % self.colors.len()]
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        let colors = DEFAULT_COLORS
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        Self { colors }
    }
}
