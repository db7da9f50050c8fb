use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Identifier referencing a registered [`crate::style::StyleClass`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

impl StyleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker kind a style identifier belongs to.
///
/// Tags are purely alphabetic, so `tag + index` splits back into exactly one
/// `(category, index)` pair and ids never collide across categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleCategory {
    SelectionCube,
    SelectionCubeFrame,
    Bubble,
    Custom(String),
}

impl StyleCategory {
    /// Validates a host-defined category tag.
    pub fn custom(tag: &str) -> OverlayResult<Self> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(OverlayError::InvalidConfig(format!(
                "style category tag `{tag}` must be non-empty ASCII letters"
            )));
        }
        Ok(Self::Custom(tag.to_owned()))
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::SelectionCube => "selectionCube",
            Self::SelectionCubeFrame => "selectionCubeFrame",
            Self::Bubble => "bubble",
            Self::Custom(tag) => tag,
        }
    }

    /// Identifier for the single, unindexed style of this category.
    #[must_use]
    pub fn style_id(&self) -> StyleId {
        StyleId::new(self.tag())
    }
}

/// Deterministic identifier for `(category, index)`, e.g. `bubble3`.
#[must_use]
pub fn style_id_for(category: &StyleCategory, index: usize) -> StyleId {
    StyleId::new(format!("{}{index}", category.tag()))
}
