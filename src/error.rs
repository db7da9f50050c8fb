use thiserror::Error;

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid dimension {dim}: expected 1..={dimensionality}")]
    InvalidDimension { dim: usize, dimensionality: usize },

    #[error("style class `{name}` is already registered with a different definition")]
    StyleConflict { name: String },

    #[error("redraw of `{name}` requested while a redraw is already in progress")]
    ReentrantRedraw { name: String },

    #[error("visualization `{name}` was used after dispose")]
    Disposed { name: String },
}
