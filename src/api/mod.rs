//! Overlay instances and the context they listen to.

mod bubble;
mod config;
mod context;
mod controller;
mod cube;
mod events;
mod overlay;
mod thumbnail;

pub use bubble::BubblePainter;
pub use config::{BoundBubbleConfig, BubbleConfig, ThumbnailConfig};
pub use context::{
    ChangeNotifier, ContextListener, DispatchReport, SubscriptionToken, VisualizerContext,
};
pub use controller::{RedrawState, Visualization, Visualizer};
pub use cube::SelectionCubePainter;
pub use events::ContextEvent;
pub use overlay::{OverlayKind, PaintFrame};
pub use thumbnail::ThumbnailPainter;
