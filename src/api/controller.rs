use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Projection;
use crate::core::projection::dimension_index;
use crate::error::{OverlayError, OverlayResult};
use crate::render::Layer;
use crate::style::SharedStyleRegistry;

use super::{
    ContextEvent, ContextListener, OverlayKind, PaintFrame, SubscriptionToken, VisualizerContext,
};

/// Redraw life cycle of one visualization instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawState {
    Idle,
    Redrawing,
    Disposed,
}

/// Contract shared by every visualization instance.
pub trait Visualizer {
    /// Clears the owned layer and rebuilds it from current context state.
    /// Returns the number of drawn shapes.
    fn redraw(&self) -> OverlayResult<usize>;

    fn is_relevant(&self, event: &ContextEvent) -> bool;

    /// Releases the context subscription and the layer contents.
    fn dispose(&self);
}

/// One overlay bound to a plot: owns its layer, listens to the context and
/// rebuilds the layer whenever a relevant change arrives.
///
/// Redraws are synchronous and non-reentrant; a redraw requested while one is
/// running fails with [`OverlayError::ReentrantRedraw`] and leaves the running
/// one untouched.
pub struct Visualization {
    overlay: OverlayKind,
    context: Rc<VisualizerContext>,
    projection: Rc<dyn Projection>,
    dimx: usize,
    dimy: usize,
    layer: RefCell<Layer>,
    state: Cell<RedrawState>,
    subscription: RefCell<Option<SubscriptionToken>>,
}

impl Visualization {
    /// Registers the overlay's styles, subscribes to `context` and performs the
    /// initial redraw.
    pub fn attach(
        context: &Rc<VisualizerContext>,
        styles: &SharedStyleRegistry,
        projection: Rc<dyn Projection>,
        overlay: impl Into<OverlayKind>,
        dimx: usize,
        dimy: usize,
    ) -> OverlayResult<Rc<Self>> {
        let overlay = overlay.into();
        let dimensionality = projection.dimensionality();
        let stored = context.database().dimensionality();
        if dimensionality != stored {
            return Err(OverlayError::InvalidConfig(format!(
                "projection covers {dimensionality} dimensions, database has {stored}"
            )));
        }
        dimension_index(dimx, dimensionality)?;
        dimension_index(dimy, dimensionality)?;
        if dimx == dimy {
            return Err(OverlayError::InvalidConfig(format!(
                "displayed dimensions must differ (got {dimx} twice)"
            )));
        }

        overlay.register_styles(&mut styles.borrow_mut());

        let layer = Layer::new(overlay.name(), overlay.level());
        let visualization = Rc::new(Self {
            overlay,
            context: Rc::clone(context),
            projection,
            dimx,
            dimy,
            layer: RefCell::new(layer),
            state: Cell::new(RedrawState::Idle),
            subscription: RefCell::new(None),
        });
        let listener: Weak<dyn ContextListener> =
            Rc::downgrade(&visualization) as Weak<dyn ContextListener>;
        let token = context.notifier().subscribe(listener);
        *visualization.subscription.borrow_mut() = Some(token);

        if let Err(err) = visualization.redraw() {
            visualization.dispose();
            return Err(err);
        }
        debug!(
            name = visualization.name(),
            dimx, dimy, "attached visualization"
        );
        Ok(visualization)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.overlay.name()
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayKind {
        &self.overlay
    }

    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.dimx, self.dimy)
    }

    #[must_use]
    pub fn state(&self) -> RedrawState {
        self.state.get()
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Borrow of the owned layer. Do not hold it across a redraw.
    #[must_use]
    pub fn layer(&self) -> Ref<'_, Layer> {
        self.layer.borrow()
    }

    #[must_use]
    pub fn layer_snapshot(&self) -> Layer {
        self.layer.borrow().clone()
    }

    fn rebuild(&self) -> OverlayResult<usize> {
        let removed = self.layer.borrow_mut().clear();
        let frame = PaintFrame {
            context: &self.context,
            projection: self.projection.as_ref(),
            dimx: self.dimx,
            dimy: self.dimy,
        };
        let mut shapes = Vec::new();
        self.overlay.paint(&frame, &mut shapes)?;
        if self.state.get() == RedrawState::Disposed {
            return Err(OverlayError::Disposed {
                name: self.name().to_owned(),
            });
        }
        let drawn = shapes.len();
        self.layer.borrow_mut().extend(shapes);
        debug!(name = self.name(), removed, drawn, "rebuilt overlay layer");
        Ok(drawn)
    }

    fn release_subscription(&self) {
        if let Some(token) = self.subscription.borrow_mut().take() {
            self.context.notifier().unsubscribe(token);
        }
    }
}

impl Visualizer for Visualization {
    fn redraw(&self) -> OverlayResult<usize> {
        match self.state.get() {
            RedrawState::Idle => {}
            RedrawState::Redrawing => {
                return Err(OverlayError::ReentrantRedraw {
                    name: self.name().to_owned(),
                });
            }
            RedrawState::Disposed => {
                return Err(OverlayError::Disposed {
                    name: self.name().to_owned(),
                });
            }
        }
        self.state.set(RedrawState::Redrawing);
        let result = self.rebuild();
        if self.state.get() == RedrawState::Redrawing {
            self.state.set(RedrawState::Idle);
        }
        result
    }

    fn is_relevant(&self, event: &ContextEvent) -> bool {
        self.overlay.is_relevant(event)
    }

    fn dispose(&self) {
        if self.state.get() == RedrawState::Disposed {
            return;
        }
        self.release_subscription();
        self.layer.borrow_mut().clear();
        self.state.set(RedrawState::Disposed);
        debug!(name = self.name(), "disposed visualization");
    }
}

impl ContextListener for Visualization {
    fn listener_name(&self) -> &str {
        self.name()
    }

    fn on_context_change(&self, event: &ContextEvent) -> OverlayResult<bool> {
        if !self.is_relevant(event) {
            return Ok(false);
        }
        self.redraw()?;
        Ok(true)
    }
}

impl Drop for Visualization {
    fn drop(&mut self) {
        self.release_subscription();
    }
}
