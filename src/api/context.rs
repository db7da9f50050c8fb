use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{Clustering, RecordStore, SelectionContext};
use crate::error::{OverlayError, OverlayResult};

use super::ContextEvent;

/// Receiver of context change notifications.
pub trait ContextListener {
    fn listener_name(&self) -> &str;

    /// Handles one event synchronously. Returns `true` when the listener
    /// rebuilt its output.
    fn on_context_change(&self, event: &ContextEvent) -> OverlayResult<bool>;
}

/// Proof of one subscription; consumed by [`ChangeNotifier::unsubscribe`] so a
/// subscription can be released only once.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the token makes the subscription impossible to release"]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Outcome of delivering one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub redrawn: usize,
    pub errors: Vec<OverlayError>,
}

impl DispatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Synchronous listener registry.
///
/// Listeners are held weakly; delivery happens on the caller's thread, in
/// subscription order, with no registry borrow held during callbacks so a
/// listener may unsubscribe (or be dropped) while an event is in flight.
#[derive(Default)]
pub struct ChangeNotifier {
    next_token: Cell<u64>,
    listeners: RefCell<IndexMap<u64, Weak<dyn ContextListener>>>,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Weak<dyn ContextListener>) -> SubscriptionToken {
        let id = self.next_token.get();
        self.next_token.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        SubscriptionToken(id)
    }

    /// Releases a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.listeners.borrow_mut().shift_remove(&token.0).is_some()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn notify(&self, event: &ContextEvent) -> DispatchReport {
        let snapshot: Vec<(u64, Weak<dyn ContextListener>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();

        let mut report = DispatchReport::default();
        for (id, listener) in snapshot {
            let Some(listener) = listener.upgrade() else {
                self.listeners.borrow_mut().shift_remove(&id);
                continue;
            };
            if !self.listeners.borrow().contains_key(&id) {
                continue;
            }
            report.delivered += 1;
            match listener.on_context_change(event) {
                Ok(true) => report.redrawn += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        listener = listener.listener_name(),
                        error = %err,
                        "context listener failed"
                    );
                    report.errors.push(err);
                }
            }
        }
        report
    }
}

/// Shared state every overlay of one plot reads from.
///
/// The context owns the current selection and clustering, exposes the record
/// store, and notifies listeners after each change.
pub struct VisualizerContext {
    database: Rc<dyn RecordStore>,
    selection: RefCell<Option<SelectionContext>>,
    clustering: RefCell<Option<Rc<Clustering>>>,
    notifier: ChangeNotifier,
}

impl VisualizerContext {
    #[must_use]
    pub fn new(database: Rc<dyn RecordStore>) -> Rc<Self> {
        Rc::new(Self {
            database,
            selection: RefCell::new(None),
            clustering: RefCell::new(None),
            notifier: ChangeNotifier::new(),
        })
    }

    #[must_use]
    pub fn database(&self) -> &dyn RecordStore {
        self.database.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionContext> {
        self.selection.borrow().clone()
    }

    #[must_use]
    pub fn clustering(&self) -> Option<Rc<Clustering>> {
        self.clustering.borrow().clone()
    }

    #[must_use]
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Replaces the selection and notifies listeners with
    /// [`ContextEvent::SelectionChanged`].
    ///
    /// Range selections must cover exactly the database dimensionality.
    pub fn set_selection(
        &self,
        selection: Option<SelectionContext>,
    ) -> OverlayResult<DispatchReport> {
        if let Some(ranges) = selection.as_ref().and_then(SelectionContext::as_ranges) {
            let expected = self.database.dimensionality();
            if ranges.dimensionality() != expected {
                return Err(OverlayError::InvalidData(format!(
                    "range selection covers {} dimensions, database has {expected}",
                    ranges.dimensionality()
                )));
            }
        }
        debug!(present = selection.is_some(), "selection changed");
        *self.selection.borrow_mut() = selection;
        Ok(self.notify(&ContextEvent::SelectionChanged))
    }

    /// Publishes a clustering result and notifies listeners with
    /// [`ContextEvent::ClusteringChanged`].
    pub fn set_clustering(&self, clustering: Option<Clustering>) -> DispatchReport {
        *self.clustering.borrow_mut() = clustering.map(Rc::new);
        self.notify(&ContextEvent::ClusteringChanged)
    }

    /// Signals a generic change (viewport, projection) to every listener.
    pub fn request_redraw(&self) -> DispatchReport {
        self.notify(&ContextEvent::Redraw)
    }

    pub fn notify(&self, event: &ContextEvent) -> DispatchReport {
        self.notifier.notify(event)
    }
}
