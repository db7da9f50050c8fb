use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{OverlayError, OverlayResult};
use crate::style::StyleClass;

/// Handle passed explicitly to every visualization drawing into one plot.
pub type SharedStyleRegistry = Rc<RefCell<StyleRegistry>>;

/// Result of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Registration {
    Inserted,
    /// An identical definition already existed.
    AlreadyPresent,
    /// A different definition already existed and was kept.
    Conflicted,
}

/// Record of one rejected definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConflictEvent {
    pub existing: StyleClass,
    pub rejected: StyleClass,
}

/// Deduplicating store of style definitions for one plot.
///
/// The first definition of a name wins; later identical definitions are
/// no-ops and later different ones are recorded as conflicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRegistry {
    classes: IndexMap<String, StyleClass>,
    conflicts: Vec<StyleConflictEvent>,
}

impl StyleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedStyleRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StyleClass> {
        self.classes.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &StyleClass> {
        self.classes.values()
    }

    #[must_use]
    pub fn conflicts(&self) -> &[StyleConflictEvent] {
        &self.conflicts
    }

    /// Adds `class`, failing with [`OverlayError::StyleConflict`] when the name
    /// is taken by a different definition. The conflict is recorded either way.
    pub fn add_class(&mut self, class: StyleClass) -> OverlayResult<Registration> {
        match self.classes.get(class.name()) {
            None => {
                trace!(name = class.name(), "register style class");
                self.classes.insert(class.name().to_owned(), class);
                Ok(Registration::Inserted)
            }
            Some(existing) if *existing == class => Ok(Registration::AlreadyPresent),
            Some(existing) => {
                let name = class.name().to_owned();
                self.conflicts.push(StyleConflictEvent {
                    existing: existing.clone(),
                    rejected: class,
                });
                Err(OverlayError::StyleConflict { name })
            }
        }
    }

    /// Like [`StyleRegistry::add_class`], but a conflict is logged and the
    /// pre-existing definition kept.
    pub fn register(&mut self, class: StyleClass) -> Registration {
        match self.add_class(class) {
            Ok(registration) => registration,
            Err(err) => {
                warn!(error = %err, "keeping existing style definition");
                Registration::Conflicted
            }
        }
    }

    /// All classes as a CSS stylesheet, in registration order.
    #[must_use]
    pub fn to_stylesheet(&self) -> String {
        self.classes
            .values()
            .map(StyleClass::to_css_rule)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
