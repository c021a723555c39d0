//! Controller registry: the published widget namespace.
//!
//! Controllers are published under their element's [`Identifier`] so that
//! scripts outside the dispatcher (and tests) can reach a widget without
//! querying the document again. Writes overwrite; there is no removal.

use senaite_widgets_core::{Controller, Identifier, downcast_controller};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Identifier to controller mapping shared by the dispatcher and its readers.
///
/// # Example
/// ```ignore
/// let controllers = Arc::new(ControllerRegistry::new());
/// // ... dispatch ...
/// let phone = controllers.get_as::<PhoneController>("phone-1");
/// ```
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: RwLock<HashMap<Identifier, Arc<dyn Controller>>>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a controller, returning the one it replaced.
    pub fn set(
        &self,
        id: impl Into<Identifier>,
        controller: Arc<dyn Controller>,
    ) -> Option<Arc<dyn Controller>> {
        self.controllers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), controller)
    }

    /// Look up a controller.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Controller>> {
        self.controllers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Look up a controller as its concrete type.
    pub fn get_as<T: Controller>(&self, id: &str) -> Option<Arc<T>> {
        downcast_controller(self.get(id)?)
    }

    /// Whether a controller is published under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.controllers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Number of published controllers.
    pub fn len(&self) -> usize {
        self.controllers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing was published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All published identifiers, sorted.
    pub fn ids(&self) -> Vec<Identifier> {
        let mut ids: Vec<_> = self
            .controllers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
