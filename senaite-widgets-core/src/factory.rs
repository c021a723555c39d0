//! # Factory and Controller
//!
//! A [`Factory`] turns one matched element into a live [`Controller`]. The
//! dispatcher owns no knowledge of what a controller does; it only stores the
//! returned object so other parts of the page can look it up later.
//!
//! # Factory Contract
//!
//! - **Synchronous**: the controller is returned before the dispatcher moves
//!   on. Deferred setup (timers, network) stays private to the controller.
//! - **Re-entrant**: a factory may run again over an element it already
//!   enhanced (repeated dispatch over the same root). It must leave the
//!   element in a consistent state when that happens.
//! - **Local**: a factory may mutate the document, but only below or on the
//!   element it was given.
//!
//! Closures with the signature `Fn(&mut Document, NodeId) -> Result<Arc<dyn
//! Controller>, BoxError>` implement [`Factory`] directly.

use crate::{
    dom::{Document, NodeId},
    error::BoxError,
};
use std::{any::Any, fmt::Debug, sync::Arc};

/// Upcasting helper so controllers can be recovered as concrete types.
pub trait AsAny: Any + Send + Sync {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Arc<dyn Any>`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// The live object behind an enhanced element.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a widget `Controller`",
    label = "missing `Controller` implementation",
    note = "Controllers must report the element they are mounted on."
)]
pub trait Controller: AsAny + Debug {
    /// The element this controller is mounted on.
    fn element(&self) -> NodeId;

    /// Short name of the widget kind, used in diagnostics.
    fn kind(&self) -> &str;
}

/// Builds a controller for a matched element.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a widget `Factory`",
    label = "missing `Factory` implementation",
    note = "Implement `Factory::create` or pass a closure `Fn(&mut Document, NodeId) -> Result<Arc<dyn Controller>, BoxError>`."
)]
pub trait Factory: Send + Sync + 'static {
    /// Render the element and return its controller.
    fn create(&self, document: &mut Document, element: NodeId)
    -> Result<Arc<dyn Controller>, BoxError>;
}

impl<F> Factory for F
where
    F: Fn(&mut Document, NodeId) -> Result<Arc<dyn Controller>, BoxError> + Send + Sync + 'static,
{
    fn create(
        &self,
        document: &mut Document,
        element: NodeId,
    ) -> Result<Arc<dyn Controller>, BoxError> {
        (self)(document, element)
    }
}

/// Recover a concrete controller type from a shared handle.
pub fn downcast_controller<T: Controller>(controller: Arc<dyn Controller>) -> Option<Arc<T>> {
    AsAny::into_any(controller).downcast::<T>().ok()
}
