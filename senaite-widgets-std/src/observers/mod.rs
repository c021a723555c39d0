//! Dispatch observers.
//!
//! Observers watch a dispatch without taking part in it: they cannot veto a
//! render or alter a controller. Use them for logging, metrics or test
//! assertions.

mod logging;

pub use logging::LoggingObserver;

use crate::dispatch::{Diagnostic, DispatchReport, Rendered};
use senaite_widgets_core::NodeId;

/// Callbacks invoked by the dispatcher. Every method defaults to a no-op.
pub trait DispatchObserver: Send + Sync + 'static {
    /// A dispatch call started over `root`.
    fn on_dispatch(&self, root: NodeId) {
        let _ = root;
    }

    /// A factory returned a controller.
    fn on_rendered(&self, rendered: &Rendered) {
        let _ = rendered;
    }

    /// A recoverable problem was recorded.
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        let _ = diagnostic;
    }

    /// A dispatch call finished successfully.
    fn on_complete(&self, report: &DispatchReport) {
        let _ = report;
    }
}
