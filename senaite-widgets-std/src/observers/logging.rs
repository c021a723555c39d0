//! Logging observer for dispatch tracing.

use super::DispatchObserver;
use crate::dispatch::{DispatchReport, Rendered};
use senaite_widgets_core::NodeId;
#[cfg(feature = "tracing")]
use senaite_widgets_core::Controller;

/// An observer that logs each dispatch step.
///
/// It uses the `tracing` crate when the `tracing` feature is enabled and is a
/// no-op otherwise. Unresolved identifiers are already reported at `warn`
/// level by the dispatcher; this observer adds the `debug` level trail.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(registry, controllers)
///     .with_observer(LoggingObserver::named("datagrid"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingObserver {
    name: &'static str,
}

impl LoggingObserver {
    /// Create a new `LoggingObserver` with a default name.
    pub fn new() -> Self {
        Self { name: "widgets" }
    }

    /// Create a new `LoggingObserver` with a custom name.
    ///
    /// The name is used in log messages to tell dispatch sources apart.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchObserver for LoggingObserver {
    fn on_dispatch(&self, root: NodeId) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(observer = %self.name, %root, "Rendering widgets");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = root;
        }
    }

    fn on_rendered(&self, rendered: &Rendered) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                observer = %self.name,
                selector = %rendered.selector,
                element = %rendered.element,
                identifier = ?rendered.identifier,
                kind = rendered.controller.kind(),
                "Widget rendered"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = rendered;
        }
    }

    fn on_complete(&self, report: &DispatchReport) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                observer = %self.name,
                rendered = report.rendered().len(),
                diagnostics = report.diagnostics().len(),
                "Widget dispatch complete"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = report;
        }
    }
}
