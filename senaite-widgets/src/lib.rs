//! # senaite-widgets
//!
//! Discovers SENAITE form widgets in a document and mounts a controller on
//! each of them.
//!
//! A [`RendererRegistry`] binds CSS selectors to factories. A [`Dispatcher`]
//! walks the registry over a subtree, calls the factory for every matching
//! element and publishes the returned controller in a [`ControllerRegistry`]
//! under the element's `id` (or JSON-decoded `data-id`). [`Lifecycle`] drives
//! the dispatcher from the page triggers: once on ready over the whole
//! document, then once per inserted data grid row over that row only.
//!
//! ## Quick Start
//!
//! ```rust
//! use senaite_widgets::prelude::*;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append(root, element("div").class("senaite-phone-widget-input").id("phone-1"))
//!     .unwrap();
//!
//! let mut lifecycle = Lifecycle::new().unwrap();
//! lifecycle.ready(&mut doc).unwrap();
//!
//! let phone = lifecycle.controllers().get_as::<WidgetController>("phone-1").unwrap();
//! assert_eq!(phone.widget_kind(), WidgetKind::Phone);
//! ```
//!
//! ## Custom Tables
//!
//! ```rust
//! use senaite_widgets::{BoxError, Controller, Document, Factory, NodeId, WidgetTable};
//! use senaite_widgets::testing::StubController;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct ColorFactory;
//!
//! impl Factory for ColorFactory {
//!     fn create(&self, _: &mut Document, element: NodeId) -> Result<Arc<dyn Controller>, BoxError> {
//!         Ok(StubController::shared(element, "color", 0))
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, WidgetTable)]
//! enum Extra {
//!     #[widget(selector = ".lims-color-input", factory = ColorFactory)]
//!     Color,
//! }
//!
//! assert_eq!(Extra::Color.selector(), ".lims-color-input");
//! assert_eq!(Extra::Color.name(), "color");
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

extern crate self as senaite_widgets;

pub mod config;
pub mod lifecycle;
pub mod widgets;

pub use config::WidgetsConfig;
pub use lifecycle::{
    Lifecycle, PageEvent, PageEventReceiver, PageEventSender, PageState, RunSummary, page_channel,
};
pub use widgets::{WidgetController, WidgetKind};

pub use senaite_widgets_core::{
    // Errors
    BoxError,
    ConfigError,
    // Traits
    Controller,
    DispatchError,
    // Document model
    Document,
    DomError,
    ElementBuilder,
    ElementData,
    Factory,
    IdentityError,
    Identifier,
    LifecycleError,
    NodeId,
    SelectorError,
    SelectorList,
    WidgetTable,
    WidgetsError,
    downcast_controller,
    element,
};

pub use senaite_widgets_std::{
    ControllerRegistry, Diagnostic, DispatchObserver, DispatchReport, Dispatcher,
    IdentityResolver, IdentitySource, LoggingObserver, OverlapPolicy, RegistryEntry, Rendered,
    RendererRegistry, RendererRegistryBuilder,
};

/// Derive a compile-time widget table from an enum.
pub use senaite_widgets_macros::WidgetTable;

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use senaite_widgets_std::testing::*;
}

/// Prelude module - common imports.
///
/// ```rust
/// use senaite_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Controller, ControllerRegistry, DispatchError, Dispatcher, Document, Factory, Lifecycle,
        LifecycleError, NodeId, OverlapPolicy, PageEvent, RendererRegistry, WidgetController,
        WidgetKind, WidgetTable, WidgetsConfig, element,
    };
}
