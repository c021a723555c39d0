//! # senaite-widgets-core
//!
//! Core traits and primitives for SENAITE form widget dispatch.
//!
//! This crate has minimal dependencies and is meant to be imported by widget
//! renderers that only need to satisfy the [`Factory`] contract.
//!
//! # Building Blocks
//!
//! ## Document ([`Document`], [`NodeId`])
//!
//! An arena element tree standing in for the server-rendered page. Nodes are
//! addressed by stable ids, subtrees are appended with [`ElementBuilder`].
//!
//! ## Selectors ([`SelectorList`])
//!
//! The CSS selector subset used by widget markup: class markers, attribute
//! tests, descendant and child combinators, selector lists.
//!
//! ## Factory / Controller
//!
//! A [`Factory`] renders one element and hands back a [`Controller`]. The
//! dispatcher publishes controllers under an [`Identifier`].
//!
//! ## Widget Tables ([`WidgetTable`])
//!
//! A closed, compile-time checked set of widget kinds.
//!
//! # Error Types
//!
//! - [`WidgetsError`] - Top-level error type
//! - [`DispatchError`] - Errors aborting a dispatch
//! - [`ConfigError`] - Registry declaration errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod dom;
mod error;
mod factory;
mod identifier;
pub mod selector;
mod table;

// Re-exports
pub use dom::{Document, ElementBuilder, ElementData, NodeData, NodeId, element};
pub use error::{
    BoxError, ConfigError, DispatchError, DomError, IdentityError, LifecycleError, SelectorError,
    WidgetsError,
};
pub use factory::{AsAny, Controller, Factory, downcast_controller};
pub use identifier::Identifier;
pub use selector::SelectorList;
pub use table::WidgetTable;
