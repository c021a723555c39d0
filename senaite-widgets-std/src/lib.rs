//! # senaite-widgets-std
//!
//! Standard implementations for SENAITE form widget dispatch.
//!
//! This crate provides:
//! - **Renderer registry**: [`RendererRegistry`], [`RendererRegistryBuilder`]
//! - **Controller registry**: [`ControllerRegistry`]
//! - **Identifier resolution**: [`IdentityResolver`], [`IdentitySource`]
//! - **Dispatch**: [`Dispatcher`], [`DispatchReport`]
//! - **Observers**: [`DispatchObserver`], [`LoggingObserver`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use senaite_widgets_core;

pub mod controllers;
pub mod dispatch;
pub mod identity;
pub mod observers;
pub mod registry;
pub mod testing;

pub use controllers::ControllerRegistry;
pub use dispatch::{Diagnostic, DispatchReport, Dispatcher, OverlapPolicy, Rendered};
pub use identity::{IdentityResolver, IdentitySource};
pub use observers::{DispatchObserver, LoggingObserver};
pub use registry::{RegistryEntry, RendererRegistry, RendererRegistryBuilder};
