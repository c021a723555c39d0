//! Testing utilities for widget dispatch.
//!
//! This module provides helpers to exercise registries and dispatchers
//! without real widget renderers.
//!
//! # Features
//!
//! - [`StubController`]: A controller that only remembers its element
//! - [`RecordingFactory`]: A factory that records every element it renders
//! - [`FailingFactory`]: A factory that always fails
//! - [`RecordingObserver`]: An observer that records dispatch steps

use crate::{
    dispatch::{Diagnostic, DispatchReport, Rendered},
    observers::DispatchObserver,
};
use senaite_widgets_core::{BoxError, Controller, Document, Factory, NodeId};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Stub Controller
// ============================================================================

/// A controller with no behaviour.
///
/// `serial` tells apart controllers created for the same element by
/// successive dispatch calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubController {
    element: NodeId,
    kind: String,
    serial: usize,
}

impl StubController {
    /// Create a stub controller.
    pub fn new(element: NodeId, kind: impl Into<String>, serial: usize) -> Self {
        Self {
            element,
            kind: kind.into(),
            serial,
        }
    }

    /// Create a shared stub controller.
    pub fn shared(element: NodeId, kind: impl Into<String>, serial: usize) -> Arc<dyn Controller> {
        Arc::new(Self::new(element, kind, serial))
    }

    /// Creation counter value of the factory that built this controller.
    pub fn serial(&self) -> usize {
        self.serial
    }
}

impl Controller for StubController {
    fn element(&self) -> NodeId {
        self.element
    }

    fn kind(&self) -> &str {
        &self.kind
    }
}

// ============================================================================
// Recording Factory
// ============================================================================

/// A factory that records every element it renders.
///
/// Clones share their records, so keep a clone to inspect after handing the
/// factory to a registry.
///
/// # Example
///
/// ```rust,ignore
/// let phone = RecordingFactory::new("phone");
/// let registry = RendererRegistryBuilder::new()
///     .register(".phone", phone.clone())
///     .build()?;
///
/// dispatcher.dispatch(&mut doc, None)?;
/// assert_eq!(phone.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingFactory {
    kind: String,
    calls: Arc<Mutex<Vec<NodeId>>>,
    serial: Arc<AtomicUsize>,
}

impl RecordingFactory {
    /// Create a factory producing [`StubController`]s of `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            serial: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Elements rendered so far, in call order.
    pub fn calls(&self) -> Vec<NodeId> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of factory calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of calls for one element.
    pub fn count_for(&self, element: NodeId) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&&e| e == element)
            .count()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Factory for RecordingFactory {
    fn create(
        &self,
        _document: &mut Document,
        element: NodeId,
    ) -> Result<Arc<dyn Controller>, BoxError> {
        self.calls.lock().unwrap().push(element);
        let serial = self.serial.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StubController::shared(element, self.kind.clone(), serial))
    }
}

// ============================================================================
// Failing Factory
// ============================================================================

/// A factory that fails on every element.
#[derive(Debug, Clone)]
pub struct FailingFactory {
    message: String,
}

impl FailingFactory {
    /// Create a factory failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Factory for FailingFactory {
    fn create(
        &self,
        _document: &mut Document,
        _element: NodeId,
    ) -> Result<Arc<dyn Controller>, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// An observer that records what the dispatcher reports.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    dispatches: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
    rendered: Arc<Mutex<Vec<NodeId>>>,
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dispatch calls started.
    pub fn dispatches(&self) -> usize {
        self.dispatches.load(Ordering::SeqCst)
    }

    /// Number of dispatch calls finished successfully.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Rendered elements in call order.
    pub fn rendered(&self) -> Vec<NodeId> {
        self.rendered.lock().unwrap().clone()
    }

    /// Recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }
}

impl DispatchObserver for RecordingObserver {
    fn on_dispatch(&self, _root: NodeId) {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
    }

    fn on_rendered(&self, rendered: &Rendered) {
        self.rendered.lock().unwrap().push(rendered.element);
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.clone());
    }

    fn on_complete(&self, _report: &DispatchReport) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}
