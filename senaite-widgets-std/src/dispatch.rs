//! # Subtree Dispatcher
//!
//! Walks the renderer registry over a subtree of the document and publishes
//! every controller the factories return.
//!
//! # Dispatch Order
//!
//! 1. Registry entries in declaration order.
//! 2. Within an entry, matching elements in document order. The match list
//!    is taken when the entry's turn comes, so elements inserted by an
//!    earlier entry's factory are visible to later entries.
//! 3. After each factory call the identifier is resolved and the controller
//!    published before the next element is rendered.
//!
//! # Failure
//!
//! A missing factory or a failing factory aborts the call. Everything
//! rendered up to that point stays rendered and published. Identifier
//! problems never abort; they end up in [`DispatchReport::diagnostics`].

use crate::{
    controllers::ControllerRegistry,
    identity::IdentityResolver,
    observers::DispatchObserver,
    registry::RendererRegistry,
};
use senaite_widgets_core::{
    Controller, DispatchError, Document, IdentityError, Identifier, NodeId,
};
use std::{collections::HashMap, sync::Arc};

/// What to do with an element matched by more than one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Render the element once per matching entry.
    #[default]
    Allow,
    /// Refuse the whole dispatch before any factory runs.
    Reject,
}

/// One factory invocation.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Index of the registry entry.
    pub entry: usize,
    /// Selector of the registry entry.
    pub selector: String,
    /// The rendered element.
    pub element: NodeId,
    /// Where the controller was published, if anywhere.
    pub identifier: Option<Identifier>,
    /// The controller returned by the factory.
    pub controller: Arc<dyn Controller>,
}

/// A recoverable problem met during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The element carries neither `id` nor `data-id`; its controller is
    /// not published.
    Unidentified {
        /// The rendered element.
        element: NodeId,
        /// Selector that matched it.
        selector: String,
    },
    /// The element's identifier could not be decoded; its controller is not
    /// published.
    InvalidIdentity {
        /// The rendered element.
        element: NodeId,
        /// Selector that matched it.
        selector: String,
        /// Decoding failure.
        error: IdentityError,
    },
}

impl Diagnostic {
    /// The element the diagnostic is about.
    pub fn element(&self) -> NodeId {
        match self {
            Diagnostic::Unidentified { element, .. } | Diagnostic::InvalidIdentity { element, .. } => {
                *element
            }
        }
    }
}

/// Outcome of a successful dispatch call.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    root: NodeId,
    rendered: Vec<Rendered>,
    diagnostics: Vec<Diagnostic>,
}

impl DispatchReport {
    fn new(root: NodeId) -> Self {
        Self {
            root,
            rendered: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The root actually scanned.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Factory invocations in call order.
    pub fn rendered(&self) -> &[Rendered] {
        &self.rendered
    }

    /// Recoverable problems in call order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Identifiers published by this call, in call order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.rendered.iter().filter_map(|r| r.identifier.as_ref())
    }

    /// Whether no factory ran.
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

/// Applies the renderer registry to document subtrees.
pub struct Dispatcher {
    registry: Arc<RendererRegistry>,
    controllers: Arc<ControllerRegistry>,
    resolver: IdentityResolver,
    overlap: OverlapPolicy,
    observers: Vec<Arc<dyn DispatchObserver>>,
}

impl Dispatcher {
    /// Create a dispatcher publishing into `controllers`.
    pub fn new(registry: Arc<RendererRegistry>, controllers: Arc<ControllerRegistry>) -> Self {
        Self {
            registry,
            controllers,
            resolver: IdentityResolver::default(),
            overlap: OverlapPolicy::default(),
            observers: Vec::new(),
        }
    }

    /// Replace the identifier resolution strategy.
    pub fn with_resolver(mut self, resolver: IdentityResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the overlap policy.
    pub fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Attach an observer.
    pub fn with_observer<O: DispatchObserver>(mut self, observer: O) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// The renderer registry.
    pub fn registry(&self) -> &Arc<RendererRegistry> {
        &self.registry
    }

    /// The controller registry this dispatcher publishes into.
    pub fn controllers(&self) -> &Arc<ControllerRegistry> {
        &self.controllers
    }

    /// The overlap policy.
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Render every registered widget below `root`.
    ///
    /// `None`, or an id that is not a node of `document`, scans the whole
    /// document. The root itself is never rendered, only its descendants.
    pub fn dispatch(
        &self,
        document: &mut Document,
        root: Option<NodeId>,
    ) -> Result<DispatchReport, DispatchError> {
        let root = match root {
            Some(node) if document.contains(node) => node,
            _ => document.root(),
        };

        for observer in &self.observers {
            observer.on_dispatch(root);
        }

        if self.overlap == OverlapPolicy::Reject {
            self.check_overlaps(document, root)?;
        }

        let mut report = DispatchReport::new(root);

        for (index, entry) in self.registry.iter().enumerate() {
            let elements = entry.selector().query_all(document, root);
            if elements.is_empty() {
                continue;
            }

            let Some(factory) = entry.factory() else {
                return Err(DispatchError::MissingFactory {
                    selector: entry.source().to_string(),
                });
            };

            for element in elements {
                let controller = factory.create(document, element).map_err(|source| {
                    DispatchError::Factory {
                        selector: entry.source().to_string(),
                        element,
                        source,
                    }
                })?;

                let identifier = self.publish(document, element, entry.source(), &controller, &mut report);

                let rendered = Rendered {
                    entry: index,
                    selector: entry.source().to_string(),
                    element,
                    identifier,
                    controller,
                };
                for observer in &self.observers {
                    observer.on_rendered(&rendered);
                }
                report.rendered.push(rendered);
            }
        }

        for observer in &self.observers {
            observer.on_complete(&report);
        }
        Ok(report)
    }

    fn publish(
        &self,
        document: &Document,
        element: NodeId,
        selector: &str,
        controller: &Arc<dyn Controller>,
        report: &mut DispatchReport,
    ) -> Option<Identifier> {
        let resolved = match document.element(element) {
            Some(data) => self.resolver.resolve(data),
            None => Ok(None),
        };

        let diagnostic = match resolved {
            Ok(Some(id)) => {
                self.controllers.set(id.clone(), controller.clone());
                return Some(id);
            }
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %element,
                    selector,
                    kind = controller.kind(),
                    "Element has no ID set! Controller can not be accessed"
                );
                Diagnostic::Unidentified {
                    element,
                    selector: selector.to_string(),
                }
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %element,
                    selector,
                    %error,
                    "Element identifier could not be decoded! Controller can not be accessed"
                );
                Diagnostic::InvalidIdentity {
                    element,
                    selector: selector.to_string(),
                    error,
                }
            }
        };

        for observer in &self.observers {
            observer.on_diagnostic(&diagnostic);
        }
        report.diagnostics.push(diagnostic);
        None
    }

    fn check_overlaps(&self, document: &Document, root: NodeId) -> Result<(), DispatchError> {
        let mut claimed: HashMap<NodeId, &str> = HashMap::new();
        for entry in self.registry.iter() {
            for element in entry.selector().query_all(document, root) {
                if let Some(first) = claimed.insert(element, entry.source()) {
                    return Err(DispatchError::OverlappingSelectors {
                        element,
                        first: first.to_string(),
                        second: entry.source().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .field("overlap", &self.overlap)
            .field("observers", &self.observers.len())
            .finish()
    }
}
