//! Error types for widget dispatch.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WidgetsError`] - Top-level error type
//! - [`ConfigError`] - Renderer registry configuration mistakes
//! - [`DispatchError`] - Errors that abort a dispatch call
//! - [`IdentityError`] - Recoverable identifier resolution failures
//! - [`LifecycleError`] - Page lifecycle ordering errors
//! - [`SelectorError`] - Selector parse failures
//! - [`DomError`] - Document tree manipulation errors

use crate::dom::NodeId;
use thiserror::Error;

/// A boxed error type for factory-internal failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all widget operations.
#[derive(Error, Debug)]
pub enum WidgetsError {
    /// The renderer registry is misconfigured.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A dispatch call was aborted.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A lifecycle trigger fired out of order.
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// The document tree rejected an operation.
    #[error("document error: {0}")]
    Dom(#[from] DomError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

impl From<BoxError> for WidgetsError {
    fn from(err: BoxError) -> Self {
        WidgetsError::Custom(err)
    }
}

/// Errors in the renderer registry declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A selector could not be parsed.
    #[error("invalid selector `{selector}`: {source}")]
    InvalidSelector {
        /// The offending selector text.
        selector: String,
        /// Why parsing failed.
        #[source]
        source: SelectorError,
    },
}

/// Errors that abort a dispatch call.
///
/// Elements processed before the error keep their controllers.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A registry entry with matching elements has no factory bound.
    #[error("widget renderer required for selector `{selector}`")]
    MissingFactory {
        /// Selector of the unbound entry.
        selector: String,
    },

    /// A factory failed while rendering an element.
    #[error("widget renderer for selector `{selector}` failed on element {element}")]
    Factory {
        /// Selector of the entry whose factory failed.
        selector: String,
        /// The element being rendered.
        element: NodeId,
        /// The factory's own error, untouched.
        #[source]
        source: BoxError,
    },

    /// An element matched more than one registry entry while overlaps are rejected.
    #[error("element {element} matches both `{first}` and `{second}`")]
    OverlappingSelectors {
        /// The element matched twice.
        element: NodeId,
        /// Selector of the earlier entry.
        first: String,
        /// Selector of the later entry.
        second: String,
    },
}

/// Recoverable failures while resolving an element's identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// `data-id` is not valid JSON.
    #[error("malformed data-id `{raw}`: {reason}")]
    MalformedDataId {
        /// The attribute content.
        raw: String,
        /// Parser message.
        reason: String,
    },

    /// `data-id` decoded to a JSON value that cannot name a widget.
    #[error("data-id `{raw}` must decode to a string or a number")]
    UnsupportedDataId {
        /// The attribute content.
        raw: String,
    },
}

/// Lifecycle triggers fired out of order.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The ready trigger already fired for this page.
    #[error("ready trigger already fired")]
    AlreadyReady,

    /// A row was added before the page became ready.
    #[error("row added before the page was ready")]
    NotReady,

    /// The dispatch triggered by the event failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors produced while parsing a selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector is empty or blank.
    #[error("selector is empty")]
    Empty,

    /// The selector ended where more input was required.
    #[error("unexpected end of selector")]
    UnexpectedEnd,

    /// A character that is not valid at this position.
    #[error("unexpected `{found}` at offset {position}")]
    UnexpectedChar {
        /// The character found.
        found: char,
        /// Byte offset in the selector.
        position: usize,
    },

    /// A combinator with nothing on its right-hand side.
    #[error("combinator at offset {position} has no right-hand side")]
    DanglingCombinator {
        /// Byte offset in the selector.
        position: usize,
    },

    /// An attribute selector without its closing bracket.
    #[error("attribute selector opened at offset {position} is not closed")]
    UnterminatedAttribute {
        /// Byte offset of the opening bracket.
        position: usize,
    },

    /// A quoted value without its closing quote.
    #[error("string opened at offset {position} is not closed")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
}

/// Errors from document tree manipulation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomError {
    /// The id does not name a node of this document.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node is not an element.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// The insertion would create a cycle or put children under a text node.
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest {
        /// The intended parent.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },
}
