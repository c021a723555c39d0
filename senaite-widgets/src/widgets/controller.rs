use super::WidgetKind;
use crate::WidgetTable;
use senaite_widgets_core::{BoxError, Controller, Document, DomError, NodeId};
use std::sync::Arc;

/// Attribute marking an element as rendered, holding the widget kind name.
pub const RENDERED_ATTRIBUTE: &str = "data-senaite-widget";

/// Controller mounted on a SENAITE widget element.
///
/// The interactive behaviour lives client-side; this controller carries what
/// the page needs to find and address the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetController {
    kind: WidgetKind,
    element: NodeId,
    field: Option<String>,
    remounted: bool,
}

impl WidgetController {
    /// The widget kind.
    pub fn widget_kind(&self) -> WidgetKind {
        self.kind
    }

    /// The form field name (`name` attribute) of the element, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Whether the element was already rendered as this kind before.
    pub fn remounted(&self) -> bool {
        self.remounted
    }
}

impl Controller for WidgetController {
    fn element(&self) -> NodeId {
        self.element
    }

    fn kind(&self) -> &str {
        self.kind.name()
    }
}

/// Mount `kind` on `element`.
///
/// Rendering an element twice leaves a single marker and yields a controller
/// flagged as remounted.
pub(crate) fn mount(
    document: &mut Document,
    element: NodeId,
    kind: WidgetKind,
) -> Result<Arc<dyn Controller>, BoxError> {
    let data = document
        .element(element)
        .ok_or(DomError::NotAnElement(element))?;
    let field = data.attribute("name").map(str::to_string);
    let remounted = data.attribute(RENDERED_ATTRIBUTE) == Some(kind.name());

    document.set_attribute(element, RENDERED_ATTRIBUTE, kind.name())?;

    Ok(Arc::new(WidgetController {
        kind,
        element,
        field,
        remounted,
    }))
}
