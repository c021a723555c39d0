//! Factories for the SENAITE widget kinds.

use super::{WidgetKind, controller::mount};
use senaite_widgets_core::{BoxError, Controller, Document, Factory, NodeId};
use std::sync::Arc;

macro_rules! widget_factory {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Factory for $name {
            fn create(
                &self,
                document: &mut Document,
                element: NodeId,
            ) -> Result<Arc<dyn Controller>, BoxError> {
                mount(document, element, $kind)
            }
        }
    };
}

widget_factory!(
    /// Renders `.senaite-queryselect-widget-input` elements.
    QuerySelectFactory => WidgetKind::QuerySelect
);
widget_factory!(
    /// Renders `.senaite-uidreference-widget-input` elements.
    UidReferenceFactory => WidgetKind::UidReference
);
widget_factory!(
    /// Renders `.senaite-address-widget-input` elements.
    AddressFactory => WidgetKind::Address
);
widget_factory!(
    /// Renders `.senaite-phone-widget-input` elements.
    PhoneFactory => WidgetKind::Phone
);
widget_factory!(
    /// Renders rich-text textareas as TinyMCE editors.
    RichTextFactory => WidgetKind::RichText
);
