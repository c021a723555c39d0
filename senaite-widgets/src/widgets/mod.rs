//! The SENAITE widget kinds.
//!
//! One variant per widget family. The table below is the whole registry: its
//! order is the dispatch order, and adding a widget kind means adding a
//! variant with its selector and factory.

mod controller;
mod factories;

pub use controller::{RENDERED_ATTRIBUTE, WidgetController};
pub use factories::{
    AddressFactory, PhoneFactory, QuerySelectFactory, RichTextFactory, UidReferenceFactory,
};

use senaite_widgets_macros::WidgetTable;

/// Widget families known to the page loader, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WidgetTable)]
pub enum WidgetKind {
    /// Searchable select backed by a remote query.
    #[widget(selector = ".senaite-queryselect-widget-input", factory = QuerySelectFactory)]
    QuerySelect,

    /// Reference field pointing at other objects by UID.
    #[widget(selector = ".senaite-uidreference-widget-input", factory = UidReferenceFactory)]
    UidReference,

    /// Structured postal address entry.
    #[widget(selector = ".senaite-address-widget-input", factory = AddressFactory)]
    Address,

    /// Phone number entry with country prefix.
    #[widget(selector = ".senaite-phone-widget-input", factory = PhoneFactory)]
    Phone,

    /// TinyMCE rich-text editor.
    #[widget(
        selector = "textarea.mce_editable,div.ArchetypesRichWidget textarea,textarea[name='form.widgets.IRichTextBehavior.text'],textarea.richTextWidget",
        factory = RichTextFactory,
        name = "tinymce"
    )]
    RichText,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WidgetTable;

    #[test]
    fn test_table_order() {
        assert_eq!(
            WidgetKind::kinds(),
            &[
                WidgetKind::QuerySelect,
                WidgetKind::UidReference,
                WidgetKind::Address,
                WidgetKind::Phone,
                WidgetKind::RichText,
            ]
        );
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = WidgetKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec!["query_select", "uid_reference", "address", "phone", "tinymce"]
        );
        assert_eq!(WidgetKind::from_name("phone"), Some(WidgetKind::Phone));
        assert_eq!(WidgetKind::from_name("rich_text"), None);
    }

    #[test]
    fn test_rich_text_covers_every_markup_shape() {
        use senaite_widgets_core::{Document, SelectorList, element};

        let mut doc = Document::new();
        let root = doc.root();
        let mut expected = vec![
            doc.append(root, element("textarea").class("mce_editable")).unwrap(),
            doc.append(root, element("textarea").class("richTextWidget")).unwrap(),
            doc.append(
                root,
                element("textarea").attr("name", "form.widgets.IRichTextBehavior.text"),
            )
            .unwrap(),
        ];
        let wrapper = doc
            .append(root, element("div").class("ArchetypesRichWidget"))
            .unwrap();
        expected.push(doc.append(wrapper, element("textarea")).unwrap());
        doc.append(root, element("textarea").class("plain")).unwrap();
        doc.append(root, element("input").class("mce_editable")).unwrap();

        let selector = SelectorList::parse(WidgetKind::RichText.selector()).unwrap();
        assert_eq!(selector.len(), 4);
        assert_eq!(selector.query_all(&doc, root), expected);
    }

    #[test]
    fn test_every_selector_parses() {
        for kind in WidgetKind::ALL {
            assert!(
                senaite_widgets_core::SelectorList::parse(kind.selector()).is_ok(),
                "{kind:?}"
            );
        }
    }
}
