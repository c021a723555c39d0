#![allow(dead_code)]

use senaite_widgets::{
    ControllerRegistry, Dispatcher, Document, NodeId, RendererRegistry, SelectorList, element,
    testing::RecordingFactory,
};
use std::sync::Arc;

// ============================================================================
// Documents
// ============================================================================

/// A form with one phone widget identified by `id`.
pub fn phone_form() -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let form = doc.append(root, element("form")).unwrap();
    let phone = doc
        .append(
            form,
            element("div").class("senaite-phone-widget-input").id("phone-1"),
        )
        .unwrap();
    (doc, phone)
}

/// A data grid with `rows` rows, each holding one `.w` input with
/// id `w-<n>`. Returns the document and the table body.
pub fn grid(rows: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc
        .append(root, element("table").child(element("tbody")))
        .unwrap();
    let body = doc.children(body)[0];
    for n in 0..rows {
        add_row(&mut doc, body, n);
    }
    (doc, body)
}

/// Insert a grid row holding one `.w` input with id `w-<n>`.
pub fn add_row(doc: &mut Document, body: NodeId, n: usize) -> NodeId {
    doc.append(
        body,
        element("tr").child(
            element("td").child(element("input").class("w").id(format!("w-{n}"))),
        ),
    )
    .unwrap()
}

/// The single node matching `selector`.
pub fn find(doc: &Document, selector: &str) -> NodeId {
    SelectorList::parse(selector)
        .unwrap()
        .query(doc, doc.root())
        .unwrap()
}

// ============================================================================
// Dispatchers
// ============================================================================

/// A dispatcher with one recording factory per selector.
pub fn recording_dispatcher(selectors: &[&str]) -> (Dispatcher, Vec<RecordingFactory>) {
    let mut builder = RendererRegistry::builder();
    let mut factories = Vec::new();
    for selector in selectors {
        let factory = RecordingFactory::new(selector.trim_start_matches('.'));
        builder.register_mut(*selector, factory.clone());
        factories.push(factory);
    }
    let registry = Arc::new(builder.build().unwrap());
    let dispatcher = Dispatcher::new(registry, Arc::new(ControllerRegistry::new()));
    (dispatcher, factories)
}
