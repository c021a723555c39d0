//! Controller publication under `id` and `data-id`.

use senaite_widgets::{
    Controller, ControllerRegistry, Diagnostic, Dispatcher, Document, IdentityError,
    IdentityResolver, IdentitySource, RendererRegistry, element,
    testing::{RecordingFactory, StubController},
};
use std::sync::Arc;

mod common;
use common::recording_dispatcher;

#[test]
fn test_id_beats_data_id() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").id("a").data("id", "\"b\""))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    dispatcher.dispatch(&mut doc, None).unwrap();

    let controllers = dispatcher.controllers();
    assert!(controllers.contains("a"));
    assert!(!controllers.contains("b"));
    assert_eq!(controllers.len(), 1);
}

#[test]
fn test_data_id_string_is_decoded() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").data("id", "\"x\""))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    let report = dispatcher.dispatch(&mut doc, None).unwrap();

    assert!(dispatcher.controllers().contains("x"));
    assert!(!dispatcher.controllers().contains("\"x\""));
    assert_eq!(report.identifiers().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn test_data_id_number_uses_text() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").data("id", "42"))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    dispatcher.dispatch(&mut doc, None).unwrap();
    assert!(dispatcher.controllers().contains("42"));
}

#[test]
fn test_empty_id_falls_back_to_data_id() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").id("").data("id", "\"row-3\""))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    dispatcher.dispatch(&mut doc, None).unwrap();
    assert_eq!(dispatcher.controllers().ids()[0].as_str(), "row-3");
}

#[test]
fn test_malformed_data_id_is_recoverable() {
    let mut doc = Document::new();
    let root = doc.root();
    let broken = doc
        .append(root, element("input").class("w").data("id", "{not json"))
        .unwrap();
    doc.append(root, element("input").class("w").id("fine")).unwrap();
    let (dispatcher, factories) = recording_dispatcher(&[".w"]);

    let report = dispatcher.dispatch(&mut doc, None).unwrap();

    assert_eq!(factories[0].count(), 2);
    assert!(dispatcher.controllers().contains("fine"));
    assert_eq!(dispatcher.controllers().len(), 1);
    match &report.diagnostics()[..] {
        [Diagnostic::InvalidIdentity { element, error, .. }] => {
            assert_eq!(*element, broken);
            assert!(matches!(error, IdentityError::MalformedDataId { raw, .. } if raw == "{not json"));
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
}

#[test]
fn test_unsupported_data_id() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").data("id", "[1, 2]"))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    let report = dispatcher.dispatch(&mut doc, None).unwrap();
    assert!(dispatcher.controllers().is_empty());
    assert!(matches!(
        report.diagnostics()[0],
        Diagnostic::InvalidIdentity { error: IdentityError::UnsupportedDataId { .. }, .. }
    ));
}

#[test]
fn test_duplicate_identifier_last_write_wins() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").id("dup")).unwrap();
    let second = doc
        .append(root, element("input").class("w").data("id", "\"dup\""))
        .unwrap();
    let (dispatcher, _) = recording_dispatcher(&[".w"]);

    dispatcher.dispatch(&mut doc, None).unwrap();

    let controllers = dispatcher.controllers();
    assert_eq!(controllers.len(), 1);
    let stub = controllers.get_as::<StubController>("dup").unwrap();
    assert_eq!(stub.serial(), 2);
    assert_eq!(controllers.get("dup").unwrap().element(), second);
}

#[test]
fn test_custom_resolver_ignores_id() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, element("input").class("w").id("html-id").data("id", "\"uid-1\""))
        .unwrap();
    let registry = RendererRegistry::builder()
        .register(".w", RecordingFactory::new("w"))
        .build()
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(ControllerRegistry::new()))
        .with_resolver(IdentityResolver::new([IdentitySource::DataId]));

    dispatcher.dispatch(&mut doc, None).unwrap();
    assert_eq!(dispatcher.controllers().ids()[0].as_str(), "uid-1");
}
