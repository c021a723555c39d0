//! `#[derive(WidgetTable)]` on a custom enum.

use senaite_widgets::{
    BoxError, Controller, Document, Factory, NodeId, RendererRegistry, WidgetKind, WidgetTable,
    WidgetsConfig, element,
    lifecycle::Lifecycle,
    testing::StubController,
};
use std::sync::Arc;

#[derive(Debug, Default)]
struct ColorFactory;

impl Factory for ColorFactory {
    fn create(&self, document: &mut Document, element: NodeId) -> Result<Arc<dyn Controller>, BoxError> {
        document.set_attribute(element, "data-color", "ready")?;
        Ok(StubController::shared(element, "color", 0))
    }
}

#[derive(Debug, Default)]
struct DateFactory;

impl Factory for DateFactory {
    fn create(&self, _document: &mut Document, element: NodeId) -> Result<Arc<dyn Controller>, BoxError> {
        Ok(StubController::shared(element, "date", 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WidgetTable)]
enum LabWidget {
    #[widget(selector = "input.lims-color", factory = ColorFactory)]
    ColorPicker,
    #[widget(selector = "input[type=date]", factory = DateFactory, name = "calendar")]
    Date,
}

#[test]
fn test_table_declaration_order() {
    assert_eq!(LabWidget::ALL, &[LabWidget::ColorPicker, LabWidget::Date]);
    assert_eq!(LabWidget::kinds(), LabWidget::ALL);
}

#[test]
fn test_table_names() {
    assert_eq!(LabWidget::ColorPicker.name(), "color_picker");
    assert_eq!(LabWidget::Date.name(), "calendar");
    assert_eq!(LabWidget::from_name("calendar"), Some(LabWidget::Date));
    assert_eq!(LabWidget::from_name("date"), None);
}

#[test]
fn test_registry_from_table() {
    let registry = RendererRegistry::from_table::<LabWidget>().unwrap();
    let labels: Vec<_> = registry.iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec![Some("color_picker"), Some("calendar")]);
    assert!(registry.iter().all(|e| e.is_bound()));
    assert_eq!(registry.get(1).unwrap().source(), "input[type=date]");
}

#[test]
fn test_lifecycle_over_custom_table() {
    let mut doc = Document::new();
    let root = doc.root();
    let color = doc
        .append(root, element("input").class("lims-color").id("tint"))
        .unwrap();
    doc.append(root, element("input").attr("type", "date").id("sampled"))
        .unwrap();

    let mut lifecycle = Lifecycle::from_table::<LabWidget>(WidgetsConfig::default()).unwrap();
    lifecycle.ready(&mut doc).unwrap();

    let controllers = lifecycle.controllers();
    assert_eq!(controllers.get("tint").unwrap().kind(), "color");
    assert_eq!(controllers.get("sampled").unwrap().kind(), "date");
    assert_eq!(doc.attribute(color, "data-color"), Some("ready"));
}

#[test]
fn test_builtin_table_registry() {
    let registry = RendererRegistry::from_table::<WidgetKind>().unwrap();
    let sources: Vec<_> = registry.iter().map(|e| e.source().to_string()).collect();
    assert_eq!(sources.len(), 5);
    assert_eq!(sources[3], ".senaite-phone-widget-input");
    assert_eq!(registry.get(4).unwrap().selector().len(), 4);
}
