//! # Document Model
//!
//! An arena-backed element tree standing in for the browser DOM.
//!
//! Nodes are addressed by [`NodeId`] handles which stay valid for the whole
//! lifetime of the [`Document`]; nodes are never freed, only detached. This
//! mirrors how widget controllers keep a reference to the element they were
//! mounted on, even after a dynamically inserted row moves around.
//!
//! Trees are built with [`ElementBuilder`]:
//!
//! ```rust,ignore
//! let mut doc = Document::new();
//! let form = doc.append(
//!     doc.root(),
//!     element("form").child(
//!         element("div")
//!             .class("senaite-phone-widget-input")
//!             .id("phone-1"),
//!     ),
//! )?;
//! ```

use crate::error::DomError;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root.
    Document,
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A text node.
    Text(String),
}

/// Tag name and attributes of an element.
///
/// Tag and attribute names are stored lowercase; attribute values as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// The lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whitespace separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether `class` contains the given class name.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Read a `data-*` attribute by its dataset key (`"id"` reads `data-id`).
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| {
                name.strip_prefix("data-")
                    .is_some_and(|rest| rest.eq_ignore_ascii_case(key))
            })
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An element tree rooted at a document node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document root.
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Whether `id` names a node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// The payload of a node.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|node| &node.data)
    }

    /// The element payload, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.node(id)? {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable element payload, if `id` is an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.data)? {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Whether `id` is an element node.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Attribute value of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Set an attribute on an element.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        element.set_attribute(name, value);
        Ok(())
    }

    /// Parent of a node; `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Direct children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Ancestors of a node, nearest first. Excludes the node itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.parent(id),
        }
    }

    /// Descendants of a node in document (pre-)order. Excludes the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants {
            document: self,
            stack,
        }
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether the node is connected to the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root() || self.is_ancestor_of(self.root(), id)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(NodeData::Text(value)) = self.node(id) {
            text.push_str(value);
        }
        for node in self.descendants(id) {
            if let Some(NodeData::Text(value)) = self.node(node) {
                text.push_str(value);
            }
        }
        text
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        for id in [parent, child] {
            if !self.contains(id) {
                return Err(DomError::UnknownNode(id));
            }
        }
        if matches!(self.node(parent), Some(NodeData::Text(_))) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if parent == child || self.is_ancestor_of(child, parent) || child == self.root() {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(child)
    }

    /// Detach a node from its parent. The subtree stays addressable.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Build a subtree from `builder` and append it under `parent`.
    ///
    /// Returns the id of the subtree's root element.
    pub fn append(&mut self, parent: NodeId, builder: ElementBuilder) -> Result<NodeId, DomError> {
        if !self.contains(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        let id = self.build(builder);
        self.append_child(parent, id)
    }

    /// Build a detached subtree from `builder`.
    pub fn build(&mut self, builder: ElementBuilder) -> NodeId {
        let ElementBuilder { data, children } = builder;
        let id = self.push(NodeData::Element(data));
        for child in children {
            let child_id = match child {
                Child::Element(element) => self.build(element),
                Child::Text(text) => self.create_text(text),
            };
            self.nodes[child_id.0].parent = Some(id);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.document.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.document.children(current).iter().rev().copied());
        Some(current)
    }
}

enum Child {
    Element(ElementBuilder),
    Text(String),
}

/// Declarative builder for element subtrees.
pub struct ElementBuilder {
    data: ElementData,
    children: Vec<Child>,
}

/// Start building an element with the given tag.
pub fn element(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder::new(tag)
}

impl ElementBuilder {
    /// Create a builder for an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            data: ElementData::new(tag),
            children: Vec::new(),
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.set_attribute(name, value);
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add a class to the `class` attribute.
    pub fn class(mut self, class: &str) -> Self {
        let classes = match self.data.attribute("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.data.set_attribute("class", classes);
        self
    }

    /// Set a `data-*` attribute.
    pub fn data(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("data-{key}"), value)
    }

    /// Append a child element.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    /// Append several child elements.
    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children
            .extend(children.into_iter().map(Child::Element));
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc
            .append(
                root,
                element("form")
                    .id("edit")
                    .child(element("input").class("a").class("b"))
                    .child(element("div").child(element("span").text("hi"))),
            )
            .unwrap();
        (doc, form)
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, form) = sample();
        let tags: Vec<_> = doc
            .descendants(form)
            .filter_map(|id| doc.element(id).map(|e| e.tag().to_string()))
            .collect();
        assert_eq!(tags, vec!["input", "div", "span"]);
    }

    #[test]
    fn test_descendants_excludes_self() {
        let (doc, form) = sample();
        assert!(doc.descendants(form).all(|id| id != form));
    }

    #[test]
    fn test_class_builder_accumulates() {
        let (doc, form) = sample();
        let input = doc.children(form)[0];
        let element = doc.element(input).unwrap();
        assert!(element.has_class("a"));
        assert!(element.has_class("b"));
        assert!(!element.has_class("c"));
    }

    #[test]
    fn test_data_attribute_lookup() {
        let mut data = ElementData::new("DIV");
        data.set_attribute("Data-Id", "\"x\"");
        assert_eq!(data.tag(), "div");
        assert_eq!(data.data("id"), Some("\"x\""));
        assert_eq!(data.attribute("data-id"), Some("\"x\""));
    }

    #[test]
    fn test_append_child_moves_node() {
        let (mut doc, form) = sample();
        let input = doc.children(form)[0];
        let div = doc.children(form)[1];
        doc.append_child(div, input).unwrap();
        assert_eq!(doc.children(form), &[div]);
        assert_eq!(doc.parent(input), Some(div));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let (mut doc, form) = sample();
        let div = doc.children(form)[1];
        let result = doc.append_child(div, form);
        assert!(matches!(result, Err(DomError::HierarchyRequest { .. })));
    }

    #[test]
    fn test_detached_nodes_stay_addressable() {
        let (mut doc, form) = sample();
        doc.detach(form);
        assert!(doc.contains(form));
        assert!(!doc.is_connected(form));
        assert_eq!(doc.element(form).unwrap().id(), Some("edit"));
    }

    #[test]
    fn test_text_content() {
        let (doc, form) = sample();
        assert_eq!(doc.text_content(form), "hi");
    }
}
