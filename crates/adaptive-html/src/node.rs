//! CDP-style DOM Node structure for HTML to Adaptive Card conversion.
//!
//! This module provides a DOM node structure that matches the Chrome DevTools Protocol
//! DOM.Node structure. Any parser (html5ever, CDP, etc.) can convert their output to
//! this structure to use adaptive-html.

use crate::utilities::is_block;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// CDATA section node (nodeType = 4)
    CData = 4,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            1 => NodeType::Element,
            3 => NodeType::Text,
            4 => NodeType::CData,
            9 => NodeType::Document,
            11 => NodeType::DocumentFragment,
            // Processing instructions, doctypes etc. carry no content
            _ => NodeType::Comment,
        }
    }
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Character data for text, CDATA and comment nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| vec![k.to_string(), v.to_string()])
            .collect();

        Self {
            attributes: Some(flat_attrs),
            ..Self::element(tag_name)
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::character_data(NodeType::Text, "#text", content)
    }

    /// Create a new CDATA section node
    pub fn cdata(content: &str) -> Self {
        Self::character_data(NodeType::CData, "#cdata-section", content)
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::character_data(NodeType::Comment, "#comment", content)
    }

    fn character_data(node_type: NodeType, node_name: &str, content: &str) -> Self {
        Self {
            node_type,
            node_name: node_name.to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            node_name: "#document".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this node holds character data that whitespace collapsing applies to
    pub fn is_character_data(&self) -> bool {
        matches!(self.node_type, NodeType::Text | NodeType::CData)
    }

    /// Check if this node can be the root of a conversion
    pub fn is_container_kind(&self) -> bool {
        matches!(
            self.node_type,
            NodeType::Element | NodeType::Document | NodeType::DocumentFragment
        )
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;
        let name_lower = name.to_lowercase();

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        let mut iter = attrs.iter();
        while let Some(attr_name) = iter.next() {
            if let Some(attr_value) = iter.next() {
                if attr_name.to_lowercase() == name_lower {
                    return Some(attr_value.as_str());
                }
            }
        }
        None
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let attrs = self.attributes.get_or_insert_with(Vec::new);

        // Check if attribute already exists
        let name_lower = name.to_lowercase();
        let mut i = 0;
        while i + 1 < attrs.len() {
            if attrs[i].to_lowercase() == name_lower {
                attrs[i + 1] = value.to_string();
                return;
            }
            i += 2;
        }
        // Add new attribute
        attrs.push(name.to_string());
        attrs.push(value.to_string());
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text | NodeType::CData => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self
                .children()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// Check if any descendant element satisfies the predicate
    pub fn has_descendant<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Node) -> bool + Copy,
    {
        self.element_children()
            .any(|child| predicate(child) || child.has_descendant(predicate))
    }
}

/// A reference to a node together with derived facts the rules need.
#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    /// Whether the node is a block-level element
    is_block: bool,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            is_block: node.is_element() && is_block(&node.tag_name()),
        }
    }

    /// Check if the node is a block-level element
    pub fn is_block(&self) -> bool {
        self.is_block
    }

    /// Delegate to Node methods
    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    pub fn tag_name(&self) -> String {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.node.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.node.children()
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.node.element_children()
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    /// Character data of a text node
    pub fn node_value(&self) -> &str {
        self.node.node_value.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("div");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert_eq!(node.node_name, "DIV");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert!(node.is_character_data());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let mut node = Node::element_with_attrs("a", vec![("href", "https://example.com"), ("title", "Example")]);
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("HREF"), Some("https://example.com"));
        assert_eq!(node.attr("class"), None);

        node.set_attr("title", "Changed");
        node.set_attr("class", "link");
        assert_eq!(node.attr("title"), Some("Changed"));
        assert!(node.has_attr("class"));
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::comment("note"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let mut div = Node::element("div");
        div.add_child(Node::text("Hello "));
        let mut span = Node::element("span");
        span.add_child(Node::text("World"));
        span.add_child(Node::comment("ignored"));
        div.add_child(span);

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_has_descendant() {
        let mut div = Node::element("div");
        let mut span = Node::element("span");
        span.add_child(Node::element("img"));
        div.add_child(span);

        assert!(div.has_descendant(|n| n.tag_name() == "img"));
        assert!(!div.has_descendant(|n| n.tag_name() == "br"));
    }

    #[test]
    fn test_container_kinds() {
        assert!(Node::element("div").is_container_kind());
        assert!(Node::document().is_container_kind());
        assert!(Node::document_fragment().is_container_kind());
        assert!(!Node::text("x").is_container_kind());
        assert!(!Node::comment("x").is_container_kind());
    }

    #[test]
    fn test_node_ref_block() {
        let div = Node::element("div");
        let span = Node::element("span");
        let text = Node::text("p");
        assert!(NodeRef::new(&div).is_block());
        assert!(!NodeRef::new(&span).is_block());
        assert!(!NodeRef::new(&text).is_block());
    }
}
