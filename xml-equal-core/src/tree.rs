use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Characters treated as insignificant whitespace around text content.
pub const WHITESPACES: [char; 4] = [' ', '\t', '\r', '\n'];

/// Kind of a node in a parsed XML tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Element,
    Text,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element => write!(f, "element"),
            NodeKind::Text => write!(f, "text"),
        }
    }
}

/// A node of a parsed XML document with mixed content preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { data: String },
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Element tag name, prefix included.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create a new element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute insert.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Return the first child element with the provided tag.
    pub fn child_element(&self, tag: &str) -> Option<&Element> {
        self.child_elements(tag).into_iter().next()
    }

    /// Return all child elements with the provided tag.
    pub fn child_elements(&self, tag: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|child| child.tag == tag)
            .collect()
    }

    /// Concatenate the direct text children of this element.
    pub fn text_content(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }
}

impl Node {
    /// Create a text node.
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text { data: data.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text { .. } => NodeKind::Text,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Element(_) => None,
            Node::Text { data } => Some(data),
        }
    }

    /// True for a text node made only of [`WHITESPACES`] (or empty).
    pub fn is_whitespace_text(&self) -> bool {
        self.as_text().is_some_and(is_whitespace_only)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Strip [`WHITESPACES`] from both ends of `text`.
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(WHITESPACES.as_slice())
}

/// True if `text` is empty once [`WHITESPACES`] are stripped from both ends.
pub fn is_whitespace_only(text: &str) -> bool {
    trim_whitespace(text).is_empty()
}

/// Read-only view over a parsed XML node.
///
/// The comparator only needs these capabilities, so any parser's node handle
/// can be compared once it implements this trait. Handles are expected to be
/// cheap copies (for example a reference into an owned tree).
pub trait XmlTree: Copy {
    /// Node kind.
    fn kind(&self) -> NodeKind;
    /// Tag name for elements, `None` for text.
    fn tag_name(&self) -> Option<&str>;
    /// Attribute pairs for elements, empty for text.
    fn attributes(&self) -> BTreeMap<&str, &str>;
    /// Children in document order, empty for text.
    fn children(&self) -> Vec<Self>;
    /// Raw character data for text, `None` for elements.
    fn text(&self) -> Option<&str>;
}

impl<'a> XmlTree for &'a Node {
    fn kind(&self) -> NodeKind {
        Node::kind(self)
    }

    fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|element| element.tag.as_str())
    }

    fn attributes(&self) -> BTreeMap<&str, &str> {
        self.as_element()
            .map(|element| {
                element
                    .attributes
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn children(&self) -> Vec<Self> {
        match *self {
            Node::Element(element) => element.children.iter().collect(),
            Node::Text { .. } => Vec::new(),
        }
    }

    fn text(&self) -> Option<&str> {
        self.as_text()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{element}"),
            Node::Text { data } => write!(f, "{data}"),
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {}=\"{}\"", key, value)?;
        }

        if self.children.is_empty() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_whitespace_only, trim_whitespace, Element, Node, NodeKind, XmlTree};

    #[test]
    fn whitespace_set_is_space_tab_cr_lf_only() {
        assert!(is_whitespace_only(""));
        assert!(is_whitespace_only(" \t\r\n "));
        assert!(!is_whitespace_only("\u{a0}"));
        assert_eq!(trim_whitespace("\n\t val \r\n"), "val");
        assert_eq!(trim_whitespace("\u{a0}val"), "\u{a0}val");
    }

    #[test]
    fn navigation_skips_text_nodes() {
        let root = Element::new("root")
            .with_child(Node::text("\n  "))
            .with_child(Element::new("item").with_attribute("id", "1"))
            .with_child(Node::text("tail"))
            .with_child(Element::new("item").with_attribute("id", "2"));

        assert_eq!(root.child_elements("item").len(), 2);
        assert_eq!(
            root.child_element("item")
                .and_then(|item| item.attributes.get("id"))
                .map(String::as_str),
            Some("1")
        );
        assert_eq!(root.text_content(), "\n  tail");
    }

    #[test]
    fn node_reference_exposes_tree_view() {
        let node = Node::from(
            Element::new("Foo")
                .with_attribute("a", "2")
                .with_child(Node::text("val")),
        );
        let view = &node;

        assert_eq!(XmlTree::kind(&view), NodeKind::Element);
        assert_eq!(view.tag_name(), Some("Foo"));
        assert_eq!(view.attributes().get("a"), Some(&"2"));
        let children = XmlTree::children(&view);
        assert_eq!(children.len(), 1);
        assert_eq!(XmlTree::text(&children[0]), Some("val"));
    }

    #[test]
    fn display_renders_compact_markup() {
        let node = Node::from(
            Element::new("a")
                .with_attribute("k", "v")
                .with_child(Element::new("b"))
                .with_child(Node::text("t")),
        );
        assert_eq!(node.to_string(), "<a k=\"v\"><b/>t</a>");
    }
}
