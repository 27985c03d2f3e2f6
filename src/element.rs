//! Element tree: the canonical XML shape that both the builder and the
//! renderer operate on.

mod compose;

use std::ops::Deref;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::formatter::{self, FormatConfig};

/// Key marking a plain text leaf
pub const TEXT_KEY: &str = "";
/// Key marking a CDATA leaf
pub const CDATA_KEY: &str = "#CDATA";

/// A single `key="value"` pair; duplicates are allowed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// XML element node.
///
/// A node whose key is [`TEXT_KEY`] or [`CDATA_KEY`] is a text node; only
/// text nodes ever carry `text`, and a node with text has no children.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    key: String,
    text: Option<String>,
    children: Vec<Element>,
    attributes: Vec<Attribute>,
    contains_text_nodes: bool,
}

impl Element {
    /// Creates an empty element; an empty key yields a tagless fragment
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Creates an element from already-built parts
    pub fn with_children(
        key: impl Into<String>,
        children: Vec<Self>,
        attributes: Vec<Attribute>,
    ) -> Self {
        let contains_text_nodes = children.iter().any(Self::is_text_kind);
        Self {
            key: key.into(),
            text: None,
            children,
            attributes,
            contains_text_nodes,
        }
    }

    /// Creates a plain text leaf
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            key: TEXT_KEY.to_string(),
            text: Some(value.into()),
            ..Self::default()
        }
    }

    /// Creates a CDATA leaf
    pub fn cdata(value: impl Into<String>) -> Self {
        Self {
            key: CDATA_KEY.to_string(),
            text: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn text_value(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// True iff any direct child is a text or CDATA node
    pub fn contains_text_nodes(&self) -> bool {
        self.contains_text_nodes
    }

    pub fn is_text_node(&self) -> bool {
        self.key == TEXT_KEY
    }

    pub fn is_cdata_node(&self) -> bool {
        self.key == CDATA_KEY
    }

    /// True for a text or CDATA node that holds a string
    pub fn is_leaf(&self) -> bool {
        self.text.is_some()
    }

    fn is_text_kind(&self) -> bool {
        self.is_text_node() || self.is_cdata_node()
    }

    /// True for a text node with no children whose text is absent or blank
    pub fn is_whitespace_with_no_elements(&self) -> bool {
        let blank = self
            .text
            .as_deref()
            .map_or(true, |text| text.chars().all(char::is_whitespace));
        self.is_text_node() && blank && self.children.is_empty()
    }

    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Appends a child.
    ///
    /// A text leaf following a text leaf (or CDATA following CDATA) is
    /// folded into the existing trailing child.
    pub fn append(&mut self, child: Self) {
        if child.attributes.is_empty() && child.children.is_empty() {
            if let Some(text) = &child.text {
                if child.is_text_node() {
                    self.append_text(text);
                    return;
                }
                if child.is_cdata_node() {
                    self.append_cdata(text);
                    return;
                }
            }
        }
        self.contains_text_nodes |= child.is_text_kind();
        self.children.push(child);
    }

    /// Appends text, coalescing with a trailing text leaf
    pub fn append_text(&mut self, text: &str) {
        self.append_leaf(text, Self::is_text_node, Self::text);
    }

    /// Appends CDATA content, coalescing with a trailing CDATA leaf
    pub fn append_cdata(&mut self, text: &str) {
        self.append_leaf(text, Self::is_cdata_node, Self::cdata);
    }

    fn append_leaf(&mut self, text: &str, same_kind: fn(&Self) -> bool, make: fn(String) -> Self) {
        match self.children.last_mut().filter(|last| same_kind(last)) {
            Some(Self {
                text: Some(existing),
                children,
                attributes,
                ..
            }) if children.is_empty() && attributes.is_empty() => existing.push_str(text),
            _ => self.children.push(make(text.to_string())),
        }
        self.contains_text_nodes = true;
    }

    /// Trims surrounding whitespace from the text of every direct leaf.
    ///
    /// No-op unless a direct child is a text node; nodes are never removed.
    pub fn trim_text_nodes(&mut self) {
        if !self.contains_text_nodes {
            return;
        }
        for child in &mut self.children {
            if let Some(text) = child.text.as_mut() {
                let trimmed = text.trim();
                if trimmed.len() != text.len() {
                    *text = trimmed.to_string();
                }
            }
        }
    }

    /// Ends the mutable phase
    pub fn freeze(self) -> Document {
        Document {
            root: Arc::new(self),
        }
    }
}

/// An element tree that can no longer be mutated.
///
/// Cheap to clone and safe to share between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Arc<Element>,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Renders the tree, prepending `header` when it is non-empty
    pub fn render(&self, header: Option<&str>, config: &FormatConfig) -> String {
        formatter::render(&self.root, header, config)
    }
}

impl Deref for Document {
    type Target = Element;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl From<Element> for Document {
    fn from(element: Element) -> Self {
        element.freeze()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_append_text_coalesces() {
        let mut el = Element::new("root");
        el.append_text("a");
        el.append_text("b");
        assert_eq!(el.children().len(), 1);
        assert_eq!(el.children()[0].text_value(), Some("ab"));
        assert!(el.contains_text_nodes());
    }

    #[test]
    fn test_append_cdata_coalesces() {
        let mut el = Element::new("root");
        el.append_cdata("a");
        el.append_cdata("b");
        assert_eq!(el.children().len(), 1);
        assert!(el.children()[0].is_cdata_node());
        assert_eq!(el.children()[0].text_value(), Some("ab"));
    }

    #[test]
    fn test_text_and_cdata_stay_separate() {
        let mut el = Element::new("root");
        el.append_text("a");
        el.append_cdata("b");
        el.append_text("c");
        assert_eq!(el.children().len(), 3);
    }

    #[test]
    fn test_append_leaf_child_coalesces() {
        let mut el = Element::new("root");
        el.append(Element::new("x"));
        el.append(Element::text("a"));
        el.append(Element::text("b"));
        assert_eq!(el.children().len(), 2);
        assert_eq!(el.children()[1].text_value(), Some("ab"));
    }

    #[test]
    fn test_text_never_merges_into_attributed_node() {
        let mut el = Element::new("p");
        el.append_text("a");
        el.append(Element::with_children(
            TEXT_KEY,
            Vec::new(),
            vec![Attribute::new("k", "v")],
        ));
        el.append_text("b");
        assert_eq!(el.children().len(), 3);
        assert_eq!(el.children()[1].attributes().len(), 1);
        assert_eq!(el.children()[1].text_value(), None);
        assert!(el.children()[2].attributes().is_empty());
        assert_eq!(el.children()[2].text_value(), Some("b"));
    }

    #[test]
    fn test_append_recomputes_text_flag() {
        let mut el = Element::with_children("root", vec![Element::new("x")], Vec::new());
        assert!(!el.contains_text_nodes());
        el.append(Element::new("y"));
        assert!(!el.contains_text_nodes());
        el.append(Element::cdata("z"));
        assert!(el.contains_text_nodes());
    }

    #[test]
    fn test_with_children_derives_text_flag() {
        let el = Element::with_children("root", vec![Element::text("hi")], Vec::new());
        assert!(el.contains_text_nodes());
    }

    #[test]
    fn test_trim_text_nodes() {
        let mut el = Element::new("root");
        el.append_text("  padded \n");
        el.trim_text_nodes();
        assert_eq!(el.children()[0].text_value(), Some("padded"));
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_trim_text_nodes_without_text_is_noop() {
        let mut el = Element::with_children("root", vec![Element::new("x")], Vec::new());
        let before = el.clone();
        el.trim_text_nodes();
        assert_eq!(el, before);
    }

    #[test]
    fn test_whitespace_predicate() {
        assert!(Element::text(" \n\t").is_whitespace_with_no_elements());
        assert!(Element::new("").is_whitespace_with_no_elements());
        assert!(!Element::text(" x ").is_whitespace_with_no_elements());
        assert!(!Element::new("a").is_whitespace_with_no_elements());
        assert!(!Element::cdata(" ").is_whitespace_with_no_elements());
    }

    #[test]
    fn test_freeze_shares_tree() {
        let doc = Element::with_children("root", vec![Element::text("x")], Vec::new()).freeze();
        let copy = doc.clone();
        assert_eq!(copy.key(), "root");
        assert_eq!(doc.root(), copy.root());
    }
}
