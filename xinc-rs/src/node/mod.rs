//! Node structures for XML tree representation.
//!
//! A parsed document is an owned, immutable tree. [`Node`] is a closed sum
//! type so every consumer has to decide what to do with each node kind.

mod namespace;
mod xml_content;

pub use namespace::{
    declared_prefix, split_qname, ExpandedName, NamespaceContext, NamespaceScope,
};
pub use xml_content::{
    XmlComment, XmlElement, XmlEntityReference, XmlProcessingInstruction, XmlText,
};

/// A node in a parsed document.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element with attributes and children.
    Element(XmlElement),
    /// Character data, including CDATA sections and expanded references.
    Text(XmlText),
    /// A comment.
    Comment(XmlComment),
    /// A processing instruction inside the root element.
    ProcessingInstruction(XmlProcessingInstruction),
    /// A general entity reference that was left unexpanded.
    EntityReference(XmlEntityReference),
}

impl Node {
    /// Returns a short name for the node kind, used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
            Node::ProcessingInstruction(_) => "processing instruction",
            Node::EntityReference(_) => "entity reference",
        }
    }

    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Returns true if this is a comment node.
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Returns true if this is a text node holding only whitespace.
    pub fn is_whitespace_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.is_whitespace())
    }

    /// Returns a reference to the element, if this is an element node.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a reference to the text, if this is a text node.
    pub fn as_text(&self) -> Option<&XmlText> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<XmlElement> for Node {
    fn from(e: XmlElement) -> Self {
        Node::Element(e)
    }
}

impl From<XmlText> for Node {
    fn from(t: XmlText) -> Self {
        Node::Text(t)
    }
}

impl From<XmlComment> for Node {
    fn from(c: XmlComment) -> Self {
        Node::Comment(c)
    }
}

impl From<XmlProcessingInstruction> for Node {
    fn from(pi: XmlProcessingInstruction) -> Self {
        Node::ProcessingInstruction(pi)
    }
}

impl From<XmlEntityReference> for Node {
    fn from(r: XmlEntityReference) -> Self {
        Node::EntityReference(r)
    }
}

/// A parsed document: the root element and everything under it.
#[derive(Debug, Clone)]
pub struct Document {
    root: XmlElement,
}

impl Document {
    /// Wraps a root element.
    pub fn new(root: XmlElement) -> Self {
        Document { root }
    }

    /// Returns the root element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}
