//! XML content types for tree nodes.
//!
//! Each [`Node`](super::Node) variant wraps one of these. Elements own their
//! children; the other kinds are leaves.

use std::collections::HashMap;
use std::fmt;

use super::namespace::{split_qname, ExpandedName, NamespaceScope};
use super::Node;

/// An XML element with a qualified name, namespace scope, attributes and children.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// The qualified name as written (e.g., "div", "svg:rect").
    qname: String,
    /// The resolved name (namespace URI + local name).
    name: ExpandedName,
    /// Prefix bindings in scope at this element.
    scope: NamespaceScope,
    /// Attributes keyed by qualified name. Namespace declarations are not included.
    attributes: HashMap<String, String>,
    /// Child nodes in document order.
    children: Vec<Node>,
}

impl XmlElement {
    /// Creates an element in no namespace with the given attributes.
    pub fn new(qname: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        let qname = qname.into();
        let (_, local) = split_qname(&qname);
        let name = ExpandedName::no_namespace(local);
        Self::new_with_namespace(qname, name, NamespaceScope::default(), attributes)
    }

    /// Creates an element with namespace information.
    pub fn new_with_namespace(
        qname: impl Into<String>,
        name: ExpandedName,
        scope: NamespaceScope,
        attributes: HashMap<String, String>,
    ) -> Self {
        XmlElement {
            qname: qname.into(),
            name,
            scope,
            attributes,
            children: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, qname: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(qname.into(), value.into());
        self
    }

    /// Returns the qualified name of the element.
    pub fn qname(&self) -> &str {
        &self.qname
    }

    /// Returns the local part of the element name.
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Returns the namespace URI, empty for no namespace.
    pub fn namespace_uri(&self) -> &str {
        &self.name.uri
    }

    /// Returns the expanded name.
    pub fn expanded_name(&self) -> &ExpandedName {
        &self.name
    }

    /// Returns the namespace bindings in scope at this element.
    pub fn scope(&self) -> &NamespaceScope {
        &self.scope
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Returns the value of the attribute with the given qualified name.
    pub fn attribute(&self, qname: &str) -> Option<&str> {
        self.attributes.get(qname).map(String::as_str)
    }

    /// Returns the children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Resolves an attribute's qualified name against this element's scope.
    ///
    /// Unprefixed attributes are in no namespace. Returns `None` when the
    /// prefix is not bound here.
    pub fn resolve_attribute_name(&self, qname: &str) -> Option<ExpandedName> {
        match split_qname(qname) {
            (None, local) => Some(ExpandedName::no_namespace(local)),
            (Some(prefix), local) => self
                .scope
                .resolve(prefix)
                .map(|uri| ExpandedName::new(uri.clone(), local)),
        }
    }

    /// Finds an attribute by resolved name.
    ///
    /// Returns the attribute's qualified name and value as written on this element.
    pub fn find_attribute(&self, name: &ExpandedName) -> Option<(&str, &str)> {
        self.attributes.iter().find_map(|(qname, value)| {
            let (_, local) = split_qname(qname);
            if local != name.local {
                return None;
            }
            match self.resolve_attribute_name(qname) {
                Some(resolved) if resolved == *name => Some((qname.as_str(), value.as_str())),
                _ => None,
            }
        })
    }

    /// Returns the attributes sorted by qualified name.
    pub fn sorted_attributes(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<(&str, &str)> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        attrs.sort();
        attrs
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qname)
    }
}

/// XML text content, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlText {
    text: String,
}

impl XmlText {
    /// Creates a new text node from a string.
    pub fn new(text: impl Into<String>) -> Self {
        XmlText { text: text.into() }
    }

    /// Returns the text as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends more character data.
    pub fn push_str(&mut self, more: &str) {
        self.text.push_str(more);
    }

    /// Returns true if the text contains nothing but whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for XmlText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// XML comment content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlComment {
    /// The comment text (without the <!-- and --> markers).
    text: String,
}

impl XmlComment {
    /// Creates a new comment node from a string.
    pub fn new(text: impl Into<String>) -> Self {
        XmlComment { text: text.into() }
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for XmlComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!--{}-->", self.text)
    }
}

/// XML processing instruction content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlProcessingInstruction {
    /// The target of the PI (e.g., "xml-stylesheet").
    target: String,
    /// The content/data of the PI (everything after the target).
    content: String,
}

impl XmlProcessingInstruction {
    /// Creates a new PI from target and content strings.
    pub fn new(target: impl Into<String>, content: impl Into<String>) -> Self {
        XmlProcessingInstruction {
            target: target.into(),
            content: content.into(),
        }
    }

    /// Returns the PI target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the PI content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for XmlProcessingInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.content.is_empty() {
            write!(f, "<?{}?>", self.target)
        } else {
            write!(f, "<?{} {}?>", self.target, self.content)
        }
    }
}

/// A general entity reference the parser could not expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEntityReference {
    name: String,
}

impl XmlEntityReference {
    /// Creates a reference to the named entity.
    pub fn new(name: impl Into<String>) -> Self {
        XmlEntityReference { name: name.into() }
    }

    /// Returns the entity name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for XmlEntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{};", self.name)
    }
}
