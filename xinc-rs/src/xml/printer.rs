//! Markup quoting for difference messages.
//!
//! Output is meant for people reading difference reports, not for
//! round-tripping: attributes are sorted and namespace declarations are not
//! reproduced.

use quick_xml::escape::escape;

use crate::node::{Node, XmlElement};

/// Renders an element's start tag, attributes sorted by name.
pub fn start_tag(element: &XmlElement) -> String {
    let mut tag = String::new();
    tag.push('<');
    tag.push_str(element.qname());
    for (name, value) in element.sorted_attributes() {
        tag.push(' ');
        tag.push_str(name);
        tag.push_str("=\"");
        tag.push_str(&escape(value));
        tag.push('"');
    }
    tag.push('>');
    tag
}

/// Short single-line rendering of a node for messages.
///
/// Elements are shown by their start tag only.
pub fn describe(node: &Node) -> String {
    match node {
        Node::Element(element) => start_tag(element),
        Node::Text(text) => format!("{:?}", text.text()),
        Node::Comment(comment) => comment.to_string(),
        Node::ProcessingInstruction(pi) => pi.to_string(),
        Node::EntityReference(entity) => entity.to_string(),
    }
}
