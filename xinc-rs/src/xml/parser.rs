//! XML parser that builds document trees.
//!
//! This parser uses quick-xml's streaming API and resolves namespaces as it
//! goes, so every element carries its expanded name and in-scope bindings.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesPI, BytesRef, BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::error::{Error, Result};
use crate::node::{
    declared_prefix, split_qname, Document, ExpandedName, NamespaceContext, Node, XmlComment,
    XmlElement, XmlEntityReference, XmlProcessingInstruction, XmlText,
};

/// XML parser that builds a [`Document`].
///
/// One parser instance reads one document.
#[derive(Default)]
pub struct XmlParser {
    /// Namespace bindings of the open elements.
    namespaces: NamespaceContext,
    /// Elements opened but not yet closed.
    stack: Vec<XmlElement>,
    /// The finished root element.
    root: Option<XmlElement>,
    /// Character data not yet attached to an element.
    pending_text: Option<String>,
}

impl XmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses XML from a string.
    pub fn parse_str(self, xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        // Text is kept verbatim; the comparator decides what whitespace means.
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        self.parse_reader(&mut reader)
    }

    /// Parses XML from a file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<Document> {
        let file = File::open(path)?;
        let buf_reader = BufReader::new(file);
        let mut reader = Reader::from_reader(buf_reader);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        self.parse_reader(&mut reader)
    }

    /// Parses XML from a quick-xml Reader.
    fn parse_reader<R: BufRead>(mut self, reader: &mut Reader<R>) -> Result<Document> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    self.flush_text()?;
                    let element = self.open_element(e, reader)?;
                    self.stack.push(element);
                }
                Ok(Event::End(_)) => {
                    self.flush_text()?;
                    self.namespaces.pop_scope();
                    let element = self
                        .stack
                        .pop()
                        .ok_or_else(|| Error::Parse("unexpected end tag".to_string()))?;
                    self.attach(element.into())?;
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing tag - handle like Start + End
                    self.flush_text()?;
                    let element = self.open_element(e, reader)?;
                    self.namespaces.pop_scope();
                    self.attach(element.into())?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = reader
                        .decoder()
                        .decode(e.as_ref())
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    self.push_text(&text);
                }
                Ok(Event::CData(ref e)) => {
                    // Treat CDATA like text
                    let text = String::from_utf8_lossy(e.as_ref());
                    self.push_text(&text);
                }
                Ok(Event::GeneralRef(ref e)) => {
                    self.general_ref(e)?;
                }
                Ok(Event::Comment(ref e)) => {
                    self.flush_text()?;
                    let comment_text = String::from_utf8_lossy(e.as_ref()).to_string();
                    // Comments outside the root element are dropped.
                    if let Some(parent) = self.stack.last_mut() {
                        parent.push_child(XmlComment::new(comment_text));
                    }
                }
                Ok(Event::PI(ref e)) => {
                    self.flush_text()?;
                    if !self.stack.is_empty() {
                        let pi = processing_instruction(e);
                        self.attach(pi.into())?;
                    }
                }
                Ok(Event::Decl(_)) | Ok(Event::DocType(_)) => {
                    // Prolog content does not take part in comparison
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Parse(format!(
                        "{} at byte {}",
                        e,
                        reader.error_position()
                    )))
                }
            }
            buf.clear();
        }

        self.flush_text()?;
        if let Some(open) = self.stack.last() {
            return Err(Error::Parse(format!(
                "unexpected end of input inside <{}>",
                open.qname()
            )));
        }
        let root = self
            .root
            .ok_or_else(|| Error::Parse("no root element".to_string()))?;
        trace!(root = root.qname(), "parsed document");
        Ok(Document::new(root))
    }

    /// Opens a scope for a start tag and builds the element.
    fn open_element<R>(&mut self, e: &BytesStart, reader: &Reader<R>) -> Result<XmlElement> {
        let qname = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .to_string();

        self.namespaces.push_scope();

        let mut attributes = std::collections::HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("Attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            match declared_prefix(&key) {
                Some(prefix) => self.namespaces.bind(prefix, &value),
                None => {
                    attributes.insert(key, value);
                }
            }
        }

        // Attribute prefixes are checked after all declarations on this tag are bound.
        for key in attributes.keys() {
            if let (Some(prefix), _) = split_qname(key) {
                if self.namespaces.resolve(prefix).is_none() {
                    return Err(Error::Parse(format!(
                        "unbound namespace prefix '{}' on attribute '{}'",
                        prefix, key
                    )));
                }
            }
        }

        let name = match split_qname(&qname) {
            (Some(prefix), local) => {
                let uri = self.namespaces.resolve(prefix).ok_or_else(|| {
                    Error::Parse(format!(
                        "unbound namespace prefix '{}' on element '{}'",
                        prefix, qname
                    ))
                })?;
                ExpandedName::new(uri, local)
            }
            (None, local) => match self.namespaces.default_namespace() {
                Some(uri) => ExpandedName::new(uri, local),
                None => ExpandedName::no_namespace(local),
            },
        };

        let scope = self.namespaces.current().clone();
        Ok(XmlElement::new_with_namespace(qname, name, scope, attributes))
    }

    /// Handles `&name;` and `&#N;` references between text events.
    fn general_ref(&mut self, e: &BytesRef) -> Result<()> {
        if let Some(ch) = e.resolve_char_ref()? {
            self.push_text(ch.encode_utf8(&mut [0; 4]));
            return Ok(());
        }
        let name = e.decode().map_err(|e| Error::Parse(e.to_string()))?;
        match resolve_predefined_entity(&name) {
            Some(expanded) => self.push_text(expanded),
            None => {
                self.flush_text()?;
                self.attach(XmlEntityReference::new(name.as_ref()).into())?;
            }
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        match self.pending_text.as_mut() {
            Some(existing) => existing.push_str(text),
            None => self.pending_text = Some(text.to_string()),
        }
    }

    /// Attaches accumulated character data to the open element.
    fn flush_text(&mut self) -> Result<()> {
        let Some(text) = self.pending_text.take() else {
            return Ok(());
        };
        match self.stack.last_mut() {
            Some(parent) => {
                parent.push_child(XmlText::new(text));
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::Parse(format!(
                "text outside the root element: {:?}",
                text.trim()
            ))),
        }
    }

    /// Adds a finished node to the open element, or makes it the root.
    fn attach(&mut self, node: Node) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.push_child(node);
            return Ok(());
        }
        match node {
            Node::Element(element) => {
                if self.root.is_some() {
                    return Err(Error::Parse(format!(
                        "multiple root elements: <{}> follows the root",
                        element.qname()
                    )));
                }
                self.root = Some(element);
                Ok(())
            }
            other => Err(Error::Parse(format!(
                "{} outside the root element",
                other.kind_name()
            ))),
        }
    }
}

fn processing_instruction(e: &BytesPI) -> XmlProcessingInstruction {
    let target = String::from_utf8_lossy(e.target());
    let content = String::from_utf8_lossy(e.content());
    XmlProcessingInstruction::new(target, content.trim_start())
}

/// Parses XML from a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    XmlParser::new().parse_file(path)
}

/// Parses XML from a string.
pub fn parse_str(xml: &str) -> Result<Document> {
    XmlParser::new().parse_str(xml)
}
