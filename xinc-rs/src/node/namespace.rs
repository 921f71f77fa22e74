//! Namespace resolution for element and attribute names.
//!
//! Element identity is decided on [`ExpandedName`]s, never on prefixes: two
//! prefixes bound to the same URI name the same namespace.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::constants::XML_NAMESPACE_URI;

/// A local name qualified by the namespace URI its prefix resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    /// Resolved namespace URI; empty when the name is in no namespace.
    pub uri: Rc<str>,
    /// Name with any prefix removed.
    pub local: String,
}

impl ExpandedName {
    /// Qualifies `local` with `uri`.
    pub fn new(uri: impl Into<Rc<str>>, local: impl Into<String>) -> Self {
        ExpandedName {
            uri: uri.into(),
            local: local.into(),
        }
    }

    /// A name in no namespace.
    pub fn no_namespace(local: impl Into<String>) -> Self {
        Self::new("", local)
    }

    /// Returns true unless the name is in no namespace.
    pub fn has_namespace(&self) -> bool {
        !self.uri.is_empty()
    }
}

/// Clark notation, `{uri}local`, or the bare local name.
impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_namespace() {
            write!(f, "{{{}}}{}", self.uri, self.local)
        } else {
            f.write_str(&self.local)
        }
    }
}

/// The prefix to URI bindings in scope at one element.
///
/// Elements that declare no namespaces share their parent's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    bindings: Rc<HashMap<String, Rc<str>>>,
}

impl Default for NamespaceScope {
    fn default() -> Self {
        let bindings = HashMap::from([("xml".to_string(), Rc::from(XML_NAMESPACE_URI))]);
        NamespaceScope {
            bindings: Rc::new(bindings),
        }
    }
}

impl NamespaceScope {
    /// Looks up the URI bound to `prefix`. The empty prefix names the default namespace.
    pub fn resolve(&self, prefix: &str) -> Option<&Rc<str>> {
        self.bindings.get(prefix)
    }

    /// The URI unprefixed element names resolve to, if any.
    pub fn default_namespace(&self) -> Option<&Rc<str>> {
        self.resolve("")
    }

    /// Returns a copy of this scope with one more binding.
    pub fn with_binding(&self, prefix: &str, uri: &str) -> Self {
        let mut scope = self.clone();
        scope.bind(prefix, uri.into());
        scope
    }

    fn bind(&mut self, prefix: &str, uri: Rc<str>) {
        Rc::make_mut(&mut self.bindings).insert(prefix.to_string(), uri);
    }
}

/// The stack of scopes for the elements a parser currently has open.
#[derive(Debug)]
pub struct NamespaceContext {
    scopes: Vec<NamespaceScope>,
    /// One shared allocation per distinct URI in the document.
    interned: HashMap<String, Rc<str>>,
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceContext {
    /// Starts with only the document-level scope, where `xml` is bound.
    pub fn new() -> Self {
        NamespaceContext {
            scopes: vec![NamespaceScope::default()],
            interned: HashMap::new(),
        }
    }

    /// Opens a scope for a start tag, inheriting every binding of its parent.
    pub fn push_scope(&mut self) {
        let inherited = self.current().clone();
        self.scopes.push(inherited);
    }

    /// Closes the innermost element scope. The document-level scope stays.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Records a declaration made on the innermost open element.
    ///
    /// `xmlns=""` binds the empty prefix to the empty URI, which undeclares
    /// the default namespace.
    pub fn bind(&mut self, prefix: &str, uri: &str) {
        let uri = self.intern_uri(uri);
        if let Some(scope) = self.scopes.last_mut() {
            scope.bind(prefix, uri);
        }
    }

    /// Looks up `prefix` in the innermost scope.
    pub fn resolve(&self, prefix: &str) -> Option<Rc<str>> {
        self.current().resolve(prefix).cloned()
    }

    /// The default namespace of the innermost scope.
    pub fn default_namespace(&self) -> Option<Rc<str>> {
        self.resolve("")
    }

    /// The innermost scope.
    pub fn current(&self) -> &NamespaceScope {
        // pop_scope never removes the document-level scope
        &self.scopes[self.scopes.len() - 1]
    }

    /// Returns the shared copy of `uri`, creating it on first use.
    pub fn intern_uri(&mut self, uri: &str) -> Rc<str> {
        self.interned
            .entry(uri.to_string())
            .or_insert_with(|| Rc::from(uri))
            .clone()
    }
}

/// Splits `prefix:local` at the first colon.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// Returns the prefix declared by a namespace declaration attribute.
///
/// `xmlns` declares the default namespace, so its prefix is empty.
pub fn declared_prefix(name: &str) -> Option<&str> {
    if name == "xmlns" {
        Some("")
    } else {
        name.strip_prefix("xmlns:")
    }
}
