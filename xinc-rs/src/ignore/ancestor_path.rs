//! The chain of element names from the document root to the current element.

use std::fmt;

use crate::constants::PATH_SEPARATOR;

/// Element local names from the root down to the element under comparison.
///
/// The comparator pushes a name when it descends into an element and pops it
/// on the way out, so the path always mirrors the recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorPath {
    names: Vec<String>,
}

impl AncestorPath {
    /// Creates an empty path (above the root element).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element name.
    pub fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Removes the innermost element name.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Number of elements on the path.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true above the root element.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names root first.
    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Returns the path of a child element named `name`.
    pub fn child(&self, name: &str) -> AncestorPath {
        let mut path = self.clone();
        path.push(name);
        path
    }
}

impl<S: Into<String>> FromIterator<S> for AncestorPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        AncestorPath {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for AncestorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return write!(f, "{}", PATH_SEPARATOR);
        }
        for name in &self.names {
            write!(f, "{}{}", PATH_SEPARATOR, name)?;
        }
        Ok(())
    }
}
