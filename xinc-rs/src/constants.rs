//! Constants shared by the parser, comparator and renderer.

/// Namespace URI permanently bound to the `xml` prefix.
pub const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Separator used when rendering ancestor paths and ignore patterns.
pub const PATH_SEPARATOR: char = '/';

/// Prefix marking an ignore pattern that may match at any depth.
pub const ANYWHERE_MARKER: &str = "//";

/// Message printed when the expected document is included in the actual one.
pub const NO_DIFF_MESSAGE: &str = "No differences found.";
