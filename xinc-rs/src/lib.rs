//! Structural inclusion check for XML documents.
//!
//! This library answers one question: is everything in an *expected*
//! document also present in an *actual* one? Elements are matched without
//! regard to sibling order, attributes and extra content in the actual
//! document are allowed, and namespaces are compared by URI rather than by
//! prefix. Text and other ordered nodes must appear in the same order.
//!
//! # Overview
//!
//! - [`xml`] loads documents into an owned [`Document`] tree.
//! - [`ignore`] parses ignore patterns (`/a/b` rooted, `//b` anywhere) that
//!   exempt whole subtrees from comparison.
//! - [`compare`] walks both trees and reports the first [`Difference`].
//!
//! Comparing and dropping a tree both recurse once per level of element
//! nesting, so documents nested tens of thousands of levels deep can
//! overflow the thread's stack.
//!
//! # Example
//!
//! ```
//! use xml_inclusion::{compare_documents, parse_str, CompareConfig};
//!
//! let expected = parse_str(r#"<order><item sku="1"/></order>"#).unwrap();
//! let actual = parse_str(r#"<order id="7"><note/><item sku="1" qty="2"/></order>"#).unwrap();
//!
//! let result = compare_documents(&expected, &actual, &CompareConfig::default()).unwrap();
//! assert!(result.is_match());
//!
//! // Inclusion is not symmetric.
//! let reversed = compare_documents(&actual, &expected, &CompareConfig::default()).unwrap();
//! assert!(!reversed.is_match());
//! ```

pub mod compare;
pub mod constants;
pub mod error;
pub mod ignore;
pub mod node;
pub mod xml;

// Re-export commonly used types
pub use compare::{
    compare_documents, render, CompareConfig, Comparator, Comparison, Difference, DifferenceKind,
};
pub use constants::*;
pub use error::{Error, Result};
pub use ignore::{AncestorPath, IgnorePattern, IgnoreSet};
pub use node::{
    Document, ExpandedName, NamespaceScope, Node, XmlComment, XmlElement, XmlEntityReference,
    XmlProcessingInstruction, XmlText,
};
pub use xml::{parse_file, parse_str, XmlParser};
