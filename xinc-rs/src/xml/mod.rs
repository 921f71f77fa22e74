//! XML parsing and node quoting.
//!
//! The parser is the document-loading side of the tool: it turns markup into
//! the owned [`Document`](crate::node::Document) tree the comparator walks.
//! The printer quotes single nodes back as markup for difference messages.

mod parser;
mod printer;

pub use parser::{parse_file, parse_str, XmlParser};
pub use printer::{describe, start_tag};
