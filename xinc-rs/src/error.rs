//! Error types for the inclusion checker.

use thiserror::Error;

/// Result type alias for inclusion-checker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading documents or preparing a comparison.
///
/// A difference between two documents is not an error; it is reported as
/// [`Comparison::Diff`](crate::Comparison::Diff).
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// An ignore pattern could not be parsed.
    #[error("malformed ignore pattern '{pattern}': {reason}")]
    MalformedPattern {
        /// The pattern as given.
        pattern: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error from quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
