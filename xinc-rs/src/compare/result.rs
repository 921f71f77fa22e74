//! Comparison outcomes.

use std::fmt;

use crate::ignore::AncestorPath;

/// The outcome of one comparison run.
///
/// A difference is the program's normal output, so it is a value here rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Everything in the expected tree has a counterpart in the actual tree.
    NoDiff,
    /// The first mismatch found.
    Diff(Difference),
}

impl Comparison {
    /// Returns true when the expected tree is included in the actual one.
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::NoDiff)
    }

    /// Returns the difference, if any.
    pub fn difference(&self) -> Option<&Difference> {
        match self {
            Comparison::NoDiff => None,
            Comparison::Diff(d) => Some(d),
        }
    }
}

impl From<Difference> for Comparison {
    fn from(d: Difference) -> Self {
        Comparison::Diff(d)
    }
}

/// A mismatch and the ancestor path where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Element names from the root to where the mismatch was detected.
    pub path: AncestorPath,
    /// What went wrong.
    pub kind: DifferenceKind,
}

impl Difference {
    /// Creates a difference at a copy of `path`.
    pub fn new(path: &AncestorPath, kind: DifferenceKind) -> Self {
        Difference {
            path: path.clone(),
            kind,
        }
    }

    /// The human-readable explanation, including nested candidate reasons.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The kinds of mismatch the comparator reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DifferenceKind {
    /// Element names or namespaces differ.
    NameMismatch {
        /// Expected element, `{uri}local` form.
        expected: String,
        /// Actual element, `{uri}local` form.
        found: String,
    },
    /// An expected attribute is missing or has another value.
    AttributeMismatch {
        /// The first expected attribute with no counterpart.
        attribute: String,
        /// All expected attributes, sorted.
        expected: Vec<(String, String)>,
        /// All actual attributes, sorted.
        found: Vec<(String, String)>,
    },
    /// Text content differs after trimming.
    TextMismatch {
        /// Expected text, verbatim.
        expected: String,
        /// Actual text, verbatim.
        found: String,
    },
    /// No element of that name is left among the actual siblings.
    ElementNotFound {
        /// Start tag of the expected element.
        element: String,
    },
    /// Same-named siblings exist but none of them matches.
    NoMatchingCandidate {
        /// Start tag of the expected element.
        element: String,
        /// Why each candidate failed, in document order.
        candidates: Vec<Difference>,
    },
    /// An ordered node faces a node of a different kind.
    NodeKindMismatch {
        /// Expected node kind.
        expected_kind: &'static str,
        /// Short rendering of the expected node.
        expected: String,
        /// Actual node kind.
        found_kind: &'static str,
        /// Short rendering of the actual node.
        found: String,
    },
    /// Processing instructions or entity references differ.
    ContentMismatch {
        /// The node kind both sides share.
        kind: &'static str,
        /// Expected node rendering.
        expected: String,
        /// Actual node rendering.
        found: String,
    },
    /// An ordered node has nothing left to be compared with.
    MissingNode {
        /// Expected node kind.
        kind: &'static str,
        /// Short rendering of the expected node.
        expected: String,
    },
}

fn write_attributes(f: &mut fmt::Formatter<'_>, attrs: &[(String, String)]) -> fmt::Result {
    write!(f, "[")?;
    for (i, (name, value)) in attrs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}={:?}", name, value)?;
    }
    write!(f, "]")
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceKind::NameMismatch { expected, found } => {
                write!(f, "expected element {} but found {}", expected, found)
            }
            DifferenceKind::AttributeMismatch {
                attribute,
                expected,
                found,
            } => {
                write!(f, "attribute {} not matched; expected attributes ", attribute)?;
                write_attributes(f, expected)?;
                write!(f, " but found ")?;
                write_attributes(f, found)
            }
            DifferenceKind::TextMismatch { expected, found } => {
                write!(f, "expected text {:?} but found {:?}", expected, found)
            }
            DifferenceKind::ElementNotFound { element } => {
                write!(f, "expected element {} not found", element)
            }
            DifferenceKind::NoMatchingCandidate {
                element,
                candidates,
            } => {
                write!(
                    f,
                    "no match for expected element {} among {} candidate(s)",
                    element,
                    candidates.len()
                )?;
                for candidate in candidates {
                    // Nested reasons are indented one level per candidate list.
                    let nested = candidate.to_string().replace('\n', "\n    ");
                    write!(f, "\n  - {}", nested)?;
                }
                Ok(())
            }
            DifferenceKind::NodeKindMismatch {
                expected_kind,
                expected,
                found_kind,
                found,
            } => write!(
                f,
                "expected {} {} but found {} {}",
                expected_kind, expected, found_kind, found
            ),
            DifferenceKind::ContentMismatch {
                kind,
                expected,
                found,
            } => write!(f, "expected {} {} but found {}", kind, expected, found),
            DifferenceKind::MissingNode { kind, expected } => {
                write!(f, "expected {} {} but actual has no more content", kind, expected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> AncestorPath {
        names.iter().copied().collect()
    }

    #[test]
    fn test_comparison_accessors() {
        assert!(Comparison::NoDiff.is_match());
        assert!(Comparison::NoDiff.difference().is_none());

        let diff: Comparison = Difference::new(
            &path(&["a"]),
            DifferenceKind::ElementNotFound {
                element: "<b>".to_string(),
            },
        )
        .into();
        assert!(!diff.is_match());
        assert_eq!(diff.difference().unwrap().path.to_string(), "/a");
    }

    #[test]
    fn test_attribute_message() {
        let kind = DifferenceKind::AttributeMismatch {
            attribute: "x".to_string(),
            expected: vec![("x".to_string(), "1".to_string())],
            found: vec![
                ("x".to_string(), "2".to_string()),
                ("y".to_string(), "3".to_string()),
            ],
        };
        assert_eq!(
            kind.to_string(),
            r#"attribute x not matched; expected attributes [x="1"] but found [x="2", y="3"]"#
        );
    }

    #[test]
    fn test_nested_candidate_message() {
        let inner = Difference::new(
            &path(&["a", "b"]),
            DifferenceKind::TextMismatch {
                expected: "hi".to_string(),
                found: "bye".to_string(),
            },
        );
        let outer = Difference::new(
            &path(&["a"]),
            DifferenceKind::NoMatchingCandidate {
                element: "<b>".to_string(),
                candidates: vec![inner],
            },
        );
        assert_eq!(
            outer.message(),
            "no match for expected element <b> among 1 candidate(s)\n  - /a/b: expected text \"hi\" but found \"bye\""
        );
    }
}
