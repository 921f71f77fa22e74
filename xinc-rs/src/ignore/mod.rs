//! Ignore patterns and the ancestor paths they are matched against.
//!
//! An element is ignored when some pattern matches its path: the local names
//! of its ancestors from the root, followed by its own local name, each
//! element counted once. [`IgnoreSet::is_ignored`] is the only place that
//! decision is made.

mod ancestor_path;
mod pattern;

pub use ancestor_path::AncestorPath;
pub use pattern::{Anchor, IgnorePattern};

use crate::error::Result;

/// The configured ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreSet {
    /// Creates an empty set; nothing is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every expression, failing on the first malformed one.
    pub fn parse_all<I, S>(expressions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = expressions
            .into_iter()
            .map(|expr| IgnorePattern::parse(expr.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(IgnoreSet { patterns })
    }

    /// Returns true if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the first pattern matching the element `label` whose parent
    /// path is `current_path`.
    pub fn matching_pattern(&self, label: &str, current_path: &AncestorPath) -> Option<&IgnorePattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.matches_child(current_path, label))
    }

    /// Tests whether the element `label`, a child of the last element on
    /// `current_path`, is ignored.
    pub fn is_ignored(&self, label: &str, current_path: &AncestorPath) -> bool {
        self.matching_pattern(label, current_path).is_some()
    }
}

impl FromIterator<IgnorePattern> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = IgnorePattern>>(iter: I) -> Self {
        IgnoreSet {
            patterns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_is_ignored_uses_child_path() {
        let set = IgnoreSet::parse_all(["/a/b", "//c"]).unwrap();
        let root = AncestorPath::new();
        let under_a: AncestorPath = ["a"].into_iter().collect();
        let deep: AncestorPath = ["a", "x", "y"].into_iter().collect();

        assert!(!set.is_ignored("a", &root));
        assert!(set.is_ignored("b", &under_a));
        assert!(!set.is_ignored("b", &root));
        assert!(set.is_ignored("c", &root));
        assert!(set.is_ignored("c", &deep));
        assert!(!set.is_ignored("b", &deep));
    }

    #[test]
    fn test_root_element_can_be_ignored() {
        let set = IgnoreSet::parse_all(["/doc"]).unwrap();
        assert!(set.is_ignored("doc", &AncestorPath::new()));
    }

    #[test]
    fn test_parse_all_reports_first_bad_pattern() {
        let err = IgnoreSet::parse_all(["//ok", "/", "//also-bad//"]).unwrap_err();
        match err {
            Error::MalformedPattern { pattern, .. } => assert_eq!(pattern, "/"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_set_ignores_nothing() {
        let set = IgnoreSet::new();
        assert!(set.is_empty());
        assert!(!set.is_ignored("a", &AncestorPath::new()));
    }

    #[test]
    fn test_matching_pattern_reports_first_match() {
        let set: IgnoreSet = ["//b", "/a/b"]
            .iter()
            .map(|p| IgnorePattern::parse(p).unwrap())
            .collect();
        let parent: AncestorPath = ["a"].into_iter().collect();
        let found = set.matching_pattern("b", &parent).unwrap();
        assert_eq!(found.to_string(), "//b");
        assert_eq!(set.len(), 2);
    }
}
