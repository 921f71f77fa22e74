//! Parsed ignore expressions.
//!
//! Two forms are understood: `/a/b` is anchored at the document root and
//! `//a/b` matches at any depth. Steps are plain element local names.

use std::fmt;
use std::str::FromStr;

use crate::constants::{ANYWHERE_MARKER, PATH_SEPARATOR};
use crate::error::{Error, Result};

use super::AncestorPath;

/// Where a pattern is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Matches only the whole path, starting at the root element.
    Rooted,
    /// Matches any path ending with the pattern's steps.
    Anywhere,
}

/// One parsed ignore expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePattern {
    anchor: Anchor,
    segments: Vec<String>,
}

/// Characters of XPath syntax that would otherwise be taken as part of a name.
const UNSUPPORTED: &[(char, &str)] = &[
    ('[', "predicates are not supported"),
    (']', "predicates are not supported"),
    ('@', "attribute steps are not supported"),
    ('*', "wildcards are not supported"),
    ('(', "functions are not supported"),
    (':', "namespace prefixes are not supported"),
];

impl IgnorePattern {
    /// Parses an ignore expression.
    ///
    /// A leading `//` makes the pattern match anywhere; a leading `/`, or no
    /// leading slash at all, anchors it at the root.
    pub fn parse(expression: &str) -> Result<Self> {
        let trimmed = expression.trim();
        let (anchor, rest) = if let Some(rest) = trimmed.strip_prefix(ANYWHERE_MARKER) {
            (Anchor::Anywhere, rest)
        } else if let Some(rest) = trimmed.strip_prefix(PATH_SEPARATOR) {
            (Anchor::Rooted, rest)
        } else {
            (Anchor::Rooted, trimmed)
        };

        let malformed = |reason: &'static str| Error::MalformedPattern {
            pattern: expression.to_string(),
            reason,
        };

        if rest.is_empty() {
            return Err(malformed("no element names"));
        }

        let mut segments = Vec::new();
        for step in rest.split(PATH_SEPARATOR) {
            if step.is_empty() {
                return Err(malformed("empty step; '//' is only allowed at the start"));
            }
            if let Some((_, reason)) = UNSUPPORTED.iter().find(|(c, _)| step.contains(*c)) {
                return Err(malformed(*reason));
            }
            segments.push(step.to_string());
        }

        Ok(IgnorePattern { anchor, segments })
    }

    /// Returns the anchor kind.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns the element names, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Tests whether the pattern matches a complete path.
    pub fn matches(&self, path: &AncestorPath) -> bool {
        self.matches_names(path.names(), path.len())
    }

    /// Tests whether the pattern matches the element `label` under `parent`.
    ///
    /// Equivalent to `matches(&parent.child(label))` without building the path.
    pub fn matches_child(&self, parent: &AncestorPath, label: &str) -> bool {
        self.matches_names(
            parent.names().chain(std::iter::once(label)),
            parent.len() + 1,
        )
    }

    fn matches_names<'a>(&self, names: impl DoubleEndedIterator<Item = &'a str>, len: usize) -> bool {
        match self.anchor {
            Anchor::Rooted => {
                len == self.segments.len()
                    && names.zip(&self.segments).all(|(name, step)| name == step.as_str())
            }
            Anchor::Anywhere => {
                len >= self.segments.len()
                    && names
                        .rev()
                        .zip(self.segments.iter().rev())
                        .all(|(name, step)| name == step.as_str())
            }
        }
    }
}

impl FromStr for IgnorePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        IgnorePattern::parse(s)
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor == Anchor::Anywhere {
            write!(f, "{}", PATH_SEPARATOR)?;
        }
        for step in &self.segments {
            write!(f, "{}{}", PATH_SEPARATOR, step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> AncestorPath {
        names.iter().copied().collect()
    }

    #[test]
    fn test_parse_forms() {
        let rooted = IgnorePattern::parse("/a/b").unwrap();
        assert_eq!(rooted.anchor(), Anchor::Rooted);
        assert_eq!(rooted.segments(), ["a", "b"]);

        let anywhere: IgnorePattern = "//b".parse().unwrap();
        assert_eq!(anywhere.anchor(), Anchor::Anywhere);
        assert_eq!(anywhere.segments(), ["b"]);

        let bare = IgnorePattern::parse("a/b").unwrap();
        assert_eq!(bare, rooted);
    }

    #[test]
    fn test_parse_rejects_empty() {
        for bad in ["", "/", "//", "  "] {
            assert!(
                matches!(IgnorePattern::parse(bad), Err(Error::MalformedPattern { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_unsupported_syntax() {
        for bad in ["/a//b", "///a", "/a/", "//b[1]", "//@id", "/a/*", "//p:b"] {
            assert!(IgnorePattern::parse(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_rooted_matches_whole_path_only() {
        let pattern = IgnorePattern::parse("/a/b").unwrap();
        assert!(pattern.matches(&path(&["a", "b"])));
        assert!(!pattern.matches(&path(&["a"])));
        assert!(!pattern.matches(&path(&["a", "b", "c"])));
        assert!(!pattern.matches(&path(&["x", "a", "b"])));
        assert!(!pattern.matches(&path(&["b", "a"])));
    }

    #[test]
    fn test_anywhere_matches_suffix() {
        let pattern = IgnorePattern::parse("//b/c").unwrap();
        assert!(pattern.matches(&path(&["b", "c"])));
        assert!(pattern.matches(&path(&["a", "b", "c"])));
        assert!(pattern.matches(&path(&["x", "y", "b", "c"])));
        assert!(!pattern.matches(&path(&["a", "b"])));
        assert!(!pattern.matches(&path(&["c"])));
        assert!(!pattern.matches(&path(&["b", "c", "d"])));
    }

    #[test]
    fn test_matches_child_agrees_with_matches() {
        let parent = path(&["a", "b"]);
        for expr in ["/a/b/c", "//c", "//b/c", "/a/b", "//a", "/c"] {
            let pattern = IgnorePattern::parse(expr).unwrap();
            assert_eq!(
                pattern.matches_child(&parent, "c"),
                pattern.matches(&parent.child("c")),
                "{}",
                expr
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(IgnorePattern::parse("//a/b").unwrap().to_string(), "//a/b");
        assert_eq!(IgnorePattern::parse("a").unwrap().to_string(), "/a");
    }
}
