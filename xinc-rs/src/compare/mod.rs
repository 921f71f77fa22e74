//! The inclusion comparator.
//!
//! `expected` is included in `actual` when every element, attribute and
//! ordered non-element node of `expected` has a counterpart in `actual`.
//! Extra content in `actual` is always allowed, so the check is not
//! symmetric.
//!
//! Element children are matched as a multiset: each expected element takes
//! the first not-yet-used actual sibling with the same expanded name whose
//! subtree matches. Text, processing instructions and entity references are
//! matched in order against the next unused actual sibling. Whitespace-only
//! text and comments never need a counterpart.

mod report;
mod result;

pub use report::render;
pub use result::{Comparison, Difference, DifferenceKind};

use tracing::{debug, trace};

use crate::error::Result;
use crate::ignore::{AncestorPath, IgnoreSet};
use crate::node::{Document, Node, XmlElement};
use crate::xml::{describe, start_tag};

/// Settings for one comparison run.
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    /// Raw ignore expressions, `/a/b` or `//b`.
    pub ignore_patterns: Vec<String>,
    /// When set, text content and attribute values are not compared.
    pub skip_text: bool,
}

/// Compares two parsed documents.
///
/// Fails only when an ignore pattern is malformed, before any comparison.
pub fn compare_documents(
    expected: &Document,
    actual: &Document,
    config: &CompareConfig,
) -> Result<Comparison> {
    let comparator = Comparator::from_config(config)?;
    Ok(comparator.compare_documents(expected, actual))
}

/// Checks structural inclusion between node trees.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    ignore: IgnoreSet,
    skip_text: bool,
}

impl Comparator {
    /// Creates a comparator from parsed ignore patterns.
    pub fn new(ignore: IgnoreSet, skip_text: bool) -> Self {
        Comparator { ignore, skip_text }
    }

    /// Creates a comparator, parsing the configured ignore patterns.
    pub fn from_config(config: &CompareConfig) -> Result<Self> {
        let ignore = IgnoreSet::parse_all(&config.ignore_patterns)?;
        Ok(Self::new(ignore, config.skip_text))
    }

    /// Returns the ignore patterns in use.
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Returns true if text content and attribute values are skipped.
    pub fn skips_text(&self) -> bool {
        self.skip_text
    }

    /// Compares the root elements of two documents.
    pub fn compare_documents(&self, expected: &Document, actual: &Document) -> Comparison {
        let mut path = AncestorPath::new();
        let result = self.compare_elements(expected.root(), actual.root(), &mut path);
        debug!(matched = result.is_match(), "comparison finished");
        result
    }

    /// Compares two nodes.
    ///
    /// `path` is the path of the element containing both nodes. It is
    /// extended while descending and is back to its original value when this
    /// returns.
    pub fn compare(&self, expected: &Node, actual: &Node, path: &mut AncestorPath) -> Comparison {
        match (expected, actual) {
            (Node::Comment(_), _) | (_, Node::Comment(_)) => Comparison::NoDiff,
            (Node::Element(e), Node::Element(a)) => self.compare_elements(e, a, path),
            (Node::Text(e), Node::Text(a)) => {
                if self.skip_text || e.text().trim() == a.text().trim() {
                    Comparison::NoDiff
                } else {
                    Difference::new(
                        path,
                        DifferenceKind::TextMismatch {
                            expected: e.text().to_string(),
                            found: a.text().to_string(),
                        },
                    )
                    .into()
                }
            }
            (Node::ProcessingInstruction(e), Node::ProcessingInstruction(a)) => {
                let same = e.target() == a.target() && (self.skip_text || e.content() == a.content());
                self.content_result(same, expected, actual, path)
            }
            (Node::EntityReference(e), Node::EntityReference(a)) => {
                self.content_result(e.name() == a.name(), expected, actual, path)
            }
            _ => Difference::new(
                path,
                DifferenceKind::NodeKindMismatch {
                    expected_kind: expected.kind_name(),
                    expected: describe(expected),
                    found_kind: actual.kind_name(),
                    found: describe(actual),
                },
            )
            .into(),
        }
    }

    fn content_result(
        &self,
        same: bool,
        expected: &Node,
        actual: &Node,
        path: &AncestorPath,
    ) -> Comparison {
        if same {
            return Comparison::NoDiff;
        }
        Difference::new(
            path,
            DifferenceKind::ContentMismatch {
                kind: expected.kind_name(),
                expected: describe(expected),
                found: describe(actual),
            },
        )
        .into()
    }

    /// Compares two elements and their subtrees.
    fn compare_elements(
        &self,
        expected: &XmlElement,
        actual: &XmlElement,
        path: &mut AncestorPath,
    ) -> Comparison {
        if let Some(pattern) = self.ignore.matching_pattern(expected.local_name(), path) {
            debug!(%path, element = expected.qname(), %pattern, "ignored element");
            return Comparison::NoDiff;
        }

        let same_name = self.same_element(expected, actual, path);
        path.push(expected.local_name());
        trace!(%path, "comparing element");

        let result = if !same_name {
            Difference::new(
                path,
                DifferenceKind::NameMismatch {
                    expected: expected.expanded_name().to_string(),
                    found: actual.expanded_name().to_string(),
                },
            )
            .into()
        } else if let Some(attribute) = self.first_unmatched_attribute(expected, actual) {
            Difference::new(
                path,
                DifferenceKind::AttributeMismatch {
                    attribute,
                    expected: owned_attributes(expected),
                    found: owned_attributes(actual),
                },
            )
            .into()
        } else {
            self.compare_children(expected.children(), actual.children(), path)
        };

        path.pop();
        result
    }

    /// Checks that every node in `expected` has a counterpart in `actual`.
    ///
    /// `path` is the path of the element owning both child lists.
    pub fn compare_children(
        &self,
        expected: &[Node],
        actual: &[Node],
        path: &mut AncestorPath,
    ) -> Comparison {
        // Actual siblings not yet consumed, in document order.
        let mut remaining: Vec<&Node> = actual.iter().collect();

        for node in expected {
            match node {
                Node::Element(element) => {
                    if let Some(pattern) = self.ignore.matching_pattern(element.local_name(), path)
                    {
                        debug!(%path, element = element.qname(), %pattern, "ignored element");
                        continue;
                    }
                    match self.find_candidate(element, &remaining, path) {
                        Ok(index) => {
                            remaining.remove(index);
                        }
                        Err(difference) => return difference.into(),
                    }
                }
                Node::Text(text) if text.is_whitespace() => {}
                Node::Comment(_) => {}
                _ => {
                    let head = remaining
                        .iter()
                        .position(|n| !n.is_comment() && !n.is_whitespace_text());
                    let Some(index) = head else {
                        return Difference::new(
                            path,
                            DifferenceKind::MissingNode {
                                kind: node.kind_name(),
                                expected: describe(node),
                            },
                        )
                        .into();
                    };
                    let other = remaining.remove(index);
                    if let Comparison::Diff(difference) = self.compare(node, other, path) {
                        return difference.into();
                    }
                }
            }
        }

        Comparison::NoDiff
    }

    /// Finds the first remaining actual element that fully matches `expected`.
    ///
    /// Returns its index in `remaining`, or the difference to report.
    fn find_candidate(
        &self,
        expected: &XmlElement,
        remaining: &[&Node],
        path: &mut AncestorPath,
    ) -> std::result::Result<usize, Difference> {
        let mut failures = Vec::new();

        for (index, candidate) in remaining.iter().enumerate() {
            let Node::Element(actual) = *candidate else {
                continue;
            };
            if !self.same_element(expected, actual, path) {
                continue;
            }
            match self.compare_elements(expected, actual, path) {
                Comparison::NoDiff => return Ok(index),
                Comparison::Diff(difference) => {
                    debug!(%path, element = expected.qname(), reason = %difference, "candidate rejected");
                    failures.push(difference);
                }
            }
        }

        let element = start_tag(expected);
        let kind = if failures.is_empty() {
            DifferenceKind::ElementNotFound { element }
        } else {
            DifferenceKind::NoMatchingCandidate {
                element,
                candidates: failures,
            }
        };
        Err(Difference::new(path, kind))
    }

    /// Tests element identity.
    ///
    /// An ignored element matches any element. Otherwise local names must be
    /// equal and both names must resolve to the same namespace URI, whatever
    /// prefixes were used.
    pub fn same_element(
        &self,
        expected: &XmlElement,
        actual: &XmlElement,
        path: &AncestorPath,
    ) -> bool {
        self.ignore.is_ignored(expected.local_name(), path)
            || expected.expanded_name() == actual.expanded_name()
    }

    /// Tests that every attribute of `expected` is present on `actual`.
    ///
    /// Attributes are looked up by local name and resolved namespace. Values
    /// must be equal unless text is skipped. Extra attributes on `actual` are
    /// fine.
    pub fn includes_attributes(&self, expected: &XmlElement, actual: &XmlElement) -> bool {
        self.first_unmatched_attribute(expected, actual).is_none()
    }

    fn first_unmatched_attribute(&self, expected: &XmlElement, actual: &XmlElement) -> Option<String> {
        expected
            .sorted_attributes()
            .into_iter()
            .find(|(qname, value)| {
                let Some(name) = expected.resolve_attribute_name(qname) else {
                    return true;
                };
                match actual.find_attribute(&name) {
                    Some((_, found)) => !(self.skip_text || found == *value),
                    None => true,
                }
            })
            .map(|(qname, _)| qname.to_string())
    }
}

fn owned_attributes(element: &XmlElement) -> Vec<(String, String)> {
    element
        .sorted_attributes()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    fn run(expected: &str, actual: &str, ignore: &[&str], skip_text: bool) -> Comparison {
        let config = CompareConfig {
            ignore_patterns: ignore.iter().map(|s| s.to_string()).collect(),
            skip_text,
        };
        let expected = parse_str(expected).unwrap();
        let actual = parse_str(actual).unwrap();
        compare_documents(&expected, &actual, &config).unwrap()
    }

    fn diff(expected: &str, actual: &str) -> Difference {
        match run(expected, actual, &[], false) {
            Comparison::Diff(d) => d,
            Comparison::NoDiff => panic!("expected a difference"),
        }
    }

    fn element(xml: &str) -> XmlElement {
        parse_str(xml).unwrap().root().clone()
    }

    #[test]
    fn test_extra_sibling_allowed() {
        assert!(run("<a><b/></a>", "<a><c/><b/></a>", &[], false).is_match());
    }

    #[test]
    fn test_attribute_value_mismatch() {
        let d = diff(r#"<a x="1"/>"#, r#"<a x="2"/>"#);
        assert_eq!(d.path.to_string(), "/a");
        assert!(matches!(d.kind, DifferenceKind::AttributeMismatch { ref attribute, .. } if attribute == "x"));
    }

    #[test]
    fn test_skip_text() {
        let expected = "<a><b>hi</b></a>";
        let actual = "<a><b>bye</b></a>";
        assert!(run(expected, actual, &[], true).is_match());

        let d = diff(expected, actual);
        assert_eq!(d.path.to_string(), "/a");
        assert!(matches!(d.kind, DifferenceKind::NoMatchingCandidate { .. }));
    }

    #[test]
    fn test_ignore_suppresses_attribute_difference() {
        let result = run(r#"<a><b x="1"/></a>"#, r#"<a><b x="99"/></a>"#, &["//b"], false);
        assert!(result.is_match());
    }

    #[test]
    fn test_duplicate_expected_elements_need_two_actual() {
        let d = diff("<a><b/><b/></a>", "<a><b/></a>");
        assert_eq!(d.path.to_string(), "/a");
        assert_eq!(
            d.kind,
            DifferenceKind::ElementNotFound {
                element: "<b>".to_string()
            }
        );
    }

    #[test]
    fn test_text_compared_trimmed() {
        assert!(run("<a>  hi </a>", "<a>hi</a>", &[], false).is_match());
        let d = diff("<a> hi </a>", "<a>ho</a>");
        assert_eq!(
            d.kind,
            DifferenceKind::TextMismatch {
                expected: " hi ".to_string(),
                found: "ho".to_string()
            }
        );
    }

    #[test]
    fn test_name_mismatch_at_root() {
        let d = diff("<a/>", "<b/>");
        assert_eq!(d.path.to_string(), "/a");
        assert_eq!(
            d.kind,
            DifferenceKind::NameMismatch {
                expected: "a".to_string(),
                found: "b".to_string()
            }
        );
    }

    #[test]
    fn test_first_fit_picks_first_matching_candidate() {
        // The first <b> fails on its attribute; the second one matches.
        let expected = r#"<a><b k="2"/><b k="1"/></a>"#;
        let actual = r#"<a><b k="1"/><b k="2"/></a>"#;
        assert!(run(expected, actual, &[], false).is_match());
    }

    #[test]
    fn test_consumed_element_not_reused() {
        // Both expected <b/> could match the first actual <b k="1"/>, but it
        // can only be used once.
        let expected = "<a><b/><b/></a>";
        let actual = r#"<a><b k="1"/><c/></a>"#;
        assert!(!run(expected, actual, &[], false).is_match());
    }

    #[test]
    fn test_positional_text_order_matters() {
        assert!(run("<a>x<b/>y</a>", "<a>x<b/>y</a>", &[], false).is_match());
        let d = diff("<a>x<?p?>y</a>", "<a>y<?p?>x</a>");
        assert!(matches!(d.kind, DifferenceKind::TextMismatch { .. }));
    }

    #[test]
    fn test_missing_ordered_node() {
        let d = diff("<a>x</a>", "<a/>");
        assert!(matches!(d.kind, DifferenceKind::MissingNode { kind: "text", .. }));
    }

    #[test]
    fn test_kind_mismatch_is_a_difference() {
        let d = diff("<a><?p data?></a>", "<a>text</a>");
        match d.kind {
            DifferenceKind::NodeKindMismatch {
                expected_kind,
                found_kind,
                ..
            } => {
                assert_eq!(expected_kind, "processing instruction");
                assert_eq!(found_kind, "text");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_processing_instruction_content() {
        assert!(!run("<a><?p one?></a>", "<a><?p two?></a>", &[], false).is_match());
        assert!(run("<a><?p one?></a>", "<a><?p two?></a>", &[], true).is_match());
        assert!(!run("<a><?p one?></a>", "<a><?q one?></a>", &[], true).is_match());
    }

    #[test]
    fn test_entity_references_compared_by_name() {
        assert!(run("<a>&x;</a>", "<a>&x;</a>", &[], false).is_match());

        let d = diff("<a>&x;</a>", "<a>&y;</a>");
        assert_eq!(d.path.to_string(), "/a");
        assert_eq!(
            d.kind,
            DifferenceKind::ContentMismatch {
                kind: "entity reference",
                expected: "&x;".to_string(),
                found: "&y;".to_string()
            }
        );

        let d = diff("<a>&x;</a>", "<a>x</a>");
        assert_eq!(d.path.to_string(), "/a");
        match d.kind {
            DifferenceKind::NodeKindMismatch {
                expected_kind,
                found_kind,
                ..
            } => {
                assert_eq!(expected_kind, "entity reference");
                assert_eq!(found_kind, "text");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_extra_element_before_text_is_a_difference() {
        let expected = "<p><b>x</b> tail</p>";
        assert!(run(expected, "<p><b>x</b> tail<i/></p>", &[], false).is_match());

        let d = diff(expected, "<p><i/><b>x</b> tail</p>");
        assert_eq!(d.path.to_string(), "/p");
        assert!(matches!(
            d.kind,
            DifferenceKind::NodeKindMismatch {
                expected_kind: "text",
                found_kind: "element",
                ..
            }
        ));
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 200;
        let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        assert!(run(&xml, &xml, &[], false).is_match());
    }

    #[test]
    fn test_comments_never_participate() {
        assert!(run("<a><!-- x --><b/></a>", "<a><b/></a>", &[], false).is_match());
        assert!(run("<a>t</a>", "<a><!-- c -->t</a>", &[], false).is_match());
    }

    #[test]
    fn test_path_restored_after_compare() {
        let comparator = Comparator::default();
        let e = Node::Element(element("<a><b><c/></b></a>"));
        let a = Node::Element(element("<a><b><d/></b></a>"));
        let mut path: AncestorPath = ["outer"].into_iter().collect();
        let result = comparator.compare(&e, &a, &mut path);
        assert_eq!(path.to_string(), "/outer");

        let difference = result.difference().unwrap();
        assert_eq!(difference.path.to_string(), "/outer/a");
        match &difference.kind {
            DifferenceKind::NoMatchingCandidate { candidates, .. } => {
                assert_eq!(candidates.len(), 1);
                assert_eq!(candidates[0].path.to_string(), "/outer/a/b");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_same_element_by_namespace_uri() {
        let comparator = Comparator::default();
        let path = AncestorPath::new();
        let e = element(r#"<p:a xmlns:p="urn:x"/>"#);
        let a = element(r#"<q:a xmlns:q="urn:x"/>"#);
        let other = element(r#"<p:a xmlns:p="urn:y"/>"#);
        assert!(comparator.same_element(&e, &a, &path));
        assert!(!comparator.same_element(&e, &other, &path));
    }

    #[test]
    fn test_same_element_when_ignored() {
        let ignore = IgnoreSet::parse_all(["/a"]).unwrap();
        let comparator = Comparator::new(ignore, false);
        assert!(comparator.same_element(&element("<a/>"), &element("<z/>"), &AncestorPath::new()));
    }

    #[test]
    fn test_includes_attributes() {
        let comparator = Comparator::default();
        let expected = element(r#"<e a="1"/>"#);
        assert!(comparator.includes_attributes(&expected, &element(r#"<e a="1" b="2"/>"#)));
        assert!(!comparator.includes_attributes(&expected, &element(r#"<e b="2"/>"#)));
        assert!(!comparator.includes_attributes(&expected, &element(r#"<e a="2"/>"#)));
        assert!(!comparator.includes_attributes(&element(r#"<e a="1" b="x"/>"#), &element(r#"<e a="1" b="2"/>"#)));

        let skipping = Comparator::new(IgnoreSet::new(), true);
        assert!(skipping.includes_attributes(&element(r#"<e a="1" b="x"/>"#), &element(r#"<e a="1" b="2"/>"#)));
        assert!(!skipping.includes_attributes(&expected, &element(r#"<e b="2"/>"#)));
    }

    #[test]
    fn test_namespaced_attributes_resolve_by_uri() {
        let comparator = Comparator::default();
        let expected = element(r#"<e xmlns:p="urn:x" p:id="1"/>"#);
        let same_uri = element(r#"<e xmlns:q="urn:x" q:id="1"/>"#);
        let other_uri = element(r#"<e xmlns:p="urn:y" p:id="1"/>"#);
        let unqualified = element(r#"<e id="1"/>"#);
        assert!(comparator.includes_attributes(&expected, &same_uri));
        assert!(!comparator.includes_attributes(&expected, &other_uri));
        assert!(!comparator.includes_attributes(&expected, &unqualified));
    }

    #[test]
    fn test_malformed_pattern_fails_before_comparing() {
        let doc = parse_str("<a/>").unwrap();
        let config = CompareConfig {
            ignore_patterns: vec!["//".to_string()],
            skip_text: false,
        };
        assert!(compare_documents(&doc, &doc, &config).is_err());
    }
}
