//! Segment-keyed URI lookup tree.
//!
//! One node per URI segment level. Each node carries a direct map of
//! literal child segments, an ordered list of regex-pattern children, and
//! an optional terminal value. Literal matches always beat pattern matches
//! at the same level; among patterns, registration order is the tie-break.
//!
//! Nodes are created lazily on registration and never pruned; clearing a
//! terminal value on removal is enough because tree depth is bounded by
//! URI segment count.

use std::collections::HashMap;

use regex::Regex;

use crate::error::RegistryError;

/// One segment of a registered URI path.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Matches exactly this string.
    Literal(String),
    /// Matches any segment the anchored expression accepts.
    Pattern(Regex),
}

impl Segment {
    /// A literal segment.
    #[must_use]
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    /// A pattern segment, compiled anchored so it must cover the whole
    /// segment text.
    pub fn pattern(expr: &str) -> Result<Self, RegistryError> {
        let anchored = format!("^(?:{expr})$");
        let regex = Regex::new(&anchored).map_err(|source| RegistryError::InvalidPattern {
            pattern: expr.to_string(),
            source,
        })?;
        Ok(Self::Pattern(regex))
    }

    /// Classify a raw segment: anything containing a regex metacharacter
    /// becomes a pattern, everything else a literal.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        const META: &[char] = &[
            '.', '*', '+', '?', '[', ']', '(', ')', '{', '}', '|', '^', '$', '\\',
        ];
        if raw.contains(META) {
            Self::pattern(raw)
        } else {
            Ok(Self::literal(raw))
        }
    }

    /// The canonical string form used for pattern identity.
    #[must_use]
    pub fn canonical(&self) -> &str {
        match self {
            Self::Literal(s) => s,
            Self::Pattern(re) => re.as_str(),
        }
    }
}

#[derive(Debug)]
struct Node<V> {
    literals: HashMap<String, Node<V>>,
    patterns: Vec<(Regex, Node<V>)>,
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            patterns: Vec::new(),
            value: None,
        }
    }
}

impl<V> Node<V> {
    /// Resolve one plain segment: literal first, then patterns in
    /// registration order.
    fn child(&self, segment: &str) -> Option<&Node<V>> {
        if let Some(node) = self.literals.get(segment) {
            return Some(node);
        }
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(segment))
            .map(|(_, node)| node)
    }

    /// Resolve one registration-key segment, exact by canonical form.
    fn child_by_key(&self, key: &Segment) -> Option<&Node<V>> {
        match key {
            Segment::Literal(s) => self.literals.get(s),
            Segment::Pattern(re) => self
                .patterns
                .iter()
                .find(|(p, _)| p.as_str() == re.as_str())
                .map(|(_, node)| node),
        }
    }

    fn child_by_key_mut(&mut self, key: &Segment) -> Option<&mut Node<V>> {
        match key {
            Segment::Literal(s) => self.literals.get_mut(s),
            Segment::Pattern(re) => self
                .patterns
                .iter_mut()
                .find(|(p, _)| p.as_str() == re.as_str())
                .map(|(_, node)| node),
        }
    }

    /// Descend into the child for a registration key, creating it if
    /// needed. A literal key always gets its own literal child, even when
    /// a registered pattern at this level already covers it; lookups give
    /// the literal precedence.
    fn child_or_insert(&mut self, key: &Segment) -> &mut Node<V> {
        match key {
            Segment::Literal(s) => self.literals.entry(s.clone()).or_default(),
            Segment::Pattern(re) => {
                if let Some(idx) = self
                    .patterns
                    .iter()
                    .position(|(p, _)| p.as_str() == re.as_str())
                {
                    return &mut self.patterns[idx].1;
                }
                self.patterns.push((re.clone(), Node::default()));
                let idx = self.patterns.len() - 1;
                &mut self.patterns[idx].1
            }
        }
    }
}

/// A trie mapping URI paths to values, with mixed literal and pattern
/// segments.
#[derive(Debug)]
pub struct UriTree<V> {
    root: Node<V>,
}

impl<V> Default for UriTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> UriTree<V> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
        }
    }

    /// Register `value` at the path given by `segments`, returning any
    /// value previously terminal there (upsert semantics).
    pub fn add(&mut self, segments: &[Segment], value: V) -> Option<V> {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.child_or_insert(segment);
        }
        node.value.replace(value)
    }

    /// Look up the value at the full path.
    ///
    /// Fails as soon as any segment has no match, or when the final node
    /// carries no terminal value.
    #[must_use]
    pub fn lookup(&self, segments: &[&str]) -> Option<&V> {
        let mut node = &self.root;
        for segment in segments {
            node = node.child(segment)?;
        }
        node.value.as_ref()
    }

    /// Return the first terminal value encountered while descending left
    /// to right, plus the depth at which descent stopped.
    ///
    /// A depth equal to `segments.len()` with `Some` value is a full
    /// match; a smaller depth with `Some` is a prefix match.
    #[must_use]
    pub fn along_path(&self, segments: &[&str]) -> (Option<&V>, usize) {
        let mut node = &self.root;
        let mut depth = 0;
        for segment in segments {
            match node.child(segment) {
                Some(child) => {
                    node = child;
                    depth += 1;
                    if node.value.is_some() {
                        return (node.value.as_ref(), depth);
                    }
                }
                None => return (None, depth),
            }
        }
        (None, depth)
    }

    /// Exact lookup by registration key, without pattern evaluation
    /// against literals.
    #[must_use]
    pub fn get(&self, segments: &[Segment]) -> Option<&V> {
        let mut node = &self.root;
        for segment in segments {
            node = node.child_by_key(segment)?;
        }
        node.value.as_ref()
    }

    /// Clear and return the terminal value at the path given by its
    /// registration key. The node itself is not pruned.
    pub fn remove(&mut self, segments: &[Segment]) -> Option<V> {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.child_by_key_mut(segment)?;
        }
        node.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &[&str]) -> Vec<Segment> {
        path.iter().map(|s| Segment::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_literal_lookup() {
        let mut tree = UriTree::new();
        assert_eq!(tree.add(&segs(&["a", "led"]), 1), None);
        assert_eq!(tree.lookup(&["a", "led"]), Some(&1));
        assert_eq!(tree.lookup(&["a"]), None);
        assert_eq!(tree.lookup(&["a", "fan"]), None);
        assert_eq!(tree.lookup(&["a", "led", "x"]), None);
    }

    #[test]
    fn test_upsert_returns_previous() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", "led"]), 1);
        assert_eq!(tree.add(&segs(&["a", "led"]), 2), Some(1));
        assert_eq!(tree.lookup(&["a", "led"]), Some(&2));
    }

    #[test]
    fn test_pattern_segment_matches() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", ".*"]), 9);
        assert_eq!(tree.lookup(&["a", "anything"]), Some(&9));
        assert_eq!(tree.lookup(&["b", "anything"]), None);
    }

    #[test]
    fn test_literal_beats_pattern() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", ".*"]), 9);
        tree.add(&[Segment::literal("a"), Segment::literal("led")], 1);
        assert_eq!(tree.lookup(&["a", "led"]), Some(&1));
        assert_eq!(tree.lookup(&["a", "fan"]), Some(&9));
    }

    #[test]
    fn test_pattern_registration_order_tie_break() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", "l.*"]), 1);
        tree.add(&segs(&["a", ".*"]), 2);
        // both match "led"; the first registered pattern wins
        assert_eq!(tree.lookup(&["a", "led"]), Some(&1));
        assert_eq!(tree.lookup(&["a", "fan"]), Some(&2));
    }

    #[test]
    fn test_patterns_are_anchored_to_whole_segment() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", "led[0-9]"]), 1);
        assert_eq!(tree.lookup(&["a", "led5"]), Some(&1));
        assert_eq!(tree.lookup(&["a", "led55"]), None);
        assert_eq!(tree.lookup(&["a", "xled5"]), None);
    }

    #[test]
    fn test_literal_after_covering_pattern_keeps_both_routes() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", ".*"]), 1);
        // "led" is covered by the pattern, but the literal registration
        // still gets its own child and wins lookups
        assert_eq!(tree.add(&[Segment::literal("a"), Segment::literal("led")], 2), None);
        assert_eq!(tree.lookup(&["a", "led"]), Some(&2));
        assert_eq!(tree.lookup(&["a", "fan"]), Some(&1));
    }

    #[test]
    fn test_along_path_prefix_resolution() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["oc", "core"]), 7);
        let (value, depth) = tree.along_path(&["oc", "core", "d", "type"]);
        assert_eq!(value, Some(&7));
        assert_eq!(depth, 2);
    }

    #[test]
    fn test_along_path_reports_failure_depth() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["oc", "core"]), 7);
        let (value, depth) = tree.along_path(&["oc", "missing", "deeper"]);
        assert_eq!(value, None);
        assert_eq!(depth, 1);
    }

    #[test]
    fn test_remove_clears_terminal_only() {
        let mut tree = UriTree::new();
        let key = segs(&["a", "led"]);
        tree.add(&key, 1);
        tree.add(&segs(&["a", "led", "sub"]), 2);

        assert_eq!(tree.remove(&key), Some(1));
        assert_eq!(tree.lookup(&["a", "led"]), None);
        // child nodes survive the removal
        assert_eq!(tree.lookup(&["a", "led", "sub"]), Some(&2));
        // second removal is a no-op
        assert_eq!(tree.remove(&key), None);
    }

    #[test]
    fn test_remove_pattern_route_by_key() {
        let mut tree = UriTree::new();
        let key = segs(&["a", ".*"]);
        tree.add(&key, 1);
        assert_eq!(tree.remove(&key), Some(1));
        assert_eq!(tree.lookup(&["a", "led"]), None);
    }

    #[test]
    fn test_get_is_exact_by_key() {
        let mut tree = UriTree::new();
        tree.add(&segs(&["a", ".*"]), 1);
        assert_eq!(tree.get(&segs(&["a", ".*"])), Some(&1));
        // a literal key does not match the pattern child exactly
        assert_eq!(tree.get(&[Segment::literal("a"), Segment::literal("led")]), None);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(Segment::pattern("led[").is_err());
        assert!(Segment::parse("led[").is_err());
    }

    #[test]
    fn test_parse_classifies_segments() {
        assert!(matches!(Segment::parse("led").unwrap(), Segment::Literal(_)));
        assert!(matches!(Segment::parse("led.*").unwrap(), Segment::Pattern(_)));
    }
}
