//! Literal and wildcard lookups of concrete entries.
//!
//! A [`GlobIter`] answers "which stored entries match this pattern". Only one
//! wildcard segment is resolved per pattern: the literal prefix in front of it
//! is resolved by exact descent and the literal suffix behind it is matched
//! against candidate nodes. Entries stored below a `*` or `**` edge are
//! patterns themselves and are never produced here.

use std::collections::VecDeque;

use tracing::debug;

use super::children::{ChildCursor, SubtreeWalk};
use super::node::NodeId;
use super::path::{self, is_wildcard_name, SegmentKind};
use super::LanaiGlobTree;

/// Lazy, live sequence of value-bearing nodes matching a pattern.
#[derive(Debug, Clone)]
pub struct GlobIter {
    state: GlobState,
}

#[derive(Debug, Clone)]
enum GlobState {
    /// Nothing can match
    Empty,

    /// Exact match, taken on first `next`
    Single(Option<NodeId>),

    /// Every value-bearing descendant (`""` and `**`)
    Subtree(SubtreeWalk),

    /// Direct children (`*`)
    Children(ChildCursor),

    /// One segment followed by a literal suffix (`*.b.c`)
    SingleStar {
        cursor: ChildCursor,
        suffix: Vec<String>,
    },

    /// One or more segments followed by a literal suffix (`**.b.c`).
    /// Matches any value-bearing node ending in the suffix, leaf or not.
    DoubleStar {
        current: ChildCursor,
        queue: VecDeque<ChildCursor>,
        min_depth: usize,
        suffix: Vec<String>,
    },
}

impl GlobIter {
    /// Creates an iterator that yields nothing.
    pub fn empty() -> Self {
        Self {
            state: GlobState::Empty,
        }
    }

    /// Creates an iterator over the nodes below `start` matching `pattern`.
    ///
    /// An empty pattern walks the whole subtree, pattern nodes included.
    /// `**.suffix` yields every value-bearing node ending in `suffix`, including
    /// nodes that have children of their own.
    /// A pattern that cannot match (missing prefix, empty segment, malformed
    /// wildcard, or a second wildcard in the suffix) yields nothing.
    pub fn new<T>(tree: &LanaiGlobTree<T>, start: NodeId, pattern: &str) -> Self {
        let state = Self::plan(tree, start, pattern);
        debug!(pattern, plan = state.label(), "Planned glob query");
        Self { state }
    }

    fn plan<T>(tree: &LanaiGlobTree<T>, start: NodeId, pattern: &str) -> GlobState {
        if pattern.is_empty() {
            return GlobState::Subtree(SubtreeWalk::new(start));
        }
        let Some(segments) = path::split(pattern) else {
            return GlobState::Empty;
        };

        let Some(at) = segments.iter().position(|s| is_wildcard_name(s)) else {
            let found = tree
                .descend(start, segments.as_slice())
                .filter(|id| tree.node(*id).has_value());
            return GlobState::Single(found);
        };

        let kind = SegmentKind::of(segments[at]);
        let suffix = &segments[at + 1..];
        if !kind.is_wildcard() || suffix.iter().any(|s| is_wildcard_name(s)) {
            return GlobState::Empty;
        }
        let Some(base) = tree.descend(start, &segments[..at]) else {
            return GlobState::Empty;
        };

        match (kind, suffix.is_empty()) {
            (SegmentKind::Single, true) => GlobState::Children(ChildCursor::new(base)),
            (SegmentKind::Single, false) => GlobState::SingleStar {
                cursor: ChildCursor::new(base),
                suffix: suffix.iter().map(|s| (*s).to_string()).collect(),
            },
            (_, true) => GlobState::Subtree(SubtreeWalk::literal_only(base)),
            (_, false) => GlobState::DoubleStar {
                current: ChildCursor::new(base),
                queue: VecDeque::new(),
                min_depth: tree.node(base).depth + suffix.len() + 1,
                suffix: suffix.iter().map(|s| (*s).to_string()).collect(),
            },
        }
    }

    /// Returns the next matching node.
    pub fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        match &mut self.state {
            GlobState::Empty => None,
            GlobState::Single(node) => node.take(),
            GlobState::Subtree(walk) => walk.next(tree),
            GlobState::Children(cursor) => {
                while let Some(id) = cursor.next(tree) {
                    let node = tree.node(id);
                    if !node.is_wildcard() && node.has_value() {
                        return Some(id);
                    }
                }
                None
            }
            GlobState::SingleStar { cursor, suffix } => {
                while let Some(id) = cursor.next(tree) {
                    if tree.node(id).is_wildcard() {
                        continue;
                    }
                    let found = tree
                        .descend(id, suffix.as_slice())
                        .filter(|found| tree.node(*found).has_value());
                    if found.is_some() {
                        return found;
                    }
                }
                None
            }
            GlobState::DoubleStar {
                current,
                queue,
                min_depth,
                suffix,
            } => loop {
                let Some(id) = current.next(tree) else {
                    // Keep the last cursor so children appended to it are still seen.
                    *current = queue.pop_front()?;
                    continue;
                };
                let node = tree.node(id);
                if node.is_wildcard() {
                    continue;
                }
                queue.push_back(ChildCursor::new(id));
                if node.has_value() && node.depth >= *min_depth && ends_with(tree, id, suffix) {
                    return Some(id);
                }
            },
        }
    }
}

impl GlobState {
    fn label(&self) -> &'static str {
        match self {
            GlobState::Empty => "empty",
            GlobState::Single(_) => "exact",
            GlobState::Subtree(_) => "subtree",
            GlobState::Children(_) => "children",
            GlobState::SingleStar { .. } => "single-star-suffix",
            GlobState::DoubleStar { .. } => "double-star-suffix",
        }
    }
}

/// Whether the trailing segments of `id`'s path equal `suffix`.
fn ends_with<T>(tree: &LanaiGlobTree<T>, id: NodeId, suffix: &[String]) -> bool {
    let mut current = id;
    for segment in suffix.iter().rev() {
        let node = tree.node(current);
        if node.name != *segment {
            return false;
        }
        match node.parent {
            Some(parent) => current = parent,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(entries: &[(&str, u32)]) -> LanaiGlobTree<u32> {
        let mut tree = LanaiGlobTree::new();
        for (path, value) in entries {
            tree.insert(path, *value).unwrap();
        }
        tree
    }

    fn values(tree: &LanaiGlobTree<u32>, pattern: &str) -> Vec<u32> {
        let mut iter = GlobIter::new(tree, tree.root(), pattern);
        let mut out = Vec::new();
        while let Some(id) = iter.next(tree) {
            out.extend(tree.node(id).value().copied());
        }
        out
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree = LanaiGlobTree::<u32>::new();
        assert!(values(&tree, "").is_empty());
        assert!(values(&tree, "unknown").is_empty());
        assert!(values(&tree, "*").is_empty());
        assert!(values(&tree, "a.**.b").is_empty());
    }

    #[test]
    fn test_empty_pattern_walks_everything() {
        let tree = tree_with(&[("a", 1), ("a.b", 2), ("*", 3)]);
        assert_eq!(values(&tree, ""), vec![1, 2, 3]);
    }

    #[test]
    fn test_exact_match() {
        let tree = tree_with(&[("a", 1), ("a.a", 2)]);
        assert_eq!(values(&tree, "a"), vec![1]);
        assert_eq!(values(&tree, "a.a"), vec![2]);
        assert!(values(&tree, "unknown").is_empty());
    }

    #[test]
    fn test_exact_match_without_value() {
        let tree = tree_with(&[("a.b", 1)]);
        assert!(values(&tree, "a").is_empty());
    }

    #[test]
    fn test_malformed_patterns_match_nothing() {
        let tree = tree_with(&[("a.b", 1), ("ab", 2)]);
        assert!(values(&tree, "a..b").is_empty());
        assert!(values(&tree, "a*").is_empty());
        assert!(values(&tree, "*.*").is_empty());
        assert!(values(&tree, "a.").is_empty());
    }

    #[test]
    fn test_single_star() {
        let tree = tree_with(&[("a", 0), ("a.a", 1), ("a.b", 2), ("b.a", 3)]);
        assert_eq!(values(&tree, "a.*"), vec![1, 2]);
        assert_eq!(values(&tree, "*"), vec![0]);
    }

    #[test]
    fn test_single_star_suffix() {
        let tree = tree_with(&[("a", 0), ("a.a", 1), ("b.a", 2), ("c.b", 3), ("aaa", 4)]);
        assert_eq!(values(&tree, "*.a"), vec![1, 2]);
    }

    #[test]
    fn test_single_star_suffix_accepts_any_characters() {
        for name in ["xyz.a", "XYZ.a", "123.a"] {
            let tree = tree_with(&[(name, 1)]);
            assert_eq!(values(&tree, "*.a"), vec![1]);
        }
    }

    #[test]
    fn test_single_star_between_literals() {
        let tree = tree_with(&[("a.x.b", 1), ("a.x.y.b", 2), ("a.b", 3)]);
        assert_eq!(values(&tree, "a.*.b"), vec![1]);
    }

    #[test]
    fn test_double_star() {
        let tree = tree_with(&[("a.b", 1), ("a.c.d", 2), ("a.c.e.f", 3), ("b.a", 4)]);
        assert_eq!(values(&tree, "a.**"), vec![1, 2, 3]);
    }

    #[test]
    fn test_double_star_suffix_needs_at_least_one_segment() {
        let tree = tree_with(&[("a.x.b", 1), ("a.x.y.b", 2), ("a.b", 3)]);
        assert_eq!(values(&tree, "a.**.b"), vec![1, 2]);

        let tree = tree_with(&[("b", 1), ("a.b", 2)]);
        assert_eq!(values(&tree, "**.b"), vec![2]);
    }

    #[test]
    fn test_double_star_suffix_matches_inner_nodes() {
        let tree = tree_with(&[("a.x.b", 1), ("a.x.b.c", 2)]);
        assert_eq!(values(&tree, "a.**.b"), vec![1]);
        assert_eq!(values(&tree, "a.**.c"), vec![2]);
    }

    #[test]
    fn test_double_star_suffix_with_several_segments() {
        let tree = tree_with(&[("x.b.c", 1), ("b.c", 2), ("x.y.b.c", 3), ("x.c", 4)]);
        assert_eq!(values(&tree, "**.b.c"), vec![1, 3]);
    }

    #[test]
    fn test_missing_prefix_matches_nothing() {
        let tree = tree_with(&[("b.a", 1)]);
        assert!(values(&tree, "a.*").is_empty());
        assert!(values(&tree, "a.**").is_empty());
        assert!(values(&tree, "a.*.b").is_empty());
    }

    #[test]
    fn test_wildcards_skip_nodes_without_value() {
        let tree = tree_with(&[("a.b.c", 1)]);
        assert!(values(&tree, "a.*").is_empty());
        assert!(values(&tree, "*.b").is_empty());
    }

    #[test]
    fn test_pattern_nodes_are_excluded() {
        let tree = tree_with(&[("*", 1), ("a", 2), ("**", 3), ("*.b", 4), ("a.b", 5), ("**.b", 6)]);
        assert_eq!(values(&tree, "*"), vec![2]);
        assert_eq!(values(&tree, "**"), vec![2, 5]);
        assert_eq!(values(&tree, "*.b"), vec![5]);
        assert_eq!(values(&tree, "**.b"), vec![5]);
    }

    #[test]
    fn test_includes_children_inserted_while_iterating() {
        let mut tree = tree_with(&[("a", 1)]);
        let mut iter = GlobIter::new(&tree, tree.root(), "*");
        assert!(iter.next(&tree).is_some());

        tree.insert("b", 2).unwrap();
        let next = iter.next(&tree).unwrap();
        assert_eq!(tree.node(next).value(), Some(&2));
    }

    #[test]
    fn test_includes_prefixed_children_inserted_while_iterating() {
        let mut tree = tree_with(&[("a.a", 1)]);
        let mut iter = GlobIter::new(&tree, tree.root(), "a.*");
        assert!(iter.next(&tree).is_some());

        tree.insert("a.b", 2).unwrap();
        let next = iter.next(&tree).unwrap();
        assert_eq!(tree.node(next).value(), Some(&2));
    }

    #[test]
    fn test_includes_descendants_inserted_while_iterating() {
        let mut tree = tree_with(&[("a.b", 1)]);
        let mut iter = GlobIter::new(&tree, tree.root(), "**");
        assert!(iter.next(&tree).is_some());

        tree.insert("a.c", 2).unwrap();
        let next = iter.next(&tree).unwrap();
        assert_eq!(tree.node(next).value(), Some(&2));

        let mut tree = tree_with(&[("a.b.c", 1)]);
        let mut iter = GlobIter::new(&tree, tree.root(), "a.**");
        assert!(iter.next(&tree).is_some());

        tree.insert("a.b.d", 2).unwrap();
        let next = iter.next(&tree).unwrap();
        assert_eq!(tree.node(next).value(), Some(&2));
    }

    #[test]
    fn test_exact_match_is_taken_once() {
        let tree = tree_with(&[("one", 1)]);
        let mut iter = GlobIter::new(&tree, tree.root(), "one");
        assert!(iter.next(&tree).is_some());
        assert_eq!(iter.next(&tree), None);
    }
}
