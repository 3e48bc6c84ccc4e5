//! Reverse lookup: which stored patterns match a concrete key.
//!
//! Given a key `k1.k2…kn`, a [`MatcherIter`] produces every stored pattern
//! node that matches it. All `**` patterns come first, then all `*` patterns:
//!
//! * `**` patterns, by growing literal prefix and then by growing literal
//!   suffix: `**`, `**.kn`, `**.k(n-1).kn`, …, `k1.**`, `k1.**.kn`, …
//! * `*` patterns, by growing literal prefix: `*.k2…kn`, `k1.*.k3…kn`, …
//!
//! `**` always stands for at least one segment. Every candidate is resolved
//! against the tree when the iterator reaches it, so patterns inserted ahead
//! of the iterator are found.

use std::sync::Arc;

use tracing::debug;

use super::node::NodeId;
use super::path::{self, WILDCARD_MULTI, WILDCARD_SINGLE};
use super::LanaiGlobTree;

/// Lazy, live sequence of pattern nodes matching a concrete key.
#[derive(Debug, Clone)]
pub struct MatcherIter {
    /// Node the key is resolved from, `None` when nothing can match
    start: Option<NodeId>,
    double: DoubleStarMatcher,
    single: SingleStarMatcher,
}

impl MatcherIter {
    /// Creates an iterator that yields nothing.
    pub fn empty() -> Self {
        let key: Arc<[String]> = Arc::from(Vec::new());
        Self {
            start: None,
            double: DoubleStarMatcher::new(None, key.clone()),
            single: SingleStarMatcher::new(None, key),
        }
    }

    /// Creates an iterator over the patterns below `start` matching `key`.
    ///
    /// Key segments are compared literally. An empty key, or one with an
    /// empty segment, matches nothing.
    pub fn new<T>(tree: &LanaiGlobTree<T>, start: NodeId, key: &str) -> Self {
        let Some(segments) = path::split(key) else {
            return Self::empty();
        };
        debug!(key, start = %start, depth = tree.node(start).depth, "Planned matcher query");

        let key: Arc<[String]> = segments.into_iter().map(str::to_string).collect();
        Self {
            start: Some(start),
            double: DoubleStarMatcher::new(Some(start), key.clone()),
            single: SingleStarMatcher::new(Some(start), key),
        }
    }

    /// Returns the next matching pattern node.
    ///
    /// While no pattern is stored below the start node this returns `None`
    /// without advancing, so patterns inserted later are still found.
    pub fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        let start = self.start?;
        if !tree.node(start).has_wildcard_descendant {
            return None;
        }
        self.double.next(tree).or_else(|| self.single.next(tree))
    }
}

/// Walks `**` candidates prefix by prefix, suffix by suffix.
#[derive(Debug, Clone)]
struct DoubleStarMatcher {
    key: Arc<[String]>,

    /// Node reached by the literal prefix `k1..k(prefix_len)`, `None` once exhausted
    prefix: Option<NodeId>,
    prefix_len: usize,

    /// `**` child of `prefix`, once looked up
    star: Option<NodeId>,
    star_resolved: bool,

    /// Number of trailing key segments to try next behind `star`
    suffix_len: usize,
}

impl DoubleStarMatcher {
    fn new(start: Option<NodeId>, key: Arc<[String]>) -> Self {
        Self {
            key,
            prefix: start,
            prefix_len: 0,
            star: None,
            star_resolved: false,
            suffix_len: 0,
        }
    }

    fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        let n = self.key.len();
        loop {
            let prefix = self.prefix?;
            // `**` must cover at least one segment.
            if self.prefix_len >= n {
                self.prefix = None;
                return None;
            }

            if !self.star_resolved {
                let node = tree.node(prefix);
                self.star = if node.has_wildcard_child {
                    node.child(WILDCARD_MULTI)
                } else {
                    None
                };
                self.star_resolved = true;
                self.suffix_len = 0;
            }

            if let Some(star) = self.star {
                if self.prefix_len + self.suffix_len < n {
                    let suffix = &self.key[n - self.suffix_len..];
                    self.suffix_len += 1;
                    let found = tree
                        .descend(star, suffix)
                        .filter(|id| tree.node(*id).has_value());
                    if found.is_some() {
                        return found;
                    }
                    continue;
                }
            }

            self.prefix = tree.node(prefix).child(&self.key[self.prefix_len]);
            self.prefix_len += 1;
            self.star_resolved = false;
        }
    }
}

/// Walks `*` candidates prefix by prefix.
#[derive(Debug, Clone)]
struct SingleStarMatcher {
    key: Arc<[String]>,

    /// Node reached by the literal prefix `k1..k(prefix_len)`, or by one
    /// segment less until `resolved`; `None` once exhausted
    prefix: Option<NodeId>,
    prefix_len: usize,
    resolved: bool,
}

impl SingleStarMatcher {
    fn new(start: Option<NodeId>, key: Arc<[String]>) -> Self {
        Self {
            key,
            prefix: start,
            prefix_len: 0,
            resolved: true,
        }
    }

    fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        let n = self.key.len();
        loop {
            let mut prefix = self.prefix?;
            if self.prefix_len >= n {
                self.prefix = None;
                return None;
            }

            // The prefix node may have been attached since the last match.
            if !self.resolved {
                prefix = tree.node(prefix).child(&self.key[self.prefix_len - 1])?;
                self.prefix = Some(prefix);
                self.resolved = true;
            }

            let node = tree.node(prefix);
            let found = if node.has_wildcard_child {
                node.child(WILDCARD_SINGLE)
                    .and_then(|star| tree.descend(star, &self.key[self.prefix_len + 1..]))
                    .filter(|id| tree.node(*id).has_value())
            } else {
                None
            };

            self.prefix_len += 1;
            self.resolved = false;
            if found.is_some() {
                return found;
            }
        }
    }
}
