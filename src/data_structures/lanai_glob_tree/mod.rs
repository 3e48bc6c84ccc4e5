//! Lanai Glob Tree Implementation
//!
//! This module provides a segment trie mapping dotted names such as
//! `orders.us.created` to values, with wildcard matching in both directions:
//!
//! * [`GlobIter`]: stored entries matching a query pattern (`orders.*`,
//!   `**.created`).
//! * [`MatcherIter`]: stored wildcard patterns matching a concrete key, in
//!   dispatch precedence order (all `**` patterns before all `*` patterns).
//!
//! `*` stands for exactly one segment and `**` for one or more segments.
//!
//! Iterators do not borrow the tree. Each `next` call takes the tree by
//! reference, so entries may be inserted between two calls; entries inserted
//! ahead of an iterator's position are still produced.
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::lanai_glob_tree::{LanaiGlobTree, QueryOptions};
//!
//! let mut tree = LanaiGlobTree::new();
//! tree.insert("orders.*", "any order event").unwrap();
//! tree.insert("**", "audit").unwrap();
//! tree.insert("orders.created", "created").unwrap();
//!
//! let values: Vec<_> = tree
//!     .query("orders.created", QueryOptions::default())
//!     .values(&tree)
//!     .copied()
//!     .collect();
//! assert_eq!(values, vec!["audit", "any order event", "created"]);
//! ```

mod children;
mod error;
mod glob_iter;
mod matcher_iter;
mod node;
mod path;

use tracing::trace;

pub use children::{ChildCursor, ChildList, SubtreeWalk};
pub use error::InvalidPathError;
pub use glob_iter::GlobIter;
pub use matcher_iter::MatcherIter;
pub use node::{NodeId, SegmentNode};
pub use path::{SegmentKind, SEPARATOR, WILDCARD_MULTI, WILDCARD_SINGLE};

/// Result type for Lanai Glob Tree insertions
pub type LanaiGlobTreeResult<T> = Result<T, InvalidPathError>;

/// Configuration options for the Lanai Glob Tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanaiGlobTreeConfig {
    /// Maximum depth of any node in the tree
    pub max_depth: usize,

    /// Whether queries include pattern matchers unless told otherwise
    pub matchers_by_default: bool,
}

impl Default for LanaiGlobTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            matchers_by_default: true,
        }
    }
}

/// Options controlling which side of the tree a [`Query`] consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    matchers: bool,
    only_matchers: bool,
}

impl QueryOptions {
    /// Matchers followed by entries.
    pub fn new() -> Self {
        Self {
            matchers: true,
            only_matchers: false,
        }
    }

    /// Default options for `tree`, honouring its `matchers_by_default` setting.
    pub fn default_for<T>(tree: &LanaiGlobTree<T>) -> Self {
        Self::new().with_matchers(tree.config.matchers_by_default)
    }

    /// Whether stored patterns matching the query are included.
    pub fn with_matchers(mut self, matchers: bool) -> Self {
        self.matchers = matchers;
        self
    }

    /// Whether only stored patterns matching the query are returned. The
    /// pattern is then treated as a concrete key.
    pub fn with_only_matchers(mut self, only_matchers: bool) -> Self {
        self.only_matchers = only_matchers;
        self
    }

    /// Get whether matchers are included
    pub fn matchers(&self) -> bool {
        self.matchers
    }

    /// Get whether only matchers are returned
    pub fn only_matchers(&self) -> bool {
        self.only_matchers
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Lanai Glob Tree maps dotted paths to values and resolves `*` / `**`
/// wildcards in both directions.
///
/// Key features:
/// * Stored patterns matched against concrete keys in dispatch precedence order
/// * Wildcard queries over concrete entries
/// * Live iterators that tolerate insertion between steps
/// * O(1) child lookup per segment
#[derive(Debug, Clone)]
pub struct LanaiGlobTree<T> {
    /// Node arena, the root lives at index 0
    nodes: Vec<SegmentNode<T>>,

    /// Number of value-bearing nodes
    len: usize,

    /// Configuration options
    config: LanaiGlobTreeConfig,
}

impl<T> LanaiGlobTree<T> {
    /// Creates a new empty `LanaiGlobTree` with default configuration.
    pub fn new() -> Self {
        Self::with_config(LanaiGlobTreeConfig::default())
    }

    /// Creates a new empty `LanaiGlobTree` with the specified configuration.
    pub fn with_config(config: LanaiGlobTreeConfig) -> Self {
        Self {
            nodes: vec![SegmentNode::root()],
            len: 0,
            config,
        }
    }

    /// Configuration of this tree.
    pub fn config(&self) -> &LanaiGlobTreeConfig {
        &self.config
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SegmentNode<T> {
        &self.nodes[id.index()]
    }

    /// Returns the node behind `id`, or `None` if it does not belong to this tree.
    pub fn get_node(&self, id: NodeId) -> Option<&SegmentNode<T>> {
        self.nodes.get(id.index())
    }

    /// Number of value-bearing nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no value has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes in the arena, root and structural nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a value at a dotted path below the root.
    ///
    /// # Arguments
    ///
    /// * `path` - Dotted path; segments are literal names, `*` or `**`.
    /// * `value` - The value to store at the path.
    ///
    /// # Returns
    ///
    /// * `Ok(Option<T>)` - The value previously stored at the path, if any.
    /// * `Err(InvalidPathError)` - If the path is empty, has an empty or
    ///   malformed segment, or is deeper than `max_depth`.
    pub fn insert<P>(&mut self, path: P, value: T) -> LanaiGlobTreeResult<Option<T>>
    where
        P: AsRef<str>,
    {
        self.insert_at(NodeId::ROOT, path, value)
    }

    /// Inserts a value at a dotted path below `node`.
    ///
    /// The stored node's path is the full path from the root.
    pub fn insert_at<P>(&mut self, node: NodeId, path: P, value: T) -> LanaiGlobTreeResult<Option<T>>
    where
        P: AsRef<str>,
    {
        let path = path.as_ref();
        let segments = path::validate(path, self.node(node).depth, self.config.max_depth)?;

        let mut current = node;
        let mut deepest_wildcard_parent = None;
        for segment in segments {
            if path::is_wildcard_name(segment) {
                deepest_wildcard_parent = Some(current);
            }
            current = match self.node(current).child(segment) {
                Some(child) => child,
                None => self.attach(current, segment),
            };
        }

        if let Some(parent) = deepest_wildcard_parent {
            self.mark_wildcard_ancestors(parent);
        }

        let previous = self.nodes[current.index()].value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Creates the child `name` under `parent`.
    fn attach(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let child = SegmentNode::child_of(self.node(parent), parent, name);
        trace!(path = %child.path, id = %id, "Attached node");
        self.nodes.push(child);

        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.push(name.to_string(), id);
        if path::is_wildcard_name(name) {
            parent_node.has_wildcard_child = true;
        }
        id
    }

    /// Flags `from` and its ancestors as having a wildcard descendant.
    fn mark_wildcard_ancestors(&mut self, from: NodeId) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = &mut self.nodes[id.index()];
            if node.has_wildcard_descendant {
                break;
            }
            node.has_wildcard_descendant = true;
            current = node.parent;
        }
    }

    /// Descends from `from` along literal segments.
    pub(crate) fn descend<S>(&self, from: NodeId, segments: &[S]) -> Option<NodeId>
    where
        S: AsRef<str>,
    {
        segments
            .iter()
            .try_fold(from, |current, segment| self.node(current).child(segment.as_ref()))
    }

    /// Finds the node at a dotted path below the root by exact segment match.
    pub fn lookup<P>(&self, path: P) -> Option<NodeId>
    where
        P: AsRef<str>,
    {
        self.lookup_from(NodeId::ROOT, path)
    }

    /// Finds the node at a dotted path below `node` by exact segment match.
    ///
    /// `*` and `**` are compared literally, so this also finds stored patterns.
    pub fn lookup_from<P>(&self, node: NodeId, path: P) -> Option<NodeId>
    where
        P: AsRef<str>,
    {
        let segments = path::split(path.as_ref())?;
        self.descend(node, segments.as_slice())
    }

    /// Retrieves the value stored at a dotted path.
    pub fn get<P>(&self, path: P) -> Option<&T>
    where
        P: AsRef<str>,
    {
        self.lookup(path).and_then(|id| self.node(id).value())
    }

    /// Checks if a value is stored at a dotted path.
    pub fn contains<P>(&self, path: P) -> bool
    where
        P: AsRef<str>,
    {
        self.get(path).is_some()
    }

    /// Queries the tree below the root.
    ///
    /// See [`query_from`](Self::query_from).
    pub fn query(&self, pattern: &str, options: QueryOptions) -> Query {
        self.query_from(NodeId::ROOT, pattern, options)
    }

    /// Queries the tree below `node`.
    ///
    /// * An empty pattern walks every value-bearing node of the subtree.
    /// * With `only_matchers`, `pattern` is a concrete key and the stored
    ///   patterns matching it are returned.
    /// * Without `matchers`, only concrete entries matching `pattern` are returned.
    /// * Otherwise stored patterns matching `pattern` come first, followed by
    ///   concrete entries matching it. Patterns inserted after the query was
    ///   created are still found as long as the pattern side is running.
    pub fn query_from(&self, node: NodeId, pattern: &str, options: QueryOptions) -> Query {
        if options.only_matchers {
            if pattern.is_empty() {
                return Query::empty();
            }
            return Query::matchers(MatcherIter::new(self, node, pattern));
        }

        let glob = GlobIter::new(self, node, pattern);
        if pattern.is_empty() || !options.matchers {
            return Query::glob(glob);
        }
        Query::chain(MatcherIter::new(self, node, pattern), glob)
    }

    /// Stored patterns below the root matching a concrete key, in dispatch order.
    pub fn matchers(&self, key: &str) -> Query {
        self.query(key, QueryOptions::new().with_only_matchers(true))
    }

    /// Every value-bearing node, depth first.
    pub fn iter(&self) -> QueryIter<'_, T> {
        self.query("", QueryOptions::new()).iter(self)
    }
}

impl<T> Default for LanaiGlobTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy result of [`LanaiGlobTree::query`].
///
/// A query holds no borrow of the tree; every step takes it by reference.
/// Use [`iter`](Self::iter) or [`values`](Self::values) for a standard
/// iterator when the tree is not modified during iteration.
#[derive(Debug, Clone)]
pub struct Query {
    matchers: Option<MatcherIter>,
    glob: Option<GlobIter>,
}

impl Query {
    fn empty() -> Self {
        Self {
            matchers: None,
            glob: None,
        }
    }

    fn glob(glob: GlobIter) -> Self {
        Self {
            matchers: None,
            glob: Some(glob),
        }
    }

    fn matchers(matchers: MatcherIter) -> Self {
        Self {
            matchers: Some(matchers),
            glob: None,
        }
    }

    fn chain(matchers: MatcherIter, glob: GlobIter) -> Self {
        Self {
            matchers: Some(matchers),
            glob: Some(glob),
        }
    }

    /// Returns the next matching node, or `None` at the end of the sequence.
    pub fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        if let Some(matchers) = &mut self.matchers {
            if let Some(id) = matchers.next(tree) {
                return Some(id);
            }
            self.matchers = None;
        }
        self.glob.as_mut()?.next(tree)
    }

    /// Collects the remaining nodes.
    pub fn drain_to_list<T>(mut self, tree: &LanaiGlobTree<T>) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        while let Some(id) = self.next(tree) {
            nodes.push(id);
        }
        nodes
    }

    /// Standard iterator over the remaining nodes.
    pub fn iter<T>(self, tree: &LanaiGlobTree<T>) -> QueryIter<'_, T> {
        QueryIter { query: self, tree }
    }

    /// Standard iterator over the values of the remaining nodes.
    pub fn values<T>(self, tree: &LanaiGlobTree<T>) -> impl Iterator<Item = &T> {
        self.iter(tree).filter_map(SegmentNode::value)
    }
}

/// Borrowing iterator adapter for a [`Query`].
#[derive(Debug)]
pub struct QueryIter<'a, T> {
    query: Query,
    tree: &'a LanaiGlobTree<T>,
}

impl<'a, T> Iterator for QueryIter<'a, T> {
    type Item = &'a SegmentNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.query.next(self.tree)?;
        Some(self.tree.node(id))
    }
}
