//! Ordered child storage and live traversal primitives.
//!
//! Children are kept in insertion order in an append-only list. Cursors do
//! not borrow the list: they remember the parent handle and a position and
//! re-read the list through the tree on every step, so children appended
//! after a cursor was created are still observed once the cursor reaches
//! them. This is what lets callers insert between two `next` calls.

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use super::node::NodeId;
use super::LanaiGlobTree;

/// Insertion-ordered children of a node, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct ChildList {
    /// Children in insertion order
    order: Vec<NodeId>,

    /// Segment name to child lookup
    index: HashMap<String, NodeId, FnvBuildHasher>,
}

impl ChildList {
    /// Creates an empty child list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the child named `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Returns the child at `position` in insertion order.
    #[inline]
    pub fn at(&self, position: usize) -> Option<NodeId> {
        self.order.get(position).copied()
    }

    /// Appends a child. The caller guarantees `name` is not attached yet.
    pub(crate) fn push(&mut self, name: String, id: NodeId) {
        debug_assert!(!self.index.contains_key(&name), "duplicate child '{name}'");
        self.index.insert(name, id);
        self.order.push(id);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no children.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Children in insertion order.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }
}

/// Live forward cursor over the children of one node.
#[derive(Debug, Clone)]
pub struct ChildCursor {
    parent: NodeId,
    position: usize,
}

impl ChildCursor {
    /// Creates a cursor positioned before the first child of `parent`.
    pub fn new(parent: NodeId) -> Self {
        Self {
            parent,
            position: 0,
        }
    }

    /// Returns the next child and advances.
    ///
    /// Returning `None` does not advance, so a child appended later is
    /// returned by a subsequent call.
    pub fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        let child = tree.node(self.parent).children.at(self.position)?;
        self.position += 1;
        Some(child)
    }
}

/// Live depth-first pre-order walk over a subtree, start node excluded.
///
/// Only value-bearing nodes are produced. The walk keeps an explicit stack of
/// child cursors, so tree depth does not grow the call stack.
#[derive(Debug, Clone)]
pub struct SubtreeWalk {
    stack: Vec<ChildCursor>,
    skip_patterns: bool,
}

impl SubtreeWalk {
    /// Walks every node below `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            stack: vec![ChildCursor::new(start)],
            skip_patterns: false,
        }
    }

    /// Walks every node below `start` that is not reached through a `*` or
    /// `**` edge.
    pub fn literal_only(start: NodeId) -> Self {
        Self {
            stack: vec![ChildCursor::new(start)],
            skip_patterns: true,
        }
    }

    /// Returns the next value-bearing node of the walk.
    pub fn next<T>(&mut self, tree: &LanaiGlobTree<T>) -> Option<NodeId> {
        while let Some(cursor) = self.stack.last_mut() {
            match cursor.next(tree) {
                Some(id) => {
                    let node = tree.node(id);
                    if self.skip_patterns && node.is_wildcard() {
                        continue;
                    }
                    self.stack.push(ChildCursor::new(id));
                    if node.has_value() {
                        return Some(id);
                    }
                }
                // The start cursor is never dropped so late top-level children show up.
                None if self.stack.len() == 1 => return None,
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
