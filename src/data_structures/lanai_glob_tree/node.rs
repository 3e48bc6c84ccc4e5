//! Node implementation for the Lanai Glob Tree.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Each node represents one segment of a dotted path.

use std::fmt;

use super::children::ChildList;
use super::path::{is_wildcard_name, SEPARATOR};

/// Handle to a node stored in a [`LanaiGlobTree`](super::LanaiGlobTree).
///
/// Handles stay valid for the lifetime of the tree since nodes are never
/// removed. A handle is only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the Lanai Glob Tree.
///
/// A node only counts as an entry of the tree when it holds a value; nodes
/// without one are structural and never yielded by a query.
#[derive(Debug, Clone)]
pub struct SegmentNode<T> {
    /// Segment this node represents (`*` or `**` for pattern edges)
    pub(crate) name: String,

    /// Full dotted path from the root, fixed at attach time
    pub(crate) path: String,

    /// Value associated with this path, if any
    pub(crate) value: Option<T>,

    /// Parent node, `None` for the root
    pub(crate) parent: Option<NodeId>,

    /// Distance from the root
    pub(crate) depth: usize,

    /// Children in insertion order
    pub(crate) children: ChildList,

    /// Whether any direct child is named `*` or `**`
    pub(crate) has_wildcard_child: bool,

    /// Whether any node below this one was attached through a wildcard edge
    pub(crate) has_wildcard_descendant: bool,

    /// Whether this node was reached through a wildcard edge
    pub(crate) is_pattern: bool,
}

impl<T> SegmentNode<T> {
    /// Creates the root node.
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            value: None,
            parent: None,
            depth: 0,
            children: ChildList::new(),
            has_wildcard_child: false,
            has_wildcard_descendant: false,
            is_pattern: false,
        }
    }

    /// Creates a detached child of `parent` named `name`, deriving its path.
    pub(crate) fn child_of(parent: &SegmentNode<T>, parent_id: NodeId, name: &str) -> Self {
        let path = if parent.path.is_empty() {
            name.to_string()
        } else {
            let mut path = String::with_capacity(parent.path.len() + 1 + name.len());
            path.push_str(&parent.path);
            path.push(SEPARATOR);
            path.push_str(name);
            path
        };

        Self {
            name: name.to_string(),
            path,
            value: None,
            parent: Some(parent_id),
            depth: parent.depth + 1,
            children: ChildList::new(),
            has_wildcard_child: false,
            has_wildcard_descendant: false,
            is_pattern: parent.is_pattern || is_wildcard_name(name),
        }
    }

    /// Segment name of this node. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full dotted path of this node. Empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value stored at this node.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether this node holds a value.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Parent of this node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance from the root (the root has depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        self.children.as_slice()
    }

    /// Child named `name`, if attached.
    #[inline]
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name)
    }

    /// Whether any direct child is a wildcard edge.
    pub fn has_wildcard_child(&self) -> bool {
        self.has_wildcard_child
    }

    /// Whether any descendant was attached through a wildcard edge.
    pub fn has_wildcard_descendant(&self) -> bool {
        self.has_wildcard_descendant
    }

    /// Whether this node's own name is `*` or `**`.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        is_wildcard_name(&self.name)
    }

    /// Whether this node represents a stored pattern, i.e. its path runs
    /// through at least one wildcard edge.
    pub fn is_pattern(&self) -> bool {
        self.is_pattern
    }
}
