//! Data structures for the Lanai registry.
//!
//! This module contains the segment trie that backs hierarchical wildcard
//! lookups. All implementations adhere to the project requirements:
//! - No unsafe code
//! - Lazy, allocation-light iteration
//! - Explicit error types for every fallible operation

pub mod lanai_glob_tree;

// Re-export common data structures
pub use lanai_glob_tree::{
    InvalidPathError, LanaiGlobTree, LanaiGlobTreeConfig, LanaiGlobTreeResult, NodeId, Query,
    QueryOptions,
};
