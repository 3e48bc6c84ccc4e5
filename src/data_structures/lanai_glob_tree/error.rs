//! Error types for the Lanai Glob Tree.
//!
//! Insertion is the only fallible operation of the tree. Queries never fail:
//! a pattern that matches nothing simply produces an empty iterator.

/// Errors raised when a dotted path cannot be inserted into the tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum InvalidPathError {
    /// Error when an empty path is provided.
    #[error("Empty path not allowed")]
    EmptyPath,

    /// Error when a path contains an empty segment (`a..b`, `.a`, `a.`).
    #[error("Path '{path}' contains an empty segment")]
    EmptySegment {
        /// The offending path.
        path: String,
    },

    /// Error when a segment mixes `*` with other characters.
    #[error("Path '{path}' has invalid wildcard segment '{segment}', expected '*' or '**'")]
    InvalidWildcard {
        /// The offending path.
        path: String,
        /// The segment that is neither `*`, `**` nor free of `*`.
        segment: String,
    },

    /// Error when the resulting node would sit deeper than the configured limit.
    #[error("Path '{path}' exceeds maximum tree depth of {max_depth}")]
    TooDeep {
        /// The offending path.
        path: String,
        /// The maximum allowed depth.
        max_depth: usize,
    },
}
