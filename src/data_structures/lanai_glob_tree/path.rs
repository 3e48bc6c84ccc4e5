//! Dotted path handling for the Lanai Glob Tree.
//!
//! A path is a `.`-separated list of segments. A segment is either a literal
//! name, the single-segment wildcard `*`, or the multi-segment wildcard `**`.

use super::error::InvalidPathError;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Wildcard matching exactly one segment.
pub const WILDCARD_SINGLE: &str = "*";

/// Wildcard matching one or more segments.
pub const WILDCARD_MULTI: &str = "**";

/// Classification of a single path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A segment without any `*`.
    Literal,
    /// Exactly `*`.
    Single,
    /// Exactly `**`.
    Multi,
    /// Any other segment containing `*`, e.g. `a*` or `***`.
    Invalid,
}

impl SegmentKind {
    /// Classifies a segment.
    pub fn of(segment: &str) -> Self {
        match segment {
            WILDCARD_SINGLE => SegmentKind::Single,
            WILDCARD_MULTI => SegmentKind::Multi,
            s if s.contains('*') => SegmentKind::Invalid,
            _ => SegmentKind::Literal,
        }
    }

    /// Returns `true` for `*` and `**`.
    pub fn is_wildcard(self) -> bool {
        matches!(self, SegmentKind::Single | SegmentKind::Multi)
    }
}

/// Returns `true` if the segment name contains the wildcard character.
#[inline]
pub fn is_wildcard_name(name: &str) -> bool {
    name.contains('*')
}

/// Splits a query pattern or key into segments.
///
/// Returns `None` for an empty string or when any segment is empty. Queries
/// treat both cases as "matches nothing".
pub fn split(pattern: &str) -> Option<Vec<&str>> {
    if pattern.is_empty() {
        return None;
    }
    let segments: Vec<&str> = pattern.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Validates a path for insertion below a node at `base_depth`.
///
/// # Returns
///
/// * `Ok(Vec<&str>)` - The segments of the path.
/// * `Err(InvalidPathError)` - If the path is empty, has an empty or malformed
///   segment, or would exceed `max_depth`.
pub fn validate(
    path: &str,
    base_depth: usize,
    max_depth: usize,
) -> Result<Vec<&str>, InvalidPathError> {
    if path.is_empty() {
        return Err(InvalidPathError::EmptyPath);
    }

    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(InvalidPathError::EmptySegment {
                path: path.to_string(),
            });
        }
        if SegmentKind::of(segment) == SegmentKind::Invalid {
            return Err(InvalidPathError::InvalidWildcard {
                path: path.to_string(),
                segment: (*segment).to_string(),
            });
        }
    }

    if base_depth + segments.len() > max_depth {
        return Err(InvalidPathError::TooDeep {
            path: path.to_string(),
            max_depth,
        });
    }

    Ok(segments)
}
