//! Error types for path reconstruction.

use crate::element::ElementKind;
use thiserror::Error;

/// Errors that can occur while ordering or validating a path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The element set is empty.
    #[error("path has no elements")]
    Empty,

    /// A single straight element cannot form a bend sheet on its own.
    #[error("a single straight element cannot form a bend path")]
    SingleLine,

    /// One or more elements do not connect to anything.
    #[error(
        "found {count} disconnected element(s); all elements must connect \
         to form a continuous path"
    )]
    Disconnected {
        /// Number of elements with no neighbors.
        count: usize,
    },

    /// Every element has two neighbors, so the path has no free ends.
    #[error("path forms a closed loop; it must have two free endpoints")]
    ClosedLoop,

    /// Exactly one free end was found, indicating a gap in the path.
    #[error(
        "path has only one free endpoint; check for disconnected segments \
         or missing elements"
    )]
    Dangling,

    /// More than two free ends. Y-junctions are not fabricable as a
    /// single tube.
    #[error("path has {free_ends} branches; only single continuous paths are supported")]
    Branching {
        /// Number of free ends detected.
        free_ends: usize,
    },

    /// An element connects to more than two neighbors.
    #[error(
        "element {index} connects to {degree} neighbors; only single \
         continuous paths are supported"
    )]
    Junction {
        /// 1-based position of the offending element in the input.
        index: usize,
        /// Its neighbor count.
        degree: usize,
    },

    /// The ordered path does not alternate line/arc.
    #[error("position {position}: expected {expected}, got {actual}")]
    Alternation {
        /// 1-based position of the first mismatch.
        position: usize,
        /// The kind required at that position.
        expected: ElementKind,
        /// The kind actually present.
        actual: ElementKind,
    },
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
