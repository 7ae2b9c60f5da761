#![warn(missing_docs)]

//! Path reconstruction and direction analysis for the bendsheet kernel.
//!
//! This crate turns an unordered set of line/arc elements into a single
//! ordered, direction-normalized tube path:
//!
//! 1. [`build_ordered_path`] reconstructs the path by endpoint
//!    connectivity and rejects malformed topologies (loops, branches,
//!    disconnected pieces).
//! 2. [`validate_path_alternation`] confirms the strict line/arc
//!    alternation a bendable tube path must have.
//! 3. [`normalize_path_direction`] orients the path toward the positive
//!    end of its dominant travel axis so downstream labels are stable
//!    regardless of selection order.

pub mod direction;
pub mod element;
pub mod error;
pub mod ordering;

pub use direction::{
    determine_primary_axis, free_endpoint, normalize_path_direction,
    should_reverse_path_direction, DirectionResult, TravelAxis,
};
pub use element::{ElementGeometry, ElementKind, PathElement};
pub use error::{PathError, Result};
pub use ordering::{build_ordered_path, elements_are_connected, validate_path_alternation};
