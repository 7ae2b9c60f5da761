#![warn(missing_docs)]

//! Bend, layout, and material calculations for the bendsheet kernel.
//!
//! Given an ordered, direction-normalized tube path, this crate
//! computes everything a fabricator needs:
//!
//! - per-section straight lengths and per-bend angles, arc lengths, and
//!   tube rotations ([`calculate_straights_and_bends`]),
//! - centerline-radius consistency across arcs ([`validate_clr_consistency`]),
//! - the cumulative segment layout and bend mark positions
//!   ([`build_segments_and_marks`]),
//! - grip/tail material requirements ([`calculate_material_requirements`]),
//! - direction-aware feasibility checks ([`validate_direction_aware`]).
//!
//! All functions are pure; feasibility findings are returned as data,
//! never as errors.

pub mod bend;
pub mod error;
pub mod layout;
pub mod material;
pub mod units;
pub mod validate;

pub use bend::{
    calculate_straights_and_bends, validate_clr_consistency, BendData, ClrCheck, StraightSection,
};
pub use error::{CalcError, Result};
pub use layout::{build_segments_and_marks, MarkPosition, PathSegment, SegmentKind};
pub use material::{calculate_material_requirements, MaterialCalculation, ToolingParams};
pub use units::UnitScale;
pub use validate::{
    validate_direction_aware, validate_grip_for_direction, CheckDirection,
    DirectionValidationResult, GripValidationResult,
};
