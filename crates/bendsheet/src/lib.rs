#![warn(missing_docs)]

//! Tube bend sheet generation.
//!
//! This facade runs the full pipeline: raw path elements are ordered
//! and validated, the travel direction is normalized, and the resulting
//! plan is turned into a [`BendSheet`] with straights, bends, segment
//! layout, bend marks, material requirements, and feasibility findings.
//!
//! ```no_run
//! use bendsheet::{analyze_path, generate, PathElement, ToolingParams, UnitScale};
//! # fn demo(elements: &[PathElement]) -> Result<(), bendsheet::BendSheetError> {
//! let plan = analyze_path(elements)?;
//! let sheet = generate(&plan, UnitScale::IDENTITY, &ToolingParams::default())?;
//! println!("{} bends over {:.2}", sheet.bends.len(), sheet.total_cut_length);
//! # Ok(())
//! # }
//! ```
//!
//! Hard failures (bad topology, broken alternation, degenerate
//! geometry, unusable CLR) come back as [`BendSheetError`]; anything a
//! fabricator can work around (grip violations, CLR mismatch, an
//! infeasible feed direction) is attached to the sheet as data.

use bendsheet_calc::{
    build_segments_and_marks, calculate_material_requirements, calculate_straights_and_bends,
    validate_clr_consistency, validate_direction_aware,
};
use bendsheet_path::{build_ordered_path, normalize_path_direction, validate_path_alternation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bendsheet_calc::{
    BendData, CalcError, ClrCheck, DirectionValidationResult, MarkPosition, MaterialCalculation,
    PathSegment, SegmentKind, StraightSection, ToolingParams, UnitScale,
};
pub use bendsheet_math::{MathError, Point3, Vec3};
pub use bendsheet_path::{
    DirectionResult as PathPlan, ElementGeometry, ElementKind, PathElement, PathError, TravelAxis,
};

/// Errors from the bend sheet pipeline.
#[derive(Error, Debug)]
pub enum BendSheetError {
    /// Path reconstruction or alternation failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Bend calculation failed.
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// The path contains arcs but no usable centerline radius.
    #[error("invalid CLR detected (zero or negative) - check that arcs have valid radii")]
    InvalidClr,
}

/// Result type for bend sheet operations.
pub type Result<T> = std::result::Result<T, BendSheetError>;

/// A complete bend sheet. All lengths and positions are in display
/// units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BendSheet {
    /// Straight sections in fabrication order.
    pub straights: Vec<StraightSection>,
    /// Bends in fabrication order.
    pub bends: Vec<BendData>,
    /// Cumulative segment layout.
    pub segments: Vec<PathSegment>,
    /// Die-offset-corrected bend marks.
    pub marks: Vec<MarkPosition>,
    /// Grip/tail material requirements and violations.
    pub material: MaterialCalculation,
    /// Feed-direction feasibility verdict.
    pub direction_validation: DirectionValidationResult,
    /// Centerline radius check across all arcs.
    pub clr: ClrCheck,
    /// Label for the travel direction.
    pub travel_direction: String,
    /// Label for the opposite travel direction.
    pub opposite_direction: String,
    /// Whether the path starts with an arc.
    pub starts_with_arc: bool,
    /// Whether the path ends with an arc.
    pub ends_with_arc: bool,
    /// Sum of straight lengths and arc lengths.
    pub total_centerline: f64,
    /// Raw stock length to cut, including all extra material and
    /// allowances.
    pub total_cut_length: f64,
    /// Position of the tail trim cut, present when synthetic tail or
    /// tail extension stock must be removed after bending.
    pub tail_cut_position: Option<f64>,
}

/// Order, validate, and direction-normalize a raw element selection.
///
/// Runs path reconstruction, line/arc alternation validation, and
/// travel-direction normalization. The returned [`PathPlan`] can be fed
/// to [`generate`] as-is, or reversed first via [`PathPlan::reversed`]
/// when the user picks the opposite feed direction.
pub fn analyze_path(elements: &[PathElement]) -> Result<PathPlan> {
    let ordered = build_ordered_path(elements)?;
    validate_path_alternation(&ordered)?;
    Ok(normalize_path_direction(ordered))
}

/// Generate a bend sheet from an analyzed path.
///
/// Fails on an unusable CLR when arcs are present and on degenerate
/// geometry; every other finding lands on the sheet as data.
pub fn generate(plan: &PathPlan, units: UnitScale, tooling: &ToolingParams) -> Result<BendSheet> {
    tooling.validate()?;

    let radii: Vec<f64> = plan
        .path
        .iter()
        .filter_map(|e| match *e.geometry() {
            ElementGeometry::Arc { radius, .. } => Some(radius),
            ElementGeometry::Line { .. } => None,
        })
        .collect();

    let clr = validate_clr_consistency(&radii, units);
    if !radii.is_empty() && clr.clr <= 0.0 {
        return Err(BendSheetError::InvalidClr);
    }

    let (straights, bends) =
        calculate_straights_and_bends(&plan.path, &plan.start_point, clr.clr, units)?;

    let material = calculate_material_requirements(
        &straights,
        tooling,
        plan.starts_with_arc,
        plan.ends_with_arc,
    );

    let direction_validation =
        validate_direction_aware(&straights, tooling.min_grip, &plan.opposite_direction);

    let (segments, marks) = build_segments_and_marks(
        &straights,
        &bends,
        plan.starts_with_arc,
        material.extra_material,
        tooling.die_offset,
    );

    let total_centerline: f64 = straights.iter().map(|s| s.length).sum::<f64>()
        + bends.iter().map(|b| b.arc_length).sum::<f64>();
    let total_cut_length = total_centerline
        + material.extra_material
        + material.synthetic_tail_material
        + material.extra_tail_material
        + material.effective_start_allowance
        + material.effective_end_allowance;

    // Tail stock added for bending gets trimmed afterwards; the cut
    // lands before that stock and before the end allowance.
    let trimmed_tail = material.synthetic_tail_material + material.extra_tail_material;
    let tail_cut_position = (material.has_synthetic_tail || material.has_tail_extension)
        .then(|| total_cut_length - trimmed_tail - material.effective_end_allowance);

    Ok(BendSheet {
        straights,
        bends,
        segments,
        marks,
        material,
        direction_validation,
        clr,
        travel_direction: plan.travel_direction.clone(),
        opposite_direction: plan.opposite_direction.clone(),
        starts_with_arc: plan.starts_with_arc,
        ends_with_arc: plan.ends_with_arc,
        total_centerline,
        total_cut_length,
        tail_cut_position,
    })
}
