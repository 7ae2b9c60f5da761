//! Straight-section and bend-angle calculation.
//!
//! Turns an ordered path into [`StraightSection`] and [`BendData`]
//! records. Straight lengths come from oriented line vectors. Bend
//! angles come from the angle between adjacent straight vectors; when
//! an arc sits at a path boundary and has no adjacent straight on one
//! side, its angle comes from the arc's own sweep geometry instead.

use crate::error::{CalcError, Result};
use crate::units::UnitScale;
use bendsheet_math::{
    angle_between_vectors, calculate_rotation, cross, distance_between_points, magnitude,
    tolerance, Point3, Vec3,
};
use bendsheet_path::{ElementGeometry, ElementKind, PathElement};
use serde::{Deserialize, Serialize};

/// A straight section of tube between bends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightSection {
    /// 1-based position in the ordered sequence.
    pub number: usize,
    /// Length in display units.
    pub length: f64,
    /// Start point in display units.
    pub start: Point3,
    /// End point in display units.
    pub end: Point3,
    /// Direction/length vector in internal units.
    pub vector: Vec3,
}

/// One bend of the tube path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendData {
    /// 1-based bend number.
    pub number: usize,
    /// Bend angle in degrees, `[0, 180]`.
    pub angle: f64,
    /// Rotation from the previous bend's plane in degrees, `[0, 180]`.
    /// Absent for the first bend and whenever either adjacent bend
    /// plane is undefined.
    pub rotation: Option<f64>,
    /// Arc length along the centerline, display units.
    pub arc_length: f64,
}

/// Arc radii checked for CLR consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClrCheck {
    /// Primary CLR (first arc's radius) in display units.
    pub clr: f64,
    /// Whether any arc deviates from the primary CLR, or any value is
    /// unusable (NaN, infinite, non-positive primary).
    pub has_mismatch: bool,
    /// All per-arc CLR values in display units, in path order.
    pub values: Vec<f64>,
}

/// Extract and validate CLR from arc radii (internal units).
///
/// The first arc's radius is the primary CLR. Values are compared with
/// a ratio tolerance of 0.2% of the primary, floored at
/// [`tolerance::CLR_MIN_FLOOR`] to avoid false mismatches on very
/// small radii. An unusable primary (NaN, infinite, or non-positive)
/// is reported as a mismatch with a zero CLR.
pub fn validate_clr_consistency(radii: &[f64], units: UnitScale) -> ClrCheck {
    let values: Vec<f64> = radii.iter().map(|&r| units.length(r)).collect();

    let Some(&clr) = values.first() else {
        return ClrCheck {
            clr: 0.0,
            has_mismatch: false,
            values,
        };
    };

    // NaN comparisons are always false, so unusable values need
    // explicit checks before the tolerance comparison.
    if clr.is_nan() || clr.is_infinite() || clr <= 0.0 {
        return ClrCheck {
            clr: 0.0,
            has_mismatch: true,
            values,
        };
    }

    if values.iter().any(|c| c.is_nan() || c.is_infinite()) {
        return ClrCheck {
            clr,
            has_mismatch: true,
            values,
        };
    }

    let tol = (clr * tolerance::CLR_RATIO).max(tolerance::CLR_MIN_FLOOR);
    let has_mismatch = values.iter().any(|&c| (c - clr).abs() > tol);

    ClrCheck {
        clr,
        has_mismatch,
        values,
    }
}

/// Orient line endpoint pairs into path-flow order.
///
/// The first line is oriented away from `path_start` (its closer
/// endpoint becomes the start); each subsequent line is oriented to
/// continue from the previous line's resolved end.
fn orient_lines(lines: &[(Point3, Point3)], path_start: &Point3) -> Vec<(Point3, Point3)> {
    let mut corrected = Vec::with_capacity(lines.len());

    if let Some(&(start, end)) = lines.first() {
        if distance_between_points(&end, path_start) < distance_between_points(&start, path_start)
        {
            corrected.push((end, start));
        } else {
            corrected.push((start, end));
        }
    }

    for &(start, end) in lines.iter().skip(1) {
        let prev_end = corrected.last().map(|&(_, e)| e).unwrap_or(*path_start);
        if distance_between_points(&end, &prev_end) < distance_between_points(&start, &prev_end) {
            corrected.push((end, start));
        } else {
            corrected.push((start, end));
        }
    }

    corrected
}

/// The sweep angle of an arc from its own geometry: the angle between
/// the center-to-start and center-to-end vectors.
fn arc_sweep_angle(center: &Point3, start: &Point3, end: &Point3) -> Result<f64> {
    let to_start = start - center;
    let to_end = end - center;
    Ok(angle_between_vectors(&to_start, &to_end)?)
}

/// Calculate all straight sections and bends from an ordered path.
///
/// `path` is the ordered, direction-normalized element sequence;
/// `path_start` is its free starting endpoint (internal units); `clr`
/// is the centerline radius in display units.
///
/// A bend between two straights gets its angle from the adjacent
/// straight vectors and its plane normal from their cross product. An
/// arc at a path boundary has no adjacent straight on that side, so
/// its angle comes from the arc sweep and its plane is undefined
/// there. Rotations are emitted only between bends whose planes are
/// both defined.
pub fn calculate_straights_and_bends(
    path: &[PathElement],
    path_start: &Point3,
    clr: f64,
    units: UnitScale,
) -> Result<(Vec<StraightSection>, Vec<BendData>)> {
    let line_points: Vec<(Point3, Point3)> = path
        .iter()
        .filter_map(|e| match *e.geometry() {
            ElementGeometry::Line { start, end } => Some((start, end)),
            ElementGeometry::Arc { .. } => None,
        })
        .collect();

    let arcs: Vec<(Point3, Point3, Point3)> = path
        .iter()
        .filter_map(|e| match *e.geometry() {
            ElementGeometry::Arc {
                center, start, end, ..
            } => Some((center, start, end)),
            ElementGeometry::Line { .. } => None,
        })
        .collect();

    let starts_with_arc = path.first().is_some_and(|e| e.kind() == ElementKind::Arc);
    let ends_with_arc = path.last().is_some_and(|e| e.kind() == ElementKind::Arc);

    let corrected = orient_lines(&line_points, path_start);

    // Build straight sections and their vectors; a zero-length line is
    // fatal since it cannot define a bend plane.
    let mut straights = Vec::with_capacity(corrected.len());
    let mut vectors: Vec<Vec3> = Vec::with_capacity(corrected.len());

    for (i, &(start, end)) in corrected.iter().enumerate() {
        let vector = end - start;
        if magnitude(&vector) < tolerance::ZERO_MAGNITUDE {
            return Err(CalcError::ZeroLengthLine { number: i + 1 });
        }
        straights.push(StraightSection {
            number: i + 1,
            length: units.length(magnitude(&vector)),
            start: units.point(&start),
            end: units.point(&end),
            vector,
        });
        vectors.push(vector);
    }

    // Each interior bend needs an incoming and an outgoing straight
    // vector; a boundary arc drops the requirement on its open side.
    let required = (arcs.len() + 1)
        .saturating_sub(usize::from(starts_with_arc))
        .saturating_sub(usize::from(ends_with_arc));
    if vectors.len() < required {
        return Err(CalcError::InsufficientGeometry {
            vectors: vectors.len(),
            arcs: arcs.len(),
            required,
        });
    }

    // For arc i, the incoming vector index (shifted down by one when
    // the path opens with an arc). The outgoing index is incoming + 1.
    let incoming_index = |i: usize| -> Option<usize> {
        if starts_with_arc {
            i.checked_sub(1)
        } else {
            Some(i)
        }
    };

    // Bend-plane normals; undefined at boundaries and for collinear
    // adjacent vectors (a degenerate 0 or 180 degree bend).
    let mut normals: Vec<Option<Vec3>> = Vec::with_capacity(arcs.len());
    for i in 0..arcs.len() {
        let normal = incoming_index(i)
            .filter(|&vin| vin + 1 < vectors.len())
            .map(|vin| cross(&vectors[vin], &vectors[vin + 1]))
            .filter(|n| magnitude(n) >= tolerance::ZERO_MAGNITUDE);
        normals.push(normal);
    }

    let mut bends = Vec::with_capacity(arcs.len());
    for (i, &(center, arc_start, arc_end)) in arcs.iter().enumerate() {
        let angle = match incoming_index(i).filter(|&vin| vin + 1 < vectors.len()) {
            Some(vin) => angle_between_vectors(&vectors[vin], &vectors[vin + 1])?,
            None => arc_sweep_angle(&center, &arc_start, &arc_end)?,
        };
        let arc_length = clr * angle.to_radians();

        let rotation = if i > 0 {
            match (normals[i - 1], normals[i]) {
                (Some(prev), Some(curr)) => Some(calculate_rotation(&prev, &curr)?),
                _ => None,
            }
        } else {
            None
        };

        bends.push(BendData {
            number: i + 1,
            angle,
            rotation,
            arc_length,
        });
    }

    Ok((straights, bends))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(p0: (f64, f64, f64), p1: (f64, f64, f64)) -> PathElement {
        PathElement::line(
            Point3::new(p0.0, p0.1, p0.2),
            Point3::new(p1.0, p1.1, p1.2),
        )
    }

    fn arc(
        center: (f64, f64, f64),
        p0: (f64, f64, f64),
        p1: (f64, f64, f64),
        radius: f64,
    ) -> PathElement {
        PathElement::arc(
            Point3::new(center.0, center.1, center.2),
            Point3::new(p0.0, p0.1, p0.2),
            Point3::new(p1.0, p1.1, p1.2),
            radius,
        )
    }

    #[test]
    fn test_clr_consistent() {
        let check = validate_clr_consistency(&[5.0, 5.0, 5.0], UnitScale::IDENTITY);
        assert_relative_eq!(check.clr, 5.0);
        assert!(!check.has_mismatch);
        assert_eq!(check.values.len(), 3);
    }

    #[test]
    fn test_clr_within_ratio_tolerance() {
        // 0.2% of 5.0 is 0.01, so 5.005 matches.
        let check = validate_clr_consistency(&[5.0, 5.005], UnitScale::IDENTITY);
        assert!(!check.has_mismatch);
    }

    #[test]
    fn test_clr_mismatch_outside_tolerance() {
        let check = validate_clr_consistency(&[5.0, 5.1], UnitScale::IDENTITY);
        assert!(check.has_mismatch);
        assert_relative_eq!(check.clr, 5.0);
    }

    #[test]
    fn test_clr_empty() {
        let check = validate_clr_consistency(&[], UnitScale::IDENTITY);
        assert_relative_eq!(check.clr, 0.0);
        assert!(!check.has_mismatch);
    }

    #[test]
    fn test_clr_invalid_primary() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let check = validate_clr_consistency(&[bad, 5.0], UnitScale::IDENTITY);
            assert_relative_eq!(check.clr, 0.0);
            assert!(check.has_mismatch);
        }
    }

    #[test]
    fn test_clr_nan_later_value() {
        let check = validate_clr_consistency(&[5.0, f64::NAN], UnitScale::IDENTITY);
        assert_relative_eq!(check.clr, 5.0);
        assert!(check.has_mismatch);
    }

    #[test]
    fn test_clr_unit_conversion() {
        let check = validate_clr_consistency(&[2.0], UnitScale::new(2.5));
        assert_relative_eq!(check.clr, 5.0);
    }

    #[test]
    fn test_right_angle_bend() {
        // line along +X, 90° bend, line along +Y.
        let path = vec![
            line((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)),
            arc((10.0, 2.0, 0.0), (10.0, 0.0, 0.0), (12.0, 2.0, 0.0), 2.0),
            line((12.0, 2.0, 0.0), (12.0, 10.0, 0.0)),
        ];
        let (straights, bends) =
            calculate_straights_and_bends(&path, &Point3::origin(), 2.0, UnitScale::IDENTITY)
                .unwrap();

        assert_eq!(straights.len(), 2);
        assert_relative_eq!(straights[0].length, 10.0, epsilon = 1e-9);
        assert_relative_eq!(straights[1].length, 8.0, epsilon = 1e-9);

        assert_eq!(bends.len(), 1);
        assert_relative_eq!(bends[0].angle, 90.0, epsilon = 1e-9);
        assert_relative_eq!(
            bends[0].arc_length,
            2.0 * std::f64::consts::FRAC_PI_2,
            epsilon = 1e-9
        );
        assert!(bends[0].rotation.is_none());
    }

    #[test]
    fn test_first_line_oriented_toward_start() {
        // First line endpoints given backwards relative to the path start.
        let path = vec![
            line((10.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            arc((10.0, 2.0, 0.0), (10.0, 0.0, 0.0), (12.0, 2.0, 0.0), 2.0),
            line((12.0, 2.0, 0.0), (12.0, 10.0, 0.0)),
        ];
        let (straights, _) =
            calculate_straights_and_bends(&path, &Point3::origin(), 2.0, UnitScale::IDENTITY)
                .unwrap();
        assert_eq!(straights[0].start, Point3::origin());
        assert_eq!(straights[0].end, Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_planar_s_curve_rotation_180() {
        // Two opposite 90° bends in the XY plane: normals are
        // anti-parallel, rotation is 180° (flip within the same plane).
        let path = vec![
            line((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)),
            arc((10.0, 1.0, 0.0), (10.0, 0.0, 0.0), (11.0, 1.0, 0.0), 1.0),
            line((11.0, 1.0, 0.0), (11.0, 9.0, 0.0)),
            arc((12.0, 9.0, 0.0), (11.0, 9.0, 0.0), (12.0, 10.0, 0.0), 1.0),
            line((12.0, 10.0, 0.0), (20.0, 10.0, 0.0)),
        ];
        let (straights, bends) =
            calculate_straights_and_bends(&path, &Point3::origin(), 1.0, UnitScale::IDENTITY)
                .unwrap();

        assert_eq!(straights.len(), 3);
        assert_eq!(bends.len(), 2);
        assert!(bends[0].rotation.is_none());
        // +X then +Y then +X again: both bends turn within the XY
        // plane but in opposite senses.
        assert_relative_eq!(bends[1].rotation.unwrap(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_plane_rotation_90() {
        // Second bend leaves the XY plane: rotation between bend
        // planes is 90°.
        let path = vec![
            line((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)),
            arc((10.0, 1.0, 0.0), (10.0, 0.0, 0.0), (11.0, 1.0, 0.0), 1.0),
            line((11.0, 1.0, 0.0), (11.0, 9.0, 0.0)),
            arc((11.0, 9.0, 1.0), (11.0, 9.0, 0.0), (11.0, 10.0, 1.0), 1.0),
            line((11.0, 10.0, 1.0), (11.0, 10.0, 9.0)),
        ];
        let (_, bends) =
            calculate_straights_and_bends(&path, &Point3::origin(), 1.0, UnitScale::IDENTITY)
                .unwrap();
        assert_relative_eq!(bends[1].rotation.unwrap(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_at_start_uses_sweep() {
        // Path opens mid-bend: quarter arc, then a line along +Y.
        let path = vec![
            arc((0.0, 2.0, 0.0), (0.0, 0.0, 0.0), (2.0, 2.0, 0.0), 2.0),
            line((2.0, 2.0, 0.0), (2.0, 12.0, 0.0)),
        ];
        let (straights, bends) = calculate_straights_and_bends(
            &path,
            &Point3::origin(),
            2.0,
            UnitScale::IDENTITY,
        )
        .unwrap();

        assert_eq!(straights.len(), 1);
        assert_eq!(bends.len(), 1);
        // Sweep between center->start (0,-2,0) and center->end (2,0,0).
        assert_relative_eq!(bends[0].angle, 90.0, epsilon = 1e-9);
        assert!(bends[0].rotation.is_none());
    }

    #[test]
    fn test_lone_arc() {
        let path = vec![arc(
            (0.0, 5.0, 0.0),
            (0.0, 0.0, 0.0),
            (5.0, 5.0, 0.0),
            5.0,
        )];
        let (straights, bends) =
            calculate_straights_and_bends(&path, &Point3::origin(), 5.0, UnitScale::IDENTITY)
                .unwrap();
        assert!(straights.is_empty());
        assert_eq!(bends.len(), 1);
        assert_relative_eq!(bends[0].angle, 90.0, epsilon = 1e-9);
        assert_relative_eq!(
            bends[0].arc_length,
            5.0 * std::f64::consts::FRAC_PI_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_length_line_fatal() {
        let path = vec![
            line((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            arc((0.0, 1.0, 0.0), (0.0, 0.0, 0.0), (1.0, 1.0, 0.0), 1.0),
            line((1.0, 1.0, 0.0), (1.0, 5.0, 0.0)),
        ];
        let err =
            calculate_straights_and_bends(&path, &Point3::origin(), 1.0, UnitScale::IDENTITY)
                .unwrap_err();
        assert_eq!(err, CalcError::ZeroLengthLine { number: 1 });
    }

    #[test]
    fn test_multi_arc_without_straights_rejected() {
        // Two arcs, no lines: even with both boundary flags implied,
        // one interior vector is required and none exist.
        let path = vec![
            arc((0.0, 1.0, 0.0), (0.0, 0.0, 0.0), (1.0, 1.0, 0.0), 1.0),
            arc((2.0, 1.0, 0.0), (1.0, 1.0, 0.0), (2.0, 0.0, 0.0), 1.0),
        ];
        let err =
            calculate_straights_and_bends(&path, &Point3::origin(), 1.0, UnitScale::IDENTITY)
                .unwrap_err();
        assert!(matches!(
            err,
            CalcError::InsufficientGeometry {
                vectors: 0,
                arcs: 2,
                required: 1
            }
        ));
    }

    #[test]
    fn test_display_unit_conversion() {
        let path = vec![
            line((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)),
            arc((10.0, 2.0, 0.0), (10.0, 0.0, 0.0), (12.0, 2.0, 0.0), 2.0),
            line((12.0, 2.0, 0.0), (12.0, 10.0, 0.0)),
        ];
        let (straights, _) =
            calculate_straights_and_bends(&path, &Point3::origin(), 1.0, UnitScale::new(0.1))
                .unwrap();
        assert_relative_eq!(straights[0].length, 1.0, epsilon = 1e-9);
        assert_eq!(straights[0].end, Point3::new(1.0, 0.0, 0.0));
        // The raw vector stays in internal units.
        assert_relative_eq!(magnitude(&straights[0].vector), 10.0, epsilon = 1e-9);
    }
}
