//! Travel-direction analysis and normalization.
//!
//! The travel direction is the user-facing, axis-aligned label for the
//! way the tube feeds through the bender. Paths are normalized to run
//! toward the positive end of their dominant axis so the labels do not
//! depend on how the geometry happened to be selected.

use crate::element::PathElement;
use bendsheet_math::{points_are_close, Point3};
use serde::{Deserialize, Serialize};

/// The dominant axis of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelAxis {
    /// World X axis.
    X,
    /// World Y axis.
    Y,
    /// World Z axis.
    Z,
}

impl TravelAxis {
    /// Coordinate index of this axis.
    pub fn index(self) -> usize {
        match self {
            TravelAxis::X => 0,
            TravelAxis::Y => 1,
            TravelAxis::Z => 2,
        }
    }

    /// Direction labels as `(negative_name, positive_name)`.
    pub fn direction_names(self) -> (&'static str, &'static str) {
        match self {
            TravelAxis::X => ("Left", "Right"),
            TravelAxis::Y => ("Bottom", "Top"),
            TravelAxis::Z => ("Front", "Back"),
        }
    }
}

/// The endpoint of `elements[index]` that connects to no other element.
///
/// Falls back to the element's first endpoint when both ends connect.
pub fn free_endpoint(elements: &[PathElement], index: usize) -> Point3 {
    let (a, b) = elements[index].endpoints();
    for ep in [a, b] {
        let connected = elements.iter().enumerate().any(|(j, other)| {
            if j == index {
                return false;
            }
            let (o0, o1) = other.endpoints();
            points_are_close(&ep, &o0) || points_are_close(&ep, &o1)
        });
        if !connected {
            return ep;
        }
    }
    a
}

/// Determine the dominant travel axis and its direction labels.
///
/// Picks the axis of maximum absolute displacement with fixed tie-break
/// priority X, then Y, then Z. Returns `(axis, current, opposite)`
/// where `current` names the direction of actual travel.
pub fn determine_primary_axis(
    start: &Point3,
    end: &Point3,
) -> (TravelAxis, &'static str, &'static str) {
    let displacement = end - start;
    let abs = [
        displacement.x.abs(),
        displacement.y.abs(),
        displacement.z.abs(),
    ];
    let max = abs[0].max(abs[1]).max(abs[2]);

    let axis = if abs[0] == max {
        TravelAxis::X
    } else if abs[1] == max {
        TravelAxis::Y
    } else {
        TravelAxis::Z
    };

    let (neg, pos) = axis.direction_names();
    if displacement[axis.index()] > 0.0 {
        (axis, pos, neg)
    } else {
        (axis, neg, pos)
    }
}

/// Whether the path should be reversed so travel runs toward the
/// positive end of the given axis.
pub fn should_reverse_path_direction(start: &Point3, end: &Point3, axis: TravelAxis) -> bool {
    end[axis.index()] - start[axis.index()] < 0.0
}

/// An ordered path with its travel direction resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionResult {
    /// Path elements, reversed if needed for a positive-axis direction.
    pub path: Vec<PathElement>,
    /// Free endpoint of the first element after normalization.
    pub start_point: Point3,
    /// Free endpoint of the last element after normalization.
    pub end_point: Point3,
    /// Dominant travel axis.
    pub axis: TravelAxis,
    /// Label for the current travel direction.
    pub travel_direction: String,
    /// Label for the opposite travel direction.
    pub opposite_direction: String,
    /// Whether the normalized path starts with an arc.
    pub starts_with_arc: bool,
    /// Whether the normalized path ends with an arc.
    pub ends_with_arc: bool,
}

impl DirectionResult {
    /// Apply a user-requested travel reversal.
    ///
    /// Performs the same swap as automatic normalization: element order,
    /// endpoints, direction labels, and boundary-arc flags all flip.
    pub fn reversed(&self) -> Self {
        let mut path = self.path.clone();
        path.reverse();
        Self {
            path,
            start_point: self.end_point,
            end_point: self.start_point,
            axis: self.axis,
            travel_direction: self.opposite_direction.clone(),
            opposite_direction: self.travel_direction.clone(),
            starts_with_arc: self.ends_with_arc,
            ends_with_arc: self.starts_with_arc,
        }
    }
}

/// Analyze and normalize path direction.
///
/// Finds both free endpoints, picks the dominant axis, and reverses the
/// path when its displacement along that axis is negative so that the
/// canonical travel direction is always the positive-axis label.
pub fn normalize_path_direction(ordered_path: Vec<PathElement>) -> DirectionResult {
    let start_point = free_endpoint(&ordered_path, 0);
    let end_point = free_endpoint(&ordered_path, ordered_path.len() - 1);

    let (axis, current, opposite) = determine_primary_axis(&start_point, &end_point);
    let reverse = should_reverse_path_direction(&start_point, &end_point, axis);

    let mut path = ordered_path;
    let (start_point, end_point) = if reverse {
        path.reverse();
        (end_point, start_point)
    } else {
        (start_point, end_point)
    };

    let starts_with_arc = path.first().is_some_and(|e| e.kind() == crate::ElementKind::Arc);
    let ends_with_arc = path.last().is_some_and(|e| e.kind() == crate::ElementKind::Arc);

    // After an automatic reversal the travel runs positive, so the
    // positive-axis name is always the current label.
    let (neg, pos) = axis.direction_names();
    let (travel_direction, opposite_direction) = if reverse {
        (pos.to_string(), neg.to_string())
    } else {
        (current.to_string(), opposite.to_string())
    };

    DirectionResult {
        path,
        start_point,
        end_point,
        axis,
        travel_direction,
        opposite_direction,
        starts_with_arc,
        ends_with_arc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(p0: (f64, f64, f64), p1: (f64, f64, f64)) -> PathElement {
        PathElement::line(
            Point3::new(p0.0, p0.1, p0.2),
            Point3::new(p1.0, p1.1, p1.2),
        )
    }

    fn arc(p0: (f64, f64, f64), p1: (f64, f64, f64)) -> PathElement {
        let c = Point3::new((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0 + 1.0, 0.0);
        PathElement::arc(c, Point3::new(p0.0, p0.1, p0.2), Point3::new(p1.0, p1.1, p1.2), 1.0)
    }

    #[test]
    fn test_primary_axis_x() {
        let (axis, current, opposite) =
            determine_primary_axis(&Point3::origin(), &Point3::new(10.0, 2.0, 1.0));
        assert_eq!(axis, TravelAxis::X);
        assert_eq!(current, "Right");
        assert_eq!(opposite, "Left");
    }

    #[test]
    fn test_primary_axis_negative_z() {
        let (axis, current, opposite) =
            determine_primary_axis(&Point3::origin(), &Point3::new(1.0, 0.0, -8.0));
        assert_eq!(axis, TravelAxis::Z);
        assert_eq!(current, "Front");
        assert_eq!(opposite, "Back");
    }

    #[test]
    fn test_tie_break_prefers_x() {
        let (axis, _, _) =
            determine_primary_axis(&Point3::origin(), &Point3::new(5.0, 5.0, 0.0));
        assert_eq!(axis, TravelAxis::X);
    }

    #[test]
    fn test_should_reverse() {
        let start = Point3::new(10.0, 0.0, 0.0);
        let end = Point3::origin();
        assert!(should_reverse_path_direction(&start, &end, TravelAxis::X));
        assert!(!should_reverse_path_direction(&end, &start, TravelAxis::X));
    }

    #[test]
    fn test_free_endpoint() {
        let path = vec![
            line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            arc((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
        ];
        assert_eq!(free_endpoint(&path, 0), Point3::origin());
        assert_eq!(free_endpoint(&path, 1), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_keeps_positive_path() {
        let path = vec![
            line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            arc((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
            line((2.0, 0.0, 0.0), (3.0, 0.0, 0.0)),
        ];
        let result = normalize_path_direction(path.clone());
        assert_eq!(result.path, path);
        assert_eq!(result.travel_direction, "Right");
        assert_eq!(result.start_point, Point3::origin());
    }

    #[test]
    fn test_normalize_reverses_negative_path() {
        // Ordered from x=3 back to x=0: displacement is negative X.
        let path = vec![
            line((3.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
            arc((2.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            line((1.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ];
        let result = normalize_path_direction(path);
        assert_eq!(result.travel_direction, "Right");
        assert_eq!(result.opposite_direction, "Left");
        assert_eq!(result.start_point, Point3::origin());
        assert_eq!(result.end_point, Point3::new(3.0, 0.0, 0.0));
        // First element after reversal is the one nearest x=0.
        let (a, b) = result.path[0].endpoints();
        assert!(a.x <= 1.0 && b.x <= 1.0);
    }

    #[test]
    fn test_normalize_swaps_arc_flags() {
        // Arc at the high-x end, path ordered high to low.
        let path = vec![
            arc((3.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
            line((2.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ];
        let result = normalize_path_direction(path);
        assert!(!result.starts_with_arc);
        assert!(result.ends_with_arc);
    }

    #[test]
    fn test_user_reversal_round_trips() {
        let path = vec![
            line((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
            arc((1.0, 0.0, 0.0), (2.0, 0.0, 0.0)),
            line((2.0, 0.0, 0.0), (3.0, 0.0, 0.0)),
        ];
        let result = normalize_path_direction(path);
        let reversed = result.reversed();
        assert_eq!(reversed.travel_direction, "Left");
        assert_eq!(reversed.start_point, result.end_point);
        assert_eq!(reversed.reversed().path, result.path);
    }
}
