//! Path element types.
//!
//! A path element is one geometric primitive of the tube centerline:
//! a straight line or a circular arc. Elements are immutable once
//! constructed; their endpoints are captured in world space at
//! construction time and never recomputed.

use bendsheet_math::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant for the two element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A straight segment.
    Line,
    /// A circular arc (one bend).
    Arc,
}

impl ElementKind {
    /// The kind that must follow this one in an alternating path.
    pub fn opposite(self) -> Self {
        match self {
            ElementKind::Line => ElementKind::Arc,
            ElementKind::Arc => ElementKind::Line,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Line => write!(f, "line"),
            ElementKind::Arc => write!(f, "arc"),
        }
    }
}

/// Geometry payload of a path element, in internal length units.
///
/// Lines and arcs store different fields, so the payload is a sum type
/// and consumers match on it once per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementGeometry {
    /// A straight segment between two points.
    Line {
        /// First endpoint.
        start: Point3,
        /// Second endpoint.
        end: Point3,
    },
    /// A circular arc.
    Arc {
        /// Arc center.
        center: Point3,
        /// Arc start point.
        start: Point3,
        /// Arc end point.
        end: Point3,
        /// Arc radius (the bend's centerline radius, internal units).
        radius: f64,
    },
}

/// One element of a tube path with its endpoints fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    geometry: ElementGeometry,
    endpoints: (Point3, Point3),
}

impl PathElement {
    /// Create a line element from its two endpoints.
    pub fn line(start: Point3, end: Point3) -> Self {
        Self {
            geometry: ElementGeometry::Line { start, end },
            endpoints: (start, end),
        }
    }

    /// Create an arc element from center, endpoints, and radius.
    pub fn arc(center: Point3, start: Point3, end: Point3, radius: f64) -> Self {
        Self {
            geometry: ElementGeometry::Arc {
                center,
                start,
                end,
                radius,
            },
            endpoints: (start, end),
        }
    }

    /// The kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self.geometry {
            ElementGeometry::Line { .. } => ElementKind::Line,
            ElementGeometry::Arc { .. } => ElementKind::Arc,
        }
    }

    /// The element's two endpoints, as captured at construction.
    pub fn endpoints(&self) -> (Point3, Point3) {
        self.endpoints
    }

    /// The underlying geometry payload.
    pub fn geometry(&self) -> &ElementGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endpoints() {
        let e = PathElement::line(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(e.kind(), ElementKind::Line);
        assert_eq!(e.endpoints().1, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_arc_endpoints_exclude_center() {
        let e = PathElement::arc(
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            1.0,
        );
        assert_eq!(e.kind(), ElementKind::Arc);
        let (a, b) = e.endpoints();
        assert_eq!(a, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(b, Point3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ElementKind::Line.to_string(), "line");
        assert_eq!(ElementKind::Arc.to_string(), "arc");
        assert_eq!(ElementKind::Line.opposite(), ElementKind::Arc);
    }
}
