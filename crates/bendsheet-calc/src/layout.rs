//! Cumulative segment layout and bend mark positions.
//!
//! Lays the fabricated tube out as a linear sequence of straight and
//! bend segments, each with its cumulative start/end position measured
//! from the start of the raw stock (including any leading extra
//! material), and computes the die-offset-corrected mark for each bend.

use crate::bend::{BendData, StraightSection};
use serde::{Deserialize, Serialize};

/// What a layout segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// A straight run of tube.
    Straight,
    /// The consumed arc of a bend.
    Bend,
}

/// One positioned entry in the cumulative layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Segment kind.
    pub kind: SegmentKind,
    /// 1-based straight or bend number.
    pub number: usize,
    /// Segment length in display units.
    pub length: f64,
    /// Cumulative position where the segment starts.
    pub starts_at: f64,
    /// Cumulative position where the segment ends.
    pub ends_at: f64,
    /// Bend angle, present on bend segments.
    pub bend_angle: Option<f64>,
    /// On a straight segment: the rotation to apply before executing
    /// the upcoming bend, when defined.
    pub rotation: Option<f64>,
}

/// Per-bend tooling mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPosition {
    /// 1-based bend number.
    pub bend_num: usize,
    /// Mark position: the bend's cumulative start minus the die
    /// offset. A negative die offset legitimately pushes the mark past
    /// the nominal tangent point, so this is always a plain subtraction.
    pub mark_position: f64,
    /// Bend angle in degrees.
    pub bend_angle: f64,
    /// Rotation from the previous bend, when defined.
    pub rotation: Option<f64>,
}

fn push_bend(
    bend: &BendData,
    cumulative: &mut f64,
    die_offset: f64,
    segments: &mut Vec<PathSegment>,
    marks: &mut Vec<MarkPosition>,
) {
    segments.push(PathSegment {
        kind: SegmentKind::Bend,
        number: bend.number,
        length: bend.arc_length,
        starts_at: *cumulative,
        ends_at: *cumulative + bend.arc_length,
        bend_angle: Some(bend.angle),
        rotation: None,
    });
    marks.push(MarkPosition {
        bend_num: bend.number,
        mark_position: *cumulative - die_offset,
        bend_angle: bend.angle,
        rotation: bend.rotation,
    });
    *cumulative += bend.arc_length;
}

/// Build the cumulative segment table and bend mark positions.
///
/// The running position starts at `extra_material` (stock consumed
/// before the first element). When the path opens with an arc, that
/// bend is laid out first and each straight pairs with the bend that
/// follows it in path order. Segments are contiguous: each one ends
/// where the next begins.
pub fn build_segments_and_marks(
    straights: &[StraightSection],
    bends: &[BendData],
    starts_with_arc: bool,
    extra_material: f64,
    die_offset: f64,
) -> (Vec<PathSegment>, Vec<MarkPosition>) {
    let mut segments = Vec::with_capacity(straights.len() + bends.len());
    let mut marks = Vec::with_capacity(bends.len());
    let mut cumulative = extra_material;

    // A path with no straights at all (a lone arc) still lays out its
    // bend, starting right after the synthetic grip stock.
    if straights.is_empty() {
        for bend in bends {
            push_bend(bend, &mut cumulative, die_offset, &mut segments, &mut marks);
        }
        return (segments, marks);
    }

    // A leading boundary bend comes before any straight material.
    let offset = usize::from(starts_with_arc);
    if starts_with_arc {
        if let Some(bend) = bends.first() {
            push_bend(bend, &mut cumulative, die_offset, &mut segments, &mut marks);
        }
    }

    for (i, straight) in straights.iter().enumerate() {
        segments.push(PathSegment {
            kind: SegmentKind::Straight,
            number: straight.number,
            length: straight.length,
            starts_at: cumulative,
            ends_at: cumulative + straight.length,
            bend_angle: None,
            rotation: bends.get(i + offset).and_then(|b| b.rotation),
        });
        cumulative += straight.length;

        if let Some(bend) = bends.get(i + offset) {
            push_bend(bend, &mut cumulative, die_offset, &mut segments, &mut marks);
        }
    }

    (segments, marks)
}
