//! Direction-aware fabrication feasibility checks.
//!
//! A bend sequence that fails the grip scan in its current direction
//! may still be buildable by feeding the tube from the other end. This
//! module runs the middle-straight grip scan both ways and turns the
//! outcome into a feasibility verdict with a concrete suggestion.

use crate::bend::StraightSection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which feed orientation a grip scan assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckDirection {
    /// The path as ordered.
    Current,
    /// The path fed from the opposite end.
    Reversed,
}

impl CheckDirection {
    fn label(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Reversed => "reversed",
        }
    }
}

/// Outcome of a grip scan in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GripValidationResult {
    /// Whether every middle straight meets the minimum grip.
    pub is_valid: bool,
    /// Section numbers of the violating straights.
    pub violations: Vec<usize>,
    /// Human-readable description of the violations, empty when valid.
    pub error_message: String,
}

/// Combined verdict across both feed directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionValidationResult {
    /// Whether the sequence can be fabricated at all.
    pub can_fabricate: bool,
    /// Whether the current direction passes.
    pub current_direction_valid: bool,
    /// Whether the reversed direction passes.
    pub reversed_direction_valid: bool,
    /// Violating section numbers (union of both directions when both
    /// fail).
    pub violations: Vec<usize>,
    /// Description of the failure, empty when the current direction is
    /// valid.
    pub error_message: String,
    /// Recovery suggestion, set only when reversing would help.
    pub suggestion: String,
}

/// Scan the middle straights against the minimum grip for one feed
/// direction.
///
/// The first straight is the grip end and the last is the tail; those
/// ends get their own material treatment, so only the straights between
/// bends are checked here. A path with at most one straight has no
/// middle and is always valid. The set of middle straights is the same
/// either way round; the direction only changes how the failure is
/// reported.
pub fn validate_grip_for_direction(
    straights: &[StraightSection],
    min_grip: f64,
    direction: CheckDirection,
) -> GripValidationResult {
    if straights.len() <= 1 {
        return GripValidationResult {
            is_valid: true,
            violations: Vec::new(),
            error_message: String::new(),
        };
    }

    let mut violations = Vec::new();
    for straight in &straights[1..straights.len() - 1] {
        if min_grip > 0.0 && straight.length < min_grip {
            violations.push(straight.number);
        }
    }

    if violations.is_empty() {
        return GripValidationResult {
            is_valid: true,
            violations,
            error_message: String::new(),
        };
    }

    let sections = section_list(&violations);
    GripValidationResult {
        is_valid: false,
        error_message: format!(
            "In {} direction: {} shorter than min grip ({:.2})",
            direction.label(),
            sections,
            min_grip
        ),
        violations,
    }
}

/// Check grip feasibility in both directions and suggest a reversal
/// when that is what it takes.
///
/// `opposite` is the travel-direction label to name in the reversal
/// suggestion (e.g. "Front to Back").
pub fn validate_direction_aware(
    straights: &[StraightSection],
    min_grip: f64,
    opposite: &str,
) -> DirectionValidationResult {
    let current_result = validate_grip_for_direction(straights, min_grip, CheckDirection::Current);
    let reversed_result =
        validate_grip_for_direction(straights, min_grip, CheckDirection::Reversed);

    if current_result.is_valid {
        return DirectionValidationResult {
            can_fabricate: true,
            current_direction_valid: true,
            reversed_direction_valid: reversed_result.is_valid,
            violations: Vec::new(),
            error_message: String::new(),
            suggestion: String::new(),
        };
    }

    if reversed_result.is_valid {
        return DirectionValidationResult {
            can_fabricate: true,
            current_direction_valid: false,
            reversed_direction_valid: true,
            violations: current_result.violations,
            error_message: current_result.error_message,
            suggestion: format!(
                "This path CAN be fabricated if you reverse the direction to \
                 \"{opposite}\". Select the reversed direction and try again."
            ),
        };
    }

    let all: BTreeSet<usize> = current_result
        .violations
        .iter()
        .chain(reversed_result.violations.iter())
        .copied()
        .collect();
    let violations: Vec<usize> = all.into_iter().collect();
    let sections = section_list(&violations);
    DirectionValidationResult {
        can_fabricate: false,
        current_direction_valid: false,
        reversed_direction_valid: false,
        error_message: format!(
            "{sections} shorter than minimum grip ({min_grip:.2}). This bend \
             sequence cannot be fabricated in either direction. Consider \
             redesigning the path with longer straight sections between bends."
        ),
        violations,
        suggestion: String::new(),
    }
}

fn section_list(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| format!("Straight {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}
