//! Grip and tail material calculation.
//!
//! Computes the extra raw stock needed at each end of the tube:
//! synthetic grip/tail for paths that open or close mid-bend, grip
//! extensions when the first straight is too short to feed, tail
//! extensions when the last straight is under the minimum, and the
//! allowance bookkeeping around both. Violations are reported as data;
//! this module never fails.

use crate::bend::StraightSection;
use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

/// Tooling parameters supplied by the bender/die configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolingParams {
    /// Minimum straight length the machine's clamp needs before a bend.
    pub min_grip: f64,
    /// Minimum straight length required after the last bend.
    pub min_tail: f64,
    /// Distance from the die's reference edge to the bend tangent
    /// point. May be negative.
    pub die_offset: f64,
    /// Alignment allowance added at the grip end.
    pub start_allowance: f64,
    /// Alignment allowance added at the tail end.
    pub end_allowance: f64,
    /// Apply the start allowance even when a grip extension already
    /// adds stock to be cut away.
    pub add_allowance_with_grip_extension: bool,
    /// Apply the end allowance even when a tail extension already adds
    /// stock to be cut away.
    pub add_allowance_with_tail_extension: bool,
}

impl ToolingParams {
    /// Check that the length thresholds are sane. The die offset may
    /// legitimately be negative; the minimums and allowances may not.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("min_grip", self.min_grip),
            ("min_tail", self.min_tail),
            ("start_allowance", self.start_allowance),
            ("end_allowance", self.end_allowance),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(CalcError::InvalidTooling { field });
            }
        }
        Ok(())
    }
}

impl Default for ToolingParams {
    fn default() -> Self {
        Self {
            min_grip: 0.0,
            min_tail: 0.0,
            die_offset: 0.0,
            start_allowance: 0.0,
            end_allowance: 0.0,
            add_allowance_with_grip_extension: false,
            add_allowance_with_tail_extension: false,
        }
    }
}

/// Result of grip/tail material calculations. All lengths are in
/// display units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialCalculation {
    /// Total extra material at the start of the tube.
    pub extra_material: f64,
    /// Stock added because the path starts mid-bend.
    pub synthetic_grip_material: f64,
    /// Stock added because the path ends mid-bend.
    pub synthetic_tail_material: f64,
    /// Whether synthetic grip material was added.
    pub has_synthetic_grip: bool,
    /// Whether synthetic tail material was added.
    pub has_synthetic_tail: bool,
    /// Where to cut the synthetic grip from the start, if any.
    pub grip_cut_position: Option<f64>,
    /// Straight-section numbers shorter than the minimum grip.
    pub grip_violations: Vec<usize>,
    /// Whether the last straight is shorter than the minimum tail.
    pub tail_violation: bool,
    /// Stock added because the last straight is under the minimum tail.
    pub extra_tail_material: f64,
    /// Whether a (non-synthetic) tail extension was added.
    pub has_tail_extension: bool,
    /// Start allowance actually applied (zeroed by a grip extension
    /// unless explicitly opted in).
    pub effective_start_allowance: f64,
    /// End allowance actually applied (zeroed by a tail extension
    /// unless explicitly opted in).
    pub effective_end_allowance: f64,
}

/// Calculate grip and tail material requirements.
///
/// Synthetic material takes precedence at each end: a path that opens
/// mid-bend gets exactly `min_grip` of synthetic stock regardless of
/// any straight lengths, and likewise for the tail. When extra stock
/// is already being added and cut away, the matching allowance is
/// suppressed by default; the opt-in flags restore it.
pub fn calculate_material_requirements(
    straights: &[StraightSection],
    tooling: &ToolingParams,
    starts_with_arc: bool,
    ends_with_arc: bool,
) -> MaterialCalculation {
    let mut result = MaterialCalculation::default();

    if starts_with_arc && tooling.min_grip > 0.0 {
        result.synthetic_grip_material = tooling.min_grip;
        result.has_synthetic_grip = true;
        result.grip_cut_position = Some(tooling.min_grip);
    }

    if ends_with_arc && tooling.min_tail > 0.0 {
        result.synthetic_tail_material = tooling.min_tail;
        result.has_synthetic_tail = true;
    }

    let (Some(first), Some(last)) = (straights.first(), straights.last()) else {
        // No straights at all: synthetic stock is the whole story.
        result.extra_material = result.synthetic_grip_material;
        apply_effective_allowances(&mut result, tooling);
        return result;
    };

    // Synthetic grip fully determines the start-side material;
    // otherwise it comes from the first straight's feed shortfall.
    if result.has_synthetic_grip {
        result.extra_material = result.synthetic_grip_material;
    } else if tooling.min_grip > 0.0 {
        let feed = first.length - tooling.die_offset;
        result.extra_material = (tooling.min_grip - feed).max(0.0);
    }

    if !result.has_synthetic_tail && tooling.min_tail > 0.0 && last.length < tooling.min_tail {
        result.extra_tail_material = tooling.min_tail - last.length;
        result.has_tail_extension = true;
    }

    // Every straight except the last needs min_grip; the first one is
    // credited with the start allowance.
    if tooling.min_grip > 0.0 && straights.len() > 1 {
        for straight in &straights[..straights.len() - 1] {
            let mut effective = straight.length;
            if straight.number == 1 {
                effective += tooling.start_allowance;
            }
            if effective < tooling.min_grip {
                result.grip_violations.push(straight.number);
            }
        }
    }

    if tooling.min_tail > 0.0 && last.length + tooling.end_allowance < tooling.min_tail {
        result.tail_violation = true;
    }

    apply_effective_allowances(&mut result, tooling);
    result
}

/// Resolve the effective allowances against any extensions present.
fn apply_effective_allowances(result: &mut MaterialCalculation, tooling: &ToolingParams) {
    let grip_extended = result.extra_material > 0.0;
    let tail_extended = result.has_tail_extension || result.has_synthetic_tail;

    result.effective_start_allowance =
        if grip_extended && !tooling.add_allowance_with_grip_extension {
            0.0
        } else {
            tooling.start_allowance
        };
    result.effective_end_allowance =
        if tail_extended && !tooling.add_allowance_with_tail_extension {
            0.0
        } else {
            tooling.end_allowance
        };
}
