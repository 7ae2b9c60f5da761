//! Unit conversion between internal and display lengths.

use bendsheet_math::Point3;
use serde::{Deserialize, Serialize};

/// Conversion factor from internal length units to display units.
///
/// Geometry arrives in a fixed internal unit; everything shown on a
/// bend sheet (lengths, positions, CLR) is in the caller's display
/// unit. The factor is applied exactly once, at the point a value
/// crosses into a result record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    /// Multiplier taking internal lengths to display lengths.
    pub to_display: f64,
}

impl UnitScale {
    /// Identity scale (display unit == internal unit).
    pub const IDENTITY: Self = Self { to_display: 1.0 };

    /// Create a scale with the given internal-to-display factor.
    pub fn new(to_display: f64) -> Self {
        Self { to_display }
    }

    /// Convert a length to display units.
    pub fn length(self, internal: f64) -> f64 {
        internal * self.to_display
    }

    /// Convert a point's coordinates to display units.
    pub fn point(self, p: &Point3) -> Point3 {
        Point3::new(
            p.x * self.to_display,
            p.y * self.to_display,
            p.z * self.to_display,
        )
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
