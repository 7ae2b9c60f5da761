#![warn(missing_docs)]

//! Math types for the bendsheet kernel.
//!
//! Thin wrappers around nalgebra providing the 3D vector operations
//! used by tube-bend geometry: cross/dot products, magnitudes, point
//! distances, and the angle functions that drive bend and rotation
//! calculations. All angle functions reject degenerate (near-zero)
//! vectors instead of returning garbage.

use thiserror::Error;

/// A point in 3D space, in internal length units.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space, in internal length units.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Tolerance constants for geometric comparisons.
///
/// Centralized here so connectivity detection, zero-vector checks, and
/// CLR matching all agree on the same thresholds.
pub mod tolerance {
    /// Endpoint connectivity tolerance in internal length units.
    /// Two endpoints closer than this are treated as connected.
    pub const CONNECTIVITY: f64 = 0.1;

    /// Zero-vector detection threshold. Vectors with magnitude below
    /// this cannot define an angle or a bend plane.
    pub const ZERO_MAGNITUDE: f64 = 1e-10;

    /// CLR matching ratio tolerance (0.2% of the primary CLR).
    pub const CLR_RATIO: f64 = 0.002;

    /// Minimum tolerance floor for CLR matching, in display units.
    /// Prevents false mismatches with very small CLR values.
    pub const CLR_MIN_FLOOR: f64 = 0.001;
}

/// Errors from vector math operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A zero-length vector was passed where a direction is required.
    #[error("{which} vector has zero length (magnitude={magnitude:e})")]
    ZeroVector {
        /// Which argument was degenerate ("first" or "second").
        which: &'static str,
        /// The offending magnitude.
        magnitude: f64,
    },
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Cross product of two vectors.
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Dot product of two vectors.
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b)
}

/// Magnitude (Euclidean length) of a vector.
pub fn magnitude(v: &Vec3) -> f64 {
    v.norm()
}

/// Euclidean distance between two points.
pub fn distance_between_points(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Check whether two points lie within the connectivity tolerance.
pub fn points_are_close(a: &Point3, b: &Point3) -> bool {
    distance_between_points(a, b) <= tolerance::CONNECTIVITY
}

/// Product of the two magnitudes, rejecting degenerate vectors.
fn checked_magnitude_product(a: &Vec3, b: &Vec3) -> Result<f64> {
    let mag_a = a.norm();
    let mag_b = b.norm();
    if mag_a < tolerance::ZERO_MAGNITUDE {
        return Err(MathError::ZeroVector {
            which: "first",
            magnitude: mag_a,
        });
    }
    if mag_b < tolerance::ZERO_MAGNITUDE {
        return Err(MathError::ZeroVector {
            which: "second",
            magnitude: mag_b,
        });
    }
    Ok(mag_a * mag_b)
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// The dot-product ratio is clamped to `[-1, 1]` before `acos` to absorb
/// floating-point rounding. Fails if either vector is near zero length.
pub fn angle_between_vectors(a: &Vec3, b: &Vec3) -> Result<f64> {
    let mag_product = checked_magnitude_product(a, b)?;
    let cos_angle = (a.dot(b) / mag_product).clamp(-1.0, 1.0);
    Ok(cos_angle.acos().to_degrees())
}

/// Rotation angle between two bend-plane normals in degrees, `[0, 180]`.
///
/// This is the amount the tube rotates between consecutive bends on the
/// bender. Fails if either normal is near zero length.
pub fn calculate_rotation(n1: &Vec3, n2: &Vec3) -> Result<f64> {
    let mag_product = checked_magnitude_product(n1, n2)?;
    let cos_theta = (n1.dot(n2) / mag_product).clamp(-1.0, 1.0);
    Ok(cos_theta.acos().to_degrees())
}
