//! Sign-free direction comparison for secants.
//!
//! Comparisons stay in cosine space: `acos` amplifies rounding near `|cos| = 1`,
//! so a vector and its own negation could land a few 1e-8 rad apart.

use nalgebra::DVector;

/// Rounding slack on `|cos|` so exact duplicates always compare equal.
const COS_SLACK: f64 = 1e-12;

/// `|cos|` of the angle between two unit vectors, in [0, 1].
#[inline]
pub fn abs_cos_unit(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    a.dot(b).abs().min(1.0)
}

/// Smallest `|cos|` accepted as "within `threshold_deg`" for sign-free directions.
///
/// Thresholds of 90° and above accept every pair, since sign-free angles never
/// exceed a right angle.
#[inline]
pub fn dirless_cos_threshold(threshold_deg: f64) -> f64 {
    threshold_deg.clamp(0.0, 90.0).to_radians().cos() - COS_SLACK
}
