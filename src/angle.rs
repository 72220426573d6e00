//! Angle utilities used across the frame stages.
//!
//! Segment directions are kept in degrees, as reported by the primitive
//! detector: `atan2(dy, dx)` in `(-180, 180]` with image `y` pointing down.

/// Direction of the vector `p0 → p1` in degrees, range (-180, 180].
#[inline]
pub fn line_angle_deg(p0: &[f32; 2], p1: &[f32; 2]) -> f32 {
    let angle = (p1[1] - p0[1]).atan2(p1[0] - p0[0]).to_degrees();
    // atan2(-0.0, x<0) yields -180
    if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Folds an angle in degrees into [0, 180).
#[inline]
pub fn fold_half_turn(angle_deg: f32) -> f32 {
    let norm = angle_deg.rem_euclid(180.0);
    if norm >= 180.0 - 1e-4 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two line directions in degrees,
/// treating antipodal directions as equivalent. Returns a value in [0, 90].
#[inline]
pub fn angular_difference_deg(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(180.0);
    diff.min(180.0 - diff)
}

/// Orientation of `|angle| mod 180`, the folding used by the tube rules.
#[inline]
pub fn abs_half_turn(angle_deg: f32) -> f32 {
    angle_deg.abs() % 180.0
}
