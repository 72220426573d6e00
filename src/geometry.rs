//! Point helpers shared by the wheel and frame stages.
use nalgebra::Point2;

#[inline]
pub fn point(p: &[f32; 2]) -> Point2<f32> {
    Point2::new(p[0], p[1])
}

/// Euclidean distance between two image points.
#[inline]
pub fn distance(a: &[f32; 2], b: &[f32; 2]) -> f32 {
    nalgebra::distance(&point(a), &point(b))
}

#[inline]
pub fn midpoint(a: &[f32; 2], b: &[f32; 2]) -> [f32; 2] {
    let m = nalgebra::center(&point(a), &point(b));
    [m.x, m.y]
}
