//! Geometry primitives shared by the filter and the clusterer.
//!
//! Lines are kept in homogeneous form `l = (a, b, c)` with `a·x + b·y + c = 0`.
//! After [`normalize_line`] the normal `(a, b)` has unit length, so the dot
//! product with a homogeneous point `(x, y, 1)` is the signed perpendicular
//! distance in pixels.

use crate::segments::LineSegment;
use nalgebra::Vector3;

/// Homogeneous line through two points, `p × q` with `p = (px, py, 1)`.
#[inline]
pub fn line_through(p: [f64; 2], q: [f64; 2]) -> Vector3<f64> {
    let hp = Vector3::new(p[0], p[1], 1.0);
    let hq = Vector3::new(q[0], q[1], 1.0);
    hp.cross(&hq)
}

/// Scales `line` so that its normal `(a, b)` has unit length.
///
/// The `c` component is not part of the norm. Returns `None` when the normal
/// vanishes, which happens for a line built from two identical points.
#[inline]
pub fn normalize_line(line: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = (line.x * line.x + line.y * line.y).sqrt();
    if !norm.is_finite() || norm == 0.0 {
        return None;
    }
    Some(line / norm)
}

/// Signed distance between a normalized line and a point.
#[inline]
pub fn signed_distance(line: &Vector3<f64>, point: [f64; 2]) -> f64 {
    line.dot(&Vector3::new(point[0], point[1], 1.0))
}

/// Direction of travel from `start` to `end`, in degrees within (-180, 180].
#[inline]
pub fn orientation_deg(segment: &LineSegment) -> f64 {
    let dy = segment.end[1] - segment.start[1];
    let dx = segment.end[0] - segment.start[0];
    dy.atan2(dx).to_degrees()
}

/// Circular difference between two angles given in degrees, in `[0, 180]`.
///
/// Antipodal directions are not folded: a segment and its reverse differ by
/// 180°.
#[inline]
pub fn angle_difference_deg(a1: f64, a2: f64) -> f64 {
    let diff = (a1 - a2).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
