//! Point-on-line tests shared by live highlighting and grading
//!
//! Clip de-dup, highlight, and validation all compare against the same
//! crate-wide tolerance; a point the renderer lights up is a point the
//! grader accepts.

use super::line::{LineEquation, TargetPoint};

/// True when the point sits on the line within `epsilon`.
#[inline]
pub fn is_point_on_line(point: &TargetPoint, line: LineEquation, epsilon: f32) -> bool {
    (point.pos.y - line.y_at(point.pos.x)).abs() < epsilon
}

/// Filter `points` down to those on `line`, preserving input order.
pub fn points_on_line(points: &[TargetPoint], line: LineEquation, epsilon: f32) -> Vec<TargetPoint> {
    points
        .iter()
        .filter(|p| is_point_on_line(p, line, epsilon))
        .cloned()
        .collect()
}
