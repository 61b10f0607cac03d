//! Clipping an infinite line to the plotted viewport
//!
//! Edge tests run in math space; the drawing layer converts the surviving
//! endpoints to pixels afterwards. A line meets a convex rectangle at 0, 1,
//! or 2 boundary points, so the result is a miss, a corner dot, or a
//! segment.

use glam::Vec2;

use super::line::LineEquation;
use super::transform::{self, CoordinateRange, GridRect, InvalidRangeError, Padding};

/// Visible portion of a line inside the grid rectangle, in math space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipResult {
    /// Line misses the rectangle entirely
    None,
    /// Line touches at exactly one location (corner tangency); drawn as a
    /// dot, not a segment
    Point(Vec2),
    /// The normal case: two boundary crossings
    Segment(Vec2, Vec2),
}

impl ClipResult {
    /// Map math-space clip output into pixel space for drawing.
    pub fn to_pixel(
        &self,
        range: &CoordinateRange,
        rect: GridRect,
        padding: Padding,
    ) -> Result<ClipResult, InvalidRangeError> {
        Ok(match *self {
            ClipResult::None => ClipResult::None,
            ClipResult::Point(p) => ClipResult::Point(transform::to_pixel(p, range, rect, padding)?),
            ClipResult::Segment(a, b) => ClipResult::Segment(
                transform::to_pixel(a, range, rect, padding)?,
                transform::to_pixel(b, range, rect, padding)?,
            ),
        })
    }
}

/// Clip `line` to the padded grid rectangle.
///
/// The four edge candidates are `y(left_x)`, `y(right_x)`, and - unless the
/// line is horizontal - `x(top_y)`, `x(bottom_y)`. A candidate survives when
/// it falls within the complementary bound; near-identical survivors (corner
/// hits counted by two edges) collapse under `epsilon`.
pub fn clip_line_to_rect(
    line: LineEquation,
    range: &CoordinateRange,
    rect: GridRect,
    padding: Padding,
    epsilon: f32,
) -> Result<ClipResult, InvalidRangeError> {
    // Math bounds of the padded rect. These come back as the range corners,
    // but deriving them through the inverse keeps clip and draw in lockstep.
    let bottom_left = transform::to_math(
        Vec2::new(rect.x + padding.x, rect.y + rect.height - padding.y),
        range,
        rect,
        padding,
    )?;
    let top_right = transform::to_math(
        Vec2::new(rect.x + rect.width - padding.x, rect.y + padding.y),
        range,
        rect,
        padding,
    )?;
    let (left_x, bottom_y) = (bottom_left.x, bottom_left.y);
    let (right_x, top_y) = (top_right.x, top_right.y);

    let mut candidates: Vec<Vec2> = Vec::with_capacity(4);

    let y_left = line.y_at(left_x);
    if in_band(y_left, bottom_y, top_y) {
        candidates.push(Vec2::new(left_x, y_left));
    }
    let y_right = line.y_at(right_x);
    if in_band(y_right, bottom_y, top_y) {
        candidates.push(Vec2::new(right_x, y_right));
    }
    // Horizontal lines never cross the top or bottom edge
    if let Some(x_top) = line.x_at(top_y) {
        if in_band(x_top, left_x, right_x) {
            candidates.push(Vec2::new(x_top, top_y));
        }
    }
    if let Some(x_bottom) = line.x_at(bottom_y) {
        if in_band(x_bottom, left_x, right_x) {
            candidates.push(Vec2::new(x_bottom, bottom_y));
        }
    }

    let unique = dedup_within(candidates, epsilon);
    debug_assert!(
        unique.len() <= 2,
        "line crossed a convex rectangle more than twice: {unique:?}"
    );

    Ok(match unique.len() {
        0 => ClipResult::None,
        1 => ClipResult::Point(unique[0]),
        _ => ClipResult::Segment(unique[0], unique[1]),
    })
}

#[inline]
fn in_band(v: f32, lo: f32, hi: f32) -> bool {
    v >= lo && v <= hi
}

/// Drop candidates within `epsilon` of an earlier one, preserving order
fn dedup_within(points: Vec<Vec2>, epsilon: f32) -> Vec<Vec2> {
    let mut unique: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        let seen = unique
            .iter()
            .any(|q| (p.x - q.x).abs() < epsilon && (p.y - q.y).abs() < epsilon);
        if !seen {
            unique.push(p);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EPSILON;
    use proptest::prelude::*;

    fn centered() -> (CoordinateRange, GridRect) {
        (
            CoordinateRange::new(-5.0, 5.0, 1.0, -5.0, 5.0, 1.0).unwrap(),
            GridRect::new(0.0, 0.0, 400.0, 400.0).unwrap(),
        )
    }

    #[test]
    fn test_clip_crossing_left_and_top() {
        // y = x + 2 enters at the left edge and leaves through the top
        let (range, rect) = centered();
        let line = LineEquation::new(1.0, 2.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        match result {
            ClipResult::Segment(a, b) => {
                assert!((a - Vec2::new(-5.0, -3.0)).abs().max_element() < EPSILON);
                assert!((b - Vec2::new(3.0, 5.0)).abs().max_element() < EPSILON);
            }
            other => panic!("expected a segment, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_diagonal_through_corners() {
        // y = x hits both corners; each is counted by two edges and must
        // collapse to a single endpoint
        let (range, rect) = centered();
        let line = LineEquation::new(1.0, 0.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        assert_eq!(
            result,
            ClipResult::Segment(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_clip_corner_tangent_is_point() {
        // y = -x + 10 only grazes the (5,5) corner
        let (range, rect) = centered();
        let line = LineEquation::new(-1.0, 10.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        assert_eq!(result, ClipResult::Point(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_clip_miss() {
        let (range, rect) = centered();
        let line = LineEquation::new(0.0, 20.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        assert_eq!(result, ClipResult::None);
    }

    #[test]
    fn test_clip_horizontal_spans_full_width() {
        let (range, rect) = centered();
        let line = LineEquation::new(0.0, 2.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        assert_eq!(
            result,
            ClipResult::Segment(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.0))
        );
    }

    #[test]
    fn test_clip_steep_slope_crosses_top_and_bottom() {
        let (range, rect) = centered();
        let line = LineEquation::new(100.0, 0.0);

        let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        match result {
            ClipResult::Segment(a, b) => {
                assert!((a.y - 5.0).abs() < EPSILON);
                assert!((b.y - (-5.0)).abs() < EPSILON);
            }
            other => panic!("expected a segment, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_to_pixel_mapping() {
        let (range, rect) = centered();
        let line = LineEquation::new(0.0, 0.0);

        let math = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
        let pixel = math.to_pixel(&range, rect, Padding::ZERO).unwrap();
        assert_eq!(
            pixel,
            ClipResult::Segment(Vec2::new(0.0, 200.0), Vec2::new(400.0, 200.0))
        );
    }

    proptest! {
        // Any finite-slope line clipped to any sane range yields 0, 1, or 2
        // endpoints, all on the boundary band and on the line itself.
        #[test]
        fn prop_clip_endpoints_within_bounds(
            slope in -10.0f32..10.0,
            intercept in -20.0f32..20.0,
            max_x in 1.0f32..20.0,
            max_y in 1.0f32..20.0,
        ) {
            let range = CoordinateRange::new(-max_x, max_x, 1.0, -max_y, max_y, 1.0).unwrap();
            let rect = GridRect::new(0.0, 0.0, 400.0, 400.0).unwrap();
            let line = LineEquation::new(slope, intercept);

            let result = clip_line_to_rect(line, &range, rect, Padding::ZERO, EPSILON).unwrap();
            let endpoints: Vec<Vec2> = match result {
                ClipResult::None => vec![],
                ClipResult::Point(p) => vec![p],
                ClipResult::Segment(a, b) => vec![a, b],
            };

            for p in endpoints {
                prop_assert!(p.x >= range.min_x - EPSILON && p.x <= range.max_x + EPSILON);
                prop_assert!(p.y >= range.min_y - EPSILON && p.y <= range.max_y + EPSILON);
                // Endpoint must satisfy the line equation (loose bound: the
                // top/bottom crossings divide by the slope and round)
                prop_assert!((p.y - line.y_at(p.x)).abs() < 0.01);
            }
        }
    }
}
