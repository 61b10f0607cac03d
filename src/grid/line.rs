//! Slope-intercept lines and the target points they capture

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line in slope-intercept form, `y = slope * x + intercept`.
///
/// Vertical lines have no representation here: question content only ever
/// adjusts slope and intercept, so an undefined slope cannot occur. Both
/// components must be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineEquation {
    pub slope: f32,
    pub intercept: f32,
}

impl LineEquation {
    pub fn new(slope: f32, intercept: f32) -> Self {
        debug_assert!(
            slope.is_finite() && intercept.is_finite(),
            "non-finite line parameters: slope={slope} intercept={intercept}"
        );
        Self { slope, intercept }
    }

    /// y at the given x
    #[inline]
    pub fn y_at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }

    /// x at the given y; `None` for horizontal lines, which never reach
    /// any y other than their intercept
    #[inline]
    pub fn x_at(&self, y: f32) -> Option<f32> {
        if self.slope == 0.0 {
            None
        } else {
            Some((y - self.intercept) / self.slope)
        }
    }
}

/// A fixed math-space point a line must pass through to "capture" it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub pos: Vec2,
    /// Content-assigned identifier, when the question bank provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TargetPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            id: None,
        }
    }

    pub fn with_id(x: f32, y: f32, id: impl Into<String>) -> Self {
        Self {
            pos: Vec2::new(x, y),
            id: Some(id.into()),
        }
    }
}
