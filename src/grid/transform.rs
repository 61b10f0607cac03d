//! Math-space <-> pixel-space mapping for the plotted grid
//!
//! Linear scaling between an axis range and a padded pixel rectangle, with
//! the vertical axis inverted (math y grows up, pixel y grows down). The
//! transform is origin-agnostic: bottom-left and centered grids differ only
//! in the ranges the question content declares, never in anything inferred
//! here.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A grid whose axes collapse to nothing cannot be plotted or inverted
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidRangeError {
    #[error("degenerate {axis} axis: min {min} is not below max {max}")]
    DegenerateAxis { axis: char, min: f32, max: f32 },
    #[error("non-positive {axis} tick interval: {interval}")]
    BadInterval { axis: char, interval: f32 },
    #[error("degenerate grid rect: {width}x{height}")]
    DegenerateRect { width: f32, height: f32 },
}

/// The math-space extent of one question's grid, with tick intervals.
///
/// Created once per question and replaced wholesale when the next question
/// loads; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRange {
    pub min_x: f32,
    pub max_x: f32,
    pub x_interval: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub y_interval: f32,
}

impl CoordinateRange {
    pub fn new(
        min_x: f32,
        max_x: f32,
        x_interval: f32,
        min_y: f32,
        max_y: f32,
        y_interval: f32,
    ) -> Result<Self, InvalidRangeError> {
        let range = Self {
            min_x,
            max_x,
            x_interval,
            min_y,
            max_y,
            y_interval,
        };
        range.validate()?;
        Ok(range)
    }

    /// Re-check the axis invariants. Negated comparisons so NaN fields
    /// fail instead of slipping through.
    pub fn validate(&self) -> Result<(), InvalidRangeError> {
        if !(self.max_x > self.min_x) {
            return Err(InvalidRangeError::DegenerateAxis {
                axis: 'x',
                min: self.min_x,
                max: self.max_x,
            });
        }
        if !(self.max_y > self.min_y) {
            return Err(InvalidRangeError::DegenerateAxis {
                axis: 'y',
                min: self.min_y,
                max: self.max_y,
            });
        }
        if !(self.x_interval > 0.0) {
            return Err(InvalidRangeError::BadInterval {
                axis: 'x',
                interval: self.x_interval,
            });
        }
        if !(self.y_interval > 0.0) {
            return Err(InvalidRangeError::BadInterval {
                axis: 'y',
                interval: self.y_interval,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn x_span(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn y_span(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Axis-aligned pixel rectangle the grid is drawn into. Owned by the
/// presentation layer; passed by value into transform and clip calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GridRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, InvalidRangeError> {
        if !(width > 0.0) || !(height > 0.0) {
            return Err(InvalidRangeError::DegenerateRect { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// Inner padding between the rect edge and the plotted range, per axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub x: f32,
    pub y: f32,
}

impl Padding {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Map a math-space point into pixel space.
///
/// Scale per axis is `(dimension - 2 * padding) / (max - min)`; increasing
/// math y maps to decreasing pixel y.
pub fn to_pixel(
    point: Vec2,
    range: &CoordinateRange,
    rect: GridRect,
    padding: Padding,
) -> Result<Vec2, InvalidRangeError> {
    range.validate()?;
    let scale_x = (rect.width - 2.0 * padding.x) / range.x_span();
    let scale_y = (rect.height - 2.0 * padding.y) / range.y_span();
    let px = rect.x + padding.x + (point.x - range.min_x) * scale_x;
    let py = rect.y + rect.height - padding.y - (point.y - range.min_y) * scale_y;
    Ok(Vec2::new(px, py))
}

/// Exact inverse of [`to_pixel`].
pub fn to_math(
    pixel: Vec2,
    range: &CoordinateRange,
    rect: GridRect,
    padding: Padding,
) -> Result<Vec2, InvalidRangeError> {
    range.validate()?;
    let scale_x = (rect.width - 2.0 * padding.x) / range.x_span();
    let scale_y = (rect.height - 2.0 * padding.y) / range.y_span();
    let x = range.min_x + (pixel.x - rect.x - padding.x) / scale_x;
    let y = range.min_y + (rect.y + rect.height - padding.y - pixel.y) / scale_y;
    Ok(Vec2::new(x, y))
}
