//! Pure quiz-core math
//!
//! Everything in this module must stay pure and deterministic:
//! - No rendering or platform dependencies
//! - No timers, I/O, or hidden globals
//! - The only mutable state is the attempt counter

pub mod attempts;
pub mod clip;
pub mod equation;
pub mod line;
pub mod matcher;
pub mod transform;
pub mod validate;

pub use attempts::{AttemptState, AttemptTracker, AttemptTrackerError};
pub use clip::{ClipResult, clip_line_to_rect};
pub use equation::EquationParseError;
pub use line::{LineEquation, TargetPoint};
pub use matcher::{is_point_on_line, points_on_line};
pub use transform::{CoordinateRange, GridRect, InvalidRangeError, Padding, to_math, to_pixel};
pub use validate::{
    InvalidQuestionDataError, ValidationResult, validate_dual_line, validate_single_line,
};
