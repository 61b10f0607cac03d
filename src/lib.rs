//! Linegrid - the logic core of a coordinate-grid line quiz
//!
//! Core modules:
//! - `grid`: pure math - coordinate transforms, viewport clipping, point
//!   matching, equation parsing, attempt counting, answer validation
//! - `question`: typed question-bank content model
//! - `flow`: per-question submit/retry/reveal state machine
//!
//! Everything here is synchronous and deterministic. The only mutable state
//! is the attempt counter and the flow it drives; rendering, audio, and
//! animation live with the caller, which passes coordinates and line state
//! in by value on every interaction.

pub mod flow;
pub mod grid;
pub mod question;

pub use flow::{FlowError, FlowState, QuestionFlow, SubmitOutcome};
pub use grid::{
    AttemptState, AttemptTracker, AttemptTrackerError, ClipResult, CoordinateRange,
    EquationParseError, GridRect, InvalidQuestionDataError, InvalidRangeError, LineEquation,
    Padding, TargetPoint, ValidationResult,
};
pub use question::{Answer, LineControls, Origin, ParamBounds, Question};

/// Shared numeric constants
pub mod consts {
    /// Tolerance for every "on the line" / "same equation" / clip de-dup
    /// comparison. One constant on purpose: drawing and grading must agree
    /// on what counts as a hit.
    pub const EPSILON: f32 = 0.001;

    /// Attempts granted per question unless content overrides it
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
}
