//! Single- and dual-line answer grading
//!
//! Composes the point matcher and the equation codec into the two question
//! variants. Everything defect-shaped here is content or integration error,
//! never user error: a malformed expected-answer string fails loudly instead
//! of grading against a guess.

use thiserror::Error;

use super::equation::{self, EquationParseError, equations_match_unordered};
use super::line::{LineEquation, TargetPoint};
use super::matcher::{is_point_on_line, points_on_line};
use super::transform::InvalidRangeError;

/// Defects in authored question data, surfaced at load or grading entry
#[derive(Debug, Error)]
pub enum InvalidQuestionDataError {
    #[error("expected-answer csv must hold exactly 2 equations, found {0}")]
    WrongEquationCount(usize),
    #[error("expected-answer csv failed to parse")]
    BadEquationCsv(#[from] EquationParseError),
    #[error("unusable grid range")]
    BadRange(#[from] InvalidRangeError),
    #[error("question provides no target points")]
    NoTargets,
    #[error("dual-line question without an intersection point")]
    MissingIntersection,
    #[error("malformed coordinate text: {0:?}")]
    BadCoordinate(String),
    #[error("{origin} question whose {axis} range does not fit that origin")]
    OriginMismatch { origin: &'static str, axis: char },
    #[error("capture count {expected} exceeds the {available} available targets")]
    ImpossibleCaptureCount { expected: usize, available: usize },
    #[error("bad {what} bounds: min {min}, max {max}, step {step}")]
    BadParamBounds {
        what: &'static str,
        min: f32,
        max: f32,
        step: f32,
    },
    #[error("question json malformed: {0}")]
    BadJson(String),
}

/// Outcome of grading one submission
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub correct: bool,
    /// Targets the submitted line(s) pass through, for highlight feedback
    pub captured: Vec<TargetPoint>,
}

/// Grade the single-line variant: correct iff the line captures exactly
/// `expected_count` of the targets.
pub fn validate_single_line(
    line: LineEquation,
    targets: &[TargetPoint],
    expected_count: usize,
    epsilon: f32,
) -> ValidationResult {
    let captured = points_on_line(targets, line, epsilon);
    ValidationResult {
        correct: captured.len() == expected_count,
        captured,
    }
}

/// Grade the dual-line variant.
///
/// Correct iff all of:
/// 1. both lines pass through `intersection` within `epsilon`;
/// 2. each line captures at least one fixed point (the intersection counts:
///    authored content routinely pins one line by the intersection alone);
/// 3. the submitted pair matches the expected equations order-independently.
///
/// `captured` is the de-duplicated union of both lines' captures, plus the
/// intersection when either line passes through it.
pub fn validate_dual_line(
    line1: LineEquation,
    line2: LineEquation,
    targets: &[TargetPoint],
    intersection: &TargetPoint,
    expected_equations_csv: &str,
    epsilon: f32,
) -> Result<ValidationResult, InvalidQuestionDataError> {
    if targets.is_empty() {
        return Err(InvalidQuestionDataError::NoTargets);
    }
    let expected = equation::parse_list(expected_equations_csv)?;
    if expected.len() != 2 {
        return Err(InvalidQuestionDataError::WrongEquationCount(expected.len()));
    }

    let hits_intersection1 = is_point_on_line(intersection, line1, epsilon);
    let hits_intersection2 = is_point_on_line(intersection, line2, epsilon);

    let captured1 = points_on_line(targets, line1, epsilon);
    let captured2 = points_on_line(targets, line2, epsilon);

    let line1_pinned = !captured1.is_empty() || hits_intersection1;
    let line2_pinned = !captured2.is_empty() || hits_intersection2;

    let correct = hits_intersection1
        && hits_intersection2
        && line1_pinned
        && line2_pinned
        && equations_match_unordered(&[line1, line2], &expected, epsilon);

    let mut captured = captured1;
    for p in captured2 {
        push_unique(&mut captured, p, epsilon);
    }
    if hits_intersection1 || hits_intersection2 {
        push_unique(&mut captured, intersection.clone(), epsilon);
    }

    Ok(ValidationResult { correct, captured })
}

fn push_unique(points: &mut Vec<TargetPoint>, candidate: TargetPoint, epsilon: f32) {
    let dup = points.iter().any(|p| {
        (p.pos.x - candidate.pos.x).abs() < epsilon && (p.pos.y - candidate.pos.y).abs() < epsilon
    });
    if !dup {
        points.push(candidate);
    }
}
