//! Typed question-bank content
//!
//! The bank ships loosely formatted strings: `"(x,y)"` CSVs for points and
//! equation CSVs for expected answers. Everything is parsed and validated
//! once at load time; a malformed bank entry is a content defect and fails
//! loudly here, never mid-question and never with a guessed default.

use std::sync::LazyLock;

use glam::Vec2;
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::grid::equation;
use crate::grid::{
    CoordinateRange, InvalidQuestionDataError, LineEquation, TargetPoint,
};

/// Where the grid's origin sits. Declared by content, never inferred from
/// the ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// First-quadrant grid; (min_x, min_y) sits at the rect's bottom-left
    BottomLeft,
    /// Four-quadrant grid; both axes span negative and positive values
    Centered,
}

/// Slider bounds for one line parameter (slope or intercept)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamBounds {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamBounds {
    fn validate(&self, what: &'static str) -> Result<(), InvalidQuestionDataError> {
        if !(self.max >= self.min) || !(self.step > 0.0) {
            return Err(InvalidQuestionDataError::BadParamBounds {
                what,
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Snap a raw slider value onto the step lattice, clamped to bounds.
    pub fn snap(&self, value: f32) -> f32 {
        let stepped = self.min + ((value - self.min) / self.step).round() * self.step;
        stepped.clamp(self.min, self.max)
    }
}

/// Adjustable-parameter bounds for one user-controlled line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineControls {
    pub slope: ParamBounds,
    pub intercept: ParamBounds,
}

/// One bank entry as authored, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    pub min_x: f32,
    pub max_x: f32,
    pub x_interval: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub y_interval: f32,
    pub origin: Origin,
    /// CSV of `"(x,y)"` pairs - the target points
    pub coordinates: String,
    /// Single `"(x,y)"` pair; dual-line questions only
    #[serde(default)]
    pub coordinate_intersection: Option<String>,
    pub answer: AnswerSpec,
    /// Per-line slope/intercept bounds, one entry per adjustable line
    #[serde(default)]
    pub line_controls: Vec<LineControls>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

/// Raw answer field: a capture count for single-line questions, an equation
/// CSV for dual-line ones
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerSpec {
    CaptureCount(usize),
    Equations(String),
}

/// Validated answer key
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Single-line: the line must capture exactly this many targets
    CaptureCount(usize),
    /// Dual-line: both lines graded against this equation pair
    EquationPair {
        intersection: TargetPoint,
        /// The pair, kept parsed for the reveal
        equations: Vec<LineEquation>,
        /// As-authored text, handed to the validator
        equations_csv: String,
    },
}

impl Answer {
    /// How many lines a submission must carry
    pub fn line_count(&self) -> usize {
        match self {
            Answer::CaptureCount(_) => 1,
            Answer::EquationPair { .. } => 2,
        }
    }
}

/// A fully validated question, owning everything the flow needs.
///
/// Replaced wholesale when the next question loads; nothing is patched in
/// place, so a stale in-flight computation can never observe mixed state.
#[derive(Debug, Clone)]
pub struct Question {
    pub range: CoordinateRange,
    pub origin: Origin,
    pub targets: Vec<TargetPoint>,
    pub answer: Answer,
    pub line_controls: Vec<LineControls>,
    pub max_attempts: u32,
}

impl Question {
    /// Validate a raw bank entry into a usable question.
    pub fn load(raw: RawQuestion) -> Result<Self, InvalidQuestionDataError> {
        let range = CoordinateRange::new(
            raw.min_x,
            raw.max_x,
            raw.x_interval,
            raw.min_y,
            raw.max_y,
            raw.y_interval,
        )?;
        check_origin(raw.origin, &range)?;

        let targets = parse_point_list(&raw.coordinates)?;
        if targets.is_empty() {
            return Err(InvalidQuestionDataError::NoTargets);
        }

        let answer = match raw.answer {
            AnswerSpec::CaptureCount(expected) => {
                if expected > targets.len() {
                    return Err(InvalidQuestionDataError::ImpossibleCaptureCount {
                        expected,
                        available: targets.len(),
                    });
                }
                Answer::CaptureCount(expected)
            }
            AnswerSpec::Equations(csv) => {
                let equations = equation::parse_list(&csv)?;
                if equations.len() != 2 {
                    return Err(InvalidQuestionDataError::WrongEquationCount(equations.len()));
                }
                let intersection_text = raw
                    .coordinate_intersection
                    .as_deref()
                    .ok_or(InvalidQuestionDataError::MissingIntersection)?;
                Answer::EquationPair {
                    intersection: parse_point(intersection_text)?,
                    equations,
                    equations_csv: csv,
                }
            }
        };

        for controls in &raw.line_controls {
            controls.slope.validate("slope")?;
            controls.intercept.validate("intercept")?;
        }

        let max_attempts = raw.max_attempts.unwrap_or(consts::DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(InvalidQuestionDataError::BadJson(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        info!(
            "loaded question: {} target(s), {:?} origin, {} line(s)",
            targets.len(),
            raw.origin,
            answer.line_count()
        );

        Ok(Self {
            range,
            origin: raw.origin,
            targets,
            answer,
            line_controls: raw.line_controls,
            max_attempts,
        })
    }

    /// Deserialize and validate one bank entry from JSON.
    pub fn from_json(text: &str) -> Result<Self, InvalidQuestionDataError> {
        let raw: RawQuestion = serde_json::from_str(text)
            .map_err(|e| InvalidQuestionDataError::BadJson(e.to_string()))?;
        Self::load(raw)
    }

    /// Canonical reveal text once attempts run out. Dual-line questions
    /// reveal their equation pair; single-line questions have no equation to
    /// show (the caller highlights the targets instead).
    pub fn reveal_text(&self) -> Option<String> {
        match &self.answer {
            Answer::CaptureCount(_) => None,
            Answer::EquationPair { equations, .. } => Some(
                equations
                    .iter()
                    .map(|e| equation::format(*e))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

fn check_origin(origin: Origin, range: &CoordinateRange) -> Result<(), InvalidQuestionDataError> {
    match origin {
        Origin::BottomLeft => {
            if range.min_x < 0.0 {
                return Err(InvalidQuestionDataError::OriginMismatch {
                    origin: "bottom-left",
                    axis: 'x',
                });
            }
            if range.min_y < 0.0 {
                return Err(InvalidQuestionDataError::OriginMismatch {
                    origin: "bottom-left",
                    axis: 'y',
                });
            }
        }
        Origin::Centered => {
            if !(range.min_x < 0.0 && range.max_x > 0.0) {
                return Err(InvalidQuestionDataError::OriginMismatch {
                    origin: "centered",
                    axis: 'x',
                });
            }
            if !(range.min_y < 0.0 && range.max_y > 0.0) {
                return Err(InvalidQuestionDataError::OriginMismatch {
                    origin: "centered",
                    axis: 'y',
                });
            }
        }
    }
    Ok(())
}

// One "(x,y)" pair; signs and decimals allowed, interior whitespace tolerated
static POINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*\)").unwrap()
});

/// Parse a CSV of `"(x,y)"` pairs into target points.
///
/// Strict by design: any text that is not a well-formed pair, a separating
/// comma, or whitespace makes the whole list a defect.
pub fn parse_point_list(text: &str) -> Result<Vec<TargetPoint>, InvalidQuestionDataError> {
    let leftover = POINT_RE.replace_all(text, "");
    if leftover.chars().any(|c| !c.is_whitespace() && c != ',') {
        return Err(InvalidQuestionDataError::BadCoordinate(text.to_string()));
    }

    let mut points = Vec::new();
    for caps in POINT_RE.captures_iter(text) {
        let x: f32 = caps[1]
            .parse()
            .map_err(|_| InvalidQuestionDataError::BadCoordinate(text.to_string()))?;
        let y: f32 = caps[2]
            .parse()
            .map_err(|_| InvalidQuestionDataError::BadCoordinate(text.to_string()))?;
        points.push(TargetPoint {
            pos: Vec2::new(x, y),
            id: None,
        });
    }
    Ok(points)
}

/// Parse exactly one `"(x,y)"` pair.
pub fn parse_point(text: &str) -> Result<TargetPoint, InvalidQuestionDataError> {
    let mut points = parse_point_list(text)?;
    if points.len() == 1 {
        Ok(points.remove(0))
    } else {
        Err(InvalidQuestionDataError::BadCoordinate(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_single() -> RawQuestion {
        RawQuestion {
            min_x: -5.0,
            max_x: 5.0,
            x_interval: 1.0,
            min_y: -5.0,
            max_y: 5.0,
            y_interval: 1.0,
            origin: Origin::Centered,
            coordinates: "(0,2),(2,4)".to_string(),
            coordinate_intersection: None,
            answer: AnswerSpec::CaptureCount(2),
            line_controls: vec![],
            max_attempts: None,
        }
    }

    #[test]
    fn test_parse_point_list() {
        let points = parse_point_list("(0,2), (2,4), (-1.5, 3)").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].pos, Vec2::new(-1.5, 3.0));
    }

    #[test]
    fn test_parse_point_list_rejects_garbage() {
        for bad in ["(0,2) junk (2,4)", "(0;2)", "0,2", "(x,y)"] {
            assert!(
                matches!(
                    parse_point_list(bad),
                    Err(InvalidQuestionDataError::BadCoordinate(_))
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_point_single() {
        let p = parse_point("(1, 3)").unwrap();
        assert_eq!(p.pos, Vec2::new(1.0, 3.0));
        assert!(parse_point("(1,3),(2,4)").is_err());
        assert!(parse_point("").is_err());
    }

    #[test]
    fn test_load_single_line_question() {
        let q = Question::load(raw_single()).unwrap();
        assert_eq!(q.targets.len(), 2);
        assert_eq!(q.answer, Answer::CaptureCount(2));
        assert_eq!(q.max_attempts, crate::consts::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(q.reveal_text(), None);
    }

    #[test]
    fn test_load_dual_line_question() {
        let mut raw = raw_single();
        raw.answer = AnswerSpec::Equations("y=1x+2,y=-1x+4".to_string());
        raw.coordinate_intersection = Some("(1,3)".to_string());

        let q = Question::load(raw).unwrap();
        assert_eq!(q.answer.line_count(), 2);
        assert_eq!(q.reveal_text().as_deref(), Some("y = x + 2, y = -x + 4"));
    }

    #[test]
    fn test_load_dual_line_requires_intersection() {
        let mut raw = raw_single();
        raw.answer = AnswerSpec::Equations("y=1x+2,y=-1x+4".to_string());

        let err = Question::load(raw).unwrap_err();
        assert!(matches!(err, InvalidQuestionDataError::MissingIntersection));
    }

    #[test]
    fn test_load_rejects_impossible_count() {
        let mut raw = raw_single();
        raw.answer = AnswerSpec::CaptureCount(3);
        let err = Question::load(raw).unwrap_err();
        assert!(matches!(
            err,
            InvalidQuestionDataError::ImpossibleCaptureCount {
                expected: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_load_rejects_origin_mismatch() {
        let mut raw = raw_single();
        raw.origin = Origin::BottomLeft;
        let err = Question::load(raw).unwrap_err();
        assert!(matches!(
            err,
            InvalidQuestionDataError::OriginMismatch { axis: 'x', .. }
        ));

        let mut raw = raw_single();
        raw.min_x = 0.0;
        raw.min_y = 0.0;
        raw.origin = Origin::Centered;
        let err = Question::load(raw).unwrap_err();
        assert!(matches!(
            err,
            InvalidQuestionDataError::OriginMismatch { axis: 'x', .. }
        ));
    }

    #[test]
    fn test_from_json() {
        let q = Question::from_json(
            r#"{
                "min_x": -5, "max_x": 5, "x_interval": 1,
                "min_y": -5, "max_y": 5, "y_interval": 1,
                "origin": "centered",
                "coordinates": "(0,2),(2,4)",
                "coordinate_intersection": "(1,3)",
                "answer": "y=1x+2,y=-1x+4",
                "line_controls": [
                    {"slope": {"min": -5, "max": 5, "step": 1},
                     "intercept": {"min": -5, "max": 5, "step": 1}},
                    {"slope": {"min": -5, "max": 5, "step": 1},
                     "intercept": {"min": -5, "max": 5, "step": 1}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(q.line_controls.len(), 2);

        assert!(Question::from_json("{}").is_err());
    }

    #[test]
    fn test_param_bounds_snap() {
        let bounds = ParamBounds {
            min: -5.0,
            max: 5.0,
            step: 0.5,
        };
        assert_eq!(bounds.snap(1.3), 1.5);
        assert_eq!(bounds.snap(-7.0), -5.0);
        assert_eq!(bounds.snap(9.9), 5.0);

        let bad = ParamBounds {
            min: 1.0,
            max: 0.0,
            step: 0.5,
        };
        assert!(bad.validate("slope").is_err());
    }
}
