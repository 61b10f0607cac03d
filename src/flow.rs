//! Per-question submit / retry / reveal orchestration
//!
//! The presentation layer owns scene objects, timers, and tweens; it drives
//! this state machine with plain values and gets plain values back. One
//! question at a time: `AwaitingAdjustment` until a submission resolves the
//! question (correct, or attempts exhausted), then `Advance` until the next
//! `load`.

use log::{debug, info};
use thiserror::Error;

use crate::consts::EPSILON;
use crate::grid::{
    AttemptState, AttemptTracker, AttemptTrackerError, InvalidQuestionDataError, LineEquation,
    TargetPoint, validate_dual_line, validate_single_line,
};
use crate::question::{Answer, Question};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("question already resolved; load the next question first")]
    AlreadyResolved,
    #[error("submission carries {got} line(s); this question needs {expected}")]
    WrongLineCount { expected: usize, got: usize },
    #[error(transparent)]
    Attempts(#[from] AttemptTrackerError),
    #[error(transparent)]
    Question(#[from] InvalidQuestionDataError),
}

/// Where the current question stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Player is adjusting lines; submissions accepted
    AwaitingAdjustment,
    /// Question resolved; the caller loads the next one
    Advance,
}

/// What the caller does next after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Advance to the next question
    Correct { captured: Vec<TargetPoint> },
    /// Same question, another attempt
    Retry {
        captured: Vec<TargetPoint>,
        remaining: u32,
    },
    /// Attempts exhausted: show the answer, then advance. `answer` is the
    /// formatted equation pair for dual-line questions; single-line
    /// questions reveal by highlighting their targets instead.
    Reveal {
        captured: Vec<TargetPoint>,
        answer: Option<String>,
    },
}

/// Owns one question's grading loop: validator + attempt counter + state
pub struct QuestionFlow {
    question: Question,
    attempts: AttemptTracker,
    state: FlowState,
}

impl QuestionFlow {
    pub fn new(question: Question) -> Self {
        let attempts = AttemptTracker::new(question.max_attempts);
        Self {
            question,
            attempts,
            state: FlowState::AwaitingAdjustment,
        }
    }

    /// Swap in the next question. Everything per-question is replaced
    /// wholesale - range, targets, attempt budget - so a stale in-flight
    /// computation can never see mixed state.
    pub fn load(&mut self, question: Question) {
        self.attempts = AttemptTracker::new(question.max_attempts);
        self.question = question;
        self.state = FlowState::AwaitingAdjustment;
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn attempts(&self) -> AttemptState {
        self.attempts.state()
    }

    /// Grade a submission and advance the state machine.
    ///
    /// Single-line questions take one line, dual-line questions two; any
    /// other shape is an integration defect.
    pub fn submit(&mut self, lines: &[LineEquation]) -> Result<SubmitOutcome, FlowError> {
        if self.state == FlowState::Advance {
            return Err(FlowError::AlreadyResolved);
        }

        let result = match (&self.question.answer, lines) {
            (Answer::CaptureCount(expected), [line]) => {
                validate_single_line(*line, &self.question.targets, *expected, EPSILON)
            }
            (
                Answer::EquationPair {
                    intersection,
                    equations_csv,
                    ..
                },
                [line1, line2],
            ) => validate_dual_line(
                *line1,
                *line2,
                &self.question.targets,
                intersection,
                equations_csv,
                EPSILON,
            )?,
            _ => {
                return Err(FlowError::WrongLineCount {
                    expected: self.question.answer.line_count(),
                    got: lines.len(),
                });
            }
        };

        if result.correct {
            info!(
                "correct with {} attempt(s) left",
                self.attempts.state().remaining
            );
            self.state = FlowState::Advance;
            return Ok(SubmitOutcome::Correct {
                captured: result.captured,
            });
        }

        let attempts = self.attempts.on_incorrect()?;
        debug!("incorrect; {} attempt(s) remaining", attempts.remaining);
        if attempts.is_exhausted() {
            self.state = FlowState::Advance;
            Ok(SubmitOutcome::Reveal {
                captured: result.captured,
                answer: self.question.reveal_text(),
            })
        } else {
            Ok(SubmitOutcome::Retry {
                captured: result.captured,
                remaining: attempts.remaining,
            })
        }
    }
}
