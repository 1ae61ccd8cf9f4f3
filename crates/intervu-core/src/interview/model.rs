//! Interview domain models.

use serde::{Deserialize, Serialize};

/// Default per-question countdown budget, in seconds.
pub const DEFAULT_QUESTION_BUDGET: u32 = 120;

/// A single interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: String,
    /// The prompt read out by the simulated interviewer
    pub prompt: String,
}

/// The question set and timing budget for one interview run.
///
/// Supplied once by the setup collaborator before the controller starts;
/// mutated only by the flow controller afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPlan {
    /// Identifier handed to the results collaborator on completion
    pub interview_id: String,
    /// Ordered question sequence
    pub questions: Vec<Question>,
    /// Countdown budget per question, in countdown units (seconds at the
    /// default tick interval)
    pub per_question_budget: u32,
}

/// The preferences a user picks before an interview.
///
/// The question bank turns a setup into an [`InterviewPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSetup {
    /// Role being interviewed for
    pub role: String,
    /// Self-reported experience level
    pub experience_level: String,
    /// Selected topics (at most five)
    pub topics: Vec<String>,
    /// Requested interview length in minutes
    pub duration_minutes: u32,
}

/// The phase of the interview state machine.
///
/// Invariant: `index < question count` while `Thinking` or `Presenting`;
/// `Complete` is terminal and reachable only from the last index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterviewPhase {
    /// The interview is being prepared.
    Loading,
    /// The simulated interviewer is "thinking" before question `index`.
    /// Strictly transient; navigation and recording are disabled.
    Thinking { index: usize },
    /// Question `index` is live and the countdown is running.
    Presenting { index: usize },
    /// All questions have been answered or skipped.
    Complete,
}

impl InterviewPhase {
    /// Returns the live question index if a question is being presented.
    pub fn presenting_index(&self) -> Option<usize> {
        match self {
            Self::Presenting { index } => Some(*index),
            _ => None,
        }
    }

    /// Returns the current question index in any per-question phase.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            Self::Thinking { index } | Self::Presenting { index } => Some(*index),
            _ => None,
        }
    }

    /// Returns true once the terminal phase is reached.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// An observable snapshot of the flow controller, published on every
/// state change for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    /// Current phase
    pub phase: InterviewPhase,
    /// Prompt of the current question, when one is active
    pub prompt: Option<String>,
    /// Remaining countdown units for the live question
    pub remaining: u32,
    /// Total number of questions in the plan
    pub total_questions: usize,
    /// Whether the response recorder is running
    pub recording: bool,
    /// Current response transcript for the live question
    pub transcript: String,
    /// Completion identifier, set when `Complete` is entered
    pub completion_id: Option<String>,
}
