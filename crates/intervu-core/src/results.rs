//! Interview results.
//!
//! The flow controller hands a completion identifier to a results
//! collaborator; this module defines the report shape and the lookup
//! trait. Producing the report itself is outside this core.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Scored feedback for a single answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// The question prompt
    pub prompt: String,
    /// The transcribed answer
    pub answer: String,
    /// Score out of 100
    pub score: u32,
    /// Interviewer feedback text
    pub feedback: String,
}

/// The report produced for a completed interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    /// Completion identifier this report belongs to
    pub interview_id: String,
    /// Human-readable interview title
    pub title: String,
    /// Date the interview was taken (ISO 8601)
    pub date: String,
    /// Aggregate score out of 100
    pub overall_score: u32,
    /// Per-skill scores (skill name, score out of 100)
    pub skill_scores: Vec<(String, u32)>,
    /// Per-question breakdown
    pub questions: Vec<QuestionResult>,
}

/// Lookup of completed interview reports.
///
/// An unknown identifier is `Ok(None)`; callers surface it as a
/// displayable not-found condition, never a fatal error.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Finds a report by its completion identifier.
    async fn find_by_id(&self, interview_id: &str) -> Result<Option<InterviewReport>>;
}
