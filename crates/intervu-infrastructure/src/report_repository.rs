//! Seeded report repository.
//!
//! Completed-interview reports keyed by completion identifier. A real
//! scoring backend replaces this behind the same trait.

use async_trait::async_trait;
use intervu_core::error::Result;
use intervu_core::results::{InterviewReport, QuestionResult, ReportRepository};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory report lookup preloaded with demo reports.
///
/// `insert` lets the demo flow register a report for a freshly completed
/// interview so the completion id round-trips to `results`.
pub struct SeededReportRepository {
    reports: Mutex<HashMap<String, InterviewReport>>,
}

impl SeededReportRepository {
    /// Creates a repository holding the built-in demo report.
    pub fn with_demo_reports() -> Self {
        let mut reports = HashMap::new();
        let demo = demo_report("int-1");
        reports.insert(demo.interview_id.clone(), demo);
        Self {
            reports: Mutex::new(reports),
        }
    }

    /// Registers a report, replacing any previous one with the same id.
    pub fn insert(&self, report: InterviewReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.insert(report.interview_id.clone(), report);
        }
    }
}

/// The built-in demo report, parameterized by completion id.
pub fn demo_report(interview_id: &str) -> InterviewReport {
    InterviewReport {
        interview_id: interview_id.to_string(),
        title: "Frontend Developer Interview".to_string(),
        date: "2025-01-15".to_string(),
        overall_score: 80,
        skill_scores: vec![
            ("Technical Knowledge".to_string(), 85),
            ("Communication".to_string(), 70),
            ("Problem Solving".to_string(), 80),
            ("Cultural Fit".to_string(), 90),
            ("Code Quality".to_string(), 75),
        ],
        questions: vec![
            QuestionResult {
                prompt: "Can you explain the difference between controlled and uncontrolled components in React?".to_string(),
                answer: "Controlled components are those where form data is handled by React state.".to_string(),
                score: 85,
                feedback: "Clear explanation with good contrast between the two models.".to_string(),
            },
            QuestionResult {
                prompt: "How would you optimize the performance of a React application?".to_string(),
                answer: "Memoization, list virtualization, and splitting bundles.".to_string(),
                score: 75,
                feedback: "Solid techniques; measuring before optimizing was missing.".to_string(),
            },
        ],
    }
}

#[async_trait]
impl ReportRepository for SeededReportRepository {
    async fn find_by_id(&self, interview_id: &str) -> Result<Option<InterviewReport>> {
        let reports = self
            .reports
            .lock()
            .map_err(|_| intervu_core::IntervuError::internal("report lock poisoned"))?;
        Ok(reports.get(interview_id).cloned())
    }
}
