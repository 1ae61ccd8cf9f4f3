//! Built-in question bank.
//!
//! The interview setup collaborator: turns a user's setup choices into an
//! `InterviewPlan` for the flow controller. Question sets are seeded per
//! role; a real backend would generate them instead.

use intervu_core::error::Result;
use intervu_core::interview::{InterviewPlan, InterviewSetup, Question, DEFAULT_QUESTION_BUDGET};
use uuid::Uuid;

/// Roles the setup screen offers.
pub const ROLES: &[&str] = &[
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "DevOps Engineer",
    "Data Scientist",
];

/// Experience levels the setup screen offers.
pub const EXPERIENCE_LEVELS: &[&str] = &["Junior", "Mid-Level", "Senior", "Lead"];

/// Upper bound on selected topics.
pub const MAX_TOPICS: usize = 5;

const FRONTEND_QUESTIONS: &[&str] = &[
    "Can you explain the difference between controlled and uncontrolled components in React?",
    "How would you optimize the performance of a React application?",
    "Explain how CSS specificity works and how to manage it in large projects.",
    "What are closures in JavaScript and how might you use them?",
];

const BACKEND_QUESTIONS: &[&str] = &[
    "How do you design an API that stays backwards compatible as it evolves?",
    "Explain the trade-offs between SQL and NoSQL storage for a new service.",
    "How would you diagnose a service whose tail latency suddenly doubled?",
    "What strategies do you use to make a background job pipeline reliable?",
];

/// Seeded interview setup collaborator.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank;

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topics offered for a role. Unknown roles get the frontend set.
    pub fn topics_for(&self, role: &str) -> Vec<String> {
        match role {
            "Backend Developer" => vec![
                "APIs".to_string(),
                "Databases".to_string(),
                "Distributed Systems".to_string(),
                "Observability".to_string(),
            ],
            _ => vec![
                "React".to_string(),
                "JavaScript".to_string(),
                "CSS".to_string(),
                "Performance".to_string(),
                "Accessibility".to_string(),
            ],
        }
    }

    /// Builds the one plan the flow controller is handed before it starts.
    ///
    /// The plan gets a fresh interview identifier, the role's question
    /// set, and the per-question budget (the default 120 seconds unless
    /// the caller overrides it).
    pub fn plan_for(&self, setup: &InterviewSetup, budget: Option<u32>) -> Result<InterviewPlan> {
        let prompts = match setup.role.as_str() {
            "Backend Developer" => BACKEND_QUESTIONS,
            _ => FRONTEND_QUESTIONS,
        };

        let questions = prompts
            .iter()
            .enumerate()
            .map(|(i, prompt)| Question {
                id: format!("q-{}", i + 1),
                prompt: (*prompt).to_string(),
            })
            .collect();

        Ok(InterviewPlan {
            interview_id: format!("int-{}", Uuid::new_v4()),
            questions,
            per_question_budget: budget.unwrap_or(DEFAULT_QUESTION_BUDGET),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(role: &str) -> InterviewSetup {
        InterviewSetup {
            role: role.to_string(),
            experience_level: "Mid-Level".to_string(),
            topics: vec!["React".to_string()],
            duration_minutes: 30,
        }
    }

    #[test]
    fn test_plan_uses_default_budget() {
        let bank = QuestionBank::new();
        let plan = bank.plan_for(&setup("Frontend Developer"), None).unwrap();
        assert_eq!(plan.per_question_budget, DEFAULT_QUESTION_BUDGET);
        assert_eq!(plan.questions.len(), 4);
        assert!(plan.interview_id.starts_with("int-"));
    }

    #[test]
    fn test_budget_override_is_honored() {
        let bank = QuestionBank::new();
        let plan = bank.plan_for(&setup("Backend Developer"), Some(30)).unwrap();
        assert_eq!(plan.per_question_budget, 30);
    }

    #[test]
    fn test_unknown_role_falls_back_to_default_set() {
        let bank = QuestionBank::new();
        let fallback = bank.plan_for(&setup("Pastry Chef"), None).unwrap();
        let frontend = bank.plan_for(&setup("Frontend Developer"), None).unwrap();
        assert_eq!(
            fallback.questions[0].prompt,
            frontend.questions[0].prompt
        );
    }

    #[test]
    fn test_topic_catalogs_are_nonempty_and_within_limit() {
        let bank = QuestionBank::new();
        for role in ROLES {
            let topics = bank.topics_for(role);
            assert!(!topics.is_empty(), "no topics for {}", role);
            assert!(topics.len() <= MAX_TOPICS);
        }
    }

    #[test]
    fn test_each_plan_gets_a_fresh_identifier() {
        let bank = QuestionBank::new();
        let a = bank.plan_for(&setup("Frontend Developer"), None).unwrap();
        let b = bank.plan_for(&setup("Frontend Developer"), None).unwrap();
        assert_ne!(a.interview_id, b.interview_id);
    }
}
