//! Interview flow module.
//!
//! # Module Structure
//!
//! - `model`: questions, plans, phases, and observable snapshots
//! - `recorder`: the cancellable per-question response recorder
//! - `flow`: the timed question state machine

mod flow;
mod model;
mod recorder;

// Re-export public API
pub use flow::{FlowTiming, InterviewFlowController};
pub use model::{
    FlowSnapshot, InterviewPhase, InterviewPlan, InterviewSetup, Question, DEFAULT_QUESTION_BUDGET,
};
pub use recorder::{RecorderTiming, ResponseRecorder};
