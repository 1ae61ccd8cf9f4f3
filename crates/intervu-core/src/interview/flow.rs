//! Interview flow controller.
//!
//! The timed, multi-step question state machine. Advances through
//! questions under a countdown, gates navigation during the transient
//! "thinking" pause, owns the per-question response recorder, and
//! auto-advances on timeout exactly as if Manual Next had been issued.
//!
//! Every transition takes the single state lock, cancels the outgoing
//! state's timers inside it, bumps an epoch counter, and only then applies
//! the new phase; a timer tick that lost the race re-checks the epoch
//! under the same lock and dies, so a stale countdown tick can never
//! double-advance the index.

use super::model::{FlowSnapshot, InterviewPhase, InterviewPlan};
use super::recorder::ResponseRecorder;
use crate::error::{IntervuError, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

/// Tunable flow controller delays.
#[derive(Debug, Clone, Copy)]
pub struct FlowTiming {
    /// Fixed setup delay between `start()` and the first thinking pause.
    pub setup_delay: Duration,
    /// Duration of the transient thinking pause before each question.
    pub thinking_delay: Duration,
    /// Countdown granularity; one unit of budget per tick.
    pub tick_interval: Duration,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            setup_delay: Duration::from_secs(2),
            thinking_delay: Duration::from_millis(1500),
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Copy, Clone)]
enum Direction {
    Next,
    Previous,
}

/// The state change decided under the lock; side effects (recorder
/// cleanup, timer spawning, snapshot publishing) run after it is released.
enum Transition {
    None,
    ToThinking {
        index: usize,
        token: CancellationToken,
        epoch: u64,
    },
    Completed,
}

struct FlowInner {
    phase: InterviewPhase,
    remaining: u32,
    /// Bumped on every transition; timer tasks carry the epoch they were
    /// spawned under and abandon themselves when it no longer matches.
    epoch: u64,
    started: bool,
    countdown: Option<CancellationToken>,
    thinking: Option<CancellationToken>,
}

struct FlowShared {
    plan: InterviewPlan,
    timing: FlowTiming,
    recorder: ResponseRecorder,
    inner: Mutex<FlowInner>,
    watch_tx: watch::Sender<FlowSnapshot>,
}

/// The question/timer state machine.
///
/// Cheap to clone; clones share the same state. The controller is the
/// only authorized mutator of the interview session it owns.
#[derive(Clone)]
pub struct InterviewFlowController {
    shared: Arc<FlowShared>,
}

impl InterviewFlowController {
    /// Creates a controller in the `Loading` phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan carries no questions; the state
    /// machine's index invariant requires at least one.
    pub fn new(
        plan: InterviewPlan,
        timing: FlowTiming,
        recorder: ResponseRecorder,
    ) -> Result<Self> {
        if plan.questions.is_empty() {
            return Err(IntervuError::internal("interview plan has no questions"));
        }

        let budget = plan.per_question_budget;
        let initial = FlowSnapshot {
            phase: InterviewPhase::Loading,
            prompt: None,
            remaining: budget,
            total_questions: plan.questions.len(),
            recording: false,
            transcript: String::new(),
            completion_id: None,
        };
        let (watch_tx, _) = watch::channel(initial);

        Ok(Self {
            shared: Arc::new(FlowShared {
                plan,
                timing,
                recorder,
                inner: Mutex::new(FlowInner {
                    phase: InterviewPhase::Loading,
                    // Matches the initial watch value so the two
                    // observables agree before the first transition.
                    remaining: budget,
                    epoch: 0,
                    started: false,
                    countdown: None,
                    thinking: None,
                }),
                watch_tx,
            }),
        })
    }

    /// Begins the interview: after the setup delay the controller enters
    /// the first thinking pause. Calling `start` again is a no-op.
    pub async fn start(&self) {
        let (token, epoch) = {
            let mut inner = self.shared.inner.lock().await;
            if inner.started {
                return;
            }
            inner.started = true;
            inner.epoch += 1;
            let token = CancellationToken::new();
            inner.thinking = Some(token.clone());
            (token, inner.epoch)
        };

        let ctrl = self.clone();
        let delay = self.shared.timing.setup_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            ctrl.enter_first_thinking(epoch).await;
        });
    }

    /// Manual Next. Accepted only while presenting; ignored in any other
    /// phase, including `Complete` (terminal) and the thinking pause.
    pub async fn next(&self) {
        let transition = {
            let mut inner = self.shared.inner.lock().await;
            Self::advance_locked(&mut inner, &self.shared.plan, Direction::Next)
        };
        self.apply(transition).await;
    }

    /// Manual Previous. Accepted only while presenting a question with a
    /// predecessor; ignored otherwise, including at index 0.
    ///
    /// Revisiting a question always discards its previously recorded
    /// answer: the transition clears the buffer like any other.
    pub async fn previous(&self) {
        let transition = {
            let mut inner = self.shared.inner.lock().await;
            Self::advance_locked(&mut inner, &self.shared.plan, Direction::Previous)
        };
        self.apply(transition).await;
    }

    /// Starts the response recorder for the live question. Ignored
    /// outside the presenting phase.
    pub async fn start_recording(&self) {
        {
            let inner = self.shared.inner.lock().await;
            if inner.phase.presenting_index().is_none() {
                return;
            }
            // Holding the state lock here keeps a transition from
            // sneaking between the phase check and the recorder start.
            self.shared.recorder.start().await;
        }
        self.publish().await;
    }

    /// Stops the response recorder, keeping what was transcribed.
    pub async fn stop_recording(&self) {
        self.shared.recorder.stop().await;
        self.publish().await;
    }

    /// Cancels all timers and stops the recorder. The phase is left as-is;
    /// used when the caller abandons the interview.
    pub async fn shutdown(&self) {
        {
            let mut inner = self.shared.inner.lock().await;
            Self::cancel_timers(&mut inner);
            inner.epoch += 1;
        }
        self.shared.recorder.stop().await;
    }

    /// Subscribes to state change snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.shared.watch_tx.subscribe()
    }

    /// Builds a fresh observable snapshot.
    pub async fn snapshot(&self) -> FlowSnapshot {
        let (phase, remaining) = {
            let inner = self.shared.inner.lock().await;
            (inner.phase, inner.remaining)
        };
        FlowSnapshot {
            phase,
            prompt: phase
                .question_index()
                .map(|i| self.shared.plan.questions[i].prompt.clone()),
            remaining,
            total_questions: self.shared.plan.questions.len(),
            recording: self.shared.recorder.is_recording().await,
            transcript: self.shared.recorder.snapshot().await,
            completion_id: phase
                .is_complete()
                .then(|| self.shared.plan.interview_id.clone()),
        }
    }

    /// Returns the current phase.
    pub async fn phase(&self) -> InterviewPhase {
        self.shared.inner.lock().await.phase
    }

    /// Remaining countdown units for the live question.
    pub async fn remaining(&self) -> u32 {
        self.shared.inner.lock().await.remaining
    }

    /// Current transcript of the live question's response.
    pub async fn transcript(&self) -> String {
        self.shared.recorder.snapshot().await
    }

    /// Whether the recorder is running.
    pub async fn is_recording(&self) -> bool {
        self.shared.recorder.is_recording().await
    }

    /// The completion identifier, once `Complete` has been entered.
    pub async fn completion_id(&self) -> Option<String> {
        let inner = self.shared.inner.lock().await;
        inner
            .phase
            .is_complete()
            .then(|| self.shared.plan.interview_id.clone())
    }

    /// The plan this controller runs.
    pub fn plan(&self) -> &InterviewPlan {
        &self.shared.plan
    }

    // ========================================================================
    // Internal transitions
    // ========================================================================

    async fn enter_first_thinking(&self, epoch: u64) {
        let transition = {
            let mut inner = self.shared.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            Self::begin_thinking(&mut inner, 0, self.shared.plan.per_question_budget)
        };
        self.apply(transition).await;
    }

    /// Leaves the thinking pause and presents question `index`, resetting
    /// the countdown and spawning the tick task.
    async fn present(&self, index: usize, epoch: u64) {
        let (token, epoch) = {
            let mut inner = self.shared.inner.lock().await;
            if inner.epoch != epoch {
                // Superseded while the thinking delay was pending.
                return;
            }
            inner.thinking = None;
            inner.epoch += 1;
            inner.phase = InterviewPhase::Presenting { index };
            inner.remaining = self.shared.plan.per_question_budget;
            let token = CancellationToken::new();
            inner.countdown = Some(token.clone());
            (token, inner.epoch)
        };
        self.publish().await;

        let ctrl = self.clone();
        let tick = self.shared.timing.tick_interval;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(tick) => {}
                }
                if !ctrl.tick(epoch).await {
                    return;
                }
            }
        });
    }

    /// One countdown tick. Returns false when the tick task should stop.
    async fn tick(&self, epoch: u64) -> bool {
        let expiry = {
            let mut inner = self.shared.inner.lock().await;
            if inner.epoch != epoch || inner.phase.presenting_index().is_none() {
                // Stale tick: the state already moved on.
                return false;
            }
            inner.remaining = inner.remaining.saturating_sub(1);
            if inner.remaining == 0 {
                // Expiry behaves exactly as a Manual Next issued at this
                // index: same decision function, same lock.
                Some(Self::advance_locked(
                    &mut inner,
                    &self.shared.plan,
                    Direction::Next,
                ))
            } else {
                None
            }
        };

        match expiry {
            None => {
                self.publish().await;
                true
            }
            Some(transition) => {
                self.apply(transition).await;
                false
            }
        }
    }

    /// The single decision function for Next/Previous/expiry.
    fn advance_locked(
        inner: &mut FlowInner,
        plan: &InterviewPlan,
        direction: Direction,
    ) -> Transition {
        let Some(index) = inner.phase.presenting_index() else {
            return Transition::None;
        };
        let last = plan.questions.len() - 1;

        match direction {
            Direction::Next if index == last => {
                Self::cancel_timers(inner);
                inner.epoch += 1;
                inner.phase = InterviewPhase::Complete;
                inner.remaining = 0;
                Transition::Completed
            }
            Direction::Next => Self::begin_thinking(inner, index + 1, plan.per_question_budget),
            Direction::Previous if index > 0 => {
                Self::begin_thinking(inner, index - 1, plan.per_question_budget)
            }
            Direction::Previous => Transition::None,
        }
    }

    /// Enters the thinking pause before `index`. Must be called with the
    /// state lock held; cancellation and phase change are one step.
    fn begin_thinking(inner: &mut FlowInner, index: usize, budget: u32) -> Transition {
        Self::cancel_timers(inner);
        inner.epoch += 1;
        inner.phase = InterviewPhase::Thinking { index };
        inner.remaining = budget;
        let token = CancellationToken::new();
        inner.thinking = Some(token.clone());
        Transition::ToThinking {
            index,
            token,
            epoch: inner.epoch,
        }
    }

    fn cancel_timers(inner: &mut FlowInner) {
        if let Some(token) = inner.countdown.take() {
            token.cancel();
        }
        if let Some(token) = inner.thinking.take() {
            token.cancel();
        }
    }

    /// Runs the side effects of a decided transition: forced recorder
    /// stop, buffer clear, snapshot publish, and timer spawning.
    ///
    /// Boxed because the call graph is cyclic (`apply` spawns tasks that
    /// call back into `present` and `tick`, which call `apply`); the
    /// type-erased future keeps the spawned tasks' `Send` bounds provable.
    fn apply(&self, transition: Transition) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(self.apply_inner(transition))
    }

    async fn apply_inner(&self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::ToThinking {
                index,
                token,
                epoch,
            } => {
                self.shared.recorder.stop().await;
                self.shared.recorder.clear().await;
                self.publish().await;

                let ctrl = self.clone();
                let delay = self.shared.timing.thinking_delay;
                tokio::spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => return,
                        _ = tokio::time::sleep(delay) => {}
                    }
                    ctrl.present(index, epoch).await;
                });
            }
            Transition::Completed => {
                self.shared.recorder.stop().await;
                self.shared.recorder.clear().await;
                self.publish().await;
                tracing::debug!(
                    interview_id = %self.shared.plan.interview_id,
                    "interview complete"
                );
            }
        }
    }

    async fn publish(&self) {
        let snapshot = self.snapshot().await;
        let _ = self.shared.watch_tx.send(snapshot);
    }
}
