//! Questionnaire session service
//!
//! Wraps a [`DecisionTreeEngine`] with the transition delay: an answer is
//! recorded right away, the move to the next stage happens once the delay
//! has elapsed on the injected [`Clock`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::{
    Answer, Breadcrumb, DecisionTreeEngine, QuestionId, ResultPayload, Stage, Submission,
    QUESTION_COUNT,
};
use crate::infrastructure::traits::Clock;

/// Everything a presenter needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub stage: Stage,
    pub active_question: Option<QuestionId>,
    pub prompt: Option<String>,
    /// Answer currently recorded for the active question
    pub selected: Option<Answer>,
    pub active_result: Option<ResultPayload>,
    pub result_link: Option<String>,
    pub progress_fraction: f64,
    pub step: Option<u8>,
    pub total_steps: u8,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub pending: bool,
    pub can_go_back: bool,
}

/// Renders session state. Implemented by front-ends.
pub trait Presenter {
    fn render(&mut self, view: &SessionView);

    /// Short status line, e.g. for ignored input.
    fn notice(&mut self, _message: &str) {}
}

/// One visitor's pass through the questionnaire.
pub struct SessionService {
    id: Uuid,
    engine: DecisionTreeEngine,
    clock: Arc<dyn Clock>,
    delay: Duration,
    due_at: Option<Duration>,
}

impl SessionService {
    /// Create a new session service.
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        let id = Uuid::new_v4();
        debug!("new session {} (delay {:?})", id, delay);
        Self {
            id,
            engine: DecisionTreeEngine::new(),
            clock,
            delay,
            due_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn engine(&self) -> &DecisionTreeEngine {
        &self.engine
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an answer and schedule the transition after the delay.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn submit_answer(&mut self, question: QuestionId, answer: Answer) -> Submission {
        let submission = self.engine.submit_answer(question, answer);
        if submission.is_scheduled() {
            self.due_at = Some(self.clock.now() + self.delay);
        }
        submission
    }

    pub fn is_pending(&self) -> bool {
        self.engine.pending().is_some()
    }

    /// Time left before the pending transition is due.
    pub fn remaining_delay(&self) -> Option<Duration> {
        self.due_at
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    /// Commit the pending transition if it is due.
    pub fn poll(&mut self) -> Option<Stage> {
        match self.remaining_delay() {
            Some(left) if left.is_zero() => self.commit(),
            _ => None,
        }
    }

    /// Wait out the delay, then commit the pending transition.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn settle(&mut self) -> Option<Stage> {
        let left = self.remaining_delay()?;
        if !left.is_zero() {
            self.clock.sleep(left);
        }
        self.commit()
    }

    fn commit(&mut self) -> Option<Stage> {
        self.due_at = None;
        self.engine.commit()
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub fn go_back(&mut self, steps: usize) -> bool {
        let moved = self.engine.go_back(steps);
        if moved {
            self.due_at = None;
        }
        moved
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub fn reset(&mut self) {
        self.engine.reset();
        self.due_at = None;
    }

    /// Snapshot of the session for rendering.
    pub fn view(&self, settings: &Settings) -> SessionView {
        let engine = &self.engine;
        let active_question = engine.active_question();
        let active_result = engine.active_result();
        SessionView {
            session_id: self.id.to_string(),
            stage: engine.stage(),
            active_question,
            prompt: active_question.map(|q| settings.questions.prompt(q).to_string()),
            selected: active_question.and_then(|q| engine.answers().get(q)),
            result_link: active_result.as_ref().map(|p| settings.result_link(p)),
            active_result,
            progress_fraction: engine.progress_fraction(),
            step: engine.step(),
            total_steps: QUESTION_COUNT,
            breadcrumbs: engine.breadcrumbs().to_vec(),
            pending: self.is_pending(),
            can_go_back: active_question.is_some() && engine.path().len() > 1,
        }
    }
}
