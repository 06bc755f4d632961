//! Decision-tree session state machine
//!
//! Answering is two-phase: [`DecisionTreeEngine::submit_answer`] records the
//! answer and schedules the transition, [`DecisionTreeEngine::commit`] applies
//! it. The gap between the two is where a presenter shows the selection
//! before advancing. Nothing here knows about time; see
//! `application::services::SessionService` for the delay.

use tracing::{debug, trace};

use crate::domain::tree::{compute_result_payload, next_stage, ResultPayload};
use crate::domain::{
    Answer, AnswerSet, Breadcrumb, CrumbState, Outcome, QuestionId, Stage, QUESTION_COUNT,
};

/// A transition that has been scheduled but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub from: QuestionId,
    pub answer: Answer,
    pub next: Stage,
}

/// Why a submission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session already reached a result
    Terminal,
    /// The submitted question is not the one being shown
    NotActive { active: QuestionId },
    /// A transition for the active question is still pending
    AlreadyPending,
}

/// Result of [`DecisionTreeEngine::submit_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Scheduled(PendingTransition),
    Ignored(IgnoreReason),
}

impl Submission {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Submission::Scheduled(_))
    }
}

/// State of one questionnaire session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTreeEngine {
    stage: Stage,
    answers: AnswerSet,
    /// Questions visited on the way to the current stage, first is always Q1
    path: Vec<QuestionId>,
    pending: Option<PendingTransition>,
}

impl Default for DecisionTreeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeEngine {
    pub fn new() -> Self {
        Self {
            stage: Stage::Question(QuestionId::Q1),
            answers: AnswerSet::new(),
            path: vec![QuestionId::Q1],
            pending: None,
        }
    }

    /// Record an answer for the active question and schedule its transition.
    ///
    /// Submissions for any other question, after a result, or while a
    /// transition is pending are ignored and leave the state untouched.
    pub fn submit_answer(&mut self, question: QuestionId, answer: Answer) -> Submission {
        let active = match self.stage {
            Stage::Result(_) => return self.ignore(question, IgnoreReason::Terminal),
            Stage::Question(active) => active,
        };
        if question != active {
            return self.ignore(question, IgnoreReason::NotActive { active });
        }
        if self.pending.is_some() {
            return self.ignore(question, IgnoreReason::AlreadyPending);
        }

        self.answers.set(question, answer);
        let pending = PendingTransition {
            from: question,
            answer,
            next: next_stage(question, answer),
        };
        self.pending = Some(pending);
        debug!("submit_answer: {}={} scheduled -> {}", question, answer, pending.next);
        Submission::Scheduled(pending)
    }

    fn ignore(&self, question: QuestionId, reason: IgnoreReason) -> Submission {
        debug!("submit_answer: ignoring {} ({:?})", question, reason);
        Submission::Ignored(reason)
    }

    /// Apply the pending transition, if any, and return the new stage.
    pub fn commit(&mut self) -> Option<Stage> {
        let pending = self.pending.take()?;
        if let Stage::Question(next) = pending.next {
            self.path.push(next);
        }
        self.stage = pending.next;
        debug!("commit: {} -> {}", pending.from, self.stage);
        Some(self.stage)
    }

    /// Step back to question number `current - steps`.
    ///
    /// The target resolves to the last visited question at or below that
    /// number, so one step back from Q3 lands on Q1 since Q2 was skipped.
    /// Answers of every question stepped over, including the current one, are
    /// cleared; the target keeps its answer. A pending transition is dropped.
    /// Returns `false` without changing anything when the session is at a
    /// result, `steps` is zero, or the target would be before question 1.
    pub fn go_back(&mut self, steps: usize) -> bool {
        let Stage::Question(current) = self.stage else {
            debug!("go_back: ignored at result");
            return false;
        };
        let current = usize::from(current.number());
        if steps == 0 || steps >= current {
            debug!("go_back: ignored, {} step(s) from question {}", steps, current);
            return false;
        }
        let number = current - steps;

        self.pending = None;
        while let Some(&tail) = self.path.last() {
            if usize::from(tail.number()) <= number || self.path.len() == 1 {
                break;
            }
            self.path.pop();
            self.answers.clear(tail);
            trace!("go_back: cleared {}", tail);
        }
        let target = *self.path.last().unwrap_or(&QuestionId::Q1);
        self.stage = Stage::Question(target);
        debug!("go_back: now at {}", target);
        true
    }

    /// Return to a fresh session.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("reset");
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn path(&self) -> &[QuestionId] {
        &self.path
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// Question card to show, `None` once a result is reached.
    pub fn active_question(&self) -> Option<QuestionId> {
        self.stage.question()
    }

    pub fn terminal(&self) -> Option<Outcome> {
        self.stage.outcome()
    }

    /// Payload to render once a result is reached.
    pub fn active_result(&self) -> Option<ResultPayload> {
        self.terminal().map(compute_result_payload)
    }

    /// Current question over question count; `0.0` at a result.
    pub fn progress_fraction(&self) -> f64 {
        self.active_question()
            .map(|q| f64::from(q.number()) / f64::from(QUESTION_COUNT))
            .unwrap_or(0.0)
    }

    /// "Step N of 3" counter, `None` at a result.
    pub fn step(&self) -> Option<u8> {
        self.active_question().map(QuestionId::number)
    }

    pub fn breadcrumbs(&self) -> [Breadcrumb; 3] {
        QuestionId::ALL.map(|question| Breadcrumb {
            question,
            state: self.crumb_state(question),
        })
    }

    fn crumb_state(&self, question: QuestionId) -> CrumbState {
        if self.stage == Stage::Question(question) {
            return CrumbState::Active;
        }
        if self.path.contains(&question) {
            return CrumbState::Answered;
        }
        let branch_taken = match question {
            QuestionId::Q2 => self.path.contains(&QuestionId::Q3),
            QuestionId::Q3 => self.path.contains(&QuestionId::Q2),
            QuestionId::Q1 => false,
        };
        if branch_taken || self.stage.is_terminal() {
            CrumbState::Skipped
        } else {
            CrumbState::Upcoming
        }
    }
}
