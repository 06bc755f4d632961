//! Non-interactive routing: answers in, recommendation out

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Answer, DecisionTreeEngine, Outcome, QuestionId, Stage, Submission};

/// Evaluates a complete answer path against the tree.
#[derive(Debug, Default)]
pub struct RouteService;

impl RouteService {
    pub fn new() -> Self {
        Self
    }

    /// Walk the tree with `steps` and return the outcome reached.
    ///
    /// Unlike the interactive engine, which ignores out-of-turn input, a
    /// route that answers an inactive question, stops early, or continues
    /// past a result is an error.
    #[instrument(skip(self))]
    pub fn route(&self, steps: &[(QuestionId, Answer)]) -> ApplicationResult<Outcome> {
        let mut engine = DecisionTreeEngine::new();

        for (i, &(question, answer)) in steps.iter().enumerate() {
            let stage = engine.stage();
            if let Stage::Result(_) = stage {
                return Err(ApplicationError::TrailingAnswers {
                    stage,
                    remaining: steps.len() - i,
                });
            }
            match engine.submit_answer(question, answer) {
                Submission::Scheduled(_) => {
                    engine.commit();
                }
                Submission::Ignored(reason) => {
                    debug!("route: {}={} rejected ({:?})", question, answer, reason);
                    return Err(ApplicationError::UnreachableQuestion { question, stage });
                }
            }
        }

        engine.terminal().ok_or(ApplicationError::IncompleteRoute {
            stage: engine.stage(),
        })
    }
}
