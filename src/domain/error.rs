//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent input outside the closed question/answer/outcome sets.
///
/// The engine itself never returns these; they surface when text from a
/// presenter or command line is turned into domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid question: {0} (expected 1, 2 or 3)")]
    InvalidQuestion(String),

    #[error("invalid answer: {0} (expected yes or no)")]
    InvalidAnswer(String),

    #[error("invalid outcome: {0} (expected consultation, evidence-review or applied-research)")]
    InvalidOutcome(String),

    #[error("invalid route step: {0} (expected <question>=<answer>, e.g. q1=yes)")]
    InvalidRouteStep(String),
}
