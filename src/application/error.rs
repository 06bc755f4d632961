//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, QuestionId, Stage};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{question} is not reachable here: the tree is at {stage}")]
    UnreachableQuestion { question: QuestionId, stage: Stage },

    #[error("route ends at {stage} without reaching a result")]
    IncompleteRoute { stage: Stage },

    #[error("route already reached {stage}, {remaining} answer(s) left over")]
    TrailingAnswers { stage: Stage, remaining: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
