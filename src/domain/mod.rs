//! Domain layer: the decision tree and its session state machine
//!
//! This layer is independent of external concerns (no I/O, no clock, no config loading).

pub mod engine;
pub mod entities;
pub mod error;
pub mod tree;

pub use engine::{DecisionTreeEngine, IgnoreReason, PendingTransition, Submission};
pub use entities::*;
pub use error::DomainError;
pub use tree::{compute_result_payload, next_stage, parse_route_step, ResultPayload};
