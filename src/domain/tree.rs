//! The fixed decision tree: transition table and result payloads

use serde::Serialize;

use crate::domain::{Answer, DomainError, Outcome, QuestionId, Stage};

/// Static content shown for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultPayload {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

/// Where answering `question` with `answer` leads.
pub fn next_stage(question: QuestionId, answer: Answer) -> Stage {
    match (question, answer) {
        (QuestionId::Q1, Answer::Yes) => Stage::Question(QuestionId::Q2),
        (QuestionId::Q1, Answer::No) => Stage::Question(QuestionId::Q3),
        (QuestionId::Q2, Answer::Yes) => Stage::Result(Outcome::AppliedResearch),
        (QuestionId::Q2, Answer::No) => Stage::Result(Outcome::EvidenceReview),
        (QuestionId::Q3, Answer::Yes) => Stage::Result(Outcome::AppliedResearch),
        (QuestionId::Q3, Answer::No) => Stage::Result(Outcome::Consultation),
    }
}

/// Title, description and link for an outcome.
pub fn compute_result_payload(outcome: Outcome) -> ResultPayload {
    match outcome {
        Outcome::Consultation => ResultPayload {
            title: "Consultation",
            description: "A single discussion providing a behavioural science perspective on your challenge.",
            link: "consultation.html",
        },
        Outcome::EvidenceReview => ResultPayload {
            title: "Evidence Review",
            description: "A structured evaluation of existing materials, services, or interventions against current evidence.",
            link: "evidence-review.html",
        },
        Outcome::AppliedResearch => ResultPayload {
            title: "Applied Research",
            description: "A full applied behavioural science project targeting a specific behaviour.",
            link: "applied-research.html",
        },
    }
}

/// Parse a `q1=yes` style route step.
pub fn parse_route_step(s: &str) -> Result<(QuestionId, Answer), DomainError> {
    let (question, answer) = s
        .split_once('=')
        .ok_or_else(|| DomainError::InvalidRouteStep(s.to_string()))?;
    Ok((question.parse()?, answer.parse()?))
}
