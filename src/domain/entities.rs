//! Domain entities: questions, answers, outcomes and session stage

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::DomainError;

/// Number of questions in the tree.
pub const QUESTION_COUNT: u8 = 3;

/// One of the three yes/no questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
}

impl QuestionId {
    pub const ALL: [QuestionId; 3] = [QuestionId::Q1, QuestionId::Q2, QuestionId::Q3];

    /// 1-based question number.
    pub fn number(self) -> u8 {
        match self {
            QuestionId::Q1 => 1,
            QuestionId::Q2 => 2,
            QuestionId::Q3 => 3,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl TryFrom<u8> for QuestionId {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(QuestionId::Q1),
            2 => Ok(QuestionId::Q2),
            3 => Ok(QuestionId::Q3),
            other => Err(DomainError::InvalidQuestion(other.to_string())),
        }
    }
}

impl FromStr for QuestionId {
    type Err = DomainError;

    /// Accepts `1`, `q1` and `Q1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidQuestion(s.to_string()))
            .and_then(|n| {
                QuestionId::try_from(n).map_err(|_| DomainError::InvalidQuestion(s.to_string()))
            })
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.number())
    }
}

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl FromStr for Answer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(Answer::Yes),
            "n" | "no" => Ok(Answer::No),
            _ => Err(DomainError::InvalidAnswer(s.to_string())),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => f.write_str("yes"),
            Answer::No => f.write_str("no"),
        }
    }
}

/// Terminal recommendation of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Consultation,
    EvidenceReview,
    AppliedResearch,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [
        Outcome::Consultation,
        Outcome::EvidenceReview,
        Outcome::AppliedResearch,
    ];

    /// Stable identifier, e.g. `evidence-review`.
    pub fn slug(self) -> &'static str {
        match self {
            Outcome::Consultation => "consultation",
            Outcome::EvidenceReview => "evidence-review",
            Outcome::AppliedResearch => "applied-research",
        }
    }
}

impl FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Outcome::ALL
            .into_iter()
            .find(|o| o.slug() == normalized)
            .ok_or_else(|| DomainError::InvalidOutcome(s.to_string()))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Collected answers, one slot per question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerSet {
    slots: [Option<Answer>; 3],
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question: QuestionId) -> Option<Answer> {
        self.slots[question.index()]
    }

    pub fn set(&mut self, question: QuestionId, answer: Answer) {
        self.slots[question.index()] = Some(answer);
    }

    pub fn clear(&mut self, question: QuestionId) {
        self.slots[question.index()] = None;
    }

    pub fn clear_all(&mut self) {
        self.slots = [None; 3];
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Answered questions in question order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Answer)> + '_ {
        QuestionId::ALL
            .into_iter()
            .filter_map(|q| self.get(q).map(|a| (q, a)))
    }
}

/// Where a session currently is: on a question, or at a result.
///
/// Being an enum, a session can never point at a question and hold a result
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Stage {
    Question(QuestionId),
    Result(Outcome),
}

impl Stage {
    pub fn question(self) -> Option<QuestionId> {
        match self {
            Stage::Question(q) => Some(q),
            Stage::Result(_) => None,
        }
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Stage::Question(_) => None,
            Stage::Result(o) => Some(o),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Result(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Question(q) => write!(f, "question {}", q.number()),
            Stage::Result(o) => write!(f, "result {}", o),
        }
    }
}

/// Breadcrumb state of a question relative to the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrumbState {
    /// Currently shown
    Active,
    /// On the route and answered
    Answered,
    /// Not on the route the answers took
    Skipped,
    /// Not reached yet
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub question: QuestionId,
    pub state: CrumbState,
}
