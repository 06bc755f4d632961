//! Tests for DecisionTreeEngine: transition table, invariants, navigation

use rstest::rstest;

use decitree::domain::{
    compute_result_payload, Answer, DecisionTreeEngine, Outcome, QuestionId, Stage,
};

fn answer(engine: &mut DecisionTreeEngine, question: QuestionId, value: Answer) -> Stage {
    assert!(
        engine.submit_answer(question, value).is_scheduled(),
        "{question}={value} should be accepted"
    );
    engine.commit().expect("transition was pending")
}

/// Exactly one of {active question, result} is set.
fn assert_exclusive(engine: &DecisionTreeEngine) {
    assert_ne!(
        engine.active_question().is_some(),
        engine.terminal().is_some(),
        "stage must be either a question or a result: {:?}",
        engine.stage()
    );
}

#[rstest]
#[case(QuestionId::Q1, Answer::Yes, Stage::Question(QuestionId::Q2))]
#[case(QuestionId::Q1, Answer::No, Stage::Question(QuestionId::Q3))]
#[case(QuestionId::Q2, Answer::Yes, Stage::Result(Outcome::AppliedResearch))]
#[case(QuestionId::Q2, Answer::No, Stage::Result(Outcome::EvidenceReview))]
#[case(QuestionId::Q3, Answer::Yes, Stage::Result(Outcome::AppliedResearch))]
#[case(QuestionId::Q3, Answer::No, Stage::Result(Outcome::Consultation))]
fn given_active_question_when_answered_then_follows_transition_table(
    #[case] question: QuestionId,
    #[case] value: Answer,
    #[case] expected: Stage,
) {
    let mut engine = DecisionTreeEngine::new();
    // Reach the question under test
    match question {
        QuestionId::Q1 => {}
        QuestionId::Q2 => {
            answer(&mut engine, QuestionId::Q1, Answer::Yes);
        }
        QuestionId::Q3 => {
            answer(&mut engine, QuestionId::Q1, Answer::No);
        }
    }

    let stage = answer(&mut engine, question, value);

    assert_eq!(stage, expected);
    assert_eq!(engine.answers().get(question), Some(value));
    assert_exclusive(&engine);
}

#[test]
fn given_every_answer_sequence_when_resolved_then_stage_is_exclusive() {
    for first in [Answer::Yes, Answer::No] {
        for second in [Answer::Yes, Answer::No] {
            let mut engine = DecisionTreeEngine::new();
            assert_exclusive(&engine);

            let stage = answer(&mut engine, QuestionId::Q1, first);
            assert_exclusive(&engine);

            let next = stage.question().expect("q1 leads to a question");
            answer(&mut engine, next, second);
            assert_exclusive(&engine);
            assert!(engine.terminal().is_some());
            assert!(engine.active_result().is_some());
        }
    }
}

#[test]
fn given_q1_yes_when_committed_then_question_2() {
    let mut engine = DecisionTreeEngine::new();
    let stage = answer(&mut engine, QuestionId::Q1, Answer::Yes);
    assert_eq!(stage, Stage::Question(QuestionId::Q2));
    assert_eq!(engine.active_question(), Some(QuestionId::Q2));
}

#[test]
fn given_q1_yes_q2_yes_when_committed_then_applied_research() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    answer(&mut engine, QuestionId::Q2, Answer::Yes);

    assert_eq!(engine.terminal(), Some(Outcome::AppliedResearch));
    let payload = engine.active_result().unwrap();
    assert_eq!(payload.title, "Applied Research");
    assert_eq!(payload.link, "applied-research.html");
    assert_eq!(engine.active_question(), None);
}

#[test]
fn given_q1_yes_q2_no_when_committed_then_evidence_review() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    answer(&mut engine, QuestionId::Q2, Answer::No);

    assert_eq!(engine.terminal(), Some(Outcome::EvidenceReview));
    assert_eq!(engine.active_result().unwrap().link, "evidence-review.html");
}

#[test]
fn given_q1_no_when_committed_then_q3_decides() {
    let mut engine = DecisionTreeEngine::new();
    assert_eq!(
        answer(&mut engine, QuestionId::Q1, Answer::No),
        Stage::Question(QuestionId::Q3)
    );

    let mut yes_branch = engine.clone();
    answer(&mut yes_branch, QuestionId::Q3, Answer::Yes);
    assert_eq!(yes_branch.terminal(), Some(Outcome::AppliedResearch));

    answer(&mut engine, QuestionId::Q3, Answer::No);
    assert_eq!(engine.terminal(), Some(Outcome::Consultation));
    let payload = engine.active_result().unwrap();
    assert_eq!(payload.title, "Consultation");
    assert_eq!(payload.link, "consultation.html");
}

#[test]
fn given_q2_when_going_back_one_then_q1_keeps_its_answer() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    assert_eq!(engine.active_question(), Some(QuestionId::Q2));

    assert!(engine.go_back(1));

    assert_eq!(engine.active_question(), Some(QuestionId::Q1));
    assert_eq!(engine.answers().get(QuestionId::Q2), None);
    assert_eq!(engine.answers().get(QuestionId::Q1), Some(Answer::Yes));
    assert_exclusive(&engine);
}

#[test]
fn given_q2_answered_pending_when_going_back_then_q2_answer_cleared() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    engine.submit_answer(QuestionId::Q2, Answer::Yes);
    assert_eq!(engine.answers().get(QuestionId::Q2), Some(Answer::Yes));

    assert!(engine.go_back(1));

    assert_eq!(engine.answers().get(QuestionId::Q2), None);
    assert_eq!(engine.active_question(), Some(QuestionId::Q1));
}

#[test]
fn given_q3_when_going_back_one_then_on_q1_with_q3_cleared() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::No);
    engine.submit_answer(QuestionId::Q3, Answer::Yes);

    assert!(engine.go_back(1));

    assert_eq!(engine.active_question(), Some(QuestionId::Q1));
    assert_eq!(engine.answers().get(QuestionId::Q3), None);
    assert_eq!(engine.answers().get(QuestionId::Q1), Some(Answer::No));
    assert_eq!(engine.path(), &[QuestionId::Q1]);
}

#[test]
fn given_q3_when_going_back_two_then_on_q1_with_q3_cleared() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::No);
    engine.submit_answer(QuestionId::Q3, Answer::Yes);

    assert!(engine.go_back(2));

    assert_eq!(engine.active_question(), Some(QuestionId::Q1));
    assert_eq!(engine.answers().get(QuestionId::Q3), None);
    assert_eq!(engine.answers().get(QuestionId::Q1), Some(Answer::No));
    assert_eq!(engine.commit(), None);
    assert_exclusive(&engine);
}

#[rstest]
#[case(Answer::Yes, 2)]
#[case(Answer::No, 3)]
#[case(Answer::Yes, 0)]
fn given_target_before_q1_or_zero_steps_when_going_back_then_noop(
    #[case] first: Answer,
    #[case] steps: usize,
) {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, first);
    let before = engine.clone();

    assert!(!engine.go_back(steps));

    assert_eq!(engine, before);
}

#[test]
fn given_back_then_new_answer_when_committed_then_other_branch_taken() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    engine.go_back(1);

    let stage = answer(&mut engine, QuestionId::Q1, Answer::No);

    assert_eq!(stage, Stage::Question(QuestionId::Q3));
    assert_eq!(engine.answers().get(QuestionId::Q1), Some(Answer::No));
    assert_eq!(engine.path(), &[QuestionId::Q1, QuestionId::Q3]);
}

#[test]
fn given_result_when_going_back_then_noop() {
    let mut engine = DecisionTreeEngine::new();
    answer(&mut engine, QuestionId::Q1, Answer::Yes);
    answer(&mut engine, QuestionId::Q2, Answer::Yes);
    let before = engine.clone();

    assert!(!engine.go_back(1));

    assert_eq!(engine, before);
}

#[test]
fn given_any_state_when_reset_then_fresh_session() {
    let mut at_result = DecisionTreeEngine::new();
    answer(&mut at_result, QuestionId::Q1, Answer::No);
    answer(&mut at_result, QuestionId::Q3, Answer::No);

    let mut pending = DecisionTreeEngine::new();
    pending.submit_answer(QuestionId::Q1, Answer::Yes);

    let mut mid = DecisionTreeEngine::new();
    answer(&mut mid, QuestionId::Q1, Answer::Yes);

    for mut engine in [at_result, pending, mid, DecisionTreeEngine::new()] {
        engine.reset();
        assert_eq!(engine, DecisionTreeEngine::new());
        assert_eq!(engine.active_question(), Some(QuestionId::Q1));
        assert!(engine.answers().is_empty());
        assert_eq!(engine.terminal(), None);
        assert_eq!(engine.commit(), None, "reset must drop pending transitions");
    }
}

#[test]
fn given_outcome_when_payload_computed_then_matches_fixed_table() {
    let expected = [
        (
            Outcome::Consultation,
            "Consultation",
            "A single discussion providing a behavioural science perspective on your challenge.",
            "consultation.html",
        ),
        (
            Outcome::EvidenceReview,
            "Evidence Review",
            "A structured evaluation of existing materials, services, or interventions against current evidence.",
            "evidence-review.html",
        ),
        (
            Outcome::AppliedResearch,
            "Applied Research",
            "A full applied behavioural science project targeting a specific behaviour.",
            "applied-research.html",
        ),
    ];
    for (outcome, title, description, link) in expected {
        let payload = compute_result_payload(outcome);
        assert_eq!(payload.title, title);
        assert_eq!(payload.description, description);
        assert_eq!(payload.link, link);
        assert_eq!(payload, compute_result_payload(outcome));
    }
}

#[test]
fn given_questions_when_progressing_then_fraction_is_current_over_three() {
    let mut engine = DecisionTreeEngine::new();
    assert!((engine.progress_fraction() - 1.0 / 3.0).abs() < 1e-9);

    answer(&mut engine, QuestionId::Q1, Answer::No);
    assert!((engine.progress_fraction() - 1.0).abs() < 1e-9);
    assert_eq!(engine.step(), Some(3));
}
