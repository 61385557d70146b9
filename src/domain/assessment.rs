//! Skill assessment quiz engine.
//!
//! The whole quiz lifecycle is an explicit value object with pure
//! transitions, so the sequencing and scoring rules can be tested without a
//! rendering environment or a server. One session is one traversal from
//! intro to results; a finished session is read-only and a fresh run needs a
//! new session.

use crate::domain::models::{AssessmentQuestion, Category, Difficulty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Recorded choice for one question. Created exactly once, in question
/// order, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub selected_answer: usize,
    pub is_correct: bool,
}

/// Answer as submitted by a client, before the engine derives correctness.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_answer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Quiz,
    Results,
}

/// How a single option renders once feedback for the current question is
/// revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    Correct,
    IncorrectChoice,
    Neutral,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("question set is empty")]
    EmptyQuestionSet,
    #[error("action is not valid before the quiz has started")]
    NotStarted,
    #[error("quiz already finished")]
    Finished,
    #[error("option index {0} is out of range")]
    OptionOutOfRange(usize),
    #[error("no option selected")]
    NothingSelected,
    #[error("selection is frozen once the answer is submitted")]
    SelectionFrozen,
    #[error("current question has not been answered yet")]
    Unanswered,
    #[error("answer for question {expected} arrived out of step (got {got})")]
    OutOfStep { expected: String, got: String },
    #[error("session is not scored yet")]
    NotScored,
}

/// Per-category tally produced by scoring. Kept in first-encounter order of
/// the question sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: Category,
    pub correct: u32,
    pub total: u32,
    pub percent: u8,
}

/// Deterministic outcome of scoring a completed session. Carries no ids or
/// timestamps so re-scoring an unchanged session compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub overall_score: u8,
    pub correct_count: u32,
    pub total_questions: u32,
    pub breakdown: Vec<CategoryBreakdown>,
    pub strongest_category: Category,
    pub level: Difficulty,
}

impl AssessmentOutcome {
    /// Per-category percentages as a map, for persistence and display.
    pub fn category_scores(&self) -> BTreeMap<Category, u8> {
        self.breakdown
            .iter()
            .map(|b| (b.category, b.percent))
            .collect()
    }
}

/// Persisted record of a finished assessment. Minted at save time; the
/// deterministic part lives in [`AssessmentOutcome`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub id: Uuid,
    pub answers: Vec<Answer>,
    pub category_scores: BTreeMap<Category, u8>,
    pub overall_score: u8,
    pub strongest_category: Category,
    pub level: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_path: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn from_outcome(outcome: &AssessmentOutcome, answers: Vec<Answer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            answers,
            category_scores: outcome.category_scores(),
            overall_score: outcome.overall_score,
            strongest_category: outcome.strongest_category,
            level: outcome.level,
            recommended_path: None,
            completed_at: Utc::now(),
        }
    }
}

/// One quiz traversal: a fixed ordered question sequence plus the answers
/// appended to it in lockstep.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    questions: Vec<AssessmentQuestion>,
    phase: Phase,
    position: usize,
    answers: Vec<Answer>,
    selected: Option<usize>,
    feedback_visible: bool,
}

impl AssessmentSession {
    pub fn new(questions: Vec<AssessmentQuestion>) -> Self {
        Self {
            questions,
            phase: Phase::Intro,
            position: 0,
            answers: Vec::new(),
            selected: None,
            feedback_visible: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[AssessmentQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Start stays unavailable until a non-empty question set is loaded.
    pub fn can_start(&self) -> bool {
        self.phase == Phase::Intro && !self.questions.is_empty()
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        if self.phase == Phase::Results {
            return Err(SessionError::Finished);
        }
        self.phase = Phase::Quiz;
        self.position = 0;
        self.answers.clear();
        self.selected = None;
        self.feedback_visible = false;
        Ok(())
    }

    pub fn current_question(&self) -> Option<&AssessmentQuestion> {
        if self.phase == Phase::Quiz {
            self.questions.get(self.position)
        } else {
            None
        }
    }

    /// Quiz progress in percent. Defined as 0 for an empty question set so
    /// the intro screen never divides by zero.
    pub fn progress_percent(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        let done = match self.phase {
            Phase::Intro => 0,
            Phase::Quiz => self.position + 1,
            Phase::Results => self.questions.len(),
        };
        (done as f64 / self.questions.len() as f64 * 100.0).round() as u8
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    /// Pick an option for the current question. Refused once the answer has
    /// been submitted.
    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        match self.phase {
            Phase::Intro => return Err(SessionError::NotStarted),
            Phase::Results => return Err(SessionError::Finished),
            Phase::Quiz => {}
        }
        if self.feedback_visible {
            return Err(SessionError::SelectionFrozen);
        }
        let question = &self.questions[self.position];
        if index >= question.options.len() {
            return Err(SessionError::OptionOutOfRange(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Submit the current selection: derive correctness, append the answer
    /// and reveal feedback. The append is checked against the position so
    /// answers can never drift out of index correspondence with the
    /// question sequence.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Intro => return Err(SessionError::NotStarted),
            Phase::Results => return Err(SessionError::Finished),
            Phase::Quiz => {}
        }
        if self.feedback_visible {
            return Err(SessionError::SelectionFrozen);
        }
        let selected = self.selected.ok_or(SessionError::NothingSelected)?;
        let question = &self.questions[self.position];
        if self.answers.len() != self.position {
            return Err(SessionError::OutOfStep {
                expected: question.id.clone(),
                got: self
                    .answers
                    .last()
                    .map(|a| a.question_id.clone())
                    .unwrap_or_default(),
            });
        }
        self.answers.push(Answer {
            question_id: question.id.clone(),
            selected_answer: selected,
            is_correct: selected == question.correct_answer,
        });
        self.feedback_visible = true;
        Ok(())
    }

    /// Feedback classification for one option of the current question.
    /// Everything is neutral until the answer is submitted.
    pub fn option_feedback(&self, index: usize) -> OptionFeedback {
        if !self.feedback_visible || self.phase != Phase::Quiz {
            return OptionFeedback::Neutral;
        }
        let question = &self.questions[self.position];
        if index == question.correct_answer {
            OptionFeedback::Correct
        } else if Some(index) == self.selected {
            OptionFeedback::IncorrectChoice
        } else {
            OptionFeedback::Neutral
        }
    }

    /// Move to the next question, or into results after the last one.
    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        match self.phase {
            Phase::Intro => return Err(SessionError::NotStarted),
            Phase::Results => return Err(SessionError::Finished),
            Phase::Quiz => {}
        }
        if !self.feedback_visible {
            return Err(SessionError::Unanswered);
        }
        if self.position + 1 < self.questions.len() {
            self.position += 1;
            self.selected = None;
            self.feedback_visible = false;
        } else {
            self.phase = Phase::Results;
        }
        Ok(self.phase)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Results
    }

    /// Score the finished session. Pure and repeatable: calling this twice
    /// on the same session yields identical outcomes.
    pub fn score(&self) -> Result<AssessmentOutcome, SessionError> {
        if self.phase != Phase::Results {
            return Err(SessionError::NotScored);
        }
        Ok(score_answers(&self.questions, &self.answers))
    }
}

/// Replay a full set of submitted answers through the state machine. Used
/// by the server boundary to derive a result instead of trusting a
/// client-computed score. Answers must arrive in question order; any
/// mismatch is rejected.
pub fn replay(
    questions: Vec<AssessmentQuestion>,
    submitted: &[SubmittedAnswer],
) -> Result<AssessmentOutcome, SessionError> {
    replay_session(questions, submitted)?.score()
}

/// Like [`replay`], but hands back the completed session so the caller can
/// also reach the derived answers.
pub fn replay_session(
    questions: Vec<AssessmentQuestion>,
    submitted: &[SubmittedAnswer],
) -> Result<AssessmentSession, SessionError> {
    let mut session = AssessmentSession::new(questions);
    session.start()?;
    for answer in submitted {
        let question = session
            .current_question()
            .ok_or(SessionError::Finished)?;
        if question.id != answer.question_id {
            return Err(SessionError::OutOfStep {
                expected: question.id.clone(),
                got: answer.question_id.clone(),
            });
        }
        session.select(answer.selected_answer)?;
        session.submit()?;
        session.advance()?;
    }
    Ok(session)
}

/// Scoring walks questions and answers in index lockstep: the category
/// tally comes from the question, correctness from the answer at the same
/// index. Categories never asked about are absent from the breakdown, which
/// is what keeps the per-category division safe.
fn score_answers(questions: &[AssessmentQuestion], answers: &[Answer]) -> AssessmentOutcome {
    let total = questions.len();
    let correct_count = answers.iter().filter(|a| a.is_correct).count() as u32;
    let overall_score = if total == 0 {
        0
    } else {
        (correct_count as f64 / total as f64 * 100.0).round() as u8
    };

    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();
    for (i, question) in questions.iter().enumerate() {
        let correct = answers.get(i).map(|a| a.is_correct).unwrap_or(false);
        match breakdown
            .iter_mut()
            .find(|b| b.category == question.category)
        {
            Some(entry) => {
                entry.total += 1;
                if correct {
                    entry.correct += 1;
                }
            }
            None => breakdown.push(CategoryBreakdown {
                category: question.category,
                correct: u32::from(correct),
                total: 1,
                percent: 0,
            }),
        }
    }
    for entry in &mut breakdown {
        entry.percent = (entry.correct as f64 / entry.total as f64 * 100.0).round() as u8;
    }

    // First-encountered category wins ties, so strict comparison only.
    let mut strongest = None;
    let mut best = 0u8;
    for entry in &breakdown {
        if strongest.is_none() || entry.percent > best {
            strongest = Some(entry.category);
            best = entry.percent;
        }
    }

    AssessmentOutcome {
        overall_score,
        correct_count,
        total_questions: total as u32,
        breakdown,
        strongest_category: strongest.unwrap_or(Category::Development),
        level: Difficulty::from_score(overall_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, category: Category, correct: usize) -> AssessmentQuestion {
        AssessmentQuestion {
            id: id.to_string(),
            question: format!("question {id}"),
            options: vec![
                "option a".into(),
                "option b".into(),
                "option c".into(),
                "option d".into(),
            ],
            correct_answer: correct,
            category,
            difficulty: Difficulty::Beginner,
        }
    }

    /// Drive a full session where `correct[i]` decides whether question i
    /// gets its correct option or a wrong one.
    fn run(questions: Vec<AssessmentQuestion>, correct: &[bool]) -> AssessmentSession {
        let mut session = AssessmentSession::new(questions);
        session.start().unwrap();
        for &hit in correct {
            let q = session.current_question().unwrap().clone();
            let pick = if hit {
                q.correct_answer
            } else {
                (q.correct_answer + 1) % q.options.len()
            };
            session.select(pick).unwrap();
            session.submit().unwrap();
            session.advance().unwrap();
        }
        session
    }

    #[test]
    fn empty_question_set_keeps_start_disabled() {
        let mut session = AssessmentSession::new(Vec::new());
        assert!(!session.can_start());
        assert_eq!(session.start(), Err(SessionError::EmptyQuestionSet));
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.phase(), Phase::Intro);
    }

    #[test]
    fn selection_is_required_and_freezes_after_submit() {
        let mut session = AssessmentSession::new(vec![
            question("q1", Category::Development, 0),
            question("q2", Category::Development, 1),
        ]);
        session.start().unwrap();

        assert_eq!(session.submit().err(), Some(SessionError::NothingSelected));
        assert_eq!(session.advance(), Err(SessionError::Unanswered));

        session.select(2).unwrap();
        session.select(0).unwrap(); // changing before submit is fine
        session.submit().unwrap();

        assert_eq!(session.select(1), Err(SessionError::SelectionFrozen));
        assert!(session.submit().is_err());
    }

    #[test]
    fn option_feedback_classifies_all_options_after_submit() {
        let mut session = AssessmentSession::new(vec![question("q1", Category::Design, 2)]);
        session.start().unwrap();
        session.select(0).unwrap();

        assert_eq!(session.option_feedback(0), OptionFeedback::Neutral);

        session.submit().unwrap();
        assert_eq!(session.option_feedback(2), OptionFeedback::Correct);
        assert_eq!(session.option_feedback(0), OptionFeedback::IncorrectChoice);
        assert_eq!(session.option_feedback(1), OptionFeedback::Neutral);
        assert_eq!(session.option_feedback(3), OptionFeedback::Neutral);
    }

    #[test]
    fn advance_resets_selection_and_feedback_for_next_question() {
        let mut session = AssessmentSession::new(vec![
            question("q1", Category::Development, 0),
            question("q2", Category::Development, 0),
        ]);
        session.start().unwrap();
        session.select(0).unwrap();
        session.submit().unwrap();
        session.advance().unwrap();

        assert_eq!(session.selected(), None);
        assert!(!session.feedback_visible());
        assert_eq!(session.current_question().unwrap().id, "q2");
    }

    #[test]
    fn session_is_terminal_after_results() {
        let mut session = run(vec![question("q1", Category::Development, 0)], &[true]);
        assert!(session.is_complete());
        assert_eq!(session.select(0), Err(SessionError::Finished));
        assert_eq!(session.advance(), Err(SessionError::Finished));
        assert_eq!(session.start(), Err(SessionError::Finished));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn overall_score_is_rounded_percentage_within_bounds() {
        // 2 of 3 correct: 66.67 rounds to 67.
        let session = run(
            vec![
                question("q1", Category::Development, 0),
                question("q2", Category::Development, 0),
                question("q3", Category::Development, 0),
            ],
            &[true, true, false],
        );
        let outcome = session.score().unwrap();
        assert_eq!(outcome.overall_score, 67);
        assert_eq!(outcome.correct_count, 2);
        assert!(outcome.overall_score <= 100);
    }

    #[test]
    fn category_tallies_partition_the_question_sequence() {
        let session = run(
            vec![
                question("q1", Category::Development, 0),
                question("q2", Category::Design, 0),
                question("q3", Category::Business, 0),
                question("q4", Category::Design, 0),
                question("q5", Category::Development, 0),
            ],
            &[true, false, true, true, false],
        );
        let outcome = session.score().unwrap();

        let correct_sum: u32 = outcome.breakdown.iter().map(|b| b.correct).sum();
        let total_sum: u32 = outcome.breakdown.iter().map(|b| b.total).sum();
        assert_eq!(correct_sum, outcome.correct_count);
        assert_eq!(total_sum, outcome.total_questions);
    }

    #[test]
    fn scoring_is_idempotent() {
        let session = run(
            vec![
                question("q1", Category::Development, 0),
                question("q2", Category::Marketing, 1),
            ],
            &[true, false],
        );
        let first = session.score().unwrap();
        let second = session.score().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_category_quiz_scores_each_category_separately() {
        // dev, dev, design, design answered [t, f, t, t]:
        // overall 75, dev 50, design 100, strongest design, intermediate.
        let session = run(
            vec![
                question("q1", Category::Development, 0),
                question("q2", Category::Development, 0),
                question("q3", Category::Design, 0),
                question("q4", Category::Design, 0),
            ],
            &[true, false, true, true],
        );
        let outcome = session.score().unwrap();
        assert_eq!(outcome.overall_score, 75);
        let scores = outcome.category_scores();
        assert_eq!(scores[&Category::Development], 50);
        assert_eq!(scores[&Category::Design], 100);
        assert_eq!(outcome.strongest_category, Category::Design);
        assert_eq!(outcome.level, Difficulty::Intermediate);
    }

    #[test]
    fn ties_keep_the_first_encountered_category() {
        let session = run(
            vec![
                question("q1", Category::Marketing, 0),
                question("q2", Category::Design, 0),
            ],
            &[true, true],
        );
        let outcome = session.score().unwrap();
        assert_eq!(outcome.strongest_category, Category::Marketing);

        // All-wrong ties resolve the same way.
        let session = run(
            vec![
                question("q1", Category::Business, 0),
                question("q2", Category::Design, 0),
            ],
            &[false, false],
        );
        assert_eq!(
            session.score().unwrap().strongest_category,
            Category::Business
        );
    }

    #[test]
    fn level_boundaries() {
        // 10 questions make each percentage exact.
        let questions: Vec<_> = (0..10)
            .map(|i| question(&format!("q{i}"), Category::Development, 0))
            .collect();

        let cases = [
            (4, Difficulty::Beginner),      // 40
            (5, Difficulty::Intermediate),  // 50
            (7, Difficulty::Intermediate),  // 70
            (8, Difficulty::Advanced),      // 80
        ];
        for (hits, expected) in cases {
            let pattern: Vec<bool> = (0..10).map(|i| i < hits).collect();
            let outcome = run(questions.clone(), &pattern).score().unwrap();
            assert_eq!(outcome.level, expected, "{hits} correct of 10");
        }
    }

    #[test]
    fn score_is_refused_before_results() {
        let mut session = AssessmentSession::new(vec![question("q1", Category::Development, 0)]);
        assert_eq!(session.score().err(), Some(SessionError::NotScored));
        session.start().unwrap();
        assert_eq!(session.score().err(), Some(SessionError::NotScored));
    }

    #[test]
    fn replay_derives_the_same_outcome_as_a_live_session() {
        let questions = vec![
            question("q1", Category::Development, 1),
            question("q2", Category::Design, 2),
        ];
        let submitted = vec![
            SubmittedAnswer {
                question_id: "q1".into(),
                selected_answer: 1,
            },
            SubmittedAnswer {
                question_id: "q2".into(),
                selected_answer: 0,
            },
        ];
        let outcome = replay(questions.clone(), &submitted).unwrap();
        assert_eq!(outcome.overall_score, 50);
        assert_eq!(outcome.level, Difficulty::Intermediate);

        let live = run(questions, &[true, false]).score().unwrap();
        assert_eq!(outcome, live);
    }

    #[test]
    fn replay_rejects_out_of_order_answers() {
        let questions = vec![
            question("q1", Category::Development, 0),
            question("q2", Category::Design, 0),
        ];
        let submitted = vec![SubmittedAnswer {
            question_id: "q2".into(),
            selected_answer: 0,
        }];
        let err = replay(questions, &submitted).unwrap_err();
        assert!(matches!(err, SessionError::OutOfStep { .. }));
    }

    #[test]
    fn replay_rejects_extra_answers() {
        let questions = vec![question("q1", Category::Development, 0)];
        let submitted = vec![
            SubmittedAnswer {
                question_id: "q1".into(),
                selected_answer: 0,
            },
            SubmittedAnswer {
                question_id: "q1".into(),
                selected_answer: 0,
            },
        ];
        assert_eq!(replay(questions, &submitted), Err(SessionError::Finished));
    }

    #[test]
    fn replay_of_partial_answers_stops_short_of_results() {
        let questions = vec![
            question("q1", Category::Development, 0),
            question("q2", Category::Design, 0),
        ];
        let submitted = vec![SubmittedAnswer {
            question_id: "q1".into(),
            selected_answer: 0,
        }];
        assert_eq!(replay(questions, &submitted), Err(SessionError::NotScored));
    }
}
