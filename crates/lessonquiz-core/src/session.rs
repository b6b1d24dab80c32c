//! The per-quiz state machine.
//!
//! A [`QuizSession`] moves `Unrendered → Rendered → Submitted` and never
//! leaves `Submitted`. Selections are only accepted while rendered; the
//! answer set is frozen into the submitted state together with its score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{CourseId, ModuleId, OptionMark, QuizDefinition};
use crate::scoring::ScoreResult;

/// Errors from driving a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Selections arrived before the quiz was rendered.
    #[error("quiz has not been rendered")]
    NotRendered,

    #[error("question {question} out of range (quiz has {count} questions)")]
    QuestionOutOfRange { question: usize, count: usize },

    #[error("option {option} out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        count: usize,
    },
}

/// Per-question selections. Its length is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    slots: Vec<Option<usize>>,
}

impl AnswerSet {
    /// An answer set with every question unanswered.
    pub fn new(question_count: usize) -> Self {
        Self {
            slots: vec![None; question_count],
        }
    }

    /// Select `option` for `question`, replacing any previous selection.
    ///
    /// Returns `false` (and changes nothing) if `question` is out of range.
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        match self.slots.get_mut(question) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.slots.get(question).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Where a quiz instance is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    Unrendered,
    Rendered {
        answers: AnswerSet,
    },
    Submitted {
        answers: AnswerSet,
        score: ScoreResult,
        submitted_at: DateTime<Utc>,
    },
}

/// What happened to a selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// The quiz is submitted; its controls no longer react.
    Ignored,
}

/// Result of a successful submit transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub score: ScoreResult,
    pub submitted_at: DateTime<Utc>,
}

/// A single selectable option as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionControl {
    pub index: usize,
    pub label: String,
    pub selected: bool,
    /// Revealed after submission.
    pub mark: Option<OptionMark>,
    pub enabled: bool,
}

/// The options of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlGroup {
    pub question_index: usize,
    pub text: String,
    pub options: Vec<OptionControl>,
}

impl ControlGroup {
    /// Index of the selected option, if any.
    pub fn selected(&self) -> Option<usize> {
        self.options.iter().find(|o| o.selected).map(|o| o.index)
    }
}

/// A snapshot of the rendered quiz, one control group per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub course_id: CourseId,
    pub module_id: ModuleId,
    pub groups: Vec<ControlGroup>,
    /// Present once the quiz is submitted.
    pub result: Option<ScoreResult>,
}

impl QuizView {
    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }
}

/// One quiz instance for one selected module.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    quiz: QuizDefinition,
    state: QuizState,
}

impl QuizSession {
    pub fn new(quiz: QuizDefinition) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz,
            state: QuizState::Unrendered,
        }
    }

    /// Instance identifier, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Current answers, or `None` before rendering.
    pub fn answers(&self) -> Option<&AnswerSet> {
        match &self.state {
            QuizState::Unrendered => None,
            QuizState::Rendered { answers } | QuizState::Submitted { answers, .. } => Some(answers),
        }
    }

    /// Render the quiz. The first call creates an empty answer set; later
    /// calls only re-read the current state.
    pub fn render(&mut self) -> QuizView {
        if matches!(self.state, QuizState::Unrendered) {
            self.state = QuizState::Rendered {
                answers: AnswerSet::new(self.quiz.len()),
            };
            tracing::debug!(session = %self.id, questions = self.quiz.len(), "quiz rendered");
        }
        self.view()
    }

    /// Select `option` on `question`.
    pub fn select(&mut self, question: usize, option: usize) -> Result<SelectOutcome, SessionError> {
        let answers = match &mut self.state {
            QuizState::Unrendered => return Err(SessionError::NotRendered),
            QuizState::Submitted { .. } => return Ok(SelectOutcome::Ignored),
            QuizState::Rendered { answers } => answers,
        };

        let q = self
            .quiz
            .questions
            .get(question)
            .ok_or(SessionError::QuestionOutOfRange {
                question,
                count: self.quiz.questions.len(),
            })?;
        if option >= q.options.len() {
            return Err(SessionError::OptionOutOfRange {
                question,
                option,
                count: q.options.len(),
            });
        }

        answers.select(question, option);
        Ok(SelectOutcome::Selected)
    }

    /// Submit the quiz. Returns `Ok(None)` if it was already submitted.
    pub fn submit(&mut self) -> Result<Option<Submission>, SessionError> {
        let answers = match &self.state {
            QuizState::Unrendered => return Err(SessionError::NotRendered),
            QuizState::Submitted { .. } => return Ok(None),
            QuizState::Rendered { answers } => answers.clone(),
        };

        let score = ScoreResult::compute(&self.quiz, &answers);
        let submitted_at = Utc::now();
        tracing::info!(
            session = %self.id,
            module_id = self.quiz.module_id,
            correct = score.correct_count,
            total = score.total,
            percentage = score.percentage,
            "quiz submitted"
        );

        self.state = QuizState::Submitted {
            answers,
            score,
            submitted_at,
        };
        Ok(Some(Submission { score, submitted_at }))
    }

    /// Build the view for the current state.
    pub fn view(&self) -> QuizView {
        let (answers, result) = match &self.state {
            QuizState::Unrendered => (None, None),
            QuizState::Rendered { answers } => (Some(answers), None),
            QuizState::Submitted { answers, score, .. } => (Some(answers), Some(*score)),
        };
        let submitted = result.is_some();

        let groups = self
            .quiz
            .questions
            .iter()
            .enumerate()
            .map(|(qi, question)| {
                let chosen = answers.and_then(|a| a.get(qi));
                let options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(oi, label)| {
                        let selected = chosen == Some(oi);
                        let mark = if !submitted {
                            None
                        } else if question.is_correct(oi) {
                            Some(OptionMark::Correct)
                        } else if selected {
                            Some(OptionMark::Incorrect)
                        } else {
                            None
                        };
                        OptionControl {
                            index: oi,
                            label: label.clone(),
                            selected,
                            mark,
                            enabled: !submitted,
                        }
                    })
                    .collect();
                ControlGroup {
                    question_index: qi,
                    text: question.text.clone(),
                    options,
                }
            })
            .collect();

        QuizView {
            course_id: self.quiz.course_id,
            module_id: self.quiz.module_id,
            groups,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn three_question_quiz() -> QuizDefinition {
        QuizDefinition {
            course_id: 1,
            module_id: 10,
            questions: (0..3)
                .map(|i| Question {
                    text: format!("Question {}", i + 1),
                    options: vec!["A".into(), "B".into(), "C".into()],
                    correct_option_index: i,
                })
                .collect(),
        }
    }

    fn rendered() -> QuizSession {
        let mut session = QuizSession::new(three_question_quiz());
        session.render();
        session
    }

    #[test]
    fn render_starts_with_nothing_selected() {
        let mut session = QuizSession::new(three_question_quiz());
        assert!(session.answers().is_none());

        let view = session.render();
        assert_eq!(view.groups.len(), 3);
        for group in &view.groups {
            assert_eq!(group.options.len(), 3);
            assert!(group.selected().is_none());
            assert!(group.options.iter().all(|o| o.enabled && o.mark.is_none()));
        }
        assert_eq!(session.answers().unwrap().len(), 3);
        assert_eq!(session.answers().unwrap().answered_count(), 0);
    }

    #[test]
    fn rerender_keeps_selections() {
        let mut session = rendered();
        session.select(0, 2).unwrap();
        let view = session.render();
        assert_eq!(view.groups[0].selected(), Some(2));
    }

    #[test]
    fn selection_before_render_is_rejected() {
        let mut session = QuizSession::new(three_question_quiz());
        assert_eq!(session.select(0, 0), Err(SessionError::NotRendered));
        assert_eq!(session.submit(), Err(SessionError::NotRendered));
    }

    #[test]
    fn changing_selection_leaves_exactly_one() {
        let mut session = rendered();
        session.select(1, 0).unwrap();
        session.select(1, 2).unwrap();

        let view = session.view();
        let selected: Vec<_> = view.groups[1]
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.index)
            .collect();
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn questions_are_independent() {
        let mut session = rendered();
        session.select(0, 1).unwrap();
        session.select(2, 0).unwrap();
        let answers = session.answers().unwrap();
        assert_eq!(answers.get(0), Some(1));
        assert_eq!(answers.get(1), None);
        assert_eq!(answers.get(2), Some(0));
    }

    #[test]
    fn out_of_range_selection_changes_nothing() {
        let mut session = rendered();
        assert_eq!(
            session.select(3, 0),
            Err(SessionError::QuestionOutOfRange {
                question: 3,
                count: 3
            })
        );
        assert_eq!(
            session.select(0, 3),
            Err(SessionError::OptionOutOfRange {
                question: 0,
                option: 3,
                count: 3
            })
        );
        assert_eq!(session.answers().unwrap().answered_count(), 0);
    }

    #[test]
    fn submit_all_correct() {
        let mut session = rendered();
        for q in 0..3 {
            session.select(q, q).unwrap();
        }
        let submission = session.submit().unwrap().unwrap();
        assert_eq!(
            submission.score,
            ScoreResult {
                correct_count: 3,
                total: 3,
                percentage: 100
            }
        );
    }

    #[test]
    fn submit_marks_correct_and_wrong_choices() {
        let mut session = rendered();
        // Question 1 unanswered, question 2 wrong, question 3 correct.
        session.select(1, 0).unwrap();
        session.select(2, 2).unwrap();
        let submission = session.submit().unwrap().unwrap();
        assert_eq!(submission.score.correct_count, 1);
        assert_eq!(submission.score.percentage, 33);

        let view = session.view();
        assert_eq!(view.result, Some(submission.score));

        let marks = |g: usize| -> Vec<Option<OptionMark>> {
            view.groups[g].options.iter().map(|o| o.mark).collect()
        };
        assert_eq!(marks(0), vec![Some(OptionMark::Correct), None, None]);
        assert_eq!(
            marks(1),
            vec![Some(OptionMark::Incorrect), Some(OptionMark::Correct), None]
        );
        assert_eq!(marks(2), vec![None, None, Some(OptionMark::Correct)]);
        assert!(view
            .groups
            .iter()
            .flat_map(|g| &g.options)
            .all(|o| !o.enabled));
    }

    #[test]
    fn submitted_quiz_is_read_only() {
        let mut session = rendered();
        session.select(0, 0).unwrap();
        let first = session.submit().unwrap().unwrap();

        assert_eq!(session.select(0, 1), Ok(SelectOutcome::Ignored));
        assert_eq!(session.select(1, 1), Ok(SelectOutcome::Ignored));
        assert_eq!(session.answers().unwrap().get(0), Some(0));
        assert_eq!(session.answers().unwrap().get(1), None);

        assert_eq!(session.submit(), Ok(None));
        match session.state() {
            QuizState::Submitted {
                score,
                submitted_at,
                ..
            } => {
                assert_eq!(*score, first.score);
                assert_eq!(*submitted_at, first.submitted_at);
            }
            other => panic!("expected submitted state, got {other:?}"),
        }
    }

    #[test]
    fn empty_quiz_submits_to_zero() {
        let mut session = QuizSession::new(QuizDefinition {
            course_id: 1,
            module_id: 2,
            questions: vec![],
        });
        let view = session.render();
        assert!(view.groups.is_empty());
        let submission = session.submit().unwrap().unwrap();
        assert_eq!(submission.score.percentage, 0);
        assert_eq!(submission.score.total, 0);
    }

    #[test]
    fn answer_set_ignores_out_of_range_question() {
        let mut answers = AnswerSet::new(2);
        assert!(!answers.select(5, 0));
        assert!(answers.select(1, 3));
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.answered_count(), 1);
    }
}
