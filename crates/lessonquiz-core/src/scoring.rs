//! Quiz scoring and position-based completion.

use serde::{Deserialize, Serialize};

use crate::model::QuizDefinition;
use crate::session::AnswerSet;

/// Default passing percentage for the results display.
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

/// The outcome of one quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total: usize,
    /// `round(100 * correct_count / total)`, or 0 for an empty quiz.
    pub percentage: u8,
}

impl ScoreResult {
    /// Score an answer set against its quiz.
    ///
    /// Unanswered questions never match a correct index and count as wrong.
    pub fn compute(quiz: &QuizDefinition, answers: &AnswerSet) -> Self {
        let correct_count = quiz
            .questions
            .iter()
            .zip(answers.iter())
            .filter(|(question, answer)| answer.is_some_and(|a| question.is_correct(a)))
            .count();
        let total = quiz.len();

        Self {
            correct_count,
            total,
            percentage: rounded_percent(correct_count, total),
        }
    }

    /// Whether the score reaches `threshold` percent.
    pub fn passed(&self, threshold: u8) -> bool {
        self.percentage >= threshold
    }
}

/// Completion percentage for the module at `position` (zero-based) in a
/// course of `module_count` modules.
pub fn completion_percent(position: usize, module_count: usize) -> u8 {
    if position >= module_count {
        return rounded_percent(module_count, module_count);
    }
    rounded_percent(position + 1, module_count)
}

/// `round(100 * part / whole)` with halves rounded up, 0 when `whole` is 0.
///
/// Integer arithmetic keeps the rounding exact: 1/3 is 33, 1/8 is 13.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u128;
    let whole = whole as u128;
    ((200 * part + whole) / (2 * whole)) as u8
}
