//! Plain-text quiz renderer for the terminal.

use std::fmt::Write;

use lessonquiz_core::model::OptionMark;
use lessonquiz_core::scoring::ScoreResult;
use lessonquiz_core::session::QuizView;

/// One-line score summary.
pub fn render_result_line(score: &ScoreResult, pass_threshold: u8) -> String {
    let verdict = if score.passed(pass_threshold) {
        "passed"
    } else {
        "keep practicing"
    };
    format!(
        "You scored {} out of {} ({}%) - {verdict}",
        score.correct_count, score.total, score.percentage
    )
}

/// Render a quiz view as numbered questions with 1-based option numbers.
pub fn render_quiz_text(view: &QuizView, pass_threshold: u8) -> String {
    let mut out = String::new();

    for group in &view.groups {
        let _ = writeln!(out, "{}. {}", group.question_index + 1, group.text);
        for option in &group.options {
            let marker = if option.selected { "[x]" } else { "[ ]" };
            let suffix = match option.mark {
                Some(OptionMark::Correct) => "  <- correct",
                Some(OptionMark::Incorrect) => "  <- your answer",
                None => "",
            };
            let _ = writeln!(
                out,
                "   {marker} {}) {}{suffix}",
                option.index + 1,
                option.label
            );
        }
        out.push('\n');
    }

    if let Some(score) = &view.result {
        out.push_str(&render_result_line(score, pass_threshold));
        out.push('\n');
    }
    out
}
