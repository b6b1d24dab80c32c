//! HTML quiz renderer.
//!
//! Produces the quiz block markup (one `.question` per control group, one
//! `.option` per control) and a self-contained page wrapping it.

use anyhow::Result;
use std::path::Path;

use lessonquiz_core::model::OptionMark;
use lessonquiz_core::scoring::ScoreResult;
use lessonquiz_core::session::{OptionControl, QuizView};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn option_classes(option: &OptionControl) -> String {
    let mut classes = vec!["option"];
    if option.selected {
        classes.push("selected");
    }
    match option.mark {
        Some(OptionMark::Correct) => classes.push("correct"),
        Some(OptionMark::Incorrect) => classes.push("incorrect"),
        None => {}
    }
    if !option.enabled {
        classes.push("disabled");
    }
    classes.join(" ")
}

/// The results line shown under the submit button.
pub fn render_result_html(score: &ScoreResult, pass_threshold: u8) -> String {
    let class = if score.passed(pass_threshold) {
        "alert-success"
    } else {
        "alert-warning"
    };
    format!(
        "<div class=\"alert {class}\">You scored {} out of {} ({}%)</div>",
        score.correct_count, score.total, score.percentage
    )
}

/// Render the quiz block for a view.
pub fn render_quiz_html(view: &QuizView, pass_threshold: u8) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div id=\"quiz-container\" data-course-id=\"{}\" data-module-id=\"{}\">\n",
        view.course_id, view.module_id
    ));
    html.push_str("<h4 class=\"mb-4\">Module Quiz</h4>\n");

    for group in &view.groups {
        html.push_str(&format!(
            "<div class=\"question\" data-question-id=\"{}\">\n",
            group.question_index
        ));
        html.push_str(&format!(
            "<h5 class=\"mb-3\">{}. {}</h5>\n",
            group.question_index + 1,
            html_escape(&group.text)
        ));
        html.push_str("<div class=\"options\">\n");
        for option in &group.options {
            let disabled = if option.enabled {
                ""
            } else {
                " aria-disabled=\"true\""
            };
            html.push_str(&format!(
                "<div class=\"{}\" data-option-id=\"{}\"{}>{}</div>\n",
                option_classes(option),
                option.index,
                disabled,
                html_escape(&option.label)
            ));
        }
        html.push_str("</div>\n</div>\n");
    }

    html.push_str("<div class=\"mt-4\">\n");
    let submit_disabled = if view.is_submitted() { " disabled" } else { "" };
    html.push_str(&format!(
        "<button id=\"submit-quiz\" class=\"btn btn-primary\"{submit_disabled}>Submit Answers</button>\n"
    ));
    html.push_str("<div id=\"quiz-results\" class=\"mt-3\">");
    if let Some(score) = &view.result {
        html.push_str(&render_result_html(score, pass_threshold));
    }
    html.push_str("</div>\n</div>\n</div>\n");
    html
}

/// Generate a self-contained HTML page for a module's quiz.
pub fn generate_html_page(title: &str, view: &QuizView, pass_threshold: u8) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<h1 id=\"module-title\">{}</h1>\n", html_escape(title)));
    html.push_str(&render_quiz_html(view, pass_threshold));

    // Snapshot of the view for scripts and debugging.
    html.push_str("<script type=\"application/json\" id=\"quiz-state\">");
    html.push_str(
        &serde_json::to_string(view)
            .unwrap_or_default()
            .replace('<', "\\u003c"),
    );
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write a quiz page to a file.
pub fn write_html_page(title: &str, view: &QuizView, pass_threshold: u8, path: &Path) -> Result<()> {
    let html = generate_html_page(title, view, pass_threshold);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 760px; margin: 2rem auto; color: #212529; }
.question { margin-bottom: 1.5rem; }
.option { padding: 0.6rem 1rem; margin: 0.3rem 0; border: 1px solid #dee2e6; border-radius: 6px; cursor: pointer; }
.option.selected { border-color: #0d6efd; background: #e7f1ff; }
.option.correct { border-color: #198754; background: #d1e7dd; }
.option.incorrect { border-color: #dc3545; background: #f8d7da; }
.option.disabled { pointer-events: none; }
.alert { padding: 0.75rem 1rem; border-radius: 6px; }
.alert-success { background: #d1e7dd; color: #0f5132; }
.alert-warning { background: #fff3cd; color: #664d03; }
"#;
