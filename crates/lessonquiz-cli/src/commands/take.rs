//! The `lessonquiz take` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use lessonquiz_client::{load_config_from, HttpProgressReporter};
use lessonquiz_core::controller::CourseController;
use lessonquiz_core::model::ModuleId;
use lessonquiz_core::session::QuizView;
use lessonquiz_core::traits::{NoopSink, ProgressSink};
use lessonquiz_render::{render_quiz_text, write_html_page};

pub async fn execute(
    course_path: PathBuf,
    module: Option<ModuleId>,
    answers: Option<String>,
    html: Option<PathBuf>,
    offline: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let course = lessonquiz_core::parser::parse_course(&course_path)?;

    let module_id = match module {
        Some(id) => id,
        None => match course.modules.first() {
            Some(first) => first.id,
            None => bail!("course '{}' has no modules", course.title),
        },
    };

    let sink: Arc<dyn ProgressSink> = if offline {
        Arc::new(NoopSink)
    } else {
        Arc::new(HttpProgressReporter::from_config(&config)?)
    };
    tracing::debug!(sink = sink.name(), "progress sink ready");

    let mut controller = CourseController::new(course, sink);
    let selection = controller.select_module(module_id)?;

    println!("== {} ({}% through the course)", selection.title, selection.completion);
    if !selection.content.trim().is_empty() {
        println!("{}", selection.content.trim());
    }
    if let Some(url) = &selection.video_url {
        println!("Video: {url}");
    }
    println!();

    let result = match selection.quiz {
        Some(view) => answer_quiz(
            &mut controller,
            &view,
            answers,
            html,
            &selection.title,
            config.pass_threshold,
        ),
        None => {
            println!("This module has no quiz.");
            Ok(())
        }
    };

    // Reports already spawned are delivered on the error path too.
    controller
        .settle(Duration::from_millis(config.report_settle_ms))
        .await;
    result
}

/// Collect answers, submit, and print the marked quiz.
fn answer_quiz(
    controller: &mut CourseController,
    view: &QuizView,
    answers: Option<String>,
    html: Option<PathBuf>,
    title: &str,
    pass_threshold: u8,
) -> Result<()> {
    let picks = match answers {
        Some(list) => parse_answer_list(&list, view)?,
        None => {
            print!("{}", render_quiz_text(view, pass_threshold));
            prompt_answers(view)?
        }
    };

    for (question, pick) in picks.iter().enumerate() {
        if let Some(option) = pick {
            controller.select_option(question, *option)?;
        }
    }
    controller.submit()?;

    let submitted = controller
        .view()
        .context("quiz disappeared after submission")?;
    print!("{}", render_quiz_text(&submitted, pass_threshold));

    if let Some(path) = html {
        write_html_page(title, &submitted, pass_threshold, &path)?;
        eprintln!("HTML quiz written to: {}", path.display());
    }
    Ok(())
}

/// Parse a comma-separated answer list of 1-based option numbers.
///
/// `-` or an empty entry leaves that question unanswered. Missing trailing
/// entries are unanswered too.
fn parse_answer_list(list: &str, view: &QuizView) -> Result<Vec<Option<usize>>> {
    let entries: Vec<&str> = if list.trim().is_empty() {
        Vec::new()
    } else {
        list.split(',').map(str::trim).collect()
    };

    if entries.len() > view.groups.len() {
        bail!(
            "{} answers given but the quiz has {} question(s)",
            entries.len(),
            view.groups.len()
        );
    }

    let mut picks = vec![None; view.groups.len()];
    for (i, entry) in entries.iter().enumerate() {
        picks[i] = parse_pick(entry, view.groups[i].options.len())
            .with_context(|| format!("invalid answer for question {}", i + 1))?;
    }
    Ok(picks)
}

fn parse_pick(entry: &str, option_count: usize) -> Result<Option<usize>> {
    if entry.is_empty() || entry == "-" {
        return Ok(None);
    }
    let number: usize = entry
        .parse()
        .with_context(|| format!("'{entry}' is not an option number"))?;
    if number == 0 || number > option_count {
        bail!("option {number} is out of range (1-{option_count})");
    }
    Ok(Some(number - 1))
}

/// Ask for each answer on stdin. End of input leaves the rest unanswered.
fn prompt_answers(view: &QuizView) -> Result<Vec<Option<usize>>> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut picks = Vec::with_capacity(view.groups.len());

    for group in &view.groups {
        let count = group.options.len();
        let pick = loop {
            eprint!(
                "Answer for question {} [1-{count}, blank to skip]: ",
                group.question_index + 1
            );
            std::io::stderr().flush()?;

            let Some(line) = lines.next() else {
                break None;
            };
            match parse_pick(line?.trim(), count) {
                Ok(pick) => break pick,
                Err(e) => eprintln!("{e:#}"),
            }
        };
        picks.push(pick);
    }
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonquiz_core::model::{Question, QuizDefinition};
    use lessonquiz_core::session::QuizSession;

    fn view() -> QuizView {
        let mut session = QuizSession::new(QuizDefinition {
            course_id: 1,
            module_id: 1,
            questions: vec![
                Question {
                    text: "a".into(),
                    options: vec!["x".into(), "y".into()],
                    correct_option_index: 0,
                },
                Question {
                    text: "b".into(),
                    options: vec!["x".into(), "y".into(), "z".into()],
                    correct_option_index: 2,
                },
            ],
        });
        session.render()
    }

    #[test]
    fn answer_list_is_one_based() {
        assert_eq!(
            parse_answer_list("2,3", &view()).unwrap(),
            vec![Some(1), Some(2)]
        );
    }

    #[test]
    fn skipped_and_missing_answers() {
        assert_eq!(parse_answer_list("-,1", &view()).unwrap(), vec![None, Some(0)]);
        assert_eq!(parse_answer_list("1", &view()).unwrap(), vec![Some(0), None]);
        assert_eq!(parse_answer_list("", &view()).unwrap(), vec![None, None]);
    }

    #[test]
    fn rejects_bad_answers() {
        assert!(parse_answer_list("3,1", &view()).is_err());
        assert!(parse_answer_list("0", &view()).is_err());
        assert!(parse_answer_list("x", &view()).is_err());
        assert!(parse_answer_list("1,1,1", &view()).is_err());
    }
}
