//! The `lessonquiz modules` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lessonquiz_core::parser::{load_module_quiz, parse_course};
use lessonquiz_core::scoring::completion_percent;

pub fn execute(course_path: PathBuf) -> Result<()> {
    let course = parse_course(&course_path)?;

    println!("Course {}: {}", course.id, course.title);
    if !course.description.is_empty() {
        println!("{}", course.description);
    }

    if course.modules.is_empty() {
        println!("No modules.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Title", "Quiz", "Completion"]);

    let count = course.modules.len();
    for (position, module) in course.modules.iter().enumerate() {
        let quiz = match (&module.quiz, load_module_quiz(course.id, module)) {
            (_, Some(quiz)) => format!("{} question(s)", quiz.len()),
            (Some(raw), None) if !raw.trim().is_empty() && raw.trim() != "null" => {
                "unavailable".to_string()
            }
            _ => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(module.id),
            Cell::new(&module.title),
            Cell::new(quiz),
            Cell::new(format!("{}%", completion_percent(position, count))),
        ]);
    }

    println!("\n{table}");
    Ok(())
}
