//! The `lessonquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(course_path: PathBuf) -> Result<()> {
    let course = lessonquiz_core::parser::parse_course(&course_path)?;
    println!("Course: {} ({} modules)", course.title, course.modules.len());

    let warnings = lessonquiz_core::parser::validate_course(&course);
    for w in &warnings {
        let prefix = w
            .module_id
            .map(|id| format!("  [module {id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Course file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
