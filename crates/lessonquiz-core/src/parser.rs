//! Course and quiz parsers.
//!
//! Course outlines are loaded from TOML files. Quiz data stays serialized
//! on each module and is parsed tolerantly when the module is selected:
//! anything that does not parse means "no quiz for this module".

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CourseId, CourseOutline, ModuleEntry, ModuleId, Question, QuizDefinition};

/// Intermediate TOML structure for parsing course files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    modules: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    id: CourseId,
    title: String,
    #[serde(default)]
    description: String,
}

/// One serialized quiz record, as supplied by the course page.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: RawAnswer,
}

/// The correct answer, either as an index or as text.
///
/// Text is matched against the option labels first and then read as a
/// numeric index, so `"1"` and `"Guido van Rossum"` both work. A float
/// counts as an index only when it is a whole number (`1.0`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Index(u64),
    Float(f64),
    Text(String),
}

impl RawAnswer {
    fn resolve(&self, options: &[String]) -> Option<usize> {
        match self {
            RawAnswer::Index(i) => usize::try_from(*i).ok().filter(|i| *i < options.len()),
            RawAnswer::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f < options.len() as f64 => {
                Some(*f as usize)
            }
            RawAnswer::Float(_) => None,
            RawAnswer::Text(text) => options.iter().position(|o| o == text).or_else(|| {
                text.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < options.len())
            }),
        }
    }
}

/// Parse a serialized quiz (a JSON array of records) into questions.
///
/// Every record must have at least two options and an answer that resolves
/// to one of them; a single bad record rejects the whole quiz.
pub fn parse_quiz_records(raw: &str) -> Result<Vec<Question>> {
    let records: Vec<RawQuestion> =
        serde_json::from_str(raw).context("quiz data is not an array of question records")?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            anyhow::ensure!(
                r.options.len() >= 2,
                "question {} has {} option(s), need at least 2",
                i + 1,
                r.options.len()
            );
            let correct_option_index = r.answer.resolve(&r.options).ok_or_else(|| {
                anyhow::anyhow!("question {}: answer {:?} matches no option", i + 1, r.answer)
            })?;
            Ok(Question {
                text: r.question,
                options: r.options,
                correct_option_index,
            })
        })
        .collect()
}

/// Build the quiz for a module, or `None` if the module has no usable quiz.
///
/// Absent data and the literal `null` mean the module simply has no quiz.
/// Malformed data is logged and treated the same way.
pub fn load_module_quiz(course_id: CourseId, module: &ModuleEntry) -> Option<QuizDefinition> {
    let raw = module.quiz.as_deref()?.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }

    match parse_quiz_records(raw) {
        Ok(questions) => Some(QuizDefinition {
            course_id,
            module_id: module.id,
            questions,
        }),
        Err(e) => {
            tracing::warn!(module_id = module.id, "quiz unavailable: {e:#}");
            None
        }
    }
}

/// Parse a course outline TOML file.
pub fn parse_course(path: &Path) -> Result<CourseOutline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_str(&content, path)
}

/// Parse a course outline from a TOML string (useful for testing).
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<CourseOutline> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(CourseOutline {
        id: parsed.course.id,
        title: parsed.course.title,
        description: parsed.course.description,
        modules: parsed.modules,
    })
}

/// A warning from course validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The module ID (if applicable).
    pub module_id: Option<ModuleId>,
    /// Warning message.
    pub message: String,
}

/// Validate a course outline for common issues.
pub fn validate_course(course: &CourseOutline) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if course.modules.is_empty() {
        warnings.push(ValidationWarning {
            module_id: None,
            message: "course has no modules".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for module in &course.modules {
        if !seen_ids.insert(module.id) {
            warnings.push(ValidationWarning {
                module_id: Some(module.id),
                message: format!("duplicate module ID: {}", module.id),
            });
        }
    }

    for module in &course.modules {
        if module.title.trim().is_empty() {
            warnings.push(ValidationWarning {
                module_id: Some(module.id),
                message: "title is empty".into(),
            });
        }
    }

    for module in &course.modules {
        let Some(raw) = module.quiz.as_deref().map(str::trim) else {
            continue;
        };
        if raw.is_empty() || raw == "null" {
            continue;
        }
        match parse_quiz_records(raw) {
            Ok(questions) if questions.is_empty() => warnings.push(ValidationWarning {
                module_id: Some(module.id),
                message: "quiz has no questions and will always score 0%".into(),
            }),
            Ok(_) => {}
            Err(e) => warnings.push(ValidationWarning {
                module_id: Some(module.id),
                message: format!("quiz will be hidden: {e:#}"),
            }),
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[course]
id = 1
title = "Python Basics"
description = "Learn Python from scratch"

[[modules]]
id = 10
title = "Introduction"
content = "What Python is and where it runs."
video_url = "https://example.com/intro"
quiz = '''
[
  {"question": "What is Python?", "options": ["A snake", "A programming language", "A type of coffee", "A video game"], "answer": "1"},
  {"question": "Who created Python?", "options": ["Guido van Rossum", "Bill Gates", "Elon Musk", "Steve Jobs"], "answer": 0}
]
'''

[[modules]]
id = 11
title = "Variables"
content = "Names and values."
"#;

    fn module_with_quiz(quiz: Option<&str>) -> ModuleEntry {
        ModuleEntry {
            id: 7,
            title: "Module".into(),
            content: String::new(),
            video_url: None,
            quiz: quiz.map(str::to_string),
        }
    }

    #[test]
    fn parse_valid_course() {
        let course = parse_course_str(VALID_TOML, &PathBuf::from("course.toml")).unwrap();
        assert_eq!(course.id, 1);
        assert_eq!(course.modules.len(), 2);
        assert!(course.modules[1].quiz.is_none());

        let quiz = load_module_quiz(course.id, &course.modules[0]).unwrap();
        assert_eq!(quiz.module_id, 10);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_option_index, 1);
        assert_eq!(quiz.questions[1].correct_option_index, 0);
    }

    #[test]
    fn answer_as_option_text() {
        let raw = r#"[{"question": "Which is NOT a data science language?", "options": ["Python", "R", "Java", "SQL"], "answer": "Java"}]"#;
        let questions = parse_quiz_records(raw).unwrap();
        assert_eq!(questions[0].correct_option_index, 2);
    }

    #[test]
    fn whole_number_float_answer_is_an_index() {
        let raw = r#"[{"question": "What is Python?", "options": ["A snake", "A programming language"], "answer": 1.0}]"#;
        let questions = parse_quiz_records(raw).unwrap();
        assert_eq!(questions[0].correct_option_index, 1);

        for answer in ["1.5", "-1.0", "2.0"] {
            let raw = format!(r#"[{{"question": "Q", "options": ["a", "b"], "answer": {answer}}}]"#);
            assert!(parse_quiz_records(&raw).is_err(), "expected rejection of {answer}");
        }
    }

    #[test]
    fn option_text_wins_over_numeric_reading() {
        let raw = r#"[{"question": "Pick two", "options": ["1", "2", "3"], "answer": "2"}]"#;
        let questions = parse_quiz_records(raw).unwrap();
        assert_eq!(questions[0].correct_option_index, 1);
    }

    #[test]
    fn absent_and_null_quiz_mean_no_quiz() {
        assert!(load_module_quiz(1, &module_with_quiz(None)).is_none());
        assert!(load_module_quiz(1, &module_with_quiz(Some("null"))).is_none());
        assert!(load_module_quiz(1, &module_with_quiz(Some("   "))).is_none());
    }

    #[test]
    fn malformed_quiz_is_unavailable() {
        for raw in [
            "{not json",
            r#"{"question": "not an array"}"#,
            r#"[{"question": "Q", "options": ["only one"], "answer": 0}]"#,
            r#"[{"question": "Q", "options": ["a", "b"], "answer": 5}]"#,
            r#"[{"question": "Q", "options": ["a", "b"], "answer": -1}]"#,
            r#"[{"question": "Q", "options": ["a", "b"], "answer": "c"}]"#,
            r#"[{"question": "Q", "options": ["a", "b"]}]"#,
        ] {
            assert!(
                load_module_quiz(1, &module_with_quiz(Some(raw))).is_none(),
                "expected no quiz for {raw}"
            );
        }
    }

    #[test]
    fn empty_array_is_an_empty_quiz() {
        let quiz = load_module_quiz(3, &module_with_quiz(Some("[]"))).unwrap();
        assert!(quiz.is_empty());
        assert_eq!(quiz.course_id, 3);
    }

    #[test]
    fn validate_reports_problems() {
        let toml = r#"
[course]
id = 2
title = "Broken"

[[modules]]
id = 1
title = "First"
quiz = "[oops"

[[modules]]
id = 1
title = ""
quiz = "[]"
"#;
        let course = parse_course_str(toml, &PathBuf::from("broken.toml")).unwrap();
        let warnings = validate_course(&course);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("title is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("hidden")));
        assert!(warnings.iter().any(|w| w.message.contains("always score 0%")));
    }

    #[test]
    fn validate_clean_course() {
        let course = parse_course_str(VALID_TOML, &PathBuf::from("course.toml")).unwrap();
        assert!(validate_course(&course).is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_course_str("[course\nid = ", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_course_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.toml");
        std::fs::write(&path, VALID_TOML).unwrap();

        let course = parse_course(&path).unwrap();
        assert_eq!(course.title, "Python Basics");
        assert!(parse_course(&dir.path().join("missing.toml")).is_err());
    }
}
