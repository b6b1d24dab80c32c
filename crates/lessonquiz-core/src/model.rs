//! Core data model types for lessonquiz.
//!
//! Courses are made of modules; a module optionally carries one quiz. The
//! quiz travels in serialized form until the module is selected, at which
//! point it is parsed into a [`QuizDefinition`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a course.
pub type CourseId = u64;

/// Identifier of a module within a course.
pub type ModuleId = u64;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text shown above the options.
    pub text: String,
    /// Options in display order. Always at least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option_index: usize,
}

impl Question {
    /// Returns `true` if `option` is the correct answer.
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option_index
    }
}

/// An ordered set of questions attached to one module of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub course_id: CourseId,
    pub module_id: ModuleId,
    /// Questions in display and scoring order.
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// One unit of course content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video_url: Option<String>,
    /// Serialized quiz records (a JSON array), parsed on selection.
    #[serde(default)]
    pub quiz: Option<String>,
}

/// A course and its modules in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOutline {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl CourseOutline {
    /// Position of a module in the outline.
    pub fn position_of(&self, module_id: ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| m.id == module_id)
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&ModuleEntry> {
        self.modules.iter().find(|m| m.id == module_id)
    }
}

/// Correctness mark revealed on an option after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    Correct,
    Incorrect,
}

impl fmt::Display for OptionMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionMark::Correct => write!(f, "correct"),
            OptionMark::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// The body sent to the progress endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub course_id: CourseId,
    pub module_id: ModuleId,
    /// Position-based completion, 0 to 100.
    pub completion: u8,
    /// Quiz percentage, or `null` when the report is not a quiz result.
    pub quiz_score: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> CourseOutline {
        CourseOutline {
            id: 1,
            title: "Python Basics".into(),
            description: String::new(),
            modules: vec![
                ModuleEntry {
                    id: 10,
                    title: "Introduction".into(),
                    content: String::new(),
                    video_url: None,
                    quiz: None,
                },
                ModuleEntry {
                    id: 11,
                    title: "Variables".into(),
                    content: String::new(),
                    video_url: None,
                    quiz: None,
                },
            ],
        }
    }

    #[test]
    fn module_lookup_by_id() {
        let course = outline();
        assert_eq!(course.position_of(11), Some(1));
        assert_eq!(course.position_of(99), None);
        assert_eq!(course.module(10).map(|m| m.title.as_str()), Some("Introduction"));
    }

    #[test]
    fn progress_update_serializes_null_score() {
        let update = ProgressUpdate {
            course_id: 1,
            module_id: 10,
            completion: 50,
            quiz_score: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"course_id": 1, "module_id": 10, "completion": 50, "quiz_score": null})
        );
    }

    #[test]
    fn option_mark_display() {
        assert_eq!(OptionMark::Correct.to_string(), "correct");
        assert_eq!(OptionMark::Incorrect.to_string(), "incorrect");
    }
}
