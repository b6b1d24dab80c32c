//! lessonquiz-render: Quiz markup and terminal output.
//!
//! Both renderers consume a `QuizView` snapshot and never touch session
//! state, so re-rendering is always safe.

pub mod html;
pub mod text;

pub use html::{render_quiz_html, write_html_page};
pub use text::{render_quiz_text, render_result_line};
