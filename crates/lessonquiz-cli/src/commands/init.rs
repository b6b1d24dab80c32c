//! The `lessonquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("lessonquiz.toml").exists() {
        println!("lessonquiz.toml already exists, skipping.");
    } else {
        std::fs::write("lessonquiz.toml", SAMPLE_CONFIG)?;
        println!("Created lessonquiz.toml");
    }

    std::fs::create_dir_all("courses")?;
    let example_path = Path::new("courses/example.toml");
    if example_path.exists() {
        println!("courses/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_COURSE)?;
        println!("Created courses/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in lessonquiz.toml at your course server");
    println!("  2. Run: lessonquiz validate --course courses/example.toml");
    println!("  3. Run: lessonquiz take --course courses/example.toml --offline");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lessonquiz configuration

base_url = "http://localhost:5000"
progress_path = "/api/update-progress"
chat_path = "/api/chat"
timeout_secs = 30

# Sent as the Cookie header for endpoints that require a login.
# session_cookie = "${LESSONQUIZ_SESSION_COOKIE}"

pass_threshold = 70
report_settle_ms = 2000
"#;

const EXAMPLE_COURSE: &str = r#"[course]
id = 1
title = "Python Basics"
description = "A first look at Python"

[[modules]]
id = 1
title = "Introduction to Python"
content = "Python is a high-level, general-purpose programming language."
video_url = "https://www.youtube.com/embed/kqtD5dpn9C8"
quiz = '''
[
  {"question": "What is Python?", "options": ["A snake", "A programming language", "A web browser"], "answer": 1},
  {"question": "Who created Python?", "options": ["Guido van Rossum", "Bill Gates", "Linus Torvalds"], "answer": "Guido van Rossum"}
]
'''

[[modules]]
id = 2
title = "Variables and Types"
content = "Variables are names bound to values."
quiz = '''
[
  {"question": "Which is a valid variable name?", "options": ["123var", "$var", "var_123"], "answer": 2}
]
'''

[[modules]]
id = 3
title = "Wrap-up"
content = "Review what you have learned."
"#;
